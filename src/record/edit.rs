//! Record editing page and endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Extension, Form,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    auth::UserID,
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, base, rupiah_input_styles},
    navigation::NavBar,
    record::{
        domain::{DailyRecord, RecordFormData, RecordId},
        form::{RecordFormDefaults, record_form_fields},
        get_record, update_record,
    },
    timezone::{get_local_offset, local_date_today},
};

/// The state needed for the edit record page.
#[derive(Debug, Clone)]
pub struct EditRecordPageState {
    pub db_connection: Arc<Mutex<Connection>>,
    pub local_timezone: String,
}

impl FromRef<AppState> for EditRecordPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The state needed for updating a record.
#[derive(Debug, Clone)]
pub struct UpdateRecordEndpointState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for UpdateRecordEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the record editing page.
pub async fn get_edit_record_page(
    Path(record_id): Path<RecordId>,
    Extension(user_id): Extension<UserID>,
    State(state): State<EditRecordPageState>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let local_offset = get_local_offset(&state.local_timezone).ok_or_else(|| {
        tracing::error!(
            "could not get local time offset from timezone {}",
            &state.local_timezone
        );
        Error::InvalidTimezoneError(state.local_timezone.clone())
    })?;
    let today = local_date_today(local_offset);

    let edit_endpoint = endpoints::format_endpoint(endpoints::EDIT_RECORD_VIEW, record_id);
    let update_endpoint = endpoints::format_endpoint(endpoints::PUT_RECORD, record_id);

    match get_record(record_id, user_id, &connection) {
        Ok(record) => {
            let defaults = record_form_defaults(&record, today);

            Ok(edit_record_view(&edit_endpoint, &update_endpoint, &defaults, "").into_response())
        }
        Err(error) => {
            let error_message = match error {
                Error::NotFound => "Record not found",
                _ => {
                    tracing::error!("Failed to retrieve record {record_id}: {error}");
                    "Failed to load record"
                }
            };

            let defaults = RecordFormDefaults {
                date: today,
                max_date: today,
                transfer_amount: None,
                afternoon_shift_amount: None,
                night_shift_amount: None,
                system_amount: None,
            };

            Ok(
                edit_record_view(&edit_endpoint, &update_endpoint, &defaults, error_message)
                    .into_response(),
            )
        }
    }
}

/// Handle record update form submission.
pub async fn update_record_endpoint(
    Path(record_id): Path<RecordId>,
    Extension(user_id): Extension<UserID>,
    State(state): State<UpdateRecordEndpointState>,
    Form(form): Form<RecordFormData>,
) -> Response {
    if let Err(error) = form.validate() {
        return error.into_alert_response();
    }

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match update_record(record_id, user_id, &form, &connection) {
        Ok(_) => (
            HxRedirect(endpoints::DASHBOARD_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(Error::UpdateMissingRecord) => Error::UpdateMissingRecord.into_alert_response(),
        Err(error @ Error::DuplicateRecordDate) => error.into_alert_response(),
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while updating record {record_id}: {error}"
            );
            error.into_alert_response()
        }
    }
}

fn record_form_defaults(record: &DailyRecord, today: time::Date) -> RecordFormDefaults {
    RecordFormDefaults {
        date: record.date,
        max_date: today,
        transfer_amount: Some(record.transfer_amount),
        afternoon_shift_amount: Some(record.afternoon_shift_amount),
        night_shift_amount: Some(record.night_shift_amount),
        system_amount: Some(record.system_amount),
    }
}

fn edit_record_view(
    edit_endpoint: &str,
    update_endpoint: &str,
    defaults: &RecordFormDefaults,
    error_message: &str,
) -> Markup {
    let nav_bar = NavBar::new(edit_endpoint).into_html();
    let form = edit_record_form_view(update_endpoint, defaults, error_message);

    let content = html! {
        (nav_bar)
        div class=(FORM_CONTAINER_STYLE) { (form) }
    };

    base("Edit Record", &[rupiah_input_styles()], &content)
}

fn edit_record_form_view(
    update_endpoint: &str,
    defaults: &RecordFormDefaults,
    error_message: &str,
) -> Markup {
    html! {
        form
            hx-put=(update_endpoint)
            hx-target-error="#alert-container"
            class="w-full space-y-4 md:space-y-6"
        {
            (record_form_fields(defaults))

            @if !error_message.is_empty() {
                p class="text-red-600 dark:text-red-400"
                {
                    (error_message)
                }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Update Record" }
        }
    }
}
