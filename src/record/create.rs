//! Record creation page and endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Extension, Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use rusqlite::Connection;
use time::Date;

use crate::{
    AppState, Error,
    auth::UserID,
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, base, rupiah_input_styles},
    navigation::NavBar,
    record::{
        create_record,
        domain::RecordFormData,
        form::{RecordFormDefaults, record_form_fields},
    },
    timezone::{get_local_offset, local_date_today},
};

/// The state needed for rendering the new record page.
#[derive(Debug, Clone)]
pub struct NewRecordPageState {
    pub local_timezone: String,
}

impl FromRef<AppState> for NewRecordPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The state needed for creating a record.
#[derive(Debug, Clone)]
pub struct CreateRecordEndpointState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateRecordEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the page for recording a new day's takings.
pub async fn get_new_record_page(
    State(state): State<NewRecordPageState>,
) -> Result<Response, Error> {
    let local_offset = get_local_offset(&state.local_timezone).ok_or_else(|| {
        tracing::error!(
            "could not get local time offset from timezone {}",
            &state.local_timezone
        );
        Error::InvalidTimezoneError(state.local_timezone)
    })?;
    let today = local_date_today(local_offset);

    Ok(new_record_view(today).into_response())
}

/// Handle record creation form submission.
pub async fn create_record_endpoint(
    State(state): State<CreateRecordEndpointState>,
    Extension(user_id): Extension<UserID>,
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

    match create_record(user_id, &form, &connection) {
        Ok(_) => (
            HxRedirect(endpoints::DASHBOARD_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error @ Error::DuplicateRecordDate) => error.into_alert_response(),
        Err(error) => {
            tracing::error!("An unexpected error occurred while creating a record: {error}");

            error.into_alert_response()
        }
    }
}

fn new_record_view(today: Date) -> Markup {
    let nav_bar = NavBar::new(endpoints::NEW_RECORD_VIEW).into_html();
    let form = new_record_form_view(today);

    let content = html! {
        (nav_bar)
        div class=(FORM_CONTAINER_STYLE) { (form) }
    };

    base("New Record", &[rupiah_input_styles()], &content)
}

fn new_record_form_view(today: Date) -> Markup {
    let defaults = RecordFormDefaults {
        date: today,
        max_date: today,
        transfer_amount: None,
        afternoon_shift_amount: None,
        night_shift_amount: None,
        system_amount: None,
    };

    html! {
        form
            hx-post=(endpoints::RECORDS_API)
            hx-target-error="#alert-container"
            class="w-full space-y-4 md:space-y-6"
        {
            (record_form_fields(&defaults))

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Save Record" }
        }
    }
}
