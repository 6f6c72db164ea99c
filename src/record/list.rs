//! Dashboard page listing the user's daily records.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    auth::UserID,
    endpoints,
    html::{
        LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        base, edit_delete_action_links, format_date_indonesian, format_rupiah,
        format_rupiah_difference,
    },
    navigation::NavBar,
    record::{DailyRecord, get_all_records},
};

/// The state needed for the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardPageState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DashboardPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A record with its formatted edit URL for template rendering.
#[derive(Debug, Clone)]
struct RecordWithEditUrl {
    pub record: DailyRecord,
    pub edit_url: String,
}

/// Render the dashboard listing the signed-in user's daily records,
/// newest first.
pub async fn get_dashboard_page(
    Extension(user_id): Extension<UserID>,
    State(state): State<DashboardPageState>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let records = get_all_records(user_id, &connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve records: {error}"))?;

    let records_with_edit_urls = records
        .into_iter()
        .map(|record| RecordWithEditUrl {
            edit_url: endpoints::format_endpoint(endpoints::EDIT_RECORD_VIEW, record.id),
            record,
        })
        .collect::<Vec<_>>();

    Ok(dashboard_view(&records_with_edit_urls).into_response())
}

fn difference_style(difference: i64) -> &'static str {
    if difference > 0 {
        "text-green-600 dark:text-green-400 tabular-nums"
    } else if difference < 0 {
        "text-red-600 dark:text-red-400 tabular-nums"
    } else {
        "tabular-nums"
    }
}

fn delete_confirm_message(record: &DailyRecord) -> String {
    format!(
        "Are you sure you want to delete the record for {}?",
        format_date_indonesian(record.date)
    )
}

fn dashboard_view(records: &[RecordWithEditUrl]) -> Markup {
    let new_record_route = endpoints::NEW_RECORD_VIEW;
    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW).into_html();

    let table_row = |record_with_url: &RecordWithEditUrl| {
        let record = &record_with_url.record;
        let delete_url = endpoints::format_endpoint(endpoints::DELETE_RECORD, record.id);

        html!(
            tr class=(TABLE_ROW_STYLE)
            {
                td class=(TABLE_CELL_STYLE)
                {
                    (format_date_indonesian(record.date))
                }

                td class=(TABLE_CELL_STYLE) { (format_rupiah(record.transfer_amount)) }
                td class=(TABLE_CELL_STYLE) { (format_rupiah(record.afternoon_shift_amount)) }
                td class=(TABLE_CELL_STYLE) { (format_rupiah(record.night_shift_amount)) }

                td class=(TABLE_CELL_STYLE)
                {
                    span class="font-semibold" { (format_rupiah(record.total())) }
                }

                td class=(TABLE_CELL_STYLE) { (format_rupiah(record.system_amount)) }

                td class=(TABLE_CELL_STYLE)
                {
                    span class=(difference_style(record.difference()))
                    {
                        (format_rupiah_difference(record.difference()))
                    }
                }

                td class=(TABLE_CELL_STYLE)
                {
                    div class="flex gap-4"
                    {
                        (edit_delete_action_links(
                            &record_with_url.edit_url,
                            &delete_url,
                            &delete_confirm_message(record),
                            "closest tr",
                            "delete",
                        ))
                    }
                }
            }
        )
    };

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4"
            {
                header class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-xl font-bold" { "Daily Records" }

                    a href=(new_record_route) class=(LINK_STYLE)
                    {
                        "New Record"
                    }
                }

                (record_cards_view(records, new_record_route))

                section class="hidden lg:block dark:bg-gray-800 lg:max-w-5xl lg:w-full lg:mx-auto"
                {
                    table class="w-full text-sm text-left rtl:text-right
                        text-gray-500 dark:text-gray-400"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Transfer" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Afternoon Shift" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Night Shift" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Total" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "System" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Difference" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                            }
                        }

                        tbody
                        {
                            @for record_with_url in records {
                                (table_row(record_with_url))
                            }

                            @if records.is_empty() {
                                tr
                                {
                                    td
                                        colspan="8"
                                        class="px-6 py-4 text-center
                                            text-gray-500 dark:text-gray-400"
                                    {
                                        "No records yet. "
                                        a href=(new_record_route) class=(LINK_STYLE)
                                        {
                                            "Record your first day"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    );

    base("Dashboard", &[], &content)
}

fn record_cards_view(records: &[RecordWithEditUrl], new_record_route: &str) -> Markup {
    html!(
        ul class="lg:hidden space-y-4"
        {
            @for record_with_url in records {
                @let record = &record_with_url.record;
                @let delete_url =
                    endpoints::format_endpoint(endpoints::DELETE_RECORD, record.id);

                li class="rounded border border-gray-200 bg-white px-4 py-3 shadow-sm dark:border-gray-700 dark:bg-gray-800"
                    data-record-card="true"
                {
                    div class="flex items-start justify-between gap-3"
                    {
                        span class="font-medium text-gray-900 dark:text-white"
                        {
                            (format_date_indonesian(record.date))
                        }
                        span class={ "text-sm " (difference_style(record.difference())) }
                        {
                            (format_rupiah_difference(record.difference()))
                        }
                    }

                    dl class="mt-2 grid grid-cols-2 gap-x-4 gap-y-1 text-sm"
                    {
                        dt { "Transfer" }
                        dd class="text-right tabular-nums" { (format_rupiah(record.transfer_amount)) }
                        dt { "Afternoon Shift" }
                        dd class="text-right tabular-nums" { (format_rupiah(record.afternoon_shift_amount)) }
                        dt { "Night Shift" }
                        dd class="text-right tabular-nums" { (format_rupiah(record.night_shift_amount)) }
                        dt class="font-semibold" { "Total" }
                        dd class="text-right font-semibold tabular-nums" { (format_rupiah(record.total())) }
                        dt { "System" }
                        dd class="text-right tabular-nums" { (format_rupiah(record.system_amount)) }
                    }

                    div class="mt-2 flex items-center gap-4 text-sm"
                    {
                        (edit_delete_action_links(
                            &record_with_url.edit_url,
                            &delete_url,
                            &delete_confirm_message(record),
                            "closest [data-record-card='true']",
                            "outerHTML",
                        ))
                    }
                }
            }

            @if records.is_empty() {
                li class="rounded border border-dashed border-gray-300 bg-white px-4 py-6 text-center text-sm text-gray-500 dark:border-gray-700 dark:bg-gray-800 dark:text-gray-400"
                {
                    "No records yet. "
                    a href=(new_record_route) class=(LINK_STYLE)
                    {
                        "Record your first day"
                    }
                }
            }
        }
    )
}

#[cfg(test)]
mod dashboard_page_tests {
    use std::sync::{Arc, Mutex};

    use axum::{Extension, extract::State, http::StatusCode};
    use rusqlite::Connection;
    use scraper::Selector;
    use time::macros::date;

    use crate::{
        auth::{UserID, create_user_table},
        endpoints,
        record::{
            create_daily_record_table, create_record, domain::RecordFormData, get_dashboard_page,
            list::DashboardPageState,
        },
        test_utils::{assert_valid_html, get_body_text, parse_html_document},
    };

    fn get_dashboard_state() -> DashboardPageState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        create_user_table(&connection).expect("Could not create user table");
        create_daily_record_table(&connection).expect("Could not create daily record table");
        connection
            .execute(
                "INSERT INTO user (email, password) VALUES ('test@test.com', 'hash')",
                (),
            )
            .expect("Could not insert test user");

        DashboardPageState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    #[tokio::test]
    async fn empty_dashboard_links_to_new_record_page() {
        let state = get_dashboard_state();

        let response = get_dashboard_page(Extension(UserID::new(1)), State(state))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let text = get_body_text(response).await;
        let html = parse_html_document(&text);
        assert_valid_html(&html);

        assert!(text.contains("No records yet."));
        let selector =
            Selector::parse(&format!("a[href='{}']", endpoints::NEW_RECORD_VIEW)).unwrap();
        assert!(html.select(&selector).next().is_some());
    }

    #[tokio::test]
    async fn dashboard_shows_formatted_record_row() {
        let state = get_dashboard_state();
        let form = RecordFormData {
            date: date!(2025 - 08 - 30),
            transfer_amount: 150_000,
            afternoon_shift_amount: 250_000,
            night_shift_amount: 300_000,
            system_amount: 680_000,
        };
        create_record(UserID::new(1), &form, &state.db_connection.lock().unwrap())
            .expect("Could not create test record");

        let response = get_dashboard_page(Extension(UserID::new(1)), State(state))
            .await
            .unwrap();

        let text = get_body_text(response).await;
        let html = parse_html_document(&text);
        assert_valid_html(&html);

        assert!(text.contains("Sabtu, 30 Agustus 2025"));
        assert!(text.contains("Rp 150.000"));
        // Total of the three takings columns.
        assert!(text.contains("Rp 700.000"));
        // Surplus over the system amount.
        assert!(text.contains("+Rp 20.000"));
    }

    #[tokio::test]
    async fn dashboard_omits_other_users_records() {
        let state = get_dashboard_state();
        state
            .db_connection
            .lock()
            .unwrap()
            .execute(
                "INSERT INTO user (email, password) VALUES ('other@test.com', 'hash')",
                (),
            )
            .expect("Could not insert second test user");
        let form = RecordFormData {
            date: date!(2025 - 08 - 30),
            transfer_amount: 150_000,
            afternoon_shift_amount: 250_000,
            night_shift_amount: 300_000,
            system_amount: 680_000,
        };
        create_record(UserID::new(2), &form, &state.db_connection.lock().unwrap())
            .expect("Could not create test record");

        let response = get_dashboard_page(Extension(UserID::new(1)), State(state))
            .await
            .unwrap();

        let text = get_body_text(response).await;
        assert!(text.contains("No records yet."));
    }

    #[tokio::test]
    async fn dashboard_lists_newest_record_first() {
        let state = get_dashboard_state();
        for day in [28, 30, 29] {
            let form = RecordFormData {
                date: date!(2025 - 08 - 01).replace_day(day).unwrap(),
                transfer_amount: 100_000,
                afternoon_shift_amount: 0,
                night_shift_amount: 0,
                system_amount: 100_000,
            };
            create_record(UserID::new(1), &form, &state.db_connection.lock().unwrap())
                .expect("Could not create test record");
        }

        let response = get_dashboard_page(Extension(UserID::new(1)), State(state))
            .await
            .unwrap();

        let text = get_body_text(response).await;
        let first = text.find("30 Agustus 2025").expect("missing newest record");
        let second = text.find("29 Agustus 2025").expect("missing middle record");
        let third = text.find("28 Agustus 2025").expect("missing oldest record");
        assert!(first < second && second < third);
    }
}
