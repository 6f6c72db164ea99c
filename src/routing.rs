//! Application router configuration with protected and unprotected route definitions.

use axum::{
    Router, middleware,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use maud::html;
use tower_http::services::ServeDir;

use crate::{
    AppState,
    auth::{
        auth_guard, auth_guard_hx, get_forgot_password_page, get_log_in_page, get_log_out,
        get_register_page, post_log_in, register_user,
    },
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, LINK_STYLE, base},
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    record::{
        create_record_endpoint, delete_record_endpoint, get_dashboard_page, get_edit_record_page,
        get_new_record_page, update_record_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let unprotected_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::LOG_IN_VIEW, get(get_log_in_page))
        .route(endpoints::LOG_IN_API, post(post_log_in))
        .route(endpoints::LOG_OUT, get(get_log_out))
        .route(endpoints::REGISTER_VIEW, get(get_register_page))
        .route(
            endpoints::FORGOT_PASSWORD_VIEW,
            get(get_forgot_password_page),
        )
        .route(endpoints::USERS, post(register_user))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    let protected_routes = Router::new()
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::NEW_RECORD_VIEW, get(get_new_record_page))
        .route(endpoints::EDIT_RECORD_VIEW, get(get_edit_record_page))
        .layer(middleware::from_fn_with_state(state.clone(), auth_guard));

    // These POST/PUT/DELETE routes need to use the HX-REDIRECT header for auth redirects to work properly for HTMX requests.
    let protected_routes = protected_routes.merge(
        Router::new()
            .route(endpoints::RECORDS_API, post(create_record_endpoint))
            .route(endpoints::PUT_RECORD, put(update_record_endpoint))
            .route(endpoints::DELETE_RECORD, delete(delete_record_endpoint))
            .layer(middleware::from_fn_with_state(state.clone(), auth_guard_hx)),
    );

    protected_routes
        .merge(unprotected_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The public landing page at '/'.
async fn get_index_page() -> Response {
    let content = html! {
        main class="flex min-h-screen flex-col items-center justify-center gap-6 px-4 text-center"
        {
            h1 class="text-3xl font-bold" { "Rekap Harian" }

            p class="max-w-md text-gray-600 dark:text-gray-400"
            {
                "Record each day's transfer and shift takings, and reconcile \
                them against the system total."
            }

            div class="flex items-center gap-6"
            {
                a href=(endpoints::LOG_IN_VIEW) class=(BUTTON_PRIMARY_STYLE) { "Log in" }
                a href=(endpoints::REGISTER_VIEW) class=(LINK_STYLE) { "Create an account" }
            }

            a href=(endpoints::DASHBOARD_VIEW) class=(LINK_STYLE) { "Go to your dashboard" }
        }
    };

    base("Rekap Harian", &[], &content).into_response()
}
