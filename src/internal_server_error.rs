//! The internal server error page and route handlers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::Markup;

use crate::{endpoints, html::error_view};

/// Describes an unexpected error and what, if anything, the user can do
/// about it.
pub struct InternalServerError {
    /// A short description of what went wrong.
    pub description: String,
    /// A suggestion for how the user can recover.
    pub fix: String,
}

impl Default for InternalServerError {
    fn default() -> Self {
        Self {
            description: "An unexpected error occurred.".to_owned(),
            fix: "Try again in a few moments. If the problem persists, contact the site admin."
                .to_owned(),
        }
    }
}

impl InternalServerError {
    fn into_html(self) -> Markup {
        error_view("Internal Server Error", "500", &self.description, &self.fix)
    }
}

impl IntoResponse for InternalServerError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, self.into_html()).into_response()
    }
}

/// The route handler for the internal server error page.
pub async fn get_internal_server_error_page() -> Response {
    InternalServerError::default().into_response()
}

/// Redirects an HTMX request to the internal server error page.
pub fn get_internal_server_error_redirect() -> Response {
    (
        HxRedirect(endpoints::INTERNAL_ERROR_VIEW.to_owned()),
        StatusCode::INTERNAL_SERVER_ERROR,
    )
        .into_response()
}
