//! The 404 not found page and route handler.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::Markup;

use crate::html::error_view;

/// Indicates that the requested resource could not be found.
pub struct NotFoundError;

impl NotFoundError {
    fn into_html(self) -> Markup {
        error_view(
            "Not Found",
            "404",
            "The page or record you were looking for does not exist.",
            "Check the address for typos, or head back to your dashboard.",
        )
    }
}

impl IntoResponse for NotFoundError {
    fn into_response(self) -> Response {
        (StatusCode::NOT_FOUND, self.into_html()).into_response()
    }
}

/// The fallback route handler for requests that match no other route.
pub async fn get_404_not_found() -> Response {
    NotFoundError.into_response()
}
