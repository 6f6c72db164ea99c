//! Dismissable alert boxes rendered into the `#alert-container` element.
//!
//! API endpoints that respond to HTMX requests use these to surface
//! success and error messages without a full page reload.

use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

/// A message to be displayed in the alert container at the top of the page.
pub enum Alert {
    /// Indicates an action completed, with extra detail text.
    #[allow(dead_code)]
    Success {
        /// The main message to display prominently.
        message: String,
        /// Detail text displayed below the main message.
        details: String,
    },
    /// Indicates an action completed.
    SuccessSimple {
        /// The main message to display prominently.
        message: String,
    },
    /// Indicates an action failed, with extra detail text.
    Error {
        /// The main message to display prominently.
        message: String,
        /// Detail text displayed below the main message.
        details: String,
    },
    /// Indicates an action failed.
    ErrorSimple {
        /// The main message to display prominently.
        message: String,
    },
}

const SUCCESS_ALERT_STYLE: &str =
    "flex items-center p-4 mb-4 text-green-800 rounded-lg bg-green-50";
const ERROR_ALERT_STYLE: &str = "flex items-center p-4 mb-4 text-red-800 rounded-lg bg-red-50";
const DISMISS_BUTTON_STYLE: &str = "ms-auto -mx-1.5 -my-1.5 rounded-lg focus:ring-2 p-1.5 \
    inline-flex items-center justify-center h-8 w-8";

impl Alert {
    /// Render the alert as an HTML fragment.
    pub fn into_html(self) -> Markup {
        match self {
            Alert::Success { message, details } => alert_box(SUCCESS_ALERT_STYLE, &message, Some(&details)),
            Alert::SuccessSimple { message } => alert_box(SUCCESS_ALERT_STYLE, &message, None),
            Alert::Error { message, details } => alert_box(ERROR_ALERT_STYLE, &message, Some(&details)),
            Alert::ErrorSimple { message } => alert_box(ERROR_ALERT_STYLE, &message, None),
        }
    }
}

fn alert_box(style: &str, message: &str, details: Option<&str>) -> Markup {
    html! {
        div #alert-container hx-swap-oob="true" {
            div .(style) role="alert" {
                div {
                    p .font-medium { (message) }
                    @if let Some(details) = details {
                        p .text-sm { (details) }
                    }
                }
                button .(DISMISS_BUTTON_STYLE)
                    type="button"
                    aria-label="Close"
                    onclick="this.closest('[role=alert]').remove()"
                {
                    span .sr-only { "Close" }
                    "✕"
                }
            }
        }
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        self.into_html().into_response()
    }
}

#[cfg(test)]
mod alert_tests {
    use super::Alert;

    use crate::test_utils::parse_html_fragment;

    #[test]
    fn success_alert_contains_message_and_details() {
        let alert = Alert::Success {
            message: "Record saved".to_owned(),
            details: "The totals have been updated.".to_owned(),
        };

        let fragment = parse_html_fragment(&alert.into_html().into_string());

        let text = fragment.root_element().text().collect::<String>();
        assert!(text.contains("Record saved"));
        assert!(text.contains("The totals have been updated."));
    }

    #[test]
    fn error_alert_targets_alert_container() {
        let alert = Alert::ErrorSimple {
            message: "Something went wrong".to_owned(),
        };

        let html_text = alert.into_html().into_string();

        assert!(html_text.contains("id=\"alert-container\""));
        assert!(html_text.contains("hx-swap-oob"));
        assert!(html_text.contains("Something went wrong"));
    }
}
