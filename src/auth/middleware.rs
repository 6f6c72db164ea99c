//! Request guards that keep record pages and endpoints behind a log-in.

use axum::{
    extract::{FromRef, FromRequestParts, Request, State},
    http::{StatusCode, header::SET_COOKIE},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use axum_htmx::HxRedirect;
use time::{Duration, UtcOffset};

use crate::{
    AppState,
    auth::{
        DEFAULT_COOKIE_DURATION, build_log_in_redirect_url,
        cookie::{extend_auth_cookie_duration_if_needed, get_token_from_cookies},
        redirect::build_log_in_redirect_url_from_target,
    },
    endpoints,
    timezone::get_local_offset,
};

/// The state needed by the auth guards.
#[derive(Clone)]
pub struct AuthState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// The duration for which cookies used for authentication are valid.
    pub cookie_duration: Duration,
    /// The local timezone as a canonical timezone name, e.g. "Asia/Jakarta".
    pub local_timezone: String,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            cookie_duration: state.cookie_duration,
            local_timezone: state.local_timezone.clone(),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<AuthState> for Key {
    fn from_ref(state: &AuthState) -> Self {
        state.cookie_key.clone()
    }
}

/// The log-in URL the client should be sent to if their session is missing or
/// invalid, carrying the page they were on so log-in can return them there.
fn log_in_url_for(request: &Request) -> String {
    build_log_in_redirect_url(request).unwrap_or_else(|| {
        tracing::warn!(
            "Could not build a return URL for {}, falling back to the dashboard.",
            request.uri().path()
        );

        build_log_in_redirect_url_from_target(endpoints::DASHBOARD_VIEW)
            .unwrap_or_else(|| endpoints::LOG_IN_VIEW.to_owned())
    })
}

/// Slide the session expiry forward and copy the refreshed cookie headers onto
/// `response`. Leaves the original cookie in place if the token cannot be
/// updated.
fn refresh_session_cookie(
    response: Response,
    jar: PrivateCookieJar,
    local_offset: UtcOffset,
) -> Response {
    let jar =
        match extend_auth_cookie_duration_if_needed(jar.clone(), DEFAULT_COOKIE_DURATION, local_offset) {
            Ok(updated_jar) => updated_jar,
            Err(error) => {
                tracing::error!("Could not extend the session cookie: {error:?}.");
                jar
            }
        };

    let (mut parts, body) = response.into_parts();

    for (name, value) in jar.into_response().headers().iter() {
        if name == SET_COOKIE {
            parts.headers.append(name, value.to_owned());
        }
    }

    Response::from_parts(parts, body)
}

async fn run_guard(
    state: AuthState,
    request: Request,
    next: Next,
    reject: impl Fn(&str) -> Response,
) -> Response {
    let log_in_url = log_in_url_for(&request);

    let Some(local_offset) = get_local_offset(&state.local_timezone) else {
        tracing::error!(
            "Unknown timezone {:?} in the app state. Sending the client to log in.",
            state.local_timezone
        );
        return reject(&log_in_url);
    };

    let (mut parts, body) = request.into_parts();
    let jar = match PrivateCookieJar::from_request_parts(&mut parts, &state).await {
        Ok(jar) => jar,
        Err(error) => {
            tracing::error!("Could not read cookies: {error:?}. Sending the client to log in.");
            return reject(&log_in_url);
        }
    };

    let token = match get_token_from_cookies(&jar) {
        Ok(token) => token,
        Err(_) => return reject(&log_in_url),
    };

    parts.extensions.insert(token.user_id);
    let response = next.run(Request::from_parts(parts, body)).await;

    refresh_session_cookie(response, jar, local_offset)
}

/// Redirect browser requests to the log-in page unless a valid session cookie
/// is present, and slide the session expiry forward on each guarded request.
///
/// Handlers behind this guard receive the logged-in user's ID through
/// `Extension(user_id): Extension<UserID>`, and use it to scope every record
/// query to that user.
pub async fn auth_guard(State(state): State<AuthState>, request: Request, next: Next) -> Response {
    run_guard(state, request, next, |log_in_url| {
        Redirect::to(log_in_url).into_response()
    })
    .await
}

/// The htmx flavour of [auth_guard]: instead of an HTTP redirect, respond with
/// 200 and an `HX-Redirect` header, which htmx follows with a full page
/// navigation.
pub async fn auth_guard_hx(
    State(state): State<AuthState>,
    request: Request,
    next: Next,
) -> Response {
    run_guard(state, request, next, |log_in_url| {
        (HxRedirect(log_in_url.to_owned()), StatusCode::OK).into_response()
    })
    .await
}
