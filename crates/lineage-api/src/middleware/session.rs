//! Session middleware
//!
//! Resumes the visitor's session from its cookie (or starts one) and places
//! the [`Session`] in the request extensions.

use axum::{
    extract::{Request, State},
    http::{
        header::{COOKIE, SET_COOKIE},
        HeaderMap, HeaderValue,
    },
    middleware::Next,
    response::Response,
};
use lineage_sessions::Session;
use tracing::warn;

use crate::state::AppState;

/// Value of the cookie `name`, if the request sent it
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
}

/// Attach the visitor's session to the request
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let cookie_name = state.config.session.cookie_name.clone();
    let requested = cookie_value(request.headers(), &cookie_name);
    let (session, created) = state.sessions.resume_or_start(requested.as_deref());

    request.extensions_mut().insert(session.clone());
    let mut response = next.run(request).await;

    if created {
        set_cookie(&mut response, &cookie_name, &session);
    }

    response
}

fn set_cookie(response: &mut Response, name: &str, session: &Session) {
    let cookie = format!("{}={}; Path=/; HttpOnly; SameSite=Lax", name, session.id());
    match HeaderValue::from_str(&cookie) {
        Ok(value) => {
            response.headers_mut().append(SET_COOKIE, value);
        }
        Err(e) => warn!("Cannot send session cookie {}: {}", name, e),
    }
}
