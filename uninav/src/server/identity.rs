//! Cookie-based session identity.
//!
//! Every request gets a [`SessionKey`] in its extensions. Requests without a
//! usable cookie are issued a new key, sent back in `Set-Cookie`.

use axum::extract::Request;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;

use crate::session::SessionKey;

pub const SESSION_COOKIE: &str = "uninav_session";

pub async fn session_layer(mut request: Request, next: Next) -> Response {
    let existing = session_from_cookies(request.headers());
    let key = existing.clone().unwrap_or_else(SessionKey::generate);
    request.extensions_mut().insert(key.clone());

    let mut response = next.run(request).await;

    if existing.is_none() {
        let cookie = format!("{SESSION_COOKIE}={key}; Path=/; HttpOnly; SameSite=Lax");
        if let Ok(value) = HeaderValue::try_from(cookie) {
            response.headers_mut().append(SET_COOKIE, value);
        }
    }
    response
}

/// `Set-Cookie` value that makes the browser drop its session cookie.
pub fn expired_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

fn session_from_cookies(headers: &HeaderMap) -> Option<SessionKey> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| SessionKey::parse(value))
}
