//! Session cookie handling.

use axum::http::{header::SET_COOKIE, HeaderMap, HeaderValue};
use axum_extra::extract::cookie::CookieJar;
use chrono::{DateTime, Utc};

use crate::auth::Session;
use crate::config::SessionConfig;
use crate::web::error::ApiError;

const COOKIE_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";
const EPOCH_COOKIE_DATE: &str = "Thu, 01 Jan 1970 00:00:00 GMT";

/// Attributes of the session cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookie {
    /// Cookie name.
    pub name: String,
    /// Whether to add `Secure`.
    pub secure: bool,
    /// `SameSite` value; omitted when empty.
    pub same_site: String,
}

impl Default for SessionCookie {
    fn default() -> Self {
        Self::from(&SessionConfig::default())
    }
}

impl From<&SessionConfig> for SessionCookie {
    fn from(config: &SessionConfig) -> Self {
        Self {
            name: config.cookie_name.clone(),
            secure: config.cookie_secure,
            same_site: config.cookie_same_site.clone(),
        }
    }
}

impl SessionCookie {
    /// Read the session token from the request's `Cookie` headers.
    pub fn read(&self, headers: &HeaderMap) -> Option<String> {
        CookieJar::from_headers(headers)
            .get(&self.name)
            .map(|cookie| cookie.value().to_string())
            .filter(|token| !token.is_empty())
    }

    /// `Set-Cookie` value carrying the session token until it expires.
    pub fn set_value(&self, session: &Session) -> String {
        self.render(&session.token, &format_cookie_date(session.expires_at), None)
    }

    /// `Set-Cookie` value that clears the session cookie.
    pub fn clear_value(&self) -> String {
        self.render("", EPOCH_COOKIE_DATE, Some(0))
    }

    /// Append a session cookie to the response headers.
    pub fn set(&self, headers: &mut HeaderMap, session: &Session) -> Result<(), ApiError> {
        append(headers, self.set_value(session))
    }

    /// Append a clearing cookie to the response headers.
    pub fn clear(&self, headers: &mut HeaderMap) -> Result<(), ApiError> {
        append(headers, self.clear_value())
    }

    fn render(&self, value: &str, expires: &str, max_age: Option<i64>) -> String {
        let mut cookie = format!(
            "{}={}; Expires={}; Path=/; HttpOnly",
            self.name, value, expires
        );
        if let Some(max_age) = max_age {
            cookie.push_str(&format!("; Max-Age={max_age}"));
        }
        if self.secure {
            cookie.push_str("; Secure");
        }
        if !self.same_site.is_empty() {
            cookie.push_str(&format!("; SameSite={}", self.same_site));
        }
        cookie
    }
}

fn format_cookie_date(at: DateTime<Utc>) -> String {
    at.format(COOKIE_DATE_FORMAT).to_string()
}

fn append(headers: &mut HeaderMap, cookie: String) -> Result<(), ApiError> {
    let value = HeaderValue::from_str(&cookie).map_err(|e| {
        tracing::error!("Invalid Set-Cookie value: {}", e);
        ApiError::internal("Failed to set cookie")
    })?;
    headers.append(SET_COOKIE, value);
    Ok(())
}
