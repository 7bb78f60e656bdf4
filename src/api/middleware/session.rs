//! Signed, stateless admin session cookies.
//!
//! The cookie value is `<expires>.<signature>` where `expires` is a Unix
//! timestamp and `signature` is the hex HMAC-SHA256 of it under the server
//! secret. Nothing is stored server side, so a restart keeps sessions valid
//! and rotating `SECRET_KEY` invalidates all of them.

use axum::http::{HeaderMap, header::COOKIE};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Cookie name holding the session.
pub const SESSION_COOKIE: &str = "session";

/// Issues and verifies session cookie values.
#[derive(Clone)]
pub struct SessionSigner {
    key: Vec<u8>,
    max_age_seconds: u64,
}

impl std::fmt::Debug for SessionSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionSigner")
            .field("max_age_seconds", &self.max_age_seconds)
            .finish_non_exhaustive()
    }
}

impl SessionSigner {
    pub fn new(secret: &str, max_age_seconds: u64) -> Self {
        Self {
            key: secret.as_bytes().to_vec(),
            max_age_seconds,
        }
    }

    pub fn max_age_seconds(&self) -> u64 {
        self.max_age_seconds
    }

    fn mac(&self, expires: i64) -> HmacSha256 {
        let mut mac =
            HmacSha256::new_from_slice(&self.key).expect("HMAC accepts any key length");
        mac.update(expires.to_string().as_bytes());
        mac
    }

    /// Issues a session valid for `max_age_seconds` from now.
    pub fn issue(&self) -> String {
        self.issue_at(Utc::now())
    }

    pub fn issue_at(&self, now: DateTime<Utc>) -> String {
        let max_age = i64::try_from(self.max_age_seconds).unwrap_or(i64::MAX);
        let expires = now.timestamp().saturating_add(max_age);
        let signature = hex::encode(self.mac(expires).finalize().into_bytes());

        format!("{expires}.{signature}")
    }

    /// Returns true if `value` carries a valid signature and has not expired.
    pub fn verify(&self, value: &str) -> bool {
        self.verify_at(value, Utc::now())
    }

    pub fn verify_at(&self, value: &str, now: DateTime<Utc>) -> bool {
        let Some((expires, signature)) = value.split_once('.') else {
            return false;
        };
        let Ok(expires) = expires.parse::<i64>() else {
            return false;
        };
        let Ok(signature) = hex::decode(signature) else {
            return false;
        };

        self.mac(expires).verify_slice(&signature).is_ok() && expires > now.timestamp()
    }

    /// `Set-Cookie` value installing `session`.
    pub fn set_cookie(&self, session: &str) -> String {
        format!(
            "{SESSION_COOKIE}={session}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            self.max_age_seconds
        )
    }

    /// `Set-Cookie` value removing the session.
    pub fn clear_cookie() -> String {
        format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
    }

    /// Extracts the session value from the `Cookie` header.
    pub fn from_headers(headers: &HeaderMap) -> Option<&str> {
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|cookie_header| cookie_header.to_str().ok())
            .flat_map(|cookie_str| cookie_str.split(';'))
            .find_map(|cookie| {
                let mut parts = cookie.trim().splitn(2, '=');
                match (parts.next(), parts.next()) {
                    (Some(SESSION_COOKIE), Some(value)) if !value.is_empty() => Some(value),
                    _ => None,
                }
            })
    }

    /// Returns true if the request carries a valid session cookie.
    pub fn is_authenticated(&self, headers: &HeaderMap) -> bool {
        Self::from_headers(headers).is_some_and(|value| self.verify(value))
    }
}
