//! Login session and flash notices, held in private cookies.
//!
//! Both cookies live in the browser, encrypted and signed by the jar key:
//! a tampered or forged value fails authentication inside
//! `PrivateCookieJar` and reads as absent, so it can never yield
//! `logged_in = true`.

use axum_extra::extract::cookie::{Cookie, PrivateCookieJar, SameSite};
use serde::{Deserialize, Serialize};
use time::Duration;

const SESSION_COOKIE: &str = "blog_session";
const FLASH_COOKIE: &str = "blog_flash";

const SESSION_TTL: Duration = Duration::days(7);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub logged_in: bool,
    pub username: String,
}

/// The session carried by the request, if any. A cookie that fails to
/// decrypt or parse counts as no session.
pub fn current(jar: &PrivateCookieJar) -> Option<Session> {
    let cookie = jar.get(SESSION_COOKIE)?;
    serde_json::from_str(cookie.value()).ok()
}

/// Start a session for `username`.
pub fn log_in(jar: PrivateCookieJar, username: &str) -> PrivateCookieJar {
    let session = Session {
        logged_in: true,
        username: username.to_string(),
    };
    // two plain string fields; serialization cannot fail
    let value = serde_json::to_string(&session).unwrap_or_default();
    jar.add(build_cookie(SESSION_COOKIE, value, SESSION_TTL))
}

/// Drop the session.
pub fn log_out(jar: PrivateCookieJar) -> PrivateCookieJar {
    jar.remove(clear_cookie(SESSION_COOKIE))
}

/// Category of a one-shot notice, mirrored into the page as a CSS class.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Danger,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

/// Queue a one-shot notice for the next rendered page.
pub fn flash(jar: PrivateCookieJar, level: FlashLevel, message: &str) -> PrivateCookieJar {
    let flash = Flash {
        level,
        message: message.to_string(),
    };
    let value = serde_json::to_string(&flash).unwrap_or_default();
    jar.add(build_cookie(FLASH_COOKIE, value, Duration::minutes(15)))
}

/// Consume the pending notice, removing its cookie so it renders once.
pub fn take_flash(jar: PrivateCookieJar) -> (PrivateCookieJar, Option<Flash>) {
    let Some(cookie) = jar.get(FLASH_COOKIE) else {
        return (jar, None);
    };
    let flash = serde_json::from_str(cookie.value()).ok();
    (jar.remove(clear_cookie(FLASH_COOKIE)), flash)
}

fn build_cookie(name: &str, value: String, max_age: Duration) -> Cookie<'static> {
    Cookie::build(Cookie::new(name.to_string(), value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(max_age)
        .build()
}

fn clear_cookie(name: &str) -> Cookie<'static> {
    Cookie::build(Cookie::new(name.to_string(), ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}
