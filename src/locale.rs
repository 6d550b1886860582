//! Display locale, carried in a plain client-side cookie.
//!
//! Unlike the session, the locale cookie is neither signed nor
//! encrypted: it only selects which stored translation to show.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

pub const LANG_COOKIE: &str = "blog_lang";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    En,
    Uk,
}

impl Locale {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "en" => Some(Locale::En),
            "uk" => Some(Locale::Uk),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Uk => "uk",
        }
    }
}

/// Cookie that pins the visitor's locale choice.
pub fn locale_cookie(locale: Locale) -> Cookie<'static> {
    Cookie::build((LANG_COOKIE, locale.tag()))
        .path("/")
        .same_site(SameSite::Lax)
        .max_age(Duration::days(365))
        .build()
}

impl<S> FromRequestParts<S> for Locale
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        Ok(jar
            .get(LANG_COOKIE)
            .and_then(|c| Locale::from_name(c.value()))
            .unwrap_or_default())
    }
}
