use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Key, PrivateCookieJar};

use crate::session::{self, FlashLevel, Session};

/// Guard for the protected routes.
///
/// Extraction fails unless the request carries a live session with
/// `logged_in = true`; the rejection flashes an unauthorized notice and
/// redirects to the login page, so the wrapped handler never runs.
#[derive(Debug, Clone)]
pub struct RequireLogin(pub Session);

impl<S> FromRequestParts<S> for RequireLogin
where
    S: Send + Sync,
    Key: FromRef<S>,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = match PrivateCookieJar::from_request_parts(parts, state).await {
            Ok(jar) => jar,
            Err(never) => match never {},
        };

        match session::current(&jar) {
            Some(session) if session.logged_in => Ok(Self(session)),
            _ => {
                let jar = session::flash(jar, FlashLevel::Danger, "Unauthorized, please log in");
                Err((jar, Redirect::to("/login")).into_response())
            }
        }
    }
}
