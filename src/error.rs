use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum BlogError {
    #[error("database error: {0}")]
    Database(#[from] SqlxError),

    #[error("template render error: {0}")]
    Render(#[from] minijinja::Error),

    #[error("password hashing error: {0}")]
    Hash(argon2::password_hash::Error),

    #[error("username or email already taken")]
    DuplicateUser,
}

impl From<argon2::password_hash::Error> for BlogError {
    fn from(e: argon2::password_hash::Error) -> Self {
        BlogError::Hash(e)
    }
}

/// Generic failure page. Database and render errors never leak their
/// details to the client; the log line carries them instead.
const FAILURE_PAGE: &str = "<!doctype html>\
<html><head><title>Something went wrong</title></head>\
<body><h1>Something went wrong</h1>\
<p>The server could not complete your request. Please try again later.</p>\
</body></html>";

impl IntoResponse for BlogError {
    fn into_response(self) -> axum::response::Response {
        tracing::error!(error = %self, "request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, Html(FAILURE_PAGE)).into_response()
    }
}
