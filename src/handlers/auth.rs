//! Registration, login, and logout.

use std::collections::BTreeMap;

use axum::Form;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::PrivateCookieJar;
use minijinja::context;
use serde::Deserialize;
use tracing::info;
use validator::Validate;

use crate::auth;
use crate::error::BlogError;
use crate::forms::{RegisterForm, field_errors};
use crate::locale::Locale;
use crate::router::AppState;
use crate::session::{self, FlashLevel};

pub async fn register_form(
    State(state): State<AppState>,
    locale: Locale,
    jar: PrivateCookieJar,
) -> Result<impl IntoResponse, BlogError> {
    let (jar, flash) = session::take_flash(jar);
    let page = state.renderer.render(
        "register.html",
        context! { flash, lang => locale.tag(), values => context! {}, errors => context! {} },
    )?;
    Ok((jar, page))
}

pub async fn register(
    State(state): State<AppState>,
    locale: Locale,
    jar: PrivateCookieJar,
    Form(form): Form<RegisterForm>,
) -> Result<Response, BlogError> {
    if let Err(errors) = form.validate() {
        let page = render_register(&state, locale, &form, &field_errors(&errors))?;
        return Ok(page.into_response());
    }

    let digest = auth::hash(&form.password)?;
    match state
        .db
        .create_user(&form.name, &form.email, &form.username, &digest)
        .await
    {
        Ok(()) => {
            info!(username = %form.username, "user registered");
            let jar = session::flash(
                jar,
                FlashLevel::Success,
                "You are now registered and can log in",
            );
            Ok((jar, Redirect::to("/login")).into_response())
        }
        Err(BlogError::DuplicateUser) => {
            let mut errors = BTreeMap::new();
            errors.insert(
                "username".to_string(),
                vec!["Username or email already taken".to_string()],
            );
            let page = render_register(&state, locale, &form, &errors)?;
            Ok(page.into_response())
        }
        Err(e) => Err(e),
    }
}

fn render_register(
    state: &AppState,
    locale: Locale,
    form: &RegisterForm,
    errors: &BTreeMap<String, Vec<String>>,
) -> Result<Html<String>, BlogError> {
    // passwords are never echoed back into the form
    state.renderer.render(
        "register.html",
        context! {
            lang => locale.tag(),
            values => context! {
                name => form.name,
                username => form.username,
                email => form.email,
            },
            errors,
        },
    )
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

pub async fn login_form(
    State(state): State<AppState>,
    locale: Locale,
    jar: PrivateCookieJar,
) -> Result<impl IntoResponse, BlogError> {
    let (jar, flash) = session::take_flash(jar);
    let page = state
        .renderer
        .render("login.html", context! { flash, lang => locale.tag() })?;
    Ok((jar, page))
}

/// Three-way branch: unknown username, bad password, or success.
pub async fn login(
    State(state): State<AppState>,
    locale: Locale,
    jar: PrivateCookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, BlogError> {
    let Some(user) = state.db.find_user(&form.username).await? else {
        let page = render_login_error(&state, locale, "Username not found")?;
        return Ok(page.into_response());
    };

    if !auth::verify(&form.password, &user.password_hash) {
        let page = render_login_error(&state, locale, "Invalid login")?;
        return Ok(page.into_response());
    }

    info!(username = %user.username, "user logged in");
    let jar = session::log_in(jar, &user.username);
    let jar = session::flash(jar, FlashLevel::Success, "You are now logged in");
    Ok((jar, Redirect::to("/dashboard")).into_response())
}

fn render_login_error(
    state: &AppState,
    locale: Locale,
    error: &str,
) -> Result<Html<String>, BlogError> {
    state
        .renderer
        .render("login.html", context! { lang => locale.tag(), error })
}

pub async fn logout(jar: PrivateCookieJar) -> impl IntoResponse {
    let jar = session::log_out(jar);
    let jar = session::flash(jar, FlashLevel::Success, "You are now logged out");
    (jar, Redirect::to("/login"))
}
