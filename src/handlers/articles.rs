//! Article management behind the login gate, plus locale switching.

use std::collections::BTreeMap;

use axum::Form;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{CookieJar, PrivateCookieJar};
use minijinja::context;
use tracing::info;
use validator::Validate;

use crate::db::ArticleDraft;
use crate::error::BlogError;
use crate::forms::{ArticleForm, field_errors};
use crate::handlers::article_view;
use crate::locale::{self, Locale};
use crate::middleware::RequireLogin;
use crate::router::AppState;
use crate::session::{self, FlashLevel};

pub async fn dashboard(
    RequireLogin(session): RequireLogin,
    State(state): State<AppState>,
    locale: Locale,
    jar: PrivateCookieJar,
) -> Result<impl IntoResponse, BlogError> {
    let articles = state.db.list_articles().await?;
    let (jar, flash) = session::take_flash(jar);

    let rows: Vec<_> = articles.iter().map(|a| article_view(a, locale)).collect();
    let msg = rows.is_empty().then_some("Articles not found");
    let page = state.renderer.render(
        "dashboard.html",
        context! {
            flash,
            lang => locale.tag(),
            username => session.username,
            articles => rows,
            msg,
        },
    )?;
    Ok((jar, page))
}

pub async fn add_article_form(
    RequireLogin(_session): RequireLogin,
    State(state): State<AppState>,
    locale: Locale,
    jar: PrivateCookieJar,
) -> Result<impl IntoResponse, BlogError> {
    let (jar, flash) = session::take_flash(jar);
    let page = state.renderer.render(
        "add_article.html",
        context! { flash, lang => locale.tag(), values => context! {}, errors => context! {} },
    )?;
    Ok((jar, page))
}

pub async fn add_article(
    RequireLogin(session): RequireLogin,
    State(state): State<AppState>,
    locale: Locale,
    jar: PrivateCookieJar,
    Form(form): Form<ArticleForm>,
) -> Result<Response, BlogError> {
    if let Err(errors) = form.validate() {
        let page = render_article_form(
            &state,
            locale,
            "add_article.html",
            &form,
            &field_errors(&errors),
            None,
        )?;
        return Ok(page.into_response());
    }

    let draft = ArticleDraft::from(form);
    // authorship comes from the session, not the submitted form
    state.db.create_article(&draft, &session.username).await?;
    info!(author = %session.username, "article created");

    let jar = session::flash(jar, FlashLevel::Success, "Article created");
    Ok((jar, Redirect::to("/dashboard")).into_response())
}

pub async fn edit_article_form(
    RequireLogin(_session): RequireLogin,
    State(state): State<AppState>,
    locale: Locale,
    jar: PrivateCookieJar,
    Path(id): Path<i64>,
) -> Result<Response, BlogError> {
    let (jar, flash) = session::take_flash(jar);

    let Some(article) = state.db.get_article(id).await? else {
        let page = state
            .renderer
            .render("not_found.html", context! { flash, lang => locale.tag() })?;
        return Ok((StatusCode::NOT_FOUND, jar, page).into_response());
    };

    let page = state.renderer.render(
        "edit_article.html",
        context! {
            flash,
            lang => locale.tag(),
            id,
            values => context! {
                title => article.title,
                title_uk => article.title_uk,
                body => article.body,
                body_uk => article.body_uk,
            },
            errors => context! {},
        },
    )?;
    Ok((jar, page).into_response())
}

pub async fn edit_article(
    RequireLogin(_session): RequireLogin,
    State(state): State<AppState>,
    locale: Locale,
    jar: PrivateCookieJar,
    Path(id): Path<i64>,
    Form(form): Form<ArticleForm>,
) -> Result<Response, BlogError> {
    if let Err(errors) = form.validate() {
        let page = render_article_form(
            &state,
            locale,
            "edit_article.html",
            &form,
            &field_errors(&errors),
            Some(id),
        )?;
        return Ok(page.into_response());
    }

    let draft = ArticleDraft::from(form);
    state.db.update_article(id, &draft).await?;
    info!(id, "article updated");

    let jar = session::flash(jar, FlashLevel::Success, "Article updated");
    Ok((jar, Redirect::to("/dashboard")).into_response())
}

pub async fn delete_article(
    RequireLogin(_session): RequireLogin,
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Path(id): Path<i64>,
) -> Result<Response, BlogError> {
    state.db.delete_article(id).await?;
    info!(id, "article deleted");

    let jar = session::flash(jar, FlashLevel::Success, "Article deleted");
    Ok((jar, Redirect::to("/dashboard")).into_response())
}

/// Pin the visitor's locale in a plain cookie and send them home.
/// Unknown locale names just redirect without setting anything.
pub async fn change_language(Path(name): Path<String>, jar: CookieJar) -> impl IntoResponse {
    let jar = match Locale::from_name(&name) {
        Some(locale) => jar.add(locale::locale_cookie(locale)),
        None => jar,
    };
    (jar, Redirect::to("/"))
}

fn render_article_form(
    state: &AppState,
    locale: Locale,
    template: &str,
    form: &ArticleForm,
    errors: &BTreeMap<String, Vec<String>>,
    id: Option<i64>,
) -> Result<Html<String>, BlogError> {
    state.renderer.render(
        template,
        context! {
            lang => locale.tag(),
            id,
            values => context! {
                title => form.title,
                title_uk => form.title_uk,
                body => form.body,
                body_uk => form.body_uk,
            },
            errors,
        },
    )
}
