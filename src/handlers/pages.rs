//! Public, read-only pages.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::PrivateCookieJar;
use minijinja::context;

use crate::error::BlogError;
use crate::handlers::article_view;
use crate::locale::Locale;
use crate::router::AppState;
use crate::session;

pub async fn index(
    State(state): State<AppState>,
    locale: Locale,
    jar: PrivateCookieJar,
) -> Result<impl IntoResponse, BlogError> {
    let (jar, flash) = session::take_flash(jar);
    let page = state
        .renderer
        .render("home.html", context! { flash, lang => locale.tag() })?;
    Ok((jar, page))
}

pub async fn about(
    State(state): State<AppState>,
    locale: Locale,
    jar: PrivateCookieJar,
) -> Result<impl IntoResponse, BlogError> {
    let (jar, flash) = session::take_flash(jar);
    let page = state
        .renderer
        .render("about.html", context! { flash, lang => locale.tag() })?;
    Ok((jar, page))
}

pub async fn articles(
    State(state): State<AppState>,
    locale: Locale,
    jar: PrivateCookieJar,
) -> Result<impl IntoResponse, BlogError> {
    let articles = state.db.list_articles().await?;
    let (jar, flash) = session::take_flash(jar);

    let rows: Vec<_> = articles.iter().map(|a| article_view(a, locale)).collect();
    let msg = rows.is_empty().then_some("Articles not found");
    let page = state.renderer.render(
        "articles.html",
        context! { flash, lang => locale.tag(), articles => rows, msg },
    )?;
    Ok((jar, page))
}

pub async fn article(
    State(state): State<AppState>,
    locale: Locale,
    jar: PrivateCookieJar,
    Path(id): Path<i64>,
) -> Result<Response, BlogError> {
    let (jar, flash) = session::take_flash(jar);

    match state.db.get_article(id).await? {
        Some(article) => {
            let page = state.renderer.render(
                "article.html",
                context! { flash, lang => locale.tag(), article => article_view(&article, locale) },
            )?;
            Ok((jar, page).into_response())
        }
        None => {
            let page = state
                .renderer
                .render("not_found.html", context! { flash, lang => locale.tag() })?;
            Ok((StatusCode::NOT_FOUND, jar, page).into_response())
        }
    }
}
