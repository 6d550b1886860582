use std::sync::Arc;

use axum::Router;
use axum::extract::FromRef;
use axum::routing::{get, post};
use axum_extra::extract::cookie::Key;

use crate::db::BlogStorage;
use crate::handlers::{articles, auth, pages};
use crate::render::Renderer;

/// Shared request context: the storage pool, the view engine, and the
/// key for the private cookie jar. Cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: BlogStorage,
    pub renderer: Arc<Renderer>,
    key: Key,
}

impl AppState {
    pub fn new(db: BlogStorage, renderer: Arc<Renderer>, key: Key) -> Self {
        Self { db, renderer, key }
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Key {
        state.key.clone()
    }
}

pub fn blog_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::index))
        .route("/about", get(pages::about))
        .route("/articles", get(pages::articles))
        .route("/article/{id}/", get(pages::article))
        .route("/register", get(auth::register_form).post(auth::register))
        .route("/login", get(auth::login_form).post(auth::login))
        .route("/logout", get(auth::logout))
        .route("/dashboard", get(articles::dashboard))
        .route(
            "/add_article",
            get(articles::add_article_form).post(articles::add_article),
        )
        .route(
            "/edit_article/{id}",
            get(articles::edit_article_form).post(articles::edit_article),
        )
        .route("/delete_article/{id}", post(articles::delete_article))
        .route(
            "/change-language/{name}",
            get(articles::change_language).post(articles::change_language),
        )
        .with_state(state)
}
