//! Bridge to the view engine.
//!
//! Handlers never produce markup: they pick a template by name and hand
//! the engine a context mapping. Templates are embedded at build time so
//! the binary is self-contained.

use axum::response::Html;
use minijinja::{Environment, Value};

use crate::error::BlogError;

const TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", include_str!("../templates/layout.html")),
    ("home.html", include_str!("../templates/home.html")),
    ("about.html", include_str!("../templates/about.html")),
    ("articles.html", include_str!("../templates/articles.html")),
    ("article.html", include_str!("../templates/article.html")),
    ("register.html", include_str!("../templates/register.html")),
    ("login.html", include_str!("../templates/login.html")),
    ("dashboard.html", include_str!("../templates/dashboard.html")),
    ("add_article.html", include_str!("../templates/add_article.html")),
    ("edit_article.html", include_str!("../templates/edit_article.html")),
    ("article_fields.html", include_str!("../templates/article_fields.html")),
    ("not_found.html", include_str!("../templates/not_found.html")),
];

pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    /// Compile the bundled templates. A broken template aborts startup.
    pub fn new() -> Result<Self, BlogError> {
        let mut env = Environment::new();
        for (name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    pub fn render(&self, template: &str, ctx: Value) -> Result<Html<String>, BlogError> {
        let page = self.env.get_template(template)?.render(ctx)?;
        Ok(Html(page))
    }
}
