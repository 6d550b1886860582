pub mod articles;
pub mod auth;
pub mod pages;

use minijinja::{Value, context};

use crate::db::Article;
use crate::locale::Locale;

/// Template context for one article, with title and body already
/// resolved to the requested locale.
pub(crate) fn article_view(article: &Article, locale: Locale) -> Value {
    context! {
        id => article.id,
        title => article.title_in(locale),
        body => article.body_in(locale),
        author => article.author,
        created_at => article.created_at.format("%Y-%m-%d %H:%M").to_string(),
    }
}
