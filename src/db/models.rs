use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use crate::forms::ArticleForm;
use crate::locale::Locale;

/// A published article. Both locales are stored side by side; display
/// picks one via [`Article::title_in`] / [`Article::body_in`].
#[derive(Debug, Clone, Serialize, PartialEq, FromRow)]
pub struct Article {
    pub id: i64,
    pub title: String,
    pub title_uk: String,
    pub body: String,
    pub body_uk: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

impl Article {
    pub fn title_in(&self, locale: Locale) -> &str {
        match locale {
            Locale::En => &self.title,
            Locale::Uk => &self.title_uk,
        }
    }

    pub fn body_in(&self, locale: Locale) -> &str {
        match locale {
            Locale::En => &self.body,
            Locale::Uk => &self.body_uk,
        }
    }
}

/// The editable article fields, as accepted from a validated form.
/// The author is deliberately not part of the draft: it always comes
/// from the session of the user performing the write.
#[derive(Debug, Clone)]
pub struct ArticleDraft {
    pub title: String,
    pub title_uk: String,
    pub body: String,
    pub body_uk: String,
}

impl From<ArticleForm> for ArticleDraft {
    fn from(f: ArticleForm) -> Self {
        Self {
            title: f.title,
            title_uk: f.title_uk,
            body: f.body,
            body_uk: f.body_uk,
        }
    }
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}
