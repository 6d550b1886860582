use std::str::FromStr;

use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use tracing::warn;

use crate::db::models::{Article, ArticleDraft, User};
use crate::db::schema::SQLITE_INIT;
use crate::error::BlogError;

pub type SqlitePool = Pool<Sqlite>;

/// Open a pooled connection to the database named by `database_url`,
/// creating the file when it does not exist yet.
pub async fn connect(database_url: &str) -> Result<SqlitePool, BlogError> {
    let opts = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(opts)
        .await?;
    Ok(pool)
}

/// Storage handle for the `users` and `articles` tables.
///
/// Every write is a single statement; atomicity and isolation are the
/// database's job. All user-derived values are bound parameters.
#[derive(Clone)]
pub struct BlogStorage {
    pool: SqlitePool,
}

impl BlogStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), BlogError> {
        // execute multiple statements safely (SQLite supports multi-commands but sqlx::query doesn't)
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// All articles. There is no ORDER BY: callers get storage order,
    /// which is unspecified and must not be relied on.
    pub async fn list_articles(&self) -> Result<Vec<Article>, BlogError> {
        let rows = sqlx::query_as::<_, Article>(
            "SELECT id, title, title_uk, body, body_uk, author, created_at FROM articles",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_article(&self, id: i64) -> Result<Option<Article>, BlogError> {
        let row = sqlx::query_as::<_, Article>(
            "SELECT id, title, title_uk, body, body_uk, author, created_at FROM articles WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Insert a new article. `author` must come from the session, never
    /// from client-supplied form data.
    pub async fn create_article(&self, draft: &ArticleDraft, author: &str) -> Result<(), BlogError> {
        sqlx::query(
            "INSERT INTO articles (title, title_uk, body, body_uk, author, created_at) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&draft.title)
        .bind(&draft.title_uk)
        .bind(&draft.body)
        .bind(&draft.body_uk)
        .bind(author)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Full replace of the editable fields of the row matching `id`.
    /// A missing id is a silent no-op, logged at warn level.
    pub async fn update_article(&self, id: i64, draft: &ArticleDraft) -> Result<(), BlogError> {
        let result = sqlx::query(
            "UPDATE articles SET title = ?, title_uk = ?, body = ?, body_uk = ? WHERE id = ?",
        )
        .bind(&draft.title)
        .bind(&draft.title_uk)
        .bind(&draft.body)
        .bind(&draft.body_uk)
        .bind(id)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            warn!(id, "update matched no article row");
        }
        Ok(())
    }

    /// Remove the row matching `id`. A missing id is a silent no-op.
    pub async fn delete_article(&self, id: i64) -> Result<(), BlogError> {
        let result = sqlx::query("DELETE FROM articles WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            warn!(id, "delete matched no article row");
        }
        Ok(())
    }

    /// Insert a new user row. Duplicate username or email trips the
    /// UNIQUE constraints and surfaces as [`BlogError::DuplicateUser`].
    pub async fn create_user(
        &self,
        name: &str,
        email: &str,
        username: &str,
        password_hash: &str,
    ) -> Result<(), BlogError> {
        sqlx::query(
            "INSERT INTO users (name, email, username, password_hash, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(name)
        .bind(email)
        .bind(username)
        .bind(password_hash)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => BlogError::DuplicateUser,
            _ => BlogError::Database(e),
        })?;
        Ok(())
    }

    pub async fn find_user(&self, username: &str) -> Result<Option<User>, BlogError> {
        let row = sqlx::query_as::<_, User>(
            "SELECT id, name, email, username, password_hash, created_at FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }
}
