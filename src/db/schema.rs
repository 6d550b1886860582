//! SQL DDL for initializing blog storage.

/// SQLite schema.
///
/// `users.username` and `users.email` are UNIQUE: duplicate registration
/// is rejected by the storage constraint rather than an application-layer
/// pre-check, and the register handler translates the violation into a
/// form error.
///
/// `articles.author` stores the author's username by value; there is no
/// foreign key to `users`.
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    username TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS articles (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    title_uk TEXT NOT NULL,
    body TEXT NOT NULL,
    body_uk TEXT NOT NULL,
    author TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_articles_author ON articles(author);
"#;
