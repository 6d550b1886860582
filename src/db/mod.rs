//! Database module: models and schema for persistent storage.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for initializing the database (SQLite)
//! - `sqlite.rs`: pooled storage handle with the article/user operations

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::{Article, ArticleDraft, User};
pub use schema::SQLITE_INIT;
pub use sqlite::{BlogStorage, SqlitePool, connect};
