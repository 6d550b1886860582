pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod forms;
pub mod handlers;
pub mod locale;
pub mod middleware;
pub mod render;
pub mod router;
pub mod session;

pub use error::BlogError;
pub use router::{AppState, blog_router};
