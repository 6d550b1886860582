pub mod password;

pub use password::{hash, verify};
