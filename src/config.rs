use figment::{Figment, providers::Env};
use serde::Deserialize;

/// Runtime settings, read once at startup from `BLOG_*` environment
/// variables (a local `.env` is honored via dotenvy in `main`).
///
/// `database_url` and `session_secret` have no defaults: the process
/// refuses to start without them.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,
    /// Keys the private cookie jar. Must be at least 64 bytes.
    pub session_secret: String,
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    #[serde(default = "default_loglevel")]
    pub loglevel: String,
}

fn default_bind_addr() -> String {
    "0.0.0.0:8000".to_string()
}

fn default_loglevel() -> String {
    "info".to_string()
}

impl Config {
    pub fn load() -> Result<Self, figment::Error> {
        let cfg: Config = Figment::new().merge(Env::prefixed("BLOG_")).extract()?;
        if cfg.session_secret.len() < 64 {
            return Err(figment::Error::from(
                "BLOG_SESSION_SECRET must be at least 64 bytes".to_string(),
            ));
        }
        Ok(cfg)
    }
}
