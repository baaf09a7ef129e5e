use crate::error::JotError;
use std::env;
use std::time::Duration;

/// Environment variable names - single source of truth
pub mod env_vars {
    /// Database URL, e.g. "libsql://notes-me.turso.io" or "https://..."
    pub const URL: &str = "JOT_URL";
    /// Database auth token
    pub const TOKEN: &str = "JOT_TOKEN";
}

/// Default values
pub mod defaults {
    pub const PIPELINE_PATH: &str = "/v2/pipeline";
    pub const REQUEST_TIMEOUT_SECS: u64 = 10;
    /// Max characters of a note body shown by `jot ls`
    pub const PREVIEW_LEN: usize = 72;
}

/// Connection settings, loaded once at startup and handed to the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub url: String,
    pub token: String,
}

impl Config {
    pub fn from_env() -> Result<Self, JotError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, JotError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup(env_vars::URL).filter(|v| !v.is_empty());
        let token = lookup(env_vars::TOKEN).filter(|v| !v.is_empty());

        match (url, token) {
            (Some(url), Some(token)) => Ok(Self {
                url: normalize_url(&url),
                token,
            }),
            _ => Err(JotError::Config(missing_vars_message())),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(defaults::REQUEST_TIMEOUT_SECS)
    }
}

/// Turso hands out `libsql://` URLs but the HTTP API lives behind `https://`.
/// Only the leftmost occurrence is rewritten.
pub fn normalize_url(url: &str) -> String {
    url.replacen("libsql://", "https://", 1)
}

fn missing_vars_message() -> String {
    format!(
        concat!(
            "missing env vars, set:\n\n",
            "  export {}=\"https://your-db.turso.io\"\n",
            "  export {}=\"your-auth-token\"\n",
        ),
        env_vars::URL,
        env_vars::TOKEN
    )
}
