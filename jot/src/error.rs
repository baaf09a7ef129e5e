//! Error taxonomy. Every variant is fatal for the current invocation.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum JotError {
    /// Required environment configuration is missing
    #[error("{0}")]
    Config(String),

    /// Network failure or timeout before a response arrived
    #[error("request failed (are you online?): {0}")]
    Transport(String),

    /// Non-2xx HTTP status (`status` set) or a per-statement SQL error
    /// embedded in an otherwise successful response (`status` unset)
    #[error("{}", remote_message(*status, message))]
    Remote { status: Option<u16>, message: String },

    #[error("encode request: {0}")]
    Encoding(String),

    #[error("parse response: {0}")]
    Decoding(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Usage(String),

    #[error("write output: {0}")]
    Output(#[from] std::io::Error),
}

fn remote_message(status: Option<u16>, message: &str) -> String {
    match status {
        Some(code) => format!("database API error ({}): {}", code, message),
        None => format!("SQL error: {}", message),
    }
}

impl JotError {
    pub fn note_not_found(id: i64) -> Self {
        JotError::NotFound(format!("note #{} not found", id))
    }

    pub fn no_notes() -> Self {
        JotError::NotFound("no notes yet".to_string())
    }
}
