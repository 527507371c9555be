//! Error types

use thiserror::Error;

/// Shared error type
#[derive(Error, Debug)]
pub enum Error {
    /// The request never produced a usable JSON body (network down, non-JSON reply).
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Text shown to the user after the "network error" prefix.
    pub fn user_text(&self) -> String {
        match self {
            Error::Transport(message) => message.clone(),
            Error::Json(e) => e.to_string(),
        }
    }
}

/// Result alias
pub type Result<T> = std::result::Result<T, Error>;
