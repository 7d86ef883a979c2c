//! Error types for the riff progress core.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RiffError {
    #[error("Unknown mood: {0}")]
    UnknownMood(String),

    #[error("Persistence failed: {0}")]
    Store(String),

    #[error("Mood catalog is empty")]
    EmptyCatalog,

    #[error("Config error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RiffError {
    /// Process exit code for the CLI. 1 is left for untyped failures and 2
    /// for argument errors.
    pub fn code(&self) -> i32 {
        match self {
            RiffError::UnknownMood(_) => 3,
            RiffError::Store(_) => 4,
            RiffError::Config(_) => 5,
            RiffError::Json(_) => 6,
            RiffError::EmptyCatalog => 7,
        }
    }
}

pub type Result<T> = std::result::Result<T, RiffError>;
