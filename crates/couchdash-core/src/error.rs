//! Error types for Couchdash

use thiserror::Error;

use crate::QueryMode;

/// Core error type for Couchdash operations
#[derive(Error, Debug)]
pub enum CouchdashError {
    #[error("Query selects both the analytics service and full-text search")]
    ConflictingModes,

    #[error("Query mode {mode} is not available in the {variant} editor")]
    ModeNotAvailable { mode: QueryMode, variant: &'static str },

    #[error("Macro error: {0}")]
    Macro(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for Couchdash operations
pub type Result<T> = std::result::Result<T, CouchdashError>;
