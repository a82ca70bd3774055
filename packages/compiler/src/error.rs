//! Compiler Errors
//!
//! The view compiler trusts the render layer, so every error here originates in a
//! collaborator (reflection, change detection) or in option loading.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompilerError {
    /// The reflection collaborator has no setter for a directive input.
    #[error("no setter registered for property '{property}'")]
    MissingSetter { property: String },

    /// The change detection collaborator rejected a detector definition.
    #[error("cannot create change detector '{id}': {message}")]
    ChangeDetector { id: String, message: String },

    #[error("invalid compiler options: {0}")]
    Options(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CompilerError>;
