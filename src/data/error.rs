//! Error types for balance loading.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BalanceError {
    /// No balance file; the built-in tuning applies.
    #[error("Balance file not found: {0}")]
    NotFound(String),

    #[error("Failed to read balance file '{path}': {details}")]
    Read { path: String, details: String },

    #[error("Parse error in '{path}': {details}")]
    Parse { path: String, details: String },
}
