//! Error types for the grid-soccer environment.

use std::fmt;

/// Errors produced at the environment's integer action boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvError {
    /// Action code outside the valid range `{0..=4}`.
    InvalidAction(u8),
}

impl fmt::Display for EnvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvError::InvalidAction(code) => {
                write!(f, "invalid action code: {code} (expected 0..=4)")
            }
        }
    }
}

impl std::error::Error for EnvError {}

/// Result type for environment operations.
pub type EnvResult<T> = Result<T, EnvError>;
