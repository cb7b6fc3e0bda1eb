//! Core error types used across the system

use thiserror::Error;

/// Core error type for the kernel
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),
}

impl CoreError {
    pub fn invalid_identifier(message: impl Into<String>) -> Self {
        CoreError::InvalidIdentifier(message.into())
    }
}
