//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Query cannot be empty")]
    EmptyQuery,

    #[error("Invalid selection mode: {0}")]
    InvalidMode(String),

    #[error("Invalid board member: {0}")]
    InvalidMember(String),
}
