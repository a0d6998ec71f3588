//! Errors surfaced to callers of the board.
//!
//! Only structural failures appear here. A member whose providers all fail
//! is dropped from the discussion and never produces a `BoardError`.

use crate::ports::completion_provider::ProviderError;
use raincloud_domain::DomainError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BoardError {
    /// Empty or whitespace-only query
    #[error("Query is required")]
    EmptyQuery,

    /// Unparseable selection mode
    #[error("Invalid selection mode: {0}")]
    InvalidMode(String),

    /// A directly addressed provider is not registered
    #[error("Provider {0} not configured")]
    UnknownProvider(String),

    /// A directly addressed member is not on the board
    #[error("Board member {0} not found")]
    UnknownMember(String),

    /// A directly addressed provider failed
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// A directly addressed provider missed its deadline
    #[error("Provider {provider} timed out after {seconds}s")]
    Timeout { provider: String, seconds: u64 },

    #[error("Discussion cancelled")]
    Cancelled,
}

impl BoardError {
    /// Whether this is an input error (bad query).
    pub fn is_input_error(&self) -> bool {
        matches!(self, BoardError::EmptyQuery | BoardError::InvalidMode(_))
    }

    /// Whether this is a configuration error (unregistered id).
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            BoardError::UnknownProvider(_) | BoardError::UnknownMember(_)
        )
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, BoardError::Cancelled)
    }
}

impl From<DomainError> for BoardError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::EmptyQuery => BoardError::EmptyQuery,
            DomainError::InvalidMember(id) => BoardError::UnknownMember(id),
            DomainError::InvalidMode(mode) => BoardError::InvalidMode(mode),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert!(BoardError::EmptyQuery.is_input_error());
        assert!(BoardError::UnknownProvider("x".to_string()).is_configuration_error());
        assert!(BoardError::UnknownMember("x".to_string()).is_configuration_error());
        assert!(!BoardError::Cancelled.is_configuration_error());
        assert!(BoardError::Cancelled.is_cancelled());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            BoardError::UnknownProvider("google".to_string()).to_string(),
            "Provider google not configured"
        );
        assert_eq!(
            BoardError::Timeout {
                provider: "openai".to_string(),
                seconds: 30
            }
            .to_string(),
            "Provider openai timed out after 30s"
        );
    }

    #[test]
    fn test_from_domain_error() {
        assert_eq!(BoardError::from(DomainError::EmptyQuery), BoardError::EmptyQuery);
    }
}
