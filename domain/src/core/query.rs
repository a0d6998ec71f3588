//! Query value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// A query to be answered by the board (Value Object)
///
/// Holds the raw text exactly as the caller supplied it; only blank input
/// is rejected. Keyword matching and the user turn both use the raw text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Query {
    content: String,
}

impl Query {
    /// Create a new query, rejecting empty or whitespace-only input
    pub fn new(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            Err(DomainError::EmptyQuery)
        } else {
            Ok(Self { content })
        }
    }

    /// Get the query content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume and return the inner content
    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl TryFrom<&str> for Query {
    type Error = DomainError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Query::new(s)
    }
}

impl TryFrom<String> for Query {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Query::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_creation() {
        let q = Query::new("What is our runway?").unwrap();
        assert_eq!(q.content(), "What is our runway?");
    }

    #[test]
    fn test_query_keeps_raw_text() {
        let q = Query::new("  Revenue?  ").unwrap();
        assert_eq!(q.content(), "  Revenue?  ");
    }

    #[test]
    fn test_empty_query_rejected() {
        assert_eq!(Query::new(""), Err(DomainError::EmptyQuery));
        assert_eq!(Query::new(" \n\t "), Err(DomainError::EmptyQuery));
    }

    #[test]
    fn test_try_from() {
        let q: Query = "Should we hire?".try_into().unwrap();
        assert_eq!(q.into_content(), "Should we hire?");
    }
}
