//! Core domain concepts shared across all subdomains.
//!
//! - [`query::Query`] - a validated query to pose to the board
//! - [`error::DomainError`] - domain-level errors
//! - [`string`] - small text helpers used by formatters

pub mod error;
pub mod query;
pub mod string;
