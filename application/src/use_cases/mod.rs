//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod check_providers;
pub mod direct_response;
pub mod discuss_query;
pub mod dispatch;
