//! Domain layer for raincloud
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Board
//!
//! A board is an ordered panel of role personas (CEO, CFO, CTO, ...). Each
//! member answers in character through its preferred provider, falling back
//! along its own chain of alternates.
//!
//! ## Selection
//!
//! - **All**: every member answers
//! - **Relevant** (default): keyword-matched members, led by the CEO
//! - **Specific**: exactly one member
//!
//! ## Discussion
//!
//! The priority-sorted answers of one run, with wall-clock latency and an
//! estimated cost.

pub mod board;
pub mod completion;
pub mod config;
pub mod core;
pub mod discussion;
pub mod providers;

// Re-export commonly used types
pub use board::{
    keywords::RoleKeywords,
    member::BoardMember,
    registry::MemberRegistry,
    selection::{
        DEFAULT_ALWAYS_INCLUDE_ROLE, FALLBACK_MEMBER_COUNT, SelectionMode, SelectionPolicy,
        select_members,
    },
};
pub use completion::{
    message::{Message, Role},
    request::CompletionRequest,
    response::{CompletionResponse, TokenUsage},
};
pub use config::OutputFormat;
pub use core::{
    error::DomainError,
    query::Query,
    string::{single_line, truncate},
};
pub use discussion::{
    aggregate::{DEFAULT_COST_PER_TOKEN, aggregate},
    value_objects::{BoardResponse, Discussion},
};
pub use providers::{ProviderKind, ProviderSettings, ProvidersConfig};
