//! Board subdomain: who sits on the board and who answers a given query.
//!
//! - [`member::BoardMember`] - a configured role persona
//! - [`registry::MemberRegistry`] - the immutable, ordered board
//! - [`keywords::RoleKeywords`] - the role → keyword table used for relevance
//! - [`selection`] - the relevance selector and its [`SelectionMode`](selection::SelectionMode)

pub mod keywords;
pub mod member;
pub mod registry;
pub mod selection;
