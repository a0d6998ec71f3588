//! Relevance selection: which members answer a query.
//!
//! [`select_members`] is a pure function of its inputs. It has no side
//! effects and returns the same candidates for the same query, mode and
//! board every time, so it is safe to call from concurrent discussions.

use super::keywords::RoleKeywords;
use super::member::BoardMember;
use super::registry::MemberRegistry;
use crate::core::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Number of members asked when a relevant-mode query matches no keyword.
pub const FALLBACK_MEMBER_COUNT: usize = 3;

/// Role that is always consulted first in relevant mode, unless configured otherwise.
pub const DEFAULT_ALWAYS_INCLUDE_ROLE: &str = "CEO";

/// Strategy governing which members are queried.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// Every member, in configured order
    All,
    /// Keyword-matched members, led by the always-include role (default)
    #[default]
    Relevant,
    /// Exactly one member, by id
    Specific(String),
}

impl SelectionMode {
    pub fn specific(id: impl Into<String>) -> Self {
        SelectionMode::Specific(id.into())
    }
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionMode::All => write!(f, "all"),
            SelectionMode::Relevant => write!(f, "relevant"),
            SelectionMode::Specific(id) => write!(f, "specific:{}", id),
        }
    }
}

impl std::str::FromStr for SelectionMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(SelectionMode::All),
            "relevant" => Ok(SelectionMode::Relevant),
            other => match other.strip_prefix("specific:") {
                Some(id) if !id.trim().is_empty() => Ok(SelectionMode::Specific(id.to_string())),
                _ => Err(DomainError::InvalidMode(s.to_string())),
            },
        }
    }
}

impl Serialize for SelectionMode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SelectionMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Static inputs of the selector that come from configuration.
#[derive(Debug, Clone)]
pub struct SelectionPolicy {
    /// Upper bound on relevant-mode candidates (the board's concurrency size)
    pub max_candidates: usize,
    /// Role consulted first in relevant mode, if a member holds it
    pub always_include_role: Option<String>,
    pub keywords: RoleKeywords,
}

impl SelectionPolicy {
    pub fn new(max_candidates: usize) -> Self {
        Self {
            max_candidates,
            always_include_role: Some(DEFAULT_ALWAYS_INCLUDE_ROLE.to_string()),
            keywords: RoleKeywords::default(),
        }
    }

    pub fn with_always_include_role(mut self, role: Option<String>) -> Self {
        self.always_include_role = role;
        self
    }

    pub fn with_keywords(mut self, keywords: RoleKeywords) -> Self {
        self.keywords = keywords;
        self
    }
}

/// Map a query and mode to the ordered list of candidate members.
pub fn select_members<'a>(
    query: &str,
    mode: &SelectionMode,
    registry: &'a MemberRegistry,
    policy: &SelectionPolicy,
) -> Vec<&'a BoardMember> {
    match mode {
        SelectionMode::All => registry.members().iter().collect(),
        SelectionMode::Specific(id) => registry.get(id).into_iter().collect(),
        SelectionMode::Relevant => select_relevant(query, registry, policy),
    }
}

fn select_relevant<'a>(
    query: &str,
    registry: &'a MemberRegistry,
    policy: &SelectionPolicy,
) -> Vec<&'a BoardMember> {
    let query_lower = query.to_lowercase();
    let mut candidates: Vec<&BoardMember> = Vec::new();

    let lead_role = policy
        .always_include_role
        .as_deref()
        .filter(|role| registry.find_by_role(role).is_some());

    if let Some(lead) = lead_role.and_then(|role| registry.find_by_role(role)) {
        candidates.push(lead);
    }

    for member in registry.members() {
        if Some(member.role.as_str()) == lead_role {
            continue;
        }
        if policy.keywords.matches(&member.role, &query_lower) {
            candidates.push(member);
        }
    }

    if candidates.is_empty() {
        return registry
            .members()
            .iter()
            .take(FALLBACK_MEMBER_COUNT)
            .collect();
    }

    candidates.truncate(policy.max_candidates);
    candidates
}
