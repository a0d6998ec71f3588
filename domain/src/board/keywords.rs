//! Role → keyword table for relevance selection.
//!
//! Matching is a plain, case-insensitive substring test against the raw
//! query. Callers rely on the exact outcomes of this table, so entries are
//! kept as they are rather than tuned.

use std::collections::HashMap;

const DEFAULT_TABLE: &[(&str, &[&str])] = &[
    (
        "Chairman",
        &["board", "governance", "oversight", "decision", "vote", "consensus", "shareholder"],
    ),
    (
        "CEO",
        &["strategy", "vision", "business", "growth", "company", "revenue", "market", "execute"],
    ),
    (
        "CFO",
        &["financial", "finance", "budget", "cost", "revenue", "profit", "investment", "roi", "cash"],
    ),
    (
        "CTO",
        &[
            "technical",
            "architecture",
            "infrastructure",
            "technology",
            "system",
            "engineering",
            "scale",
            "security",
        ],
    ),
    (
        "Chief Product Officer",
        &["product", "feature", "user", "roadmap", "requirements", "ux", "experience"],
    ),
    (
        "Chief Marketing Officer",
        &["marketing", "brand", "customer", "campaign", "growth", "acquisition", "market"],
    ),
    (
        "Non-Executive Director",
        &["risk", "compliance", "audit", "governance", "oversight", "independent"],
    ),
];

/// Keyword sets keyed by role label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleKeywords {
    table: HashMap<String, Vec<String>>,
}

impl RoleKeywords {
    /// An empty table; every role has no keywords.
    pub fn empty() -> Self {
        Self {
            table: HashMap::new(),
        }
    }

    /// Add (or replace) the keyword set of a role. Keywords are stored lowercase.
    pub fn with_role<I, S>(mut self, role: impl Into<String>, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.table.insert(
            role.into(),
            keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .collect(),
        );
        self
    }

    /// Keywords of `role`; unknown roles yield an empty slice.
    pub fn keywords_for(&self, role: &str) -> &[String] {
        self.table.get(role).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether the (already lowercased) query mentions any keyword of `role`.
    pub fn matches(&self, role: &str, query_lower: &str) -> bool {
        self.keywords_for(role)
            .iter()
            .any(|keyword| query_lower.contains(keyword.as_str()))
    }
}

impl Default for RoleKeywords {
    fn default() -> Self {
        DEFAULT_TABLE
            .iter()
            .fold(Self::empty(), |table, (role, keywords)| {
                table.with_role(*role, keywords.iter().copied())
            })
    }
}
