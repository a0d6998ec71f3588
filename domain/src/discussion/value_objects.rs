//! Discussion value objects - immutable result types of a board run.

use crate::completion::response::{CompletionResponse, TokenUsage};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One member's answer to the query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardResponse {
    /// Id of the member that answered
    pub agent: String,
    /// Display name of the member
    pub name: String,
    /// Role label of the member
    pub role: String,
    /// The answer text
    pub response: String,
    /// When the answer was received
    pub timestamp: DateTime<Utc>,
    /// Provider binding that produced the answer
    pub provider: String,
    /// Model id reported by the provider
    pub model: String,
    /// Wall-clock time of the completion call, in milliseconds
    pub latency_ms: u64,
    pub usage: TokenUsage,
}

impl BoardResponse {
    /// Wrap a provider completion as the answer of a member.
    ///
    /// # Arguments
    /// * `agent` - Member id
    /// * `name` - Member display name
    /// * `role` - Member role label
    /// * `completion` - The provider's response
    /// * `latency_ms` - Latency measured around the completion call
    pub fn from_completion(
        agent: impl Into<String>,
        name: impl Into<String>,
        role: impl Into<String>,
        completion: CompletionResponse,
        latency_ms: u64,
    ) -> Self {
        Self {
            agent: agent.into(),
            name: name.into(),
            role: role.into(),
            response: completion.content,
            timestamp: Utc::now(),
            provider: completion.provider,
            model: completion.model,
            latency_ms,
            usage: completion.usage,
        }
    }

    /// Total tokens consumed by this answer.
    pub fn tokens(&self) -> u64 {
        self.usage.total_tokens
    }
}

/// Complete result of one board discussion
///
/// `responses` may be empty when every candidate's providers failed; that
/// is a valid outcome, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discussion {
    /// The query as asked
    pub query: String,
    /// Answers, ascending by member priority
    pub responses: Vec<BoardResponse>,
    /// Wall-clock time from dispatch start until the last batch settled
    pub total_latency_ms: u64,
    /// Estimated cost (tokens x fixed per-token rate)
    pub total_cost: f64,
}

impl Discussion {
    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }

    /// Sum of total tokens over all answers.
    pub fn total_tokens(&self) -> u64 {
        self.responses.iter().map(BoardResponse::tokens).sum()
    }

    /// The slowest individual answer, in milliseconds.
    pub fn max_response_latency_ms(&self) -> u64 {
        self.responses
            .iter()
            .map(|r| r.latency_ms)
            .max()
            .unwrap_or(0)
    }
}
