//! Response aggregation: ordering and totals.

use super::value_objects::{BoardResponse, Discussion};
use crate::board::registry::MemberRegistry;
use std::time::Duration;

/// Cost per token used when none is configured.
pub const DEFAULT_COST_PER_TOKEN: f64 = 0.000_001;

/// Assemble the final [`Discussion`] from the answers of all batches.
///
/// `responses` must be in the order the batches produced them. They are
/// sorted ascending by member priority; the sort is stable, so equal
/// priorities keep that order, and answers from members missing from
/// `registry` go last. `elapsed` is the wall-clock time of the whole
/// dispatch, not a sum of per-answer latencies.
pub fn aggregate(
    query: impl Into<String>,
    mut responses: Vec<BoardResponse>,
    registry: &MemberRegistry,
    elapsed: Duration,
    cost_per_token: f64,
) -> Discussion {
    responses.sort_by_key(|r| registry.priority_of(&r.agent));

    let total_cost = responses
        .iter()
        .map(|r| r.tokens() as f64 * cost_per_token)
        .sum();

    Discussion {
        query: query.into(),
        responses,
        total_latency_ms: elapsed.as_millis() as u64,
        total_cost,
    }
}
