//! Concurrent dispatcher
//!
//! Sends the query to candidate members in batches of at most K, resolving
//! a healthy provider for each member along its fallback chain. A batch
//! settles completely (every member answered or gave up) before the next
//! one starts, so no more than K member calls are ever outstanding.

use crate::ports::completion_provider::CompletionProvider;
use crate::ports::progress::ProgressNotifier;
use crate::registry::ProviderRegistry;
use futures::future::join_all;
use raincloud_domain::{BoardMember, BoardResponse, CompletionRequest};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::time::{Instant, timeout};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("Dispatch cancelled")]
    Cancelled,
}

/// Answers of all batches, in the order the batches produced them.
#[derive(Debug, Clone)]
pub struct DispatchOutcome {
    pub responses: Vec<BoardResponse>,
    /// Wall-clock time from the first batch start to the last batch settling
    pub elapsed: Duration,
}

/// Executes candidate members in concurrency-bounded batches.
pub struct Dispatcher {
    providers: Arc<ProviderRegistry>,
    max_concurrent: usize,
    call_timeout: Duration,
    cancellation_token: Option<CancellationToken>,
}

impl Dispatcher {
    /// `max_concurrent` is clamped to at least 1.
    pub fn new(providers: Arc<ProviderRegistry>, max_concurrent: usize, call_timeout: Duration) -> Self {
        Self {
            providers,
            max_concurrent: max_concurrent.max(1),
            call_timeout,
            cancellation_token: None,
        }
    }

    /// Set a cancellation token; cancelling it abandons the in-flight batch.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    /// Ask every candidate, batch by batch.
    ///
    /// Member failures never surface here: a member with no healthy
    /// provider, or whose call failed or timed out, is just absent from
    /// the outcome. The only error is cancellation.
    pub async fn dispatch(
        &self,
        candidates: &[&BoardMember],
        query: &str,
        progress: &dyn ProgressNotifier,
    ) -> Result<DispatchOutcome, DispatchError> {
        let started = Instant::now();
        let batches: Vec<&[&BoardMember]> = candidates.chunks(self.max_concurrent).collect();

        info!(
            "Dispatching {} members in {} batch(es) of up to {}",
            candidates.len(),
            batches.len(),
            self.max_concurrent
        );
        progress.on_discussion_start(candidates.len(), batches.len());

        let mut responses = Vec::with_capacity(candidates.len());

        for (index, batch) in batches.into_iter().enumerate() {
            debug!("Batch {} starting with {} members", index + 1, batch.len());
            progress.on_batch_start(index, batch);

            let settled = join_all(
                batch
                    .iter()
                    .map(|member| self.answer_member(member, query, progress)),
            );

            let results = match &self.cancellation_token {
                Some(token) => tokio::select! {
                    biased;
                    _ = token.cancelled() => {
                        warn!("Discussion cancelled during batch {}", index + 1);
                        return Err(DispatchError::Cancelled);
                    }
                    results = settled => results,
                },
                None => settled.await,
            };

            responses.extend(results.into_iter().flatten());
            progress.on_batch_complete(index);
        }

        let elapsed = started.elapsed();
        info!(
            "{} of {} members answered in {}ms",
            responses.len(),
            candidates.len(),
            elapsed.as_millis()
        );
        progress.on_discussion_complete(responses.len(), candidates.len());

        Ok(DispatchOutcome { responses, elapsed })
    }

    /// Resolve a provider for one member and ask it.
    async fn answer_member(
        &self,
        member: &BoardMember,
        query: &str,
        progress: &dyn ProgressNotifier,
    ) -> Option<BoardResponse> {
        let Some(provider) = self.resolve_provider(member).await else {
            warn!("No available provider for {}", member.name);
            progress.on_member_complete(member, None, false);
            return None;
        };

        let request = CompletionRequest::with_system_prompt(&member.system_prompt, query)
            .with_temperature(member.temperature);

        let call_started = Instant::now();
        let result = timeout(self.call_timeout, provider.complete(&request)).await;
        let latency_ms = call_started.elapsed().as_millis() as u64;

        match result {
            Ok(Ok(completion)) => {
                debug!(
                    "{} answered via {} in {}ms",
                    member.name,
                    provider.id(),
                    latency_ms
                );
                progress.on_member_complete(member, Some(provider.id()), true);
                Some(BoardResponse::from_completion(
                    &member.id,
                    &member.name,
                    &member.role,
                    completion,
                    latency_ms,
                ))
            }
            Ok(Err(e)) => {
                warn!("Error getting response from {}: {}", member.name, e);
                progress.on_member_complete(member, Some(provider.id()), false);
                None
            }
            Err(_) => {
                warn!(
                    "{} timed out after {}s answering for {}",
                    provider.id(),
                    self.call_timeout.as_secs(),
                    member.name
                );
                progress.on_member_complete(member, Some(provider.id()), false);
                None
            }
        }
    }

    /// First registered, healthy provider along the member's chain.
    async fn resolve_provider(&self, member: &BoardMember) -> Option<Arc<dyn CompletionProvider>> {
        for (position, provider_id) in member.provider_chain().enumerate() {
            let label = if position == 0 { "Preferred" } else { "Fallback" };

            let Some(provider) = self.providers.get(provider_id) else {
                debug!(
                    "{} provider {} not registered for {}",
                    label, provider_id, member.name
                );
                continue;
            };

            match timeout(self.call_timeout, provider.health_check()).await {
                Ok(true) => return Some(provider),
                Ok(false) => warn!("{} provider {} failed for {}", label, provider_id, member.name),
                Err(_) => warn!(
                    "{} provider {} health check timed out for {}",
                    label, provider_id, member.name
                ),
            }
        }
        None
    }
}
