//! Test doubles shared by the use case tests.

use crate::ports::completion_provider::{CompletionProvider, ProviderError};
use crate::ports::progress::ProgressNotifier;
use async_trait::async_trait;
use raincloud_domain::{BoardMember, CompletionRequest, CompletionResponse, TokenUsage};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Member whose name and role are the upper-cased id.
pub fn member(id: &str, priority: u32, provider: &str) -> BoardMember {
    BoardMember::new(id, id.to_uppercase(), id.to_uppercase(), provider).with_priority(priority)
}

/// Tracks the high-water mark of concurrently running completions.
#[derive(Default)]
pub struct ConcurrencyProbe {
    in_flight: AtomicUsize,
    max: AtomicUsize,
}

impl ConcurrencyProbe {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn max_in_flight(&self) -> usize {
        self.max.load(Ordering::SeqCst)
    }

    fn enter(self: &Arc<Self>) -> InFlight {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max.fetch_max(now, Ordering::SeqCst);
        InFlight(Arc::clone(self))
    }
}

/// Leaves the probe on drop, so timed-out calls are counted out too.
struct InFlight(Arc<ConcurrencyProbe>);

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
pub struct CallLog {
    completions: AtomicUsize,
    health_checks: AtomicUsize,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl CallLog {
    pub fn completions(&self) -> usize {
        self.completions.load(Ordering::SeqCst)
    }

    pub fn health_checks(&self) -> usize {
        self.health_checks.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

/// Provider whose health, latency and outcome are fixed up front.
pub struct ScriptedProvider {
    id: String,
    healthy: bool,
    fail: bool,
    delay: Duration,
    health_delay: Duration,
    usage: TokenUsage,
    probe: Option<Arc<ConcurrencyProbe>>,
    log: Arc<CallLog>,
}

impl ScriptedProvider {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            healthy: true,
            fail: false,
            delay: Duration::ZERO,
            health_delay: Duration::ZERO,
            usage: TokenUsage::new(10, 20),
            probe: None,
            log: Arc::new(CallLog::default()),
        }
    }

    pub fn provider_id(&self) -> &str {
        &self.id
    }

    pub fn unhealthy(mut self) -> Self {
        self.healthy = false;
        self
    }

    /// Healthy, but every completion fails.
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_health_delay(mut self, delay: Duration) -> Self {
        self.health_delay = delay;
        self
    }

    pub fn with_usage(mut self, prompt: u64, completion: u64) -> Self {
        self.usage = TokenUsage::new(prompt, completion);
        self
    }

    pub fn with_probe(mut self, probe: Arc<ConcurrencyProbe>) -> Self {
        self.probe = Some(probe);
        self
    }

    pub fn calls(&self) -> Arc<CallLog> {
        Arc::clone(&self.log)
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    fn id(&self) -> &str {
        &self.id
    }

    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, ProviderError> {
        self.log.completions.fetch_add(1, Ordering::SeqCst);
        self.log.requests.lock().unwrap().push(request.clone());

        let _guard = self.probe.as_ref().map(|p| p.enter());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        if self.fail {
            return Err(ProviderError::new(&self.id, "scripted failure").with_status(500));
        }

        Ok(CompletionResponse {
            content: format!("{} says hello", self.id),
            model: format!("{}-model", self.id),
            usage: self.usage,
            provider: self.id.clone(),
            latency_ms: self.delay.as_millis() as u64,
        })
    }

    async fn health_check(&self) -> bool {
        self.log.health_checks.fetch_add(1, Ordering::SeqCst);
        if !self.health_delay.is_zero() {
            tokio::time::sleep(self.health_delay).await;
        }
        self.healthy
    }
}

/// Progress notifier that records every callback as a short string.
#[derive(Default)]
pub struct RecordingProgress {
    events: Mutex<Vec<String>>,
}

impl RecordingProgress {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

impl ProgressNotifier for RecordingProgress {
    fn on_discussion_start(&self, total_members: usize, total_batches: usize) {
        self.push(format!("start:{}:{}", total_members, total_batches));
    }

    fn on_batch_start(&self, index: usize, _members: &[&BoardMember]) {
        self.push(format!("batch:{}", index));
    }

    fn on_member_complete(&self, member: &BoardMember, provider: Option<&str>, success: bool) {
        self.push(format!(
            "member:{}:{}:{}",
            member.id,
            provider.unwrap_or("-"),
            success
        ));
    }

    fn on_batch_complete(&self, index: usize) {
        self.push(format!("batch_done:{}", index));
    }

    fn on_discussion_complete(&self, answered: usize, total: usize) {
        self.push(format!("complete:{}:{}", answered, total));
    }
}
