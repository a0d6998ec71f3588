//! Check Providers use case
//!
//! Probes every registered provider concurrently.

use crate::registry::ProviderRegistry;
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::debug;

/// Health of one registered provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderHealth {
    pub provider: String,
    pub healthy: bool,
}

pub struct CheckProvidersUseCase {
    providers: Arc<ProviderRegistry>,
    call_timeout: Duration,
}

impl CheckProvidersUseCase {
    pub fn new(providers: Arc<ProviderRegistry>, call_timeout: Duration) -> Self {
        Self {
            providers,
            call_timeout,
        }
    }

    /// Health of every registered provider, sorted by id. A probe that
    /// misses the deadline counts as unhealthy.
    pub async fn execute(&self) -> Vec<ProviderHealth> {
        let probes = self.providers.ids().into_iter().filter_map(|id| {
            let provider = self.providers.get(&id)?;
            Some(async move {
                let healthy = timeout(self.call_timeout, provider.health_check())
                    .await
                    .unwrap_or(false);
                debug!("Provider {} healthy: {}", id, healthy);
                ProviderHealth {
                    provider: id,
                    healthy,
                }
            })
        });

        join_all(probes).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedProvider;

    #[tokio::test(start_paused = true)]
    async fn test_reports_each_provider_sorted() {
        let registry = ProviderRegistry::new()
            .with("openai", Arc::new(ScriptedProvider::new("openai").unhealthy()))
            .with("anthropic", Arc::new(ScriptedProvider::new("anthropic")))
            .with(
                "google",
                Arc::new(
                    ScriptedProvider::new("google").with_health_delay(Duration::from_secs(600)),
                ),
            );

        let report = CheckProvidersUseCase::new(Arc::new(registry), Duration::from_secs(2))
            .execute()
            .await;

        let pairs: Vec<(&str, bool)> = report
            .iter()
            .map(|h| (h.provider.as_str(), h.healthy))
            .collect();
        assert_eq!(
            pairs,
            vec![("anthropic", true), ("google", false), ("openai", false)]
        );
    }

    #[tokio::test]
    async fn test_empty_registry() {
        let report = CheckProvidersUseCase::new(Arc::new(ProviderRegistry::new()), Duration::from_secs(1))
            .execute()
            .await;
        assert!(report.is_empty());
    }
}
