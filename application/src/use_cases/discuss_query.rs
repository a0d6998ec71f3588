//! Discuss Query use case
//!
//! Orchestrates a full board discussion: select, dispatch, aggregate.

use super::dispatch::{DispatchError, Dispatcher};
use crate::config::BoardSettings;
use crate::error::BoardError;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::registry::ProviderRegistry;
use raincloud_domain::{
    Discussion, MemberRegistry, Query, SelectionMode, aggregate, select_members,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Input for the DiscussQuery use case
#[derive(Debug, Clone)]
pub struct DiscussQueryInput {
    /// The question put to the board
    pub query: Query,
    /// Which members answer
    pub mode: SelectionMode,
}

impl DiscussQueryInput {
    pub fn new(query: Query, mode: SelectionMode) -> Self {
        Self { query, mode }
    }
}

/// Use case for running a board discussion
pub struct DiscussQueryUseCase {
    members: Arc<MemberRegistry>,
    providers: Arc<ProviderRegistry>,
    settings: BoardSettings,
    cancellation_token: Option<CancellationToken>,
}

impl DiscussQueryUseCase {
    pub fn new(
        members: Arc<MemberRegistry>,
        providers: Arc<ProviderRegistry>,
        settings: BoardSettings,
    ) -> Self {
        Self {
            members,
            providers,
            settings,
            cancellation_token: None,
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: DiscussQueryInput) -> Result<Discussion, BoardError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: DiscussQueryInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<Discussion, BoardError> {
        let query = input.query.content();
        let policy = self.settings.selection_policy();
        let candidates = select_members(query, &input.mode, &self.members, &policy);

        if let SelectionMode::Specific(id) = &input.mode
            && candidates.is_empty()
        {
            return Err(BoardError::UnknownMember(id.clone()));
        }

        info!(
            "Board discussion ({} mode) with {} candidate(s)",
            input.mode,
            candidates.len()
        );
        debug!(
            "Candidates: {}",
            candidates
                .iter()
                .map(|m| m.id.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );

        let mut dispatcher = Dispatcher::new(
            Arc::clone(&self.providers),
            self.settings.max_concurrent_agents,
            self.settings.call_timeout,
        );
        if let Some(token) = &self.cancellation_token {
            dispatcher = dispatcher.with_cancellation(token.clone());
        }

        let outcome = dispatcher
            .dispatch(&candidates, query, progress)
            .await
            .map_err(|e| match e {
                DispatchError::Cancelled => BoardError::Cancelled,
            })?;

        Ok(aggregate(
            input.query.into_content(),
            outcome.responses,
            &self.members,
            outcome.elapsed,
            self.settings.cost_per_token,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ScriptedProvider, member};
    use raincloud_domain::BoardMember;
    use std::time::Duration;

    fn use_case(members: Vec<BoardMember>, providers: Vec<ScriptedProvider>) -> DiscussQueryUseCase {
        let mut registry = ProviderRegistry::new();
        for p in providers {
            registry.register(p.provider_id().to_string(), Arc::new(p));
        }
        DiscussQueryUseCase::new(
            Arc::new(MemberRegistry::new(members)),
            Arc::new(registry),
            BoardSettings::default(),
        )
    }

    fn input(query: &str, mode: SelectionMode) -> DiscussQueryInput {
        DiscussQueryInput::new(Query::new(query).unwrap(), mode)
    }

    #[tokio::test]
    async fn test_ceo_and_cfo_answer_revenue_question() {
        let ceo = BoardMember::new("ceo", "Alex", "CEO", "a").with_priority(1);
        let cfo = BoardMember::new("cfo", "Dana", "CFO", "b").with_priority(2);
        let uc = use_case(vec![cfo, ceo], vec![ScriptedProvider::new("a"), ScriptedProvider::new("b")]);

        let discussion = uc
            .execute(input("What is our projected revenue growth?", SelectionMode::Relevant))
            .await
            .unwrap();

        let agents: Vec<&str> = discussion.responses.iter().map(|r| r.agent.as_str()).collect();
        assert_eq!(agents, vec!["ceo", "cfo"]);
        assert_eq!(discussion.query, "What is our projected revenue growth?");
        assert_eq!(discussion.responses[0].provider, "a");
        assert_eq!(discussion.responses[1].provider, "b");
    }

    #[tokio::test]
    async fn test_all_mode_orders_by_priority() {
        let uc = use_case(
            vec![member("c", 3, "p"), member("a", 1, "p"), member("b", 2, "p")],
            vec![ScriptedProvider::new("p")],
        );

        let discussion = uc.execute(input("anything", SelectionMode::All)).await.unwrap();

        let agents: Vec<&str> = discussion.responses.iter().map(|r| r.agent.as_str()).collect();
        assert_eq!(agents, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_unknown_specific_member() {
        let uc = use_case(vec![member("ceo", 1, "p")], vec![ScriptedProvider::new("p")]);
        let err = uc
            .execute(input("q", SelectionMode::specific("cio")))
            .await
            .unwrap_err();
        assert_eq!(err, BoardError::UnknownMember("cio".to_string()));
    }

    #[tokio::test]
    async fn test_specific_member_answers_alone() {
        let uc = use_case(
            vec![member("ceo", 1, "p"), member("cto", 3, "p")],
            vec![ScriptedProvider::new("p")],
        );
        let discussion = uc
            .execute(input("q", SelectionMode::specific("cto")))
            .await
            .unwrap();
        assert_eq!(discussion.responses.len(), 1);
        assert_eq!(discussion.responses[0].agent, "cto");
    }

    #[tokio::test]
    async fn test_every_provider_down_gives_empty_discussion() {
        let uc = use_case(
            vec![member("ceo", 1, "x"), member("cfo", 2, "y")],
            vec![ScriptedProvider::new("x").unhealthy()],
        );
        let discussion = uc.execute(input("budget", SelectionMode::All)).await.unwrap();
        assert!(discussion.is_empty());
        assert_eq!(discussion.total_cost, 0.0);
    }

    #[tokio::test]
    async fn test_cost_follows_token_usage() {
        let uc = use_case(
            vec![member("ceo", 1, "p"), member("cfo", 2, "p")],
            vec![ScriptedProvider::new("p").with_usage(400, 600)],
        );
        let discussion = uc.execute(input("q", SelectionMode::All)).await.unwrap();
        assert_eq!(discussion.total_tokens(), 2000);
        assert!((discussion.total_cost - 0.002).abs() < 1e-12);
    }

    #[tokio::test(start_paused = true)]
    async fn test_total_latency_covers_slowest_answer() {
        let uc = use_case(
            vec![member("ceo", 1, "slow"), member("cfo", 2, "fast")],
            vec![
                ScriptedProvider::new("slow").with_delay(Duration::from_millis(800)),
                ScriptedProvider::new("fast").with_delay(Duration::from_millis(100)),
            ],
        );
        let discussion = uc.execute(input("q", SelectionMode::All)).await.unwrap();
        assert!(discussion.total_latency_ms >= discussion.max_response_latency_ms());
        assert!(discussion.total_latency_ms >= 800);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ceo_and_cfo_in_all_mode() {
        let uc = use_case(
            vec![
                BoardMember::new("cfo", "Dana", "CFO", "b").with_priority(2),
                BoardMember::new("ceo", "Alex", "CEO", "a").with_priority(1),
            ],
            vec![
                ScriptedProvider::new("a")
                    .with_delay(Duration::from_millis(100))
                    .with_usage(100, 200),
                ScriptedProvider::new("b")
                    .with_delay(Duration::from_millis(150))
                    .with_usage(300, 400),
            ],
        );

        let discussion = uc.execute(input("q", SelectionMode::All)).await.unwrap();

        let agents: Vec<&str> = discussion.responses.iter().map(|r| r.agent.as_str()).collect();
        assert_eq!(agents, vec!["ceo", "cfo"]);
        assert!((150..=300).contains(&discussion.total_latency_ms));
        let rate = BoardSettings::default().cost_per_token;
        let expected = 300.0 * rate + 700.0 * rate;
        assert!((discussion.total_cost - expected).abs() < 1e-12);
    }

    #[tokio::test]
    async fn test_cancelled_before_start() {
        let token = CancellationToken::new();
        token.cancel();
        let uc = use_case(vec![member("ceo", 1, "p")], vec![ScriptedProvider::new("p")])
            .with_cancellation(token);

        let err = uc.execute(input("q", SelectionMode::All)).await.unwrap_err();
        assert!(err.is_cancelled());
    }
}
