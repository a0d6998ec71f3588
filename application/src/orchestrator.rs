//! Board orchestrator
//!
//! The public entry point of the application layer. Owns the member and
//! provider registries and the board settings, and runs each operation
//! through its use case.

use crate::config::BoardSettings;
use crate::error::BoardError;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::registry::ProviderRegistry;
use crate::use_cases::check_providers::{CheckProvidersUseCase, ProviderHealth};
use crate::use_cases::direct_response::{DirectResponseInput, DirectResponseUseCase};
use crate::use_cases::discuss_query::{DiscussQueryInput, DiscussQueryUseCase};
use raincloud_domain::{BoardMember, CompletionResponse, Discussion, MemberRegistry, Query, SelectionMode};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Facade over a configured board.
///
/// All state is read-only after construction, so one orchestrator can
/// serve any number of concurrent discussions through a shared reference.
pub struct BoardOrchestrator {
    members: Arc<MemberRegistry>,
    providers: Arc<ProviderRegistry>,
    settings: BoardSettings,
    cancellation_token: Option<CancellationToken>,
}

impl BoardOrchestrator {
    pub fn new(members: MemberRegistry, providers: ProviderRegistry, settings: BoardSettings) -> Self {
        Self {
            members: Arc::new(members),
            providers: Arc::new(providers),
            settings,
            cancellation_token: None,
        }
    }

    /// Cancelling `token` aborts any discussion in progress with
    /// [`BoardError::Cancelled`].
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    /// The configured board, in configuration order.
    pub fn members(&self) -> &[BoardMember] {
        self.members.members()
    }

    pub fn providers(&self) -> &ProviderRegistry {
        &self.providers
    }

    pub fn settings(&self) -> &BoardSettings {
        &self.settings
    }

    /// Put a query to the board.
    ///
    /// Members whose providers all fail are left out; the result may have
    /// no responses at all. Errors are reserved for bad input, an unknown
    /// member in specific mode, and cancellation.
    pub async fn discuss_query(&self, query: &str, mode: SelectionMode) -> Result<Discussion, BoardError> {
        self.discuss_query_with_progress(query, mode, &NoProgress).await
    }

    pub async fn discuss_query_with_progress(
        &self,
        query: &str,
        mode: SelectionMode,
        progress: &dyn ProgressNotifier,
    ) -> Result<Discussion, BoardError> {
        let query = Query::new(query)?;

        let mut use_case = DiscussQueryUseCase::new(
            Arc::clone(&self.members),
            Arc::clone(&self.providers),
            self.settings.clone(),
        );
        if let Some(token) = &self.cancellation_token {
            use_case = use_case.with_cancellation(token.clone());
        }

        use_case
            .execute_with_progress(DiscussQueryInput::new(query, mode), progress)
            .await
    }

    /// One completion from `provider` (or the default provider), bypassing
    /// member selection.
    pub async fn get_direct_response(
        &self,
        query: &str,
        provider: Option<&str>,
    ) -> Result<CompletionResponse, BoardError> {
        let mut input = DirectResponseInput::new(Query::new(query)?);
        if let Some(provider) = provider {
            input = input.with_provider(provider);
        }

        DirectResponseUseCase::new(Arc::clone(&self.providers), self.settings.clone())
            .execute(input)
            .await
    }

    /// Health of every registered provider, sorted by id.
    pub async fn check_providers(&self) -> Vec<ProviderHealth> {
        CheckProvidersUseCase::new(Arc::clone(&self.providers), self.settings.call_timeout)
            .execute()
            .await
    }
}
