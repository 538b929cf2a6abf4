use std::sync::Arc;
use tokio::sync::Mutex;

use crate::error::ConfigError;
use crate::services::chat_service::ChatSession;
use crate::services::config_service::AppConfig;
use crate::services::llm_client::{GeminiClient, GenerativeBackend};
use crate::services::summarizer_service::SummarizationClient;
use crate::services::workspace_service::SummaryWorkspace;

/// Everything the UI commands operate on. The summarizer and the chat view
/// are independent: each has its own in-flight guard.
pub struct AppState {
    pub(crate) config: AppConfig,
    pub(crate) backend: Arc<dyn GenerativeBackend>,
    pub(crate) workspace: SummaryWorkspace,
    pub(crate) chat: Mutex<Option<Arc<ChatSession>>>,
}

impl AppState {
    pub fn new(config: AppConfig, backend: Arc<dyn GenerativeBackend>) -> Self {
        let workspace = SummaryWorkspace::new(SummarizationClient::new(backend.clone()));
        Self {
            config,
            backend,
            workspace,
            chat: Mutex::new(None),
        }
    }

    /// Build state around the Gemini REST client.
    pub fn from_config(config: AppConfig) -> Result<Self, ConfigError> {
        let client = GeminiClient::from_config(&config)?;
        Ok(Self::new(config, Arc::new(client)))
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub(crate) async fn current_chat(&self) -> Option<Arc<ChatSession>> {
        self.chat.lock().await.clone()
    }
}
