use replyai_common::{AppConfig, Result};
use replyai_llm::{CompletionClient, OpenAiClient};
use replyai_preprocess::TextPreprocessor;
use std::sync::Arc;

use crate::service::ReplyService;

/// Shared application state
pub struct AppState {
    /// Preprocess + completion pipeline
    pub service: ReplyService,
}

impl AppState {
    /// Create state from explicit collaborators
    pub fn new(
        preprocessor: Arc<dyn TextPreprocessor>,
        client: Arc<dyn CompletionClient>,
    ) -> Self {
        Self {
            service: ReplyService::new(preprocessor, client),
        }
    }

    /// Create state from application configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let preprocessor = replyai_preprocess::from_config(config)?;
        let client = Arc::new(OpenAiClient::from_config(config)?);
        Ok(Self::new(preprocessor, client))
    }
}
