use replyai_common::Result;
use replyai_llm::{CompletionClient, CompletionKind};
use replyai_preprocess::TextPreprocessor;
use std::sync::Arc;
use tracing::{debug, info};

/// Runs preprocessing and then chat completion for one request
#[derive(Clone)]
pub struct ReplyService {
    preprocessor: Arc<dyn TextPreprocessor>,
    client: Arc<dyn CompletionClient>,
}

impl ReplyService {
    /// Create new reply service
    pub fn new(
        preprocessor: Arc<dyn TextPreprocessor>,
        client: Arc<dyn CompletionClient>,
    ) -> Self {
        Self {
            preprocessor,
            client,
        }
    }

    /// Generate a reply or answer for `text`
    ///
    /// Preprocessing always finishes before the upstream call starts. A
    /// client that cannot run at all (no API key) fails before the
    /// preprocessor is spawned.
    pub async fn generate(&self, kind: CompletionKind, text: &str) -> Result<String> {
        self.client.ensure_configured()?;

        info!("Generating {} - input length: {}", kind.as_str(), text.chars().count());

        let preprocessed = self.preprocessor.preprocess(text).await?;
        debug!("Preprocessed text: {}", preprocessed);

        self.client.complete(kind, text, &preprocessed).await
    }
}
