use async_trait::async_trait;
use replyai_common::Result;

use crate::types::CompletionKind;

/// Common trait for chat completion clients
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Fail fast when the client cannot issue requests at all
    fn ensure_configured(&self) -> Result<()> {
        Ok(())
    }

    /// Generate the assistant text for one reply or answer
    async fn complete(
        &self,
        kind: CompletionKind,
        original: &str,
        preprocessed: &str,
    ) -> Result<String>;
}
