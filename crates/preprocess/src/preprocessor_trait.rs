use async_trait::async_trait;
use replyai_common::Result;

/// Common trait for text preprocessors
#[async_trait]
pub trait TextPreprocessor: Send + Sync {
    /// Return the cleaned variant of `input`, or `input` itself when the
    /// preprocessor produced nothing
    async fn preprocess(&self, input: &str) -> Result<String>;
}
