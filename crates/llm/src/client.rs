use async_trait::async_trait;
use replyai_common::{AppConfig, ReplyAiError, Result};
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::llm_trait::CompletionClient;
use crate::prompts::{API_KEY_MISSING, FALLBACK_REPLY};
use crate::types::{ChatRequest, ChatResponse, CompletionKind};

/// Longest slice of an error body carried into the error message
const ERROR_BODY_EXCERPT_CHARS: usize = 500;

/// OpenAI-compatible chat completion client
///
/// One instance is shared by all requests so the connection pool is reused.
#[derive(Clone)]
pub struct OpenAiClient {
    base_url: String,
    api_key: String,
    model: String,
    timeout: Duration,
    client: Client,
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl OpenAiClient {
    /// Create new chat completion client
    ///
    /// `timeout` bounds the whole round trip (connect, send and body read).
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;

        let model = model.into();
        info!("Chat completion client initialized: {} (model: {})", base_url, model);

        Ok(Self {
            base_url,
            api_key: api_key.into(),
            model,
            timeout,
            client,
        })
    }

    /// Create from application configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(
            config.openai_base_url.clone(),
            config.openai_api_key.clone(),
            config.openai_model.clone(),
            config.request_timeout(),
        )
    }

    /// Configured model name
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Full chat completions endpoint URL
    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Build the request body for `kind`
    pub fn build_request(
        &self,
        kind: CompletionKind,
        original: &str,
        preprocessed: &str,
    ) -> ChatRequest {
        ChatRequest::new(self.model.clone(), kind, original, preprocessed)
    }

    /// Single attempt; no retries
    async fn send(&self, request: &ChatRequest) -> Result<String> {
        let url = self.endpoint();

        debug!(
            "Sending chat completion request - Model: {}, max_tokens: {}, messages: {}",
            request.model,
            request.max_tokens,
            request.messages.len()
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            warn!("Chat completion API returned {}", status);
            return Err(ReplyAiError::upstream(format!(
                "HTTP {}: {}",
                status,
                excerpt(&body, ERROR_BODY_EXCERPT_CHARS)
            )));
        }

        let parsed: ChatResponse = serde_json::from_str(&body).map_err(|e| {
            ReplyAiError::upstream(format!("응답을 해석할 수 없습니다: {}", e))
        })?;

        if let Some(usage) = &parsed.usage {
            debug!(
                "Token usage - prompt: {:?}, completion: {:?}, total: {:?}",
                usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
            );
        }

        let content = parsed
            .first_content()
            .ok_or_else(|| ReplyAiError::upstream("응답에 choices 항목이 없습니다."))?;

        Ok(content.unwrap_or_else(|| {
            warn!("Chat completion returned empty content, using fallback text");
            FALLBACK_REPLY.to_string()
        }))
    }

    fn transport_error(&self, e: reqwest::Error) -> ReplyAiError {
        if e.is_timeout() {
            warn!("Chat completion request timed out after {:?}", self.timeout);
            ReplyAiError::UpstreamTimeout(self.timeout)
        } else {
            ReplyAiError::upstream(format!("요청을 보낼 수 없습니다: {}", e))
        }
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    fn ensure_configured(&self) -> Result<()> {
        if self.api_key.is_empty() {
            return Err(ReplyAiError::config(API_KEY_MISSING));
        }
        Ok(())
    }

    async fn complete(
        &self,
        kind: CompletionKind,
        original: &str,
        preprocessed: &str,
    ) -> Result<String> {
        self.ensure_configured()?;

        let request = self.build_request(kind, original, preprocessed);
        let started = Instant::now();
        let text = self.send(&request).await?;

        info!(
            "Chat completion done - kind: {}, model: {}, elapsed: {:?}, length: {}",
            kind.as_str(),
            self.model,
            started.elapsed(),
            text.chars().count()
        );

        Ok(text)
    }
}

/// First `max_chars` characters of `body`, marked when cut
fn excerpt(body: &str, max_chars: usize) -> String {
    let mut chars = body.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}
