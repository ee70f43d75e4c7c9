use serde::{Deserialize, Serialize};

use crate::prompts::{answer_prompt, reply_prompt, ANSWER_SYSTEM_PROMPT, REPLY_SYSTEM_PROMPT};

/// Sampling temperature used for every request
pub const TEMPERATURE: f64 = 0.7;

/// Which endpoint the completion is generated for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionKind {
    /// Reply to a user comment (`/api/ai/reply`)
    Reply,
    /// Answer to a piece of content (`/api/ai/answer`)
    Answer,
}

impl CompletionKind {
    /// System message content
    pub fn system_prompt(self) -> &'static str {
        match self {
            Self::Reply => REPLY_SYSTEM_PROMPT,
            Self::Answer => ANSWER_SYSTEM_PROMPT,
        }
    }

    /// User message content
    pub fn user_prompt(self, original: &str, preprocessed: &str) -> String {
        match self {
            Self::Reply => reply_prompt(original, preprocessed),
            Self::Answer => answer_prompt(original, preprocessed),
        }
    }

    /// Maximum tokens to generate
    pub fn max_tokens(self) -> u32 {
        match self {
            Self::Reply => 500,
            Self::Answer => 1000,
        }
    }

    /// Name used in logs and as the success envelope field
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Reply => "reply",
            Self::Answer => "answer",
        }
    }
}

/// Chat message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// Chat completion request body
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Model name (e.g., "gpt-3.5-turbo")
    pub model: String,

    /// System message followed by the user message
    pub messages: Vec<ChatMessage>,

    /// Sampling temperature
    pub temperature: f64,

    /// Maximum tokens to generate
    pub max_tokens: u32,
}

impl ChatRequest {
    /// Build the two-message request for `kind`
    pub fn new(
        model: impl Into<String>,
        kind: CompletionKind,
        original: &str,
        preprocessed: &str,
    ) -> Self {
        Self {
            model: model.into(),
            messages: vec![
                ChatMessage {
                    role: Role::System,
                    content: kind.system_prompt().to_string(),
                },
                ChatMessage {
                    role: Role::User,
                    content: kind.user_prompt(original, preprocessed),
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: kind.max_tokens(),
        }
    }
}

/// Chat completion response body
///
/// Only `choices[0].message.content` is consumed.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    /// Model that served the request
    #[serde(default)]
    pub model: Option<String>,

    /// Generated choices
    pub choices: Vec<ChatChoice>,

    /// Token accounting
    #[serde(default)]
    pub usage: Option<Usage>,
}

/// One generated choice
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    #[serde(default)]
    pub message: Option<ResponseMessage>,

    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Assistant message inside a choice
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

/// Token usage
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: Option<u32>,

    #[serde(default)]
    pub completion_tokens: Option<u32>,

    #[serde(default)]
    pub total_tokens: Option<u32>,
}

impl ChatResponse {
    /// Content of the first choice, if any non-empty text was produced
    ///
    /// Returns `None` when `choices` is empty.
    pub fn first_content(self) -> Option<Option<String>> {
        self.choices.into_iter().next().map(|choice| {
            choice
                .message
                .and_then(|message| message.content)
                .filter(|content| !content.is_empty())
        })
    }
}
