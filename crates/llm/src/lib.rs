//! ReplyAI LLM Integration
//!
//! Chat completion client and Korean prompt templates

mod client;
mod llm_trait;
mod prompts;
mod types;

pub use client::OpenAiClient;
pub use llm_trait::CompletionClient;
pub use prompts::{
    answer_prompt, reply_prompt, ANSWER_SYSTEM_PROMPT, API_KEY_MISSING, FALLBACK_REPLY,
    REPLY_SYSTEM_PROMPT,
};
pub use types::{
    ChatChoice, ChatMessage, ChatRequest, ChatResponse, CompletionKind, ResponseMessage, Role,
    Usage, TEMPERATURE,
};
