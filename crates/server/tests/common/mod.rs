//! Test doubles for the reply pipeline

#![allow(dead_code)]

pub mod mock_upstream;

use async_trait::async_trait;
use replyai_common::{ReplyAiError, Result};
use replyai_preprocess::TextPreprocessor;
use std::sync::atomic::{AtomicUsize, Ordering};

/// What the scripted preprocessor does on every call
#[derive(Clone)]
pub enum Script {
    /// Return this text
    Cleaned(String),
    /// Return the input unchanged
    Echo,
    /// Fail with this message
    Fail(String),
}

/// In-memory preprocessor that counts its calls
pub struct ScriptedPreprocessor {
    script: Script,
    calls: AtomicUsize,
}

impl ScriptedPreprocessor {
    pub fn new(script: Script) -> Self {
        Self {
            script,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextPreprocessor for ScriptedPreprocessor {
    async fn preprocess(&self, input: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.script {
            Script::Cleaned(text) => Ok(text.clone()),
            Script::Echo => Ok(input.to_string()),
            Script::Fail(msg) => Err(ReplyAiError::preprocessor(msg.clone())),
        }
    }
}
