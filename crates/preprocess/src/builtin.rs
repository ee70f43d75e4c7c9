use async_trait::async_trait;
use regex::Regex;
use replyai_common::{ReplyAiError, Result};
use tracing::debug;

use crate::preprocessor_trait::TextPreprocessor;

/// In-process text cleaning
///
/// Removes HTML tags, collapses whitespace runs and trims, without
/// spawning a child process.
#[derive(Debug, Clone)]
pub struct BuiltinPreprocessor {
    tag_pattern: Regex,
    space_pattern: Regex,
}

impl BuiltinPreprocessor {
    /// Create new builtin preprocessor
    pub fn new() -> Result<Self> {
        let tag_pattern = Regex::new(r"<[^>]+>")
            .map_err(|e| ReplyAiError::config(format!("정규식 오류: {}", e)))?;
        let space_pattern = Regex::new(r"\s+")
            .map_err(|e| ReplyAiError::config(format!("정규식 오류: {}", e)))?;

        Ok(Self {
            tag_pattern,
            space_pattern,
        })
    }

    /// Strip tags and normalize whitespace
    pub fn clean_text(&self, text: &str) -> String {
        let without_tags = self.tag_pattern.replace_all(text, "");
        let collapsed = self.space_pattern.replace_all(&without_tags, " ");
        collapsed.trim().to_string()
    }
}

#[async_trait]
impl TextPreprocessor for BuiltinPreprocessor {
    async fn preprocess(&self, input: &str) -> Result<String> {
        let cleaned = self.clean_text(input);
        debug!(
            "Builtin preprocessing: {} -> {} chars",
            input.chars().count(),
            cleaned.chars().count()
        );

        if cleaned.is_empty() {
            Ok(input.to_string())
        } else {
            Ok(cleaned)
        }
    }
}
