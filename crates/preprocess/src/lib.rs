//! ReplyAI text preprocessing
//!
//! Turns raw user text into cleaned text before it is sent to the chat
//! completion API, either through the external preprocessing script or
//! in-process.

mod builtin;
mod command;
mod preprocessor_trait;
mod types;

use replyai_common::{AppConfig, PreprocessorMode, Result};
use std::sync::Arc;

pub use builtin::BuiltinPreprocessor;
pub use command::CommandPreprocessor;
pub use preprocessor_trait::TextPreprocessor;
pub use types::PreprocessorOutput;

/// Build the preprocessor selected by `preprocessor.mode`
pub fn from_config(config: &AppConfig) -> Result<Arc<dyn TextPreprocessor>> {
    let preprocessor: Arc<dyn TextPreprocessor> = match config.preprocessor_mode {
        PreprocessorMode::Command => Arc::new(CommandPreprocessor::from_config(config)),
        PreprocessorMode::Builtin => Arc::new(BuiltinPreprocessor::new()?),
    };
    Ok(preprocessor)
}
