pub mod config;
pub mod error;
pub mod logger;

// Re-export commonly used types
pub use config::{AppConfig, PreprocessorMode};
pub use error::ReplyAiError;
pub type Result<T> = std::result::Result<T, ReplyAiError>;
