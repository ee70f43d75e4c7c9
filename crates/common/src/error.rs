use std::time::Duration;

/// ReplyAI error types
///
/// Display strings are Korean because they are forwarded to API callers
/// inside the `{ "error": ... }` envelope.
#[derive(Debug, thiserror::Error)]
pub enum ReplyAiError {
    /// Missing or empty request input
    #[error("{0}")]
    InvalidInput(String),

    /// Configuration error (e.g. missing API key)
    #[error("{0}")]
    Config(String),

    /// Preprocessor spawn failure, non-zero exit or unparseable output
    #[error("Python 전처리 호출 중 오류가 발생했습니다: {0}")]
    Preprocessor(String),

    /// Non-2xx response or malformed chat completion body
    #[error("OpenAI API 호출 중 오류가 발생했습니다: {0}")]
    Upstream(String),

    /// Upstream round trip exceeded the configured deadline
    #[error("OpenAI API 호출 중 오류가 발생했습니다: 응답 시간 초과 ({0:?})")]
    UpstreamTimeout(Duration),

    /// IO error
    #[error("IO 오류: {0}")]
    Io(#[from] std::io::Error),

    /// General error (anyhow integration)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReplyAiError {
    /// Create invalid input error
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create preprocessor error
    pub fn preprocessor<S: Into<String>>(msg: S) -> Self {
        Self::Preprocessor(msg.into())
    }

    /// Create upstream error
    pub fn upstream<S: Into<String>>(msg: S) -> Self {
        Self::Upstream(msg.into())
    }
}

impl ReplyAiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput(_) => 400,
            Self::Config(_) => 500,
            Self::Preprocessor(_) => 500,
            Self::Upstream(_) => 500,
            Self::UpstreamTimeout(_) => 500,
            Self::Io(_) => 500,
            Self::Other(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ReplyAiError::invalid_input("내용이 없습니다.").status_code(), 400);
        assert_eq!(ReplyAiError::config("키 없음").status_code(), 500);
        assert_eq!(ReplyAiError::preprocessor("boom").status_code(), 500);
        assert_eq!(ReplyAiError::upstream("HTTP 401").status_code(), 500);
        assert_eq!(ReplyAiError::UpstreamTimeout(Duration::from_secs(30)).status_code(), 500);
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "python");
        assert_eq!(ReplyAiError::from(io).status_code(), 500);
    }

    #[test]
    fn test_display_keeps_cause() {
        let err = ReplyAiError::preprocessor("Python 전처리 실패 (exitCode=1): boom");
        let msg = err.to_string();
        assert!(msg.starts_with("Python 전처리 호출 중 오류가 발생했습니다: "));
        assert!(msg.contains("exitCode=1"));
        assert!(msg.contains("boom"));

        let err = ReplyAiError::UpstreamTimeout(Duration::from_secs(30));
        assert!(err.to_string().contains("응답 시간 초과 (30s)"));
    }

    #[test]
    fn test_config_message_is_verbatim() {
        let err = ReplyAiError::config("OpenAI API 키가 설정되지 않았습니다.");
        assert_eq!(err.to_string(), "OpenAI API 키가 설정되지 않았습니다.");
    }
}
