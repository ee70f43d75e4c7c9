use serde::{Deserialize, Serialize};

/// Returned when `comment` is missing or blank
pub const EMPTY_COMMENT_MESSAGE: &str = "댓글 내용이 없습니다.";

/// Returned when `content` is missing or blank
pub const EMPTY_CONTENT_MESSAGE: &str = "내용이 없습니다.";

/// Prefix of every pipeline failure message
pub const GENERATION_FAILED_PREFIX: &str = "답변 생성 중 오류가 발생했습니다: ";

/// Health check message
pub const HEALTH_MESSAGE: &str = "AI 서비스가 정상적으로 작동 중입니다.";

/// POST /api/ai/reply body
#[derive(Debug, Deserialize)]
pub struct ReplyRequest {
    /// User comment
    #[serde(default)]
    pub comment: Option<String>,
}

/// POST /api/ai/answer body
///
/// Extra fields (e.g. the frontend's `preprocessedData`) are ignored.
#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    /// Content to answer
    #[serde(default)]
    pub content: Option<String>,
}

/// Reply response
#[derive(Debug, Serialize)]
pub struct ReplyResponse {
    pub reply: String,
}

/// Answer response
#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    pub answer: String,
}

/// Error envelope; always exactly one field
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok",
            message: HEALTH_MESSAGE,
        }
    }
}

/// Return the text when it has non-whitespace content
pub fn non_blank(text: Option<String>) -> Option<String> {
    text.filter(|t| !t.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_envelope_literal() {
        let body = serde_json::to_string(&ErrorResponse::new(EMPTY_COMMENT_MESSAGE)).unwrap();
        assert_eq!(body, r#"{"error":"댓글 내용이 없습니다."}"#);
    }

    #[test]
    fn test_health_literal() {
        let body = serde_json::to_string(&HealthResponse::default()).unwrap();
        assert_eq!(
            body,
            r#"{"status":"ok","message":"AI 서비스가 정상적으로 작동 중입니다."}"#
        );
    }

    #[test]
    fn test_answer_request_tolerates_extra_fields() {
        let req: AnswerRequest = serde_json::from_str(
            r#"{"content":"질문입니다","preprocessedData":"{\"cleaned_text\":\"질문입니다\"}"}"#,
        )
        .unwrap();
        assert_eq!(req.content.as_deref(), Some("질문입니다"));
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(None), None);
        assert_eq!(non_blank(Some("  \n\t".to_string())), None);
        assert_eq!(non_blank(Some(" x ".to_string())), Some(" x ".to_string()));
    }
}
