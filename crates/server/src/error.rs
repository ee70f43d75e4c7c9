use actix_web::{error::JsonPayloadError, http::StatusCode, HttpRequest, HttpResponse, ResponseError};
use replyai_common::ReplyAiError;
use std::fmt;
use tracing::{error, warn};

use crate::types::{ErrorResponse, GENERATION_FAILED_PREFIX};

/// Translates pipeline errors into HTTP status + `{ "error": ... }`
#[derive(Debug)]
pub struct ApiError(pub ReplyAiError);

impl From<ReplyAiError> for ApiError {
    fn from(err: ReplyAiError) -> Self {
        Self(err)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            ReplyAiError::InvalidInput(msg) => f.write_str(msg),
            other => write!(f, "{}{}", GENERATION_FAILED_PREFIX, other),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed: {}", self.0);
        } else {
            warn!("Request rejected: {}", self.0);
        }
        HttpResponse::build(status).json(ErrorResponse::new(self.to_string()))
    }
}

/// Malformed JSON bodies get the same error envelope as everything else
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    warn!("JSON payload error: {}", err);
    let status = match &err {
        JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
            StatusCode::PAYLOAD_TOO_LARGE
        }
        _ => StatusCode::BAD_REQUEST,
    };
    let response = HttpResponse::build(status)
        .json(ErrorResponse::new(format!("잘못된 요청 형식입니다: {}", err)));
    actix_web::error::InternalError::from_response(err, response).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_is_unprefixed() {
        let err = ApiError::from(ReplyAiError::invalid_input("내용이 없습니다."));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "내용이 없습니다.");
    }

    #[test]
    fn test_pipeline_error_is_prefixed() {
        let err = ApiError::from(ReplyAiError::upstream("HTTP 401 Unauthorized: {}"));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.to_string(),
            "답변 생성 중 오류가 발생했습니다: OpenAI API 호출 중 오류가 발생했습니다: HTTP 401 Unauthorized: {}"
        );
    }
}
