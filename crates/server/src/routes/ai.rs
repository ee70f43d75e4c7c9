use actix_web::{get, post, web, HttpResponse};
use replyai_common::ReplyAiError;
use replyai_llm::CompletionKind;

use crate::error::ApiError;
use crate::state::AppState;
use crate::types::{
    non_blank, AnswerRequest, AnswerResponse, HealthResponse, ReplyRequest, ReplyResponse,
    EMPTY_COMMENT_MESSAGE, EMPTY_CONTENT_MESSAGE,
};

/// POST /api/ai/reply - Reply to a user comment
#[post("/reply")]
pub async fn reply(
    req: web::Json<ReplyRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let comment = non_blank(req.into_inner().comment)
        .ok_or_else(|| ReplyAiError::invalid_input(EMPTY_COMMENT_MESSAGE))?;

    let reply = state
        .service
        .generate(CompletionKind::Reply, &comment)
        .await?;

    Ok(HttpResponse::Ok().json(ReplyResponse { reply }))
}

/// POST /api/ai/answer - Answer a piece of content
#[post("/answer")]
pub async fn answer(
    req: web::Json<AnswerRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let content = non_blank(req.into_inner().content)
        .ok_or_else(|| ReplyAiError::invalid_input(EMPTY_CONTENT_MESSAGE))?;

    let answer = state
        .service
        .generate(CompletionKind::Answer, &content)
        .await?;

    Ok(HttpResponse::Ok().json(AnswerResponse { answer }))
}

/// GET /api/ai/health
#[get("/health")]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse::default())
}
