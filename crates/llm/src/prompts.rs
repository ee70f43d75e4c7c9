//! Prompt templates for replies and answers

/// System prompt for comment replies
pub const REPLY_SYSTEM_PROMPT: &str =
    "당신은 친절하고 전문적인 고객 서비스 담당자입니다. 사용자의 댓글에 대해 도움이 되는 답변을 한국어로 작성합니다.";

/// System prompt for content answers
pub const ANSWER_SYSTEM_PROMPT: &str =
    "당신은 전문적인 콘텐츠 작성자입니다. 주어진 내용에 대해 적절하고 도움이 되는 답변을 한국어로 작성합니다.";

/// Substituted when the model returns empty content
pub const FALLBACK_REPLY: &str = "답변을 생성할 수 없습니다.";

/// Reported per request when no API key is configured
pub const API_KEY_MISSING: &str =
    "OpenAI API 키가 설정되지 않았습니다. application.properties에 openai.api.key를 설정해주세요.";

/// User prompt for a comment reply
pub fn reply_prompt(original: &str, preprocessed: &str) -> String {
    format!(
        "다음 댓글에 대해 친절하고 도움이 되는 답변을 한국어로 작성해주세요.\n\n원본 댓글:\n{}\n\n전처리된 댓글:\n{}",
        original, preprocessed
    )
}

/// User prompt for a content answer
pub fn answer_prompt(original: &str, preprocessed: &str) -> String {
    format!(
        "다음 내용에 대해 적절한 답변을 한국어로 작성해주세요.\n\n원본 내용:\n{}\n\n전처리된 내용:\n{}",
        original, preprocessed
    )
}
