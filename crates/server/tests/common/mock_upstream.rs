//! In-process chat completion server

use actix_web::{dev::ServerHandle, http::StatusCode, web, App, HttpRequest, HttpResponse, HttpServer};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// One request as the upstream saw it
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Value,
}

struct MockState {
    status: u16,
    body: String,
    delay: Duration,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// Mock chat completion API bound to an ephemeral local port
pub struct MockUpstream {
    base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: ServerHandle,
}

impl MockUpstream {
    /// Answer every request with `status` and `body`
    pub async fn start(status: u16, body: impl Into<String>) -> Self {
        Self::start_with_delay(status, body, Duration::ZERO).await
    }

    /// Answer with the given content wrapped in a chat completion body
    pub async fn with_content(content: &str) -> Self {
        let body = serde_json::json!({
            "id": "chatcmpl-test",
            "object": "chat.completion",
            "model": "gpt-3.5-turbo",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            }]
        });
        Self::start(200, body.to_string()).await
    }

    /// Sleep `delay` before answering
    pub async fn start_with_delay(status: u16, body: impl Into<String>, delay: Duration) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = web::Data::new(MockState {
            status,
            body: body.into(),
            delay,
            requests: requests.clone(),
        });

        let server = HttpServer::new(move || {
            App::new()
                .app_data(state.clone())
                .route("/v1/chat/completions", web::post().to(chat_completions))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .unwrap();

        let addr = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        Self {
            base_url: format!("http://{}/v1", addr),
            requests,
            handle,
        }
    }

    /// Base URL to configure the client with (ends in `/v1`)
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}

async fn chat_completions(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<MockState>,
) -> HttpResponse {
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    state.requests.lock().unwrap().push(RecordedRequest {
        path: req.path().to_string(),
        authorization: header("authorization"),
        content_type: header("content-type"),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    });

    if !state.delay.is_zero() {
        actix_web::rt::time::sleep(state.delay).await;
    }

    HttpResponse::build(StatusCode::from_u16(state.status).unwrap())
        .content_type("application/json")
        .body(state.body.clone())
}
