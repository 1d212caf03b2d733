use actix_web::dev::ServerHandle;
use actix_web::http::StatusCode;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use std::sync::{Arc, Mutex};

/// One request as received by the mock upstream.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub authorization: Option<String>,
    pub body: serde_json::Value,
}

struct MockState {
    status: u16,
    body: String,
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
}

/// Local OpenAI-compatible server answering every completion with a fixed status and body.
pub struct MockUpstream {
    base_url: String,
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
    handle: ServerHandle,
}

impl MockUpstream {
    pub async fn start(
        status: u16,
        body: impl Into<String>,
    ) -> Self {
        let captured = Arc::new(Mutex::new(Vec::new()));
        let state = web::Data::new(MockState {
            status,
            body: body.into(),
            captured: captured.clone(),
        });

        let server = HttpServer::new(move || {
            App::new()
                .app_data(state.clone())
                .route("/v1/chat/completions", web::post().to(completions_handler))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("Failed to bind mock upstream");

        let addr = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        Self {
            base_url: format!("http://{addr}/v1"),
            captured,
            handle,
        }
    }

    /// Upstream answering with a single choice holding `content`.
    pub async fn replying(content: &str) -> Self {
        let body = serde_json::json!({
            "id": "chatcmpl-mock",
            "object": "chat.completion",
            "model": "gpt-4",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            }]
        });
        Self::start(200, body.to_string()).await
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn captured(&self) -> Vec<CapturedRequest> {
        self.captured.lock().unwrap().clone()
    }

    pub async fn stop(self) {
        self.handle.stop(true).await;
    }
}

async fn completions_handler(
    state: web::Data<MockState>,
    req: HttpRequest,
    body: web::Json<serde_json::Value>,
) -> HttpResponse {
    let authorization = req
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    state.captured.lock().unwrap().push(CapturedRequest {
        authorization,
        body: body.into_inner(),
    });

    HttpResponse::build(StatusCode::from_u16(state.status).unwrap())
        .content_type("application/json")
        .body(state.body.clone())
}
