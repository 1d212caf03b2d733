//! HTTP surface of the relay: routes, CORS policy and OpenAPI document.

use crate::chat::{ChatMessage, ChatRequest, ChatResponse, HealthResponse};
use crate::core::ChatService;
use crate::error::{ApiError, ErrorResponse};
use actix_cors::Cors;
use actix_web::error::JsonPayloadError;
use actix_web::{get, post, web};
use tracing::Instrument;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use uuid::Uuid;

#[utoipa::path(
    post,
    path = "/api/chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Text of the first completion choice", body = ChatResponse),
        (status = 422, description = "Request body does not match the schema", body = ErrorResponse),
        (status = 500, description = "Upstream call failed", body = ErrorResponse)
    )
)]
#[post("/api/chat")]
async fn chat(
    service: web::Data<ChatService>,
    req: web::Json<ChatRequest>,
) -> Result<web::Json<ChatResponse>, ApiError> {
    let request = req.into_inner();
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("chat", %request_id, messages = request.messages.len());

    async move {
        match service.chat(&request).await {
            Ok(response) => {
                tracing::info!("Chat completed");
                Ok(web::Json(response))
            }
            Err(e) => {
                tracing::error!(kind = e.kind(), "Chat request failed: {}", e);
                Err(ApiError::from(e))
            }
        }
    }
    .instrument(span)
    .await
}

#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    )
)]
#[get("/api/health")]
async fn health(service: web::Data<ChatService>) -> web::Json<HealthResponse> {
    web::Json(service.health())
}

#[derive(OpenApi)]
#[openapi(
    paths(chat, health),
    components(schemas(ChatRequest, ChatMessage, ChatResponse, HealthResponse, ErrorResponse))
)]
pub struct ApiDoc;

/// Any origin, method and header; credentials allowed.
#[must_use]
pub fn cors() -> Cors {
    Cors::permissive()
}

/// Largest accepted request body.
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// JSON extractor settings.
///
/// Bodies without a `Content-Type` are parsed as JSON. Oversized bodies get 413,
/// every other rejection 422, both with a `detail` body.
#[must_use]
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(MAX_BODY_BYTES)
        .content_type_required(false)
        .error_handler(|err, _req| {
            tracing::warn!("Rejected request body: {}", err);
            match err {
                JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
                    ApiError::payload_too_large(err.to_string()).into()
                }
                _ => ApiError::unprocessable_entity(err.to_string()).into(),
            }
        })
}

/// Register routes and extractor config. The caller supplies `web::Data<ChatService>`
/// and wraps the app with [`cors`].
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(chat)
        .service(health)
        .service(SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-doc/openapi.json", ApiDoc::openapi()));
}
