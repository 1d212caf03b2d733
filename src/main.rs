use actix_web::{App, HttpServer, web};
use chat_relay::config::Config;
use chat_relay::core::ChatService;
use chat_relay::server;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // .env is optional
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env().map_err(std::io::Error::other)?;

    if config.api_key.is_none() {
        tracing::warn!("OPENAI_API_KEY is not set; chat requests will be rejected upstream");
    }

    tracing::info!(
        "Relaying to {} (model: {}, temperature: {}, max_tokens: {})",
        config.upstream.completions_url(),
        config.upstream.model,
        config.upstream.temperature,
        config.upstream.max_tokens
    );

    let service = web::Data::new(ChatService::from_config(&config));

    tracing::info!("Starting server at http://{}:{}/swagger-ui/", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(server::cors())
            .app_data(service.clone())
            .configure(server::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
