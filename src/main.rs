mod config;
mod keys;
mod llm;
mod routes;
mod state;
mod transcript;

use std::sync::Arc;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = config::RelayConfig::from_env().unwrap_or_else(|e| {
        tracing::error!(error = %e, "configuration error");
        std::process::exit(1);
    });

    let keys = keys::KeyPool::new(config.api_key_1.clone(), config.api_key_2.clone()).unwrap_or_else(|e| {
        tracing::error!(error = %e, "credential error");
        std::process::exit(1);
    });

    let llm = llm::OpenAiClient::new(config.model.clone(), &config.base_url, config.timeouts).unwrap_or_else(|e| {
        tracing::error!(error = %e, "completion client init failed");
        std::process::exit(1);
    });
    tracing::info!(model = %config.model, "completion client initialized");

    let settings = state::ChatSettings::from_config(&config);
    let app_state = state::AppState::new(keys, Arc::new(llm), settings);

    let app = routes::app(app_state);
    let addr = format!("{}:{}", config.bind_addr, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    tracing::info!(%addr, "mee-relay listening");
    axum::serve(listener, app).await.expect("server failed");
}
