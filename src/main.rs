// Passport extraction HTTP service

use clap::Parser;
use passport_ocr::api::{self, AppState};
use passport_ocr::config::Config;
use passport_ocr::PassportExtractor;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::parse();
    let origins = config.cors_origins();
    if origins.is_empty() {
        log::warn!("No valid allowed origins configured; cross-origin requests will be refused");
    }

    let extractor = PassportExtractor::with_tesseract(config.tessdata.clone(), &config.lang);
    let app = api::router(AppState::new(extractor), origins, config.max_upload_bytes());

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    log::info!("listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    log::info!("Shutting down");
}
