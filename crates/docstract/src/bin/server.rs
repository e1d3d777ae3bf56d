//! Extraction server binary
//!
//! Run with: cargo run -p docstract --bin docstract-server

use docstract::{config::ExtractorConfig, server::ExtractorServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docstract=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration: file argument, or defaults
    let config = match std::env::args().nth(1) {
        Some(path) => ExtractorConfig::from_file(&path)?,
        None => ExtractorConfig::default(),
    };

    tracing::info!("Configuration loaded");
    tracing::info!("  - OCR language: {}", config.ocr.language);
    tracing::info!("  - Rasterization DPI: {}", config.ocr.dpi);
    tracing::info!("  - OCR policy: {:?}", config.ocr.policy);
    tracing::info!("  - Store: {}", config.store.database_path.display());

    // A missing OCR collaborator aborts startup here, not on first upload
    let server = ExtractorServer::new(config)?;

    println!("\nServer starting...");
    println!("  API: http://{}", server.address());
    println!("  Health: http://{}/health", server.address());
    println!("  API Info: http://{}/api/info", server.address());
    println!("\nEndpoints:");
    println!("  POST /api/extract              - Upload documents");
    println!("  GET  /api/batches              - List batches");
    println!("  GET  /api/batches/:id/download - Export approved items");
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}
