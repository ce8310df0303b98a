//! mindmapify HTTP server.
//!
//! Configuration comes from the TOML file named by `MINDMAPIFY_CONFIG` (if
//! set), then `MINDMAPIFY_BIND` / `MINDMAPIFY_PORT`.
//!
//! Build and run: `cargo run --bin mindmapify-server`

use std::path::PathBuf;
use std::sync::Arc;

use miette::{IntoDiagnostic, Result};

use mindmapify::config::MindMapConfig;
use mindmapify::document;
use mindmapify::nlp::{self, LanguageModel};
use mindmapify::server::{AppState, router};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config_path = std::env::var_os("MINDMAPIFY_CONFIG").map(PathBuf::from);
    let mut config = MindMapConfig::load_or_default(config_path.as_deref())?;
    config.apply_env()?;

    let model = nlp::load_model(&config.nlp)?;
    let pdf = document::pdf_extractor();
    tracing::info!(
        model = model.name(),
        pdf = pdf.is_some(),
        categories = config.categories.len(),
        "mindmapify server initialized"
    );

    let state = AppState::new(Arc::new(model), config.extractor(), pdf);
    let app = router(state, config.server.max_upload_bytes);

    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await.into_diagnostic()?;
    tracing::info!("mindmapify server listening on {addr}");
    axum::serve(listener, app).await.into_diagnostic()?;
    Ok(())
}
