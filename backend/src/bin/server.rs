//! Traffic forecast HTTP server binary.
//!
//! # Usage
//!
//! ```bash
//! MODEL_PATH=models/trafik_model.json \
//! GEOCODING_API_KEY=... \
//!   cargo run --bin traffic-server
//! ```
//!
//! # Environment Variables
//!
//! See [`traffic_forecast::config`] for the full list.
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use traffic_forecast::config::ServiceConfig;
use traffic_forecast::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting traffic forecast server");

    let config = ServiceConfig::load()?;
    let state = AppState::from_config(&config);
    if !state.prediction.model_loaded() {
        info!(
            path = %config.model.model_path.display(),
            "serving without a model; /predict will return 500"
        );
    }

    let app = create_router(state);

    let addr: SocketAddr = config.bind_address().parse()?;
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
