//! Runnable Roshambo server binary.
//!
//! Binds `0.0.0.0:$PORT` (default 3001) and serves until terminated.
//! Log verbosity is controlled through `RUST_LOG`.

use roshambo::ServerBuilder;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3001);
    let addr = format!("0.0.0.0:{port}");

    let server = ServerBuilder::new().bind(&addr).build().await?;
    tracing::info!(%addr, "roshambo server starting");
    server.run().await?;
    Ok(())
}
