use std::path::PathBuf;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "8000".to_string());
    let seed = match std::env::var_os("DATA_FILE") {
        Some(path) => mock_server::load_seed(&PathBuf::from(path))?,
        None => Vec::new(),
    };

    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, medicines = seed.len(), "listening");
    mock_server::run_with(listener, seed).await
}
