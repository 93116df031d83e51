use anyhow::Result;
use tracing::info;
use tokio::net::TcpListener;

use platform_backend::config::AppConfig;
use platform_backend::{create_router, initialize_backend, logging};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;
    logging::init(&config.log_level);

    let app_state = initialize_backend(&config)?;
    let router = create_router(app_state);

    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!("🌐 Starting learning platform API at {}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}
