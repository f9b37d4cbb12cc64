use clap::Parser;
use tracing_subscriber::EnvFilter;

use conifer_server::{Config, build_router, shared_store};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    let store = shared_store(config.advertised_host());
    let app = build_router(store);

    let addr = config.addr();
    tracing::info!("conifer server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
