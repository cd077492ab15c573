use clap::Parser;
use std::net::IpAddr;
use tokio::net::TcpListener;

use rag_mock_api::api;
use rag_mock_api::config::Config;

/// Mock RAG pipeline API for frontend development.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Address to bind (overrides RAG_API_HOST).
    #[arg(long)]
    host: Option<IpAddr>,

    /// Port to listen on (overrides RAG_API_PORT).
    #[arg(short, long)]
    port: Option<u16>,

    /// Browser origin allowed by CORS (overrides RAG_API_FRONTEND_ORIGIN).
    #[arg(long, value_name = "ORIGIN")]
    frontend_origin: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber (handles both tracing and log crate)
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(true)
        .init();

    let args = Args::parse();
    let mut config = Config::from_env()?;
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(origin) = args.frontend_origin {
        config.frontend_origin = origin;
    }
    config.validate()?;

    let app = api::app(&config)?;
    let addr = config.socket_addr();

    println!("Starting RAG Pipeline API...");
    println!("API will be available at: http://localhost:{}", config.port);
    tracing::info!(%addr, origin = %config.frontend_origin, "listening, CORS origin allowed");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}
