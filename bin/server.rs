// ATM Ledger - Web Server
// REST API over an in-memory account registry

use anyhow::{Context, Result};
use atm_ledger::api;
use atm_ledger::config::ServerConfig;
use atm_ledger::AccountRegistry;
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_tracing(config: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

async fn shutdown_signal() {
    let ctrl_c = api::wait_for_signal(tokio::signal::ctrl_c(), "Ctrl+C");

    #[cfg(unix)]
    let terminate = api::wait_for_signal(
        async {
            let mut sigterm =
                tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())?;
            sigterm.recv().await;
            Ok::<(), std::io::Error>(())
        },
        "SIGTERM",
    );

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("🛑 Shutting down");
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::parse();
    init_tracing(&config);

    info!("🏦 ATM Ledger v{} - Web Server", atm_ledger::VERSION);

    // One registry for the whole process lifetime
    let registry = Arc::new(AccountRegistry::new());
    let app = api::router(registry);

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;

    info!("🚀 Server running on http://{}", addr);
    info!("   POST /accounts, POST /accounts/:id/deposit, POST /accounts/:id/withdraw, GET /accounts/:id/getbalance");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("✅ Server stopped");
    Ok(())
}
