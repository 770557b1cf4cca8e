use std::sync::Arc;

use anyhow::{Context, Result};
use colored::Colorize;

use trivia_core::TriviaService;

use crate::api;

pub async fn serve(service: Arc<TriviaService>, addr: &str) -> Result<()> {
    let router = api::create_router(service);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind API server to {}", addr))?;
    let local = listener
        .local_addr()
        .context("Failed to read bound address")?;

    tracing::info!(addr = %local, "Trivia API listening");

    eprintln!();
    eprintln!(
        "  {} {}",
        "->".bright_green(),
        format!("Serving http://{}", local).bold()
    );
    eprintln!("  {} Press {} to stop", "->".dimmed(), "Ctrl+C".bold());
    eprintln!();

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("API server error")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    eprintln!("\nShutting down...");
}
