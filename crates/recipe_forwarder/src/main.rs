use std::env;

use anyhow::Context;
use recipe_forwarder::{router, ForwarderConfig, ForwarderState};
use recipe_logging::{level_from_name, recipe_info, LogDestination};
use tokio::net::TcpListener;
use tokio::signal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let level = level_from_name(env::var("RECIPE_LOG").ok().as_deref());
    recipe_logging::initialize(LogDestination::Terminal, level);

    let config = ForwarderConfig::load().context("loading forwarder configuration")?;
    let address = format!("0.0.0.0:{}", config.port);
    let state = ForwarderState::new(config)?;

    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("binding {address}"))?;
    recipe_info!("Forwarder listening on {}", address);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving requests")?;

    recipe_info!("Forwarder shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => recipe_info!("Received Ctrl+C, shutting down"),
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                recipe_info!("Received terminate signal, shutting down");
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
