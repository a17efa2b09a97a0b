//! Serve command implementation

use super::{build_summariser, CommandError};
use crate::config::YtsumConfig;
use std::sync::Arc;
use tracing::info;

/// Run the HTTP service until Ctrl-C or SIGTERM
pub async fn handle_serve_command(config: &YtsumConfig) -> Result<(), CommandError> {
    let summariser = Arc::new(build_summariser(config)?);

    ytsum_http::serve(summariser, config.server.clone(), shutdown_signal()).await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
