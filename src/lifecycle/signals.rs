//! OS signal handling.
//!
//! Ctrl+C everywhere, plus SIGTERM on unix, resolve [`terminate`].

use crate::lifecycle::shutdown::ShutdownSignal;

/// Resolve on the first OS termination signal.
pub async fn terminate() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let sigterm = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = sigterm => {},
    }
    tracing::info!("Shutdown signal received");
}

/// Resolve on an OS signal or on the coordinator's flag, whichever comes
/// first.
pub async fn shutdown_requested(signal: ShutdownSignal) {
    tokio::select! {
        _ = terminate() => {},
        _ = signal.triggered() => {
            tracing::info!("Shutdown triggered");
        },
    }
}
