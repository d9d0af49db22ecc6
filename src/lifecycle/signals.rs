//! OS signal handling.
//!
//! SIGTERM and Ctrl-C start a graceful shutdown: readiness fails first, then
//! after the drain delay the listener closes and in-flight requests finish.
//! Nothing here exits the process directly.

use std::time::Duration;

use tokio::task::JoinHandle;

use crate::lifecycle::Shutdown;

/// Resolve when SIGTERM (unix) or Ctrl-C is received.
pub async fn wait_for_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C"),
        _ = terminate => tracing::info!("Received SIGTERM"),
    }
}

/// Flip readiness, wait `drain`, then stop the server.
pub async fn drain_and_stop(shutdown: &Shutdown, drain: Duration) {
    shutdown.begin_draining();
    tracing::info!(drain_secs = drain.as_secs_f64(), "Starting graceful shutdown");
    tokio::time::sleep(drain).await;
    tracing::info!(listeners = shutdown.receiver_count(), "Drain delay elapsed, stopping");
    shutdown.trigger();
}

/// Spawn the task that turns OS signals into a graceful shutdown.
pub fn spawn_signal_handler(shutdown: Shutdown, drain: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        wait_for_signal().await;
        drain_and_stop(&shutdown, drain).await;
    })
}
