use tokio::signal;
use tokio_util::sync::CancellationToken;

/// Wait for a termination signal (Ctrl+C, and SIGTERM on unix).
pub async fn wait_for_shutdown() {
    #[cfg(unix)]
    {
        let mut term = match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(handler) => handler,
            Err(e) => {
                tracing::error!(%e, "Failed to install SIGTERM handler; falling back to Ctrl+C only");
                let _ = signal::ctrl_c().await;
                return;
            }
        };
        tokio::select! {
            _ = signal::ctrl_c() => tracing::info!("Received Ctrl+C signal"),
            _ = term.recv() => tracing::info!("Received SIGTERM signal"),
        }
    }

    #[cfg(not(unix))]
    {
        let _ = signal::ctrl_c().await;
        tracing::info!("Received Ctrl+C signal");
    }

    tracing::info!("Shutdown signal received, initiating graceful shutdown");
}

/// Spawn a background waiter that cancels `token` once a shutdown signal
/// arrives. The shell's run loop blocks on the token instead of the signals
/// directly, so tests can drive shutdown with a plain `cancel()`.
pub fn spawn_shutdown_watcher(token: CancellationToken) {
    tokio::spawn(async move {
        wait_for_shutdown().await;
        token.cancel();
    });
}
