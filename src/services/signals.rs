//! Process signals that stop the display.

use crate::render::Shutdown;

/// Raises `shutdown` on SIGINT or SIGTERM.
///
/// A handler that cannot be installed is logged and never fires; it does
/// not stop the app.
pub async fn watch_signals(shutdown: Shutdown) {
    #[cfg(unix)]
    {
        tokio::select! {
            _ = interrupt() => log::info!("interrupt received, shutting down"),
            _ = terminate() => log::info!("terminate received, shutting down"),
        }
    }

    #[cfg(not(unix))]
    {
        interrupt().await;
        log::info!("interrupt received, shutting down");
    }

    shutdown.request();
}

async fn interrupt() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::warn!("cannot listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

#[cfg(unix)]
async fn terminate() {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut term) => {
            term.recv().await;
        }
        Err(e) => {
            log::warn!("cannot listen for SIGTERM: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
