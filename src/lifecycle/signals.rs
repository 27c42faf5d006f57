//! OS signal handling.
//!
//! # Responsibilities
//! - SIGINT/SIGTERM end the host loop
//! - SIGHUP forces a full configuration reload (unix only)

use crate::config::watcher::ReloadTrigger;

/// Wait for a termination signal, turning every SIGHUP into a reload request.
pub async fn wait_for_termination(reload: ReloadTrigger) -> std::io::Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut hangup = signal(SignalKind::hangup())?;
        let mut terminate = signal(SignalKind::terminate())?;
        loop {
            tokio::select! {
                _ = hangup.recv() => {
                    tracing::info!("SIGHUP received, reloading configuration");
                    reload.trigger();
                }
                _ = terminate.recv() => return Ok(()),
                res = tokio::signal::ctrl_c() => return res,
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = reload;
        tokio::signal::ctrl_c().await
    }
}
