//! # OS signal handling wired into cooperative cancellation.
//!
//! Both loops poll a [`CancellationToken`] at iteration boundaries;
//! [`cancel_on_signal`] is the bridge that cancels the token when the process
//! receives a termination signal, replacing a raw process-wide flag with an
//! explicit token both loops already hold.
//!
//! Unix listens for `SIGINT`, `SIGTERM`, and `SIGQUIT`; other platforms use
//! Ctrl-C.

use tokio_util::sync::CancellationToken;

/// Spawns a listener that cancels `token` on the first termination signal.
///
/// Signal registration failure cancels the token immediately: a run that
/// cannot be interrupted is worse than one that stops early.
pub fn cancel_on_signal(token: CancellationToken) {
    tokio::spawn(async move {
        let _ = shutdown_signal().await;
        token.cancel();
    });
}

#[cfg(unix)]
async fn shutdown_signal() -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigquit = signal(SignalKind::quit())?;

    tokio::select! {
        _ = sigint.recv() => {}
        _ = sigterm.recv() => {}
        _ = sigquit.recv() => {}
    }
    Ok(())
}

#[cfg(not(unix))]
async fn shutdown_signal() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await
}
