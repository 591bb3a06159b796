//! Shutdown signal handling.

use anyhow::Result;
use std::fmt;
use tokio::signal;

/// The signal that ended the game early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shutdown {
    Interrupt,
    Terminate,
}

impl fmt::Display for Shutdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shutdown::Interrupt => write!(f, "SIGINT"),
            Shutdown::Terminate => write!(f, "SIGTERM"),
        }
    }
}

/// Resolves with the first stop request: SIGINT or SIGTERM, or Ctrl+C
/// where there are no unix signals.
#[cfg(unix)]
pub async fn shutdown_signal() -> Result<Shutdown> {
    use signal::unix::{signal, SignalKind};

    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut terminate = signal(SignalKind::terminate())?;

    Ok(tokio::select! {
        _ = interrupt.recv() => Shutdown::Interrupt,
        _ = terminate.recv() => Shutdown::Terminate,
    })
}

#[cfg(not(unix))]
pub async fn shutdown_signal() -> Result<Shutdown> {
    signal::ctrl_c().await?;
    Ok(Shutdown::Interrupt)
}
