// Signal handling module
//
// Shutdown is the only thing a signal does here. Any catchable termination
// style signal unblocks the wait:
// - SIGHUP, SIGINT (Ctrl+C), SIGTERM, SIGQUIT
// - SIGUSR1, SIGUSR2, SIGALRM
//
// SIGPIPE and SIGCHLD are never registered; a client hanging up mid-write
// must not stop the server.

use std::future::Future;
use tokio::sync::oneshot;

use crate::error::{Error, Result};

/// Something the lifecycle can block on until shutdown is requested.
///
/// Resolves to a short description of what requested the shutdown.
pub trait ShutdownSignal {
    fn wait(self) -> impl Future<Output = Result<&'static str>> + Send;
}

/// Wait for an operating system signal.
///
/// Handlers are installed by [`OsSignal::register`], so a signal delivered
/// any time after that call (before or during `wait`) is caught rather than
/// taking the default action.
#[cfg(unix)]
#[derive(Debug)]
pub struct OsSignal {
    streams: Vec<(&'static str, tokio::signal::unix::Signal)>,
}

#[cfg(unix)]
impl OsSignal {
    /// Install the handlers. Must be called from within a tokio runtime.
    pub fn register() -> Result<Self> {
        use tokio::signal::unix::{signal, SignalKind};

        let kinds = [
            ("SIGHUP", SignalKind::hangup()),
            ("SIGINT", SignalKind::interrupt()),
            ("SIGTERM", SignalKind::terminate()),
            ("SIGQUIT", SignalKind::quit()),
            ("SIGUSR1", SignalKind::user_defined1()),
            ("SIGUSR2", SignalKind::user_defined2()),
            ("SIGALRM", SignalKind::alarm()),
        ];
        let streams = kinds
            .into_iter()
            .map(|(name, kind)| signal(kind).map(|s| (name, s)).map_err(Error::SignalWait))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { streams })
    }
}

#[cfg(unix)]
impl ShutdownSignal for OsSignal {
    async fn wait(mut self) -> Result<&'static str> {
        let received = std::future::poll_fn(|cx| {
            for (name, stream) in &mut self.streams {
                if stream.poll_recv(cx).is_ready() {
                    return std::task::Poll::Ready(*name);
                }
            }
            std::task::Poll::Pending
        })
        .await;
        Ok(received)
    }
}

/// Windows fallback - only handles Ctrl+C
#[cfg(not(unix))]
#[derive(Debug)]
pub struct OsSignal {
    ctrl_c: tokio::signal::windows::CtrlC,
}

#[cfg(not(unix))]
impl OsSignal {
    pub fn register() -> Result<Self> {
        let ctrl_c = tokio::signal::windows::ctrl_c().map_err(Error::SignalWait)?;
        Ok(Self { ctrl_c })
    }
}

#[cfg(not(unix))]
impl ShutdownSignal for OsSignal {
    async fn wait(mut self) -> Result<&'static str> {
        self.ctrl_c.recv().await;
        Ok("Ctrl+C")
    }
}

/// Application-level shutdown: a sent value or a dropped sender both count
impl ShutdownSignal for oneshot::Receiver<()> {
    async fn wait(self) -> Result<&'static str> {
        match self.await {
            Ok(()) => Ok("shutdown request"),
            Err(_) => Ok("shutdown sender dropped"),
        }
    }
}
