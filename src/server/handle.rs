// Server handle module
// Owns one running engine instance from start until stop

use std::fmt;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

use super::listener::create_listener;
use super::server_loop::start_server_loop;
use super::ServerState;
use crate::error::{Error, Result};
use crate::logger;
use hyper_util::server::graceful::GracefulShutdown;

/// Handle to a running server.
///
/// Not `Clone`: whoever started the server is the only one who can stop it.
pub struct ServerHandle {
    local_addr: SocketAddr,
    stop: Arc<Notify>,
    task: JoinHandle<GracefulShutdown>,
    shutdown_timeout: Duration,
}

impl ServerHandle {
    /// Bind `addr` and start accepting connections in the background.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(addr: SocketAddr, state: ServerState, shutdown_timeout: Duration) -> Result<Self> {
        let listener =
            create_listener(addr).map_err(|source| Error::ServerStart { addr, source })?;
        let local_addr = listener
            .local_addr()
            .map_err(|source| Error::ServerStart { addr, source })?;

        let stop = Arc::new(Notify::new());
        let task = tokio::spawn(start_server_loop(
            listener,
            Arc::new(state),
            Arc::clone(&stop),
        ));

        Ok(Self {
            local_addr,
            stop,
            task,
            shutdown_timeout,
        })
    }

    pub const fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stop accepting, then wait for in-flight requests to finish.
    ///
    /// Connections still open after the shutdown timeout are abandoned.
    pub async fn stop(self) {
        logger::log_stopping(&self.local_addr);
        self.stop.notify_one();

        let graceful = match self.task.await {
            Ok(graceful) => graceful,
            Err(e) => {
                logger::log_error(&format!("Accept loop terminated abnormally: {e}"));
                return;
            }
        };

        if tokio::time::timeout(self.shutdown_timeout, graceful.shutdown())
            .await
            .is_err()
        {
            logger::log_drain_timeout(self.shutdown_timeout.as_secs());
        }
        logger::log_stopped();
    }
}

impl fmt::Debug for ServerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerHandle")
            .field("local_addr", &self.local_addr)
            .field("shutdown_timeout", &self.shutdown_timeout)
            .finish_non_exhaustive()
    }
}
