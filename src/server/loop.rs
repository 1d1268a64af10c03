// Server loop module
// Accepts connections until the owning handle asks it to stop

use hyper_util::server::graceful::GracefulShutdown;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Notify;

use super::connection::accept_connection;
use super::ServerState;
use crate::logger;

/// Run the accept loop.
///
/// Returns once `stop` is notified. The listener is closed on return; the
/// returned watcher still tracks every connection that was accepted.
pub async fn start_server_loop(
    listener: TcpListener,
    state: Arc<ServerState>,
    stop: Arc<Notify>,
) -> GracefulShutdown {
    let graceful = GracefulShutdown::new();

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &graceful);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = stop.notified() => break,
        }
    }

    drop(listener);
    graceful
}
