// 连接处理模块
// Accepts and serves a single TCP connection

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::{TokioIo, TokioTimer};
use hyper_util::server::graceful::GracefulShutdown;
use std::sync::Arc;

use super::ServerState;
use crate::handler;
use crate::logger;

/// Accept a connection and serve it in a spawned task.
///
/// Every accepted connection is served; there is no connection cap, so a
/// client that reaches the engine always gets an HTTP response.
///
/// # Arguments
///
/// * `stream` - The TCP stream to handle
/// * `peer_addr` - The peer's socket address
/// * `state` - State shared by all connections
/// * `graceful` - Watcher that lets `stop` drain this connection
pub fn accept_connection(
    stream: tokio::net::TcpStream,
    peer_addr: std::net::SocketAddr,
    state: &Arc<ServerState>,
    graceful: &GracefulShutdown,
) {
    logger::log_connection_accepted(&peer_addr);
    handle_connection(stream, Arc::clone(state), graceful);
}

/// Serve a single connection in a spawned task.
///
/// The connection runs until the client closes it or `stop` drains it. The
/// only timeout is the optional header read timeout, which hyper applies
/// while waiting for request headers and never while a response is written.
fn handle_connection(
    stream: tokio::net::TcpStream,
    state: Arc<ServerState>,
    graceful: &GracefulShutdown,
) {
    let io = TokioIo::new(stream);

    let mut builder = http1::Builder::new();
    builder.keep_alive(state.keep_alive);
    if let Some(timeout) = state.header_read_timeout {
        builder.timer(TokioTimer::new());
        builder.header_read_timeout(timeout);
    }

    let conn = builder.serve_connection(
        io,
        service_fn(move |req| handler::handle_request(req, Arc::clone(&state))),
    );
    let conn = graceful.watch(conn);

    tokio::spawn(async move {
        if let Err(err) = conn.await {
            logger::log_connection_error(&err);
        }
    });
}
