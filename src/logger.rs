//! Logger module
//!
//! Event helpers for the daemon lifecycle and the per-request status line,
//! emitted through `tracing`.

use crate::config::{Config, LoggingConfig};
use std::net::SocketAddr;
use std::path::Path;
use tracing::{debug, error, info, warn, Level};

/// Install the fmt subscriber at the configured level.
///
/// Safe to call more than once; later calls keep the first subscriber.
pub fn init(config: &LoggingConfig) {
    let level = config.level.parse::<Level>().unwrap_or_else(|_| {
        eprintln!(
            "[WARN] Unknown log level '{}', falling back to info",
            config.level
        );
        Level::INFO
    });

    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init();
}

pub fn log_server_start(addr: &SocketAddr, path: &Path, size: usize, config: &Config) {
    info!("======================================");
    info!("Serving {} ({size} bytes)", path.display());
    info!("Listening on: http://{addr}");
    match config.server.workers {
        Some(workers) => info!("Worker threads: {workers}"),
        None => info!("Single-threaded engine"),
    }
    if let Some(secs) = config.performance.header_read_timeout {
        info!("Header read timeout: {secs}s");
    }
    info!("======================================");
}

pub fn log_file_loaded(path: &Path, size: usize) {
    debug!("[Loader] Read {size} bytes from {}", path.display());
}

pub fn log_buffer_released(size: usize) {
    debug!("[Shutdown] Released file buffer ({size} bytes)");
}

pub fn log_response(status: u16) {
    info!("Responding with {status}");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    debug!("[Connection] Accepted from: {peer_addr}");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    error!("[ERROR] Failed to serve connection: {err:?}");
}

pub fn log_signal_received(name: &str) {
    info!("[SIGNAL] {name} received, shutting down");
}

pub fn log_stopping(addr: &SocketAddr) {
    info!("[Shutdown] Stopping server on {addr}");
}

pub fn log_stopped() {
    info!("[Shutdown] Server stopped");
}

pub fn log_drain_timeout(secs: u64) {
    warn!("[Shutdown] Connections still open after {secs}s, abandoning them");
}

pub fn log_error(message: &str) {
    error!("[ERROR] {message}");
}

pub fn log_warning(message: &str) {
    warn!("[WARN] {message}");
}

pub fn log_fatal(err: &crate::Error) {
    error!("[FATAL] {err}");
}
