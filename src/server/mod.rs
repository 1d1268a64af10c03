// Server module entry
// The HTTP engine: binds the listener, serves connections, and stops on request

pub mod connection;
pub mod handle;
pub mod listener;
pub mod signal;

// Rust 不允许 loop 作为模块名（关键字），改用 server_loop
#[path = "loop.rs"]
pub mod server_loop;

use crate::config::Config;
use crate::dispatch::Dispatcher;

// 重新导出常用类型
pub use handle::ServerHandle;
pub use listener::create_listener;
pub use signal::{OsSignal, ShutdownSignal};

/// State shared by every connection of one running server
pub struct ServerState {
    pub dispatcher: Dispatcher,
    pub access_log: bool,
    pub keep_alive: bool,
    pub header_read_timeout: Option<std::time::Duration>,
    pub max_upload_size: usize,
}

impl ServerState {
    pub fn new(dispatcher: Dispatcher, config: &Config) -> Self {
        Self {
            dispatcher,
            access_log: config.logging.access_log,
            keep_alive: config.performance.keep_alive,
            header_read_timeout: config.performance.header_read_timeout(),
            max_upload_size: config.http.max_upload_size,
        }
    }
}
