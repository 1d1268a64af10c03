//! Process lifecycle
//!
//! Load the file, start the server, block until shutdown is requested, then
//! stop the server and release the file. The sequence is linear; a failure at
//! any step ends it.

use std::path::PathBuf;

use crate::config::Config;
use crate::dispatch::Dispatcher;
use crate::error::Result;
use crate::loader;
use crate::logger;
use crate::server::{ServerHandle, ServerState, ShutdownSignal};

pub struct Lifecycle<S> {
    config: Config,
    path: PathBuf,
    shutdown: S,
}

impl<S: ShutdownSignal> Lifecycle<S> {
    pub fn new(config: Config, path: impl Into<PathBuf>, shutdown: S) -> Self {
        Self {
            config,
            path: path.into(),
            shutdown,
        }
    }

    /// Run to completion. Must be awaited inside a tokio runtime.
    pub async fn run(self) -> Result<()> {
        let Self {
            config,
            path,
            shutdown,
        } = self;

        // Init: nothing is bound if this fails
        let file = loader::load(&path)?;
        let addr = config.socket_addr()?;

        // Starting: on failure `file` is dropped on the way out
        let state = ServerState::new(Dispatcher::new(file.clone()), &config);
        let server = ServerHandle::start(addr, state, config.performance.shutdown_timeout())?;
        logger::log_server_start(&server.local_addr(), &path, file.len(), &config);

        // Running
        let waited = shutdown.wait().await;
        if let Ok(reason) = waited {
            logger::log_signal_received(reason);
        }

        // Stopping: engine first, then the buffer it was serving
        server.stop().await;
        let size = file.len();
        drop(file);
        logger::log_buffer_released(size);

        waited.map(|_| ())
    }
}
