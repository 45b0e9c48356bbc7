//! Tokio runtime and wiring for the status bar tasks.
//!
//! The runtime owns every source, listener and the serializer. The caller
//! consumes the joined lines from a plain (non-async) thread.

use tokio::sync::{broadcast, mpsc};

use super::aggregator::spawn_aggregator;
use super::sources::spawn_source;
use crate::core::config::BarConfig;
use crate::error::{BarError, Result};

/// Wrapper around the Tokio runtime running the status bar.
pub struct BarRuntime {
    line_rx: mpsc::Receiver<String>,

    /// Shutdown signal sender
    shutdown_tx: broadcast::Sender<()>,

    /// Handle to the runtime (for shutdown)
    _runtime_handle: tokio::runtime::Runtime,
}

/// Cloneable trigger that stops all status bar tasks.
#[derive(Clone)]
pub struct ShutdownHandle {
    shutdown_tx: broadcast::Sender<()>,
}

impl ShutdownHandle {
    pub fn trigger(&self) {
        // Fails only if every task is already gone
        let _ = self.shutdown_tx.send(());
    }
}

impl BarRuntime {
    /// Create the runtime with all block tasks spawned.
    pub fn new(config: BarConfig) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .thread_name("dwmbar-worker")
            .build()
            .map_err(|e| BarError::runtime(format!("failed to build tokio runtime: {}", e)))?;

        let (shutdown_tx, _) = broadcast::channel::<()>(1);

        let line_rx = {
            let _guard = runtime.enter();
            spawn_status_bar(&config, &shutdown_tx)
        };

        log::info!(
            "Status bar started with blocks: {}",
            config
                .blocks
                .iter()
                .map(|b| b.name())
                .collect::<Vec<_>>()
                .join(", ")
        );

        Ok(Self {
            line_rx,
            shutdown_tx,
            _runtime_handle: runtime,
        })
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            shutdown_tx: self.shutdown_tx.clone(),
        }
    }

    /// Blocking iterator over joined lines. Ends once the tasks have shut down.
    ///
    /// Must not be called from inside an async context.
    pub fn lines(&mut self) -> impl Iterator<Item = String> + '_ {
        std::iter::from_fn(move || self.line_rx.blocking_recv())
    }

    /// Shutdown the runtime gracefully.
    pub fn shutdown(self) {
        log::info!("Shutting down status bar runtime");
        let _ = self.shutdown_tx.send(());
        // Runtime will shutdown when dropped
    }
}

/// Spawn every configured source and the aggregator on the current runtime.
///
/// Slot order follows `config.blocks`.
pub fn spawn_status_bar(
    config: &BarConfig,
    shutdown: &broadcast::Sender<()>,
) -> mpsc::Receiver<String> {
    let sources = config
        .blocks
        .iter()
        .map(|kind| spawn_source(*kind, config, shutdown))
        .collect();

    spawn_aggregator(sources, config.separator.clone(), shutdown)
}
