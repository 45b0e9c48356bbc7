//! Fan-in of all block sources into one joined status line.
//!
//! One listener per source tags each value with the source's slot index and
//! forwards it into a shared intake channel. A single serializer owns the
//! slot array, applies each update and emits the full joined line. Slots are
//! never touched by anything else, so no locking is involved.

use log::{debug, warn};
use tokio::sync::{broadcast, mpsc};

/// Intake and output channels hold a single pending value.
const INTAKE_CAPACITY: usize = 1;
const LINE_CAPACITY: usize = 1;

/// A new value for one slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotUpdate {
    pub slot: usize,
    pub text: String,
}

/// Latest text per slot, in display order.
#[derive(Debug, Clone)]
pub struct StatusLine {
    slots: Vec<String>,
    separator: String,
}

impl StatusLine {
    /// All slots start out empty.
    pub fn new(slot_count: usize, separator: impl Into<String>) -> Self {
        Self {
            slots: vec![String::new(); slot_count],
            separator: separator.into(),
        }
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn slot(&self, index: usize) -> Option<&str> {
        self.slots.get(index).map(String::as_str)
    }

    /// Overwrite one slot and return the recomputed line. Updates for an
    /// index outside the fixed slot range are rejected.
    pub fn apply(&mut self, update: SlotUpdate) -> Option<String> {
        let slot = self.slots.get_mut(update.slot)?;
        *slot = update.text;
        Some(self.joined())
    }

    pub fn joined(&self) -> String {
        self.slots.join(&self.separator)
    }
}

/// Start one listener per source plus the serializer, and return the
/// joined-line stream.
///
/// Slot `i` belongs to `sources[i]`. A `None` entry keeps its slot empty for
/// the lifetime of the bar. Must be called from inside a tokio runtime.
pub fn spawn_aggregator(
    sources: Vec<Option<mpsc::Receiver<String>>>,
    separator: impl Into<String>,
    shutdown: &broadcast::Sender<()>,
) -> mpsc::Receiver<String> {
    let (intake_tx, intake_rx) = mpsc::channel::<SlotUpdate>(INTAKE_CAPACITY);
    let (line_tx, line_rx) = mpsc::channel::<String>(LINE_CAPACITY);

    let status = StatusLine::new(sources.len(), separator);

    for (slot, source) in sources.into_iter().enumerate() {
        match source {
            Some(source_rx) => {
                tokio::spawn(listener_task(
                    slot,
                    source_rx,
                    intake_tx.clone(),
                    shutdown.subscribe(),
                ));
            }
            None => debug!("Slot {} has no source, it stays empty", slot),
        }
    }

    // The serializer stops once every listener has dropped its sender
    drop(intake_tx);

    tokio::spawn(serializer_task(
        status,
        intake_rx,
        line_tx,
        shutdown.subscribe(),
    ));

    line_rx
}

async fn listener_task(
    slot: usize,
    mut source_rx: mpsc::Receiver<String>,
    intake_tx: mpsc::Sender<SlotUpdate>,
    mut shutdown: broadcast::Receiver<()>,
) {
    loop {
        tokio::select! {
            text = source_rx.recv() => match text {
                Some(text) => {
                    if intake_tx.send(SlotUpdate { slot, text }).await.is_err() {
                        break;
                    }
                }
                None => {
                    debug!("Source for slot {} finished, keeping its last value", slot);
                    break;
                }
            },
            _ = shutdown.recv() => break,
        }
    }
}

/// Owns the slot array. Every update produces exactly one emitted line,
/// even when the text did not change.
async fn serializer_task(
    mut status: StatusLine,
    mut intake_rx: mpsc::Receiver<SlotUpdate>,
    line_tx: mpsc::Sender<String>,
    mut shutdown: broadcast::Receiver<()>,
) {
    loop {
        tokio::select! {
            update = intake_rx.recv() => {
                let Some(update) = update else {
                    debug!("All sources finished, closing status line");
                    break;
                };

                let slot = update.slot;
                match status.apply(update) {
                    Some(line) => {
                        if line_tx.send(line).await.is_err() {
                            break;
                        }
                    }
                    None => warn!(
                        "Dropping update for slot {} (only {} slots)",
                        slot,
                        status.slot_count()
                    ),
                }
            }
            _ = shutdown.recv() => {
                debug!("Serializer shutting down");
                break;
            }
        }
    }
}
