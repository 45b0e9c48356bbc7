//! Async tasks producing the text of each status block.
//!
//! Each source runs in its own independent task with its own cadence and
//! hands its output over a dedicated channel. Sampling failures stay inside
//! the task: they are logged and the cycle is skipped.

mod battery;
mod clock;
mod media;
mod network;

pub use battery::{
    battery_task, battery_text, format_battery, read_battery, BatteryReading, ChargeStatus,
};
pub use clock::{clock_task, format_clock};
pub use media::{forward_lines, spawn_media};
pub use network::{
    network_task, parse_net_dev, read_counters, InterfaceCounters, NetworkRate, RateTracker,
};

use tokio::sync::{broadcast, mpsc};

use crate::core::config::BarConfig;

/// Capacity of every source output channel. One pending value keeps the
/// hand-off as close to unbuffered as tokio allows.
pub const SOURCE_CHANNEL_CAPACITY: usize = 1;

/// Kind of status block, one per monitored quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Clock,
    Battery,
    Network,
    Media,
}

impl BlockKind {
    pub fn name(&self) -> &'static str {
        match self {
            BlockKind::Clock => "clock",
            BlockKind::Battery => "battery",
            BlockKind::Network => "network",
            BlockKind::Media => "media",
        }
    }
}

/// Start the producer for `kind` and return its output stream.
///
/// Returns `None` when the source cannot run on this system (media tool
/// missing); its slot then stays empty. Must be called from inside a tokio
/// runtime.
pub fn spawn_source(
    kind: BlockKind,
    config: &BarConfig,
    shutdown: &broadcast::Sender<()>,
) -> Option<mpsc::Receiver<String>> {
    match kind {
        BlockKind::Clock => {
            let (tx, rx) = mpsc::channel(SOURCE_CHANNEL_CAPACITY);
            tokio::spawn(clock_task(tx, config.clock.clone(), shutdown.subscribe()));
            Some(rx)
        }
        BlockKind::Battery => {
            let (tx, rx) = mpsc::channel(SOURCE_CHANNEL_CAPACITY);
            tokio::spawn(battery_task(tx, config.battery.clone(), shutdown.subscribe()));
            Some(rx)
        }
        BlockKind::Network => {
            let (tx, rx) = mpsc::channel(SOURCE_CHANNEL_CAPACITY);
            tokio::spawn(network_task(tx, config.network.clone(), shutdown.subscribe()));
            Some(rx)
        }
        BlockKind::Media => spawn_media(&config.media, shutdown.subscribe()),
    }
}
