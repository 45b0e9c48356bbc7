//! Network throughput block.

use std::fmt;
use std::fs;
use std::path::Path;

use log::warn;
use tokio::sync::{broadcast, mpsc};
use tokio::time::{interval, Instant, MissedTickBehavior};

use crate::core::config::NetworkConfig;
use crate::error::{BarError, Result};
use crate::ui::formatters::format_byte_rate;

/// `/proc/net/dev` starts with two header lines.
const HEADER_LINES: usize = 2;
/// 8 receive columns followed by 8 transmit columns.
const COUNTER_COLUMNS: usize = 16;
const TX_BYTES_COLUMN: usize = 8;

/// Cumulative byte counters summed over the matching interfaces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InterfaceCounters {
    pub rx_bytes: u64,
    pub tx_bytes: u64,
}

/// Parse `/proc/net/dev` content, summing interfaces whose name starts with
/// one of `prefixes`. Any malformed data line fails the whole parse.
pub fn parse_net_dev(content: &str, prefixes: &[String]) -> Result<InterfaceCounters> {
    let mut total = InterfaceCounters::default();

    for line in content.lines().skip(HEADER_LINES) {
        if line.trim().is_empty() {
            continue;
        }

        let (name, counters) = line
            .split_once(':')
            .ok_or_else(|| BarError::parse(format!("missing interface separator: {:?}", line)))?;
        let name = name.trim();

        let values = counters
            .split_whitespace()
            .take(COUNTER_COLUMNS)
            .map(|field| {
                field.parse::<u64>().map_err(|_| {
                    BarError::parse(format!("interface {}: bad counter {:?}", name, field))
                })
            })
            .collect::<Result<Vec<u64>>>()?;

        if values.len() < COUNTER_COLUMNS {
            return Err(BarError::parse(format!(
                "interface {}: expected {} counters, found {}",
                name,
                COUNTER_COLUMNS,
                values.len()
            )));
        }

        if prefixes.iter().any(|prefix| name.starts_with(prefix.as_str())) {
            total.rx_bytes += values[0];
            total.tx_bytes += values[TX_BYTES_COLUMN];
        }
    }

    Ok(total)
}

pub fn read_counters(dev_path: &Path, prefixes: &[String]) -> Result<InterfaceCounters> {
    let content = fs::read_to_string(dev_path)?;
    parse_net_dev(&content, prefixes)
}

/// Bytes per second in each direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NetworkRate {
    pub rx_bytes_per_sec: u64,
    pub tx_bytes_per_sec: u64,
}

impl fmt::Display for NetworkRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "NET: {}↓ {}↑",
            format_byte_rate(self.rx_bytes_per_sec),
            format_byte_rate(self.tx_bytes_per_sec)
        )
    }
}

#[derive(Debug, Clone, Copy)]
struct NetworkSample {
    counters: InterfaceCounters,
    taken_at: Instant,
}

/// Turns successive counter samples into rates. Only the previous sample is kept.
#[derive(Debug, Default)]
pub struct RateTracker {
    previous: Option<NetworkSample>,
}

impl RateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a sample. Returns `None` for the first one, since there is
    /// nothing to diff against yet.
    pub fn observe(&mut self, counters: InterfaceCounters, taken_at: Instant) -> Option<NetworkRate> {
        let previous = self.previous.replace(NetworkSample { counters, taken_at })?;

        let elapsed_secs = taken_at.duration_since(previous.taken_at).as_secs_f64();
        let per_sec = |now: u64, before: u64| -> u64 {
            if elapsed_secs > 0.0 {
                (now.saturating_sub(before) as f64 / elapsed_secs) as u64
            } else {
                0
            }
        };

        Some(NetworkRate {
            rx_bytes_per_sec: per_sec(counters.rx_bytes, previous.counters.rx_bytes),
            tx_bytes_per_sec: per_sec(counters.tx_bytes, previous.counters.tx_bytes),
        })
    }
}

/// Task that monitors network throughput.
///
/// Polling frequency: 2 seconds by default. The first successful sample only
/// primes the tracker; a failed read skips the cycle.
pub async fn network_task(
    update_tx: mpsc::Sender<String>,
    config: NetworkConfig,
    mut shutdown: broadcast::Receiver<()>,
) {
    let mut tracker = RateTracker::new();

    let mut ticker = interval(config.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let counters = match read_counters(&config.dev_path, &config.interface_prefixes) {
                    Ok(counters) => counters,
                    Err(e) => {
                        warn!("Network sample failed: {}", e);
                        continue;
                    }
                };

                if let Some(rate) = tracker.observe(counters, Instant::now()) {
                    log::trace!("Network rate: {:?}", rate);
                    if update_tx.send(rate.to_string()).await.is_err() {
                        break;
                    }
                }
            }
            _ = shutdown.recv() => {
                log::debug!("Network task shutting down");
                break;
            }
        }
    }
}
