//! Clock block.

use chrono::{Local, NaiveDateTime};
use tokio::sync::{broadcast, mpsc};
use tokio::time::{interval, MissedTickBehavior};

use crate::core::config::ClockConfig;

pub fn format_clock(now: &NaiveDateTime, format: &str) -> String {
    now.format(format).to_string()
}

/// Task that emits the formatted local time.
///
/// Polling frequency: `config.interval` (1 second by default), first tick fires immediately
pub async fn clock_task(
    update_tx: mpsc::Sender<String>,
    config: ClockConfig,
    mut shutdown: broadcast::Receiver<()>,
) {
    let mut ticker = interval(config.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let text = format_clock(&Local::now().naive_local(), &config.format);
                if update_tx.send(text).await.is_err() {
                    break;
                }
            }
            _ = shutdown.recv() => {
                log::debug!("Clock task shutting down");
                break;
            }
        }
    }
}
