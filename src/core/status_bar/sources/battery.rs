//! Battery block read from a sysfs power supply directory.

use std::fs;
use std::path::Path;

use log::warn;
use tokio::sync::{broadcast, mpsc};
use tokio::time::{interval, MissedTickBehavior};

use crate::core::config::BatteryConfig;
use crate::error::{BarError, Result};
use crate::ui::formatters::format_hours_minutes;

/// Text emitted for a status keyword we do not know how to render.
pub const UNKNOWN_STATUS_TEXT: &str = "BAT: Unknown";

/// Charge-based batteries report `charge_*` with `current_now`; energy-based
/// ones report `energy_*` with `power_now`. Either ratio yields hours.
const CHARGE_ATTRS: [&str; 3] = ["charge_full", "charge_now", "current_now"];
const ENERGY_ATTRS: [&str; 3] = ["energy_full", "energy_now", "power_now"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChargeStatus {
    Discharging,
    Charging,
    Full,
    Other(String),
}

impl ChargeStatus {
    pub fn from_sysfs(value: &str) -> Self {
        match value.trim() {
            "Discharging" => ChargeStatus::Discharging,
            "Charging" => ChargeStatus::Charging,
            "Full" => ChargeStatus::Full,
            other => ChargeStatus::Other(other.to_string()),
        }
    }
}

/// One sample of the battery attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatteryReading {
    pub capacity: u32,
    pub full: u64,
    pub now: u64,
    /// Instantaneous drain or charge rate, always non-negative
    pub current: u64,
    pub status: ChargeStatus,
}

fn read_sysfs_str(path: &Path) -> Result<String> {
    let raw = fs::read_to_string(path)?;
    Ok(raw.trim().to_string())
}

fn read_sysfs_int(path: &Path) -> Result<i64> {
    let value = read_sysfs_str(path)?;
    value
        .parse::<i64>()
        .map_err(|_| BarError::parse(format!("{}: not a number: {:?}", path.display(), value)))
}

fn read_sysfs_unsigned(path: &Path) -> Result<u64> {
    // Some drivers report a negative current while discharging
    Ok(read_sysfs_int(path)?.unsigned_abs())
}

/// Read all attributes needed to render the battery block.
pub fn read_battery(device_dir: &Path) -> Result<BatteryReading> {
    let capacity = read_sysfs_int(&device_dir.join("capacity"))?;
    let capacity = u32::try_from(capacity)
        .map_err(|_| BarError::parse(format!("capacity out of range: {}", capacity)))?;

    let [full_attr, now_attr, current_attr] = if device_dir.join(CHARGE_ATTRS[1]).exists() {
        CHARGE_ATTRS
    } else {
        ENERGY_ATTRS
    };

    let full = read_sysfs_unsigned(&device_dir.join(full_attr))?;
    let now = read_sysfs_unsigned(&device_dir.join(now_attr))?;
    let current = read_sysfs_unsigned(&device_dir.join(current_attr))?;
    let status = ChargeStatus::from_sysfs(&read_sysfs_str(&device_dir.join("status"))?);

    Ok(BatteryReading {
        capacity,
        full,
        now,
        current,
        status,
    })
}

/// Render a reading as `BAT: [<tag>] <capacity>% (HH:MM)`.
pub fn format_battery(reading: &BatteryReading) -> String {
    let capacity = reading.capacity;

    match &reading.status {
        ChargeStatus::Discharging => match minutes_at_rate(reading.now, reading.current) {
            Some(minutes) => format!(
                "BAT: [D] {}% ({})",
                capacity,
                format_hours_minutes(minutes)
            ),
            None => format!("BAT: [D] {}%", capacity),
        },
        ChargeStatus::Charging => {
            let missing = reading.full.saturating_sub(reading.now);
            match minutes_at_rate(missing, reading.current) {
                Some(minutes) => format!(
                    "BAT: [C] {}% ({})",
                    capacity,
                    format_hours_minutes(minutes)
                ),
                // No current flowing while "charging" means it is topped up
                None => format!("BAT: [F] {}%", capacity),
            }
        }
        ChargeStatus::Full => format!("BAT: [F] {}%", capacity),
        ChargeStatus::Other(_) => UNKNOWN_STATUS_TEXT.to_string(),
    }
}

fn minutes_at_rate(amount: u64, rate: u64) -> Option<u64> {
    if rate == 0 {
        return None;
    }
    Some(amount.saturating_mul(60) / rate)
}

/// Battery text for one cycle. A failed read yields an empty string.
pub fn battery_text(device_dir: &Path) -> String {
    match read_battery(device_dir) {
        Ok(reading) => format_battery(&reading),
        Err(e) => {
            warn!("Battery read failed: {}", e);
            String::new()
        }
    }
}

/// Task that monitors the battery.
///
/// Polling frequency: 5 seconds by default (battery changes slowly)
pub async fn battery_task(
    update_tx: mpsc::Sender<String>,
    config: BatteryConfig,
    mut shutdown: broadcast::Receiver<()>,
) {
    let mut ticker = interval(config.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let text = battery_text(&config.device_dir);
                if update_tx.send(text).await.is_err() {
                    break;
                }
            }
            _ = shutdown.recv() => {
                log::debug!("Battery task shutting down");
                break;
            }
        }
    }
}
