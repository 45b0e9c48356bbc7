//! Compiled-in bar configuration.
//!
//! There is no configuration file: the defaults below are the product
//! configuration. Tests build custom values to point sources at fixtures.

use std::path::PathBuf;
use std::time::Duration;

use crate::core::status_bar::BlockKind;

pub const DEFAULT_SEPARATOR: &str = " | ";

#[derive(Debug, Clone)]
pub struct BarConfig {
    /// Blocks in display order, left to right. One slot per entry.
    pub blocks: Vec<BlockKind>,
    pub separator: String,
    pub clock: ClockConfig,
    pub battery: BatteryConfig,
    pub network: NetworkConfig,
    pub media: MediaConfig,
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            blocks: vec![
                BlockKind::Network,
                BlockKind::Media,
                BlockKind::Battery,
                BlockKind::Clock,
            ],
            separator: DEFAULT_SEPARATOR.to_string(),
            clock: ClockConfig::default(),
            battery: BatteryConfig::default(),
            network: NetworkConfig::default(),
            media: MediaConfig::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClockConfig {
    /// chrono strftime pattern
    pub format: String,
    pub interval: Duration,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            format: "%d %b %H:%M".to_string(),
            interval: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BatteryConfig {
    /// Power supply device directory (holds `capacity`, `status`, ...)
    pub device_dir: PathBuf,
    pub interval: Duration,
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            device_dir: PathBuf::from("/sys/class/power_supply/BAT0"),
            interval: Duration::from_secs(5),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NetworkConfig {
    pub dev_path: PathBuf,
    pub interval: Duration,
    /// Only interfaces whose name starts with one of these are summed.
    pub interface_prefixes: Vec<String>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            dev_path: PathBuf::from("/proc/net/dev"),
            interval: Duration::from_secs(2),
            interface_prefixes: ["wlp", "enx", "eth"]
                .iter()
                .map(|p| p.to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MediaConfig {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            program: "playerctl".to_string(),
            args: vec![
                "metadata".to_string(),
                "--format".to_string(),
                "{{emoji(status)}} {{ artist }} - {{ title }}".to_string(),
                "--follow".to_string(),
            ],
        }
    }
}
