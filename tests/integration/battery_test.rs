use std::fs;
use std::path::Path;

use dwmbar::core::status_bar::sources::{battery_text, read_battery, ChargeStatus};
use tempfile::TempDir;

fn write_attrs(dir: &Path, attrs: &[(&str, &str)]) {
    for (name, value) in attrs {
        fs::write(dir.join(name), format!("{}\n", value)).unwrap();
    }
}

#[test]
fn test_charge_based_battery_discharging() {
    let dir = TempDir::new().unwrap();
    write_attrs(
        dir.path(),
        &[
            ("capacity", "87"),
            ("status", "Discharging"),
            ("charge_full", "4000000"),
            ("charge_now", "3000000"),
            ("current_now", "1333333"),
        ],
    );

    let reading = read_battery(dir.path()).unwrap();
    assert_eq!(reading.capacity, 87);
    assert_eq!(reading.status, ChargeStatus::Discharging);
    assert_eq!(battery_text(dir.path()), "BAT: [D] 87% (02:15)");
}

#[test]
fn test_energy_based_battery_charging() {
    let dir = TempDir::new().unwrap();
    write_attrs(
        dir.path(),
        &[
            ("capacity", "50"),
            ("status", "Charging"),
            ("energy_full", "50000000"),
            ("energy_now", "25000000"),
            ("power_now", "12500000"),
        ],
    );

    assert_eq!(battery_text(dir.path()), "BAT: [C] 50% (02:00)");
}

#[test]
fn test_negative_current_is_treated_as_magnitude() {
    let dir = TempDir::new().unwrap();
    write_attrs(
        dir.path(),
        &[
            ("capacity", "87"),
            ("status", "Discharging"),
            ("charge_full", "4000000"),
            ("charge_now", "3000000"),
            ("current_now", "-1333333"),
        ],
    );

    assert_eq!(battery_text(dir.path()), "BAT: [D] 87% (02:15)");
}

#[test]
fn test_charging_with_zero_current_shows_full() {
    let dir = TempDir::new().unwrap();
    write_attrs(
        dir.path(),
        &[
            ("capacity", "100"),
            ("status", "Charging"),
            ("charge_full", "4000000"),
            ("charge_now", "4000000"),
            ("current_now", "0"),
        ],
    );

    assert_eq!(battery_text(dir.path()), "BAT: [F] 100%");
}

#[test]
fn test_unknown_status_is_sentinel() {
    let dir = TempDir::new().unwrap();
    write_attrs(
        dir.path(),
        &[
            ("capacity", "60"),
            ("status", "Not charging"),
            ("charge_full", "4000000"),
            ("charge_now", "2400000"),
            ("current_now", "0"),
        ],
    );

    assert_eq!(battery_text(dir.path()), "BAT: Unknown");
}

#[test]
fn test_missing_attribute_yields_empty_text() {
    let dir = TempDir::new().unwrap();
    write_attrs(dir.path(), &[("capacity", "87"), ("status", "Full")]);

    assert!(read_battery(dir.path()).is_err());
    assert_eq!(battery_text(dir.path()), "");
}

#[test]
fn test_non_numeric_attribute_yields_empty_text() {
    let dir = TempDir::new().unwrap();
    write_attrs(
        dir.path(),
        &[
            ("capacity", "eighty"),
            ("status", "Full"),
            ("charge_full", "1"),
            ("charge_now", "1"),
            ("current_now", "0"),
        ],
    );

    assert_eq!(battery_text(dir.path()), "");
}
