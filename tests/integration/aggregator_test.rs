use std::time::Duration;

use dwmbar::core::status_bar::{spawn_aggregator, spawn_status_bar, BlockKind};
use dwmbar::core::config::{BarConfig, BatteryConfig, ClockConfig, MediaConfig, NetworkConfig};
use tempfile::TempDir;
use tokio::sync::{broadcast, mpsc};
use tokio::time::timeout;

async fn next_line(lines: &mut mpsc::Receiver<String>) -> String {
    timeout(Duration::from_secs(2), lines.recv())
        .await
        .expect("timed out waiting for status line")
        .expect("status line stream closed")
}

#[tokio::test]
async fn test_battery_and_clock_in_slot_order() {
    let (shutdown_tx, _) = broadcast::channel(1);
    let (battery_tx, battery_rx) = mpsc::channel(1);
    let (clock_tx, clock_rx) = mpsc::channel(1);

    let mut lines = spawn_aggregator(
        vec![Some(battery_rx), Some(clock_rx)],
        " | ",
        &shutdown_tx,
    );

    clock_tx.send("02 Jan 15:04".to_string()).await.unwrap();
    assert_eq!(next_line(&mut lines).await, " | 02 Jan 15:04");

    battery_tx
        .send("BAT: [D] 87% (02:15)".to_string())
        .await
        .unwrap();
    assert_eq!(
        next_line(&mut lines).await,
        "BAT: [D] 87% (02:15) | 02 Jan 15:04"
    );
}

#[tokio::test]
async fn test_identical_updates_are_not_coalesced() {
    let (shutdown_tx, _) = broadcast::channel(1);
    let (tx, rx) = mpsc::channel(1);
    let mut lines = spawn_aggregator(vec![Some(rx)], " | ", &shutdown_tx);

    tx.send("same".to_string()).await.unwrap();
    tx.send("same".to_string()).await.unwrap();

    assert_eq!(next_line(&mut lines).await, "same");
    assert_eq!(next_line(&mut lines).await, "same");
}

#[tokio::test]
async fn test_interleaved_sources_keep_segments_and_order() {
    const SOURCES: usize = 3;
    const VALUES: usize = 20;

    let (shutdown_tx, _) = broadcast::channel(1);
    let mut receivers = Vec::new();

    for source in 0..SOURCES {
        let (tx, rx) = mpsc::channel(1);
        receivers.push(Some(rx));
        tokio::spawn(async move {
            for value in 0..VALUES {
                if tx.send(format!("s{}-{}", source, value)).await.is_err() {
                    break;
                }
                tokio::task::yield_now().await;
            }
        });
    }

    let mut lines = spawn_aggregator(receivers, " | ", &shutdown_tx);
    let mut last_seen: [Option<usize>; SOURCES] = [None; SOURCES];

    for _ in 0..SOURCES * VALUES {
        let line = next_line(&mut lines).await;
        let segments: Vec<&str> = line.split(" | ").collect();
        assert_eq!(segments.len(), SOURCES, "line: {:?}", line);

        for (slot, segment) in segments.iter().enumerate() {
            if segment.is_empty() {
                assert!(last_seen[slot].is_none());
                continue;
            }
            let (prefix, value) = segment.split_once('-').unwrap();
            assert_eq!(prefix, format!("s{}", slot));
            let value: usize = value.parse().unwrap();
            // A slot only moves forward, one source value at a time
            if let Some(previous) = last_seen[slot] {
                assert!(value == previous || value == previous + 1);
            }
            last_seen[slot] = Some(value);
        }
    }

    assert!(last_seen.iter().all(|v| *v == Some(VALUES - 1)));
}

#[tokio::test]
async fn test_shutdown_closes_status_line() {
    let (shutdown_tx, _) = broadcast::channel(1);
    let (_tx, rx) = mpsc::channel::<String>(1);
    let mut lines = spawn_aggregator(vec![Some(rx)], " | ", &shutdown_tx);

    shutdown_tx.send(()).unwrap();

    let closed = timeout(Duration::from_secs(2), lines.recv()).await.unwrap();
    assert!(closed.is_none());
}

#[tokio::test]
async fn test_full_bar_from_fixture_files() {
    let dir = TempDir::new().unwrap();

    let battery_dir = dir.path().join("BAT0");
    std::fs::create_dir(&battery_dir).unwrap();
    for (name, value) in [
        ("capacity", "87\n"),
        ("status", "Full\n"),
        ("charge_full", "4000000\n"),
        ("charge_now", "4000000\n"),
        ("current_now", "0\n"),
    ] {
        std::fs::write(battery_dir.join(name), value).unwrap();
    }

    let dev_path = dir.path().join("dev");
    std::fs::write(
        &dev_path,
        "header\nheader\n  eth0: 100 1 0 0 0 0 0 0 100 1 0 0 0 0 0 0\n",
    )
    .unwrap();

    let config = BarConfig {
        blocks: vec![
            BlockKind::Network,
            BlockKind::Media,
            BlockKind::Battery,
            BlockKind::Clock,
        ],
        clock: ClockConfig {
            interval: Duration::from_millis(20),
            ..Default::default()
        },
        battery: BatteryConfig {
            device_dir: battery_dir,
            interval: Duration::from_millis(20),
        },
        network: NetworkConfig {
            dev_path,
            interval: Duration::from_millis(20),
            ..Default::default()
        },
        media: MediaConfig {
            program: "dwmbar-no-such-media-tool".to_string(),
            args: Vec::new(),
        },
        ..Default::default()
    };

    let (shutdown_tx, _) = broadcast::channel(1);
    let mut lines = spawn_status_bar(&config, &shutdown_tx);

    let mut complete = None;
    for _ in 0..200 {
        let line = next_line(&mut lines).await;
        assert_eq!(line.split(" | ").count(), 4, "line: {:?}", line);
        if line.starts_with("NET: ") && line.contains("BAT: [F] 87%") {
            complete = Some(line);
            break;
        }
    }

    let line = complete.expect("never saw network and battery together");
    let segments: Vec<&str> = line.split(" | ").collect();
    assert_eq!(segments[0], "NET: 0.0↓ 0.0↑");
    assert_eq!(segments[1], "");
    assert_eq!(segments[2], "BAT: [F] 87%");
    assert!(!segments[3].is_empty());

    shutdown_tx.send(()).unwrap();
}
