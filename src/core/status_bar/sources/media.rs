//! Media player block backed by a long-running query tool (`playerctl --follow`).

use std::process::Stdio;

use log::{debug, info, warn};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tokio::sync::{broadcast, mpsc};

use super::SOURCE_CHANNEL_CAPACITY;
use crate::core::config::MediaConfig;

/// Spawn the media query tool and forward its output lines.
///
/// Returns `None` when the tool is not installed or fails to start; the
/// block is then simply left empty.
pub fn spawn_media(
    config: &MediaConfig,
    shutdown: broadcast::Receiver<()>,
) -> Option<mpsc::Receiver<String>> {
    let program = match which::which(&config.program) {
        Ok(path) => path,
        Err(_) => {
            info!("{} not found in PATH, media block disabled", config.program);
            return None;
        }
    };

    let mut child = match Command::new(&program)
        .args(&config.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
    {
        Ok(child) => child,
        Err(e) => {
            info!("Failed to start {}: {}, media block disabled", program.display(), e);
            return None;
        }
    };

    let stdout = child.stdout.take()?;
    let (tx, rx) = mpsc::channel(SOURCE_CHANNEL_CAPACITY);

    tokio::spawn(async move {
        // Holding the child here ties its lifetime to the task
        let _child = child;
        forward_lines(BufReader::new(stdout), tx, shutdown).await;
    });

    Some(rx)
}

/// Forward every line of `reader`, verbatim, as one emission.
///
/// Lines are decoded lossily: bytes that are not UTF-8 become U+FFFD so a
/// single odd track title does not end the block. Only end of stream or an
/// I/O error stops forwarding.
pub async fn forward_lines<R>(
    mut reader: R,
    update_tx: mpsc::Sender<String>,
    mut shutdown: broadcast::Receiver<()>,
) where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();

    loop {
        buf.clear();

        tokio::select! {
            read = reader.read_until(b'\n', &mut buf) => match read {
                Ok(0) => {
                    debug!("Media output stream closed");
                    break;
                }
                Ok(_) => {
                    if update_tx.send(decode_line(&buf)).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("Media output unreadable: {}", e);
                    break;
                }
            },
            _ = shutdown.recv() => {
                debug!("Media task shutting down");
                break;
            }
        }
    }
}

/// Strip the `\n` or `\r\n` terminator and decode the rest.
fn decode_line(raw: &[u8]) -> String {
    let line = raw.strip_suffix(b"\n").unwrap_or(raw);
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    String::from_utf8_lossy(line).into_owned()
}
