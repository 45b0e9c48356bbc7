use anyhow::{Context, Result};
use clap::Command;
use log::info;

use dwmbar::core::status_bar::{publish_lines, BarRuntime};
use dwmbar::platform::RootWindowSink;
use dwmbar::BarConfig;

fn main() -> Result<()> {
    // No operational flags: only --help and --version
    Command::new("dwmbar")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Writes clock, battery, network rate and media player status to the dwm bar")
        .get_matches();

    dwmbar::init_logging();

    let mut sink = RootWindowSink::connect().context("Failed to open X display")?;

    let mut runtime =
        BarRuntime::new(BarConfig::default()).context("Failed to start status bar")?;

    let shutdown = runtime.shutdown_handle();
    ctrlc::set_handler(move || {
        info!("Termination signal received, stopping");
        shutdown.trigger();
    })
    .context("Failed to install signal handler")?;

    let published = publish_lines(runtime.lines(), &mut sink)
        .context("Display sink rejected the status line")?;

    info!("Status bar stopped after {} updates", published);
    runtime.shutdown();
    Ok(())
}
