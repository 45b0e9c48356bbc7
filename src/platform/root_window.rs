//! X11 root window name sink.
//!
//! dwm renders the root window's `WM_NAME` property in its bar, so publishing
//! a status line is a single property replace on the root window.

use x11rb::connection::Connection;
use x11rb::protocol::xproto::{AtomEnum, PropMode, Window};
use x11rb::rust_connection::RustConnection;
use x11rb::wrapper::ConnectionExt as _;

use crate::core::status_bar::DisplaySink;
use crate::error::{BarError, Result};

pub struct RootWindowSink {
    conn: RustConnection,
    root: Window,
}

impl RootWindowSink {
    /// Connect to the display named by `$DISPLAY` and resolve its root window.
    pub fn connect() -> Result<Self> {
        let (conn, screen_num) = x11rb::connect(None)?;

        // The root window id does not change while the connection is open
        let root = conn
            .setup()
            .roots
            .get(screen_num)
            .map(|screen| screen.root)
            .ok_or_else(|| BarError::sink(format!("screen {} not found", screen_num)))?;

        log::debug!("Connected to X server, root window 0x{:x}", root);

        Ok(Self { conn, root })
    }
}

impl DisplaySink for RootWindowSink {
    fn set_name(&mut self, name: &str) -> Result<()> {
        self.conn
            .change_property8(
                PropMode::REPLACE,
                self.root,
                AtomEnum::WM_NAME,
                AtomEnum::STRING,
                name.as_bytes(),
            )?
            .check()?;
        Ok(())
    }
}
