//! Status bar core.
//!
//! Independent metric sources feed one aggregator that keeps the latest
//! text per slot and emits the joined line for the publisher.

mod aggregator;
pub mod publisher;
mod runtime;
pub mod sources;

pub use aggregator::{spawn_aggregator, SlotUpdate, StatusLine};
pub use publisher::{publish_lines, DisplaySink};
pub use runtime::{spawn_status_bar, BarRuntime, ShutdownHandle};
pub use sources::{spawn_source, BlockKind};
