//! Publishing joined lines to the display sink.

use log::debug;

use crate::error::Result;

/// Something that shows the status line, e.g. the X root window name.
pub trait DisplaySink {
    /// Replace the displayed text. Blocks until the sink accepted it.
    fn set_name(&mut self, name: &str) -> Result<()>;
}

impl<S: DisplaySink + ?Sized> DisplaySink for Box<S> {
    fn set_name(&mut self, name: &str) -> Result<()> {
        (**self).set_name(name)
    }
}

/// Write every line, in order, to `sink`.
///
/// Returns the number of lines published once `lines` is exhausted. The first
/// sink failure is returned immediately: nothing is retried.
pub fn publish_lines<I, S>(lines: I, sink: &mut S) -> Result<u64>
where
    I: IntoIterator<Item = String>,
    S: DisplaySink + ?Sized,
{
    let mut published = 0;

    for line in lines {
        debug!("Publishing: {}", line);
        sink.set_name(&line)?;
        published += 1;
    }

    Ok(published)
}
