mod reader;
mod serial;

pub use reader::ReaderLineSource;
pub use serial::{SerialConfig, SerialLineSource};

use thiserror::Error;

/// Boundary with the connection provider: a byte stream already framed into
/// lines, with a bounded read timeout. Closing the connection is `Drop`.
///
/// `Ok(None)` is end of input. `Err(SourceError::TimedOut)` means no
/// complete line arrived within the byte timeout; callers use it to poll
/// cancellation and read again, so shutdown latency stays bounded by one
/// timeout interval.
pub trait LineSource {
    fn next_line(&mut self) -> Result<Option<String>, SourceError>;
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("read timed out before a complete line")]
    TimedOut,
    #[error("no bridge device found (vid={vid:04x}, pid={pid:04x})")]
    NoDevice { vid: u16, pid: u16 },
    #[error("serial port error: {0}")]
    Serial(String),
}
