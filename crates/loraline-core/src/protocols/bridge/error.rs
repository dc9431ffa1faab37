use thiserror::Error;

use crate::protocols::envelope::EnvelopeError;

#[derive(Debug, Error)]
pub enum FrameError {
    #[error("line does not match bridge frame grammar: {line}")]
    Grammar { line: String },
    #[error("invalid rssi: {value}")]
    Rssi { value: String },
    #[error(transparent)]
    Envelope(#[from] EnvelopeError),
}
