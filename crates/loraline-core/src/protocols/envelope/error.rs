use thiserror::Error;

use crate::protocols::sensor::PayloadError;

/// Errors returned by envelope parsing and payload dispatch.
///
/// `Payload` is transparent: a payload decoder's error reaches the caller
/// word for word, so the failing layer stays identifiable.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    #[error("text does not match envelope grammar: {line}")]
    Grammar { line: String },
    #[error("invalid message type: {value}")]
    MessageType { value: String },
    #[error("unsupported message type {message_type}")]
    UnsupportedMessageType { message_type: u32 },
    #[error(transparent)]
    Payload(#[from] PayloadError),
}
