//! Envelope decoding.
//!
//! The envelope wraps every payload with a station identifier, a message
//! type selecting the payload grammar, and a short hex digest. The digest is
//! advisory metadata: it is shape-validated but never verified against the
//! payload content.
//!
//! Dispatch by message type is a closed set; an unregistered type is
//! rejected at this layer even when the envelope itself is well-formed.
//! Adding a payload kind means adding a `Payload` variant and a match arm,
//! not touching the envelope grammar. Payload errors propagate verbatim.

pub mod error;
pub mod grammar;
pub mod parser;

pub use error::EnvelopeError;
pub use grammar::MSG_TYPE_SENSOR_READING;
pub use parser::{Envelope, Payload, parse_envelope};
