use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::EnvelopeError;
use super::grammar;
use crate::protocols::common::named;
use crate::protocols::sensor::{SensorReading, parse_sensor_reading};

/// Payload variants, keyed by the envelope's message type. Closed set:
/// exactly one variant is populated per envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Payload {
    SensorReading(SensorReading),
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::SensorReading(reading) => reading.fmt(f),
        }
    }
}

/// Decoded message envelope: station identifier, message type, advisory
/// digest, and the typed payload the message type selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Station identifier, 4-6 alphanumerics (e.g. a callsign).
    pub station: String,
    pub message_type: u32,
    /// 8 hex characters; truncated integrity tag, not verified here.
    pub digest: String,
    pub payload: Payload,
}

impl fmt::Display for Envelope {
    /// Re-emits the wire form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}|{}|{}|{}",
            self.station, self.message_type, self.digest, self.payload
        )
    }
}

/// Decode an envelope from text.
///
/// Whole-input match against the envelope grammar, then payload dispatch by
/// message type. Fails fast: there are no fallback grammars, and a payload
/// decoder's error is returned unchanged.
pub fn parse_envelope(text: &str) -> Result<Envelope, EnvelopeError> {
    let text = text.trim();
    let caps = grammar::ENVELOPE
        .captures(text)
        .ok_or_else(|| EnvelopeError::Grammar {
            line: text.to_string(),
        })?;

    let type_text = named(&caps, "msg_type");
    let message_type: u32 = type_text
        .parse()
        .map_err(|_| EnvelopeError::MessageType {
            value: type_text.to_string(),
        })?;

    let payload = match message_type {
        grammar::MSG_TYPE_SENSOR_READING => {
            Payload::SensorReading(parse_sensor_reading(named(&caps, "payload"))?)
        }
        other => {
            return Err(EnvelopeError::UnsupportedMessageType {
                message_type: other,
            });
        }
    };

    Ok(Envelope {
        station: named(&caps, "station").to_string(),
        message_type,
        digest: named(&caps, "digest").to_string(),
        payload,
    })
}
