use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::FrameError;
use super::grammar;
use crate::protocols::common::named;
use crate::protocols::envelope::{Envelope, parse_envelope};

/// One decoded bridge line: action keyword, received signal strength in dB,
/// and the nested envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Action keyword reported by the bridge, typically `RECV`.
    pub action: String,
    pub rssi: i32,
    pub envelope: Envelope,
}

impl fmt::Display for Frame {
    /// Re-emits the wire form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{} RSSI] -- {}", self.action, self.rssi, self.envelope)
    }
}

/// Decode one line of bridge output (trailing newline already stripped).
///
/// Trims outer whitespace, requires a whole-input match of the frame
/// grammar, then hands the envelope text down and propagates its result
/// verbatim. Either all three layers decode or the line is rejected whole.
pub fn parse_bridge_line(line: &str) -> Result<Frame, FrameError> {
    let line = line.trim();
    let caps = grammar::BRIDGE_LINE
        .captures(line)
        .ok_or_else(|| FrameError::Grammar {
            line: line.to_string(),
        })?;

    let rssi_text = named(&caps, "rssi");
    let rssi: i32 = rssi_text.parse().map_err(|_| FrameError::Rssi {
        value: rssi_text.to_string(),
    })?;

    let envelope = parse_envelope(named(&caps, "envelope"))?;

    Ok(Frame {
        action: named(&caps, "action").to_string(),
        rssi,
        envelope,
    })
}

#[cfg(test)]
mod tests {
    use super::{FrameError, parse_bridge_line};
    use crate::protocols::envelope::EnvelopeError;

    const LINE: &str = "RECV [-52 RSSI] -- W4PHO|1|3571c78c|4903|64.73|18.16|3.98";

    #[test]
    fn parse_valid_line() {
        let frame = parse_bridge_line(LINE).unwrap();
        assert_eq!(frame.action, "RECV");
        assert_eq!(frame.rssi, -52);
        assert_eq!(frame.envelope.station, "W4PHO");
    }

    #[test]
    fn parse_trims_outer_whitespace() {
        let frame = parse_bridge_line(&format!("  {LINE}\t")).unwrap();
        assert_eq!(frame.rssi, -52);
    }

    #[test]
    fn reject_missing_rssi_keyword() {
        let err =
            parse_bridge_line("RECV [-52] -- W4PHO|1|3571c78c|4903|64.73|18.16|3.98").unwrap_err();
        assert!(matches!(err, FrameError::Grammar { .. }));
    }

    #[test]
    fn reject_missing_separator() {
        let err =
            parse_bridge_line("RECV [-52 RSSI] W4PHO|1|3571c78c|4903|64.73|18.16|3.98").unwrap_err();
        assert!(matches!(err, FrameError::Grammar { .. }));
    }

    #[test]
    fn reject_rssi_overflow() {
        let err = parse_bridge_line(
            "RECV [-99999999999 RSSI] -- W4PHO|1|3571c78c|4903|64.73|18.16|3.98",
        )
        .unwrap_err();
        assert!(matches!(err, FrameError::Rssi { .. }));
    }

    #[test]
    fn envelope_error_propagates_verbatim() {
        let err = parse_bridge_line("RECV [-52 RSSI] -- W4PHO|9|3571c78c|garbage").unwrap_err();
        assert!(matches!(
            err,
            FrameError::Envelope(EnvelopeError::UnsupportedMessageType { message_type: 9 })
        ));
        assert_eq!(err.to_string(), "unsupported message type 9");
    }

    #[test]
    fn empty_line_is_frame_grammar_error() {
        let err = parse_bridge_line("").unwrap_err();
        assert!(matches!(err, FrameError::Grammar { .. }));
    }

    #[test]
    fn display_round_trips_wire_form() {
        let frame = parse_bridge_line(LINE).unwrap();
        assert_eq!(frame.to_string(), LINE);
    }
}
