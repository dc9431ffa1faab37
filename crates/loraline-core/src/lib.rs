//! Core library for the loraline telemetry ingester.
//!
//! This crate implements the ingestion pipeline used by the daemon: a line
//! source feeds the ingestion loop, which drives the layered line-protocol
//! decoders (bridge frame -> envelope -> sensor payload) and emits one
//! outcome per input line. Decoding is text-oriented and side-effect free;
//! all I/O is isolated in `source` modules. Grammar patterns are captured in
//! `grammar` modules so parsers stay minimal and consistent across layers.
//!
//! Invariants:
//! - A frame is never partially valid: either all three layers decode or the
//!   whole line is rejected as one unit.
//! - Outcomes are emitted in the order lines were read.
//! - A lower layer's error propagates unchanged; higher layers never reword
//!   or swallow it.
//! - A malformed line never terminates the stream.
//!
//! # Examples
//! ```
//! use loraline_core::{Payload, parse_bridge_line};
//!
//! let line = "RECV [-52 RSSI] -- W4PHO|1|3571c78c|4903|64.73|18.16|3.98";
//! let frame = parse_bridge_line(line)?;
//! assert_eq!(frame.action, "RECV");
//! assert_eq!(frame.rssi, -52);
//! assert_eq!(frame.envelope.station, "W4PHO");
//! let Payload::SensorReading(reading) = &frame.envelope.payload;
//! assert_eq!(reading.sequence, 4903);
//! assert_eq!(frame.to_string(), line);
//! # Ok::<(), loraline_core::FrameError>(())
//! ```

mod ingest;
mod protocols;
mod source;

pub use ingest::{LineOutcome, OUTCOME_CHANNEL_CAPACITY, run_ingest};
pub use protocols::bridge::{Frame, FrameError, parse_bridge_line};
pub use protocols::envelope::{
    Envelope, EnvelopeError, MSG_TYPE_SENSOR_READING, Payload, parse_envelope,
};
pub use protocols::sensor::{PayloadError, SensorReading, parse_sensor_reading};
pub use source::{
    LineSource, ReaderLineSource, SerialConfig, SerialLineSource, SourceError,
};
