//! Sensor payload decoding.
//!
//! The parser decodes the innermost telemetry record: a pipe-separated
//! sequence counter plus humidity, temperature, and battery readings, each
//! carried with exactly two fractional digits on the wire. Values are not
//! range-validated; only shape and numeric conversion are enforced.
//!
//! Errors name the offending field so a rejected transmission can be logged
//! without re-parsing. Field patterns live in `grammar`.

pub mod error;
pub mod grammar;
pub mod parser;

pub use error::PayloadError;
pub use parser::{SensorReading, parse_sensor_reading};
