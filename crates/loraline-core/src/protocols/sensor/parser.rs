use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::PayloadError;
use super::grammar;

/// Decoded telemetry payload: packet sequence counter, humidity in % RH,
/// temperature in Celsius, battery voltage in volts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub sequence: u64,
    pub humidity: f64,
    pub temperature: f64,
    pub battery: f64,
}

impl fmt::Display for SensorReading {
    /// Re-emits the wire form, two fractional digits per reading.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}|{:.2}|{:.2}|{:.2}",
            self.sequence, self.humidity, self.temperature, self.battery
        )
    }
}

/// Decode a sensor reading from payload text.
///
/// Outer whitespace is trimmed; the text must then be exactly four
/// pipe-separated fields. A field that fails its pattern or conversion is
/// reported by name; a wrong field count is a structural grammar error.
pub fn parse_sensor_reading(text: &str) -> Result<SensorReading, PayloadError> {
    let text = text.trim();
    let fields: Vec<&str> = text.split('|').collect();
    if fields.len() != grammar::FIELD_COUNT {
        return Err(PayloadError::Grammar {
            line: text.to_string(),
        });
    }

    Ok(SensorReading {
        sequence: parse_sequence(fields[0])?,
        humidity: parse_decimal("humidity", fields[1])?,
        temperature: parse_decimal("temperature", fields[2])?,
        battery: parse_decimal("battery", fields[3])?,
    })
}

fn parse_sequence(value: &str) -> Result<u64, PayloadError> {
    if !grammar::SEQUENCE.is_match(value) {
        return Err(field_error("sequence", value));
    }
    value
        .parse::<u64>()
        .map_err(|_| field_error("sequence", value))
}

fn parse_decimal(field: &'static str, value: &str) -> Result<f64, PayloadError> {
    if !grammar::DECIMAL.is_match(value) {
        return Err(field_error(field, value));
    }
    value.parse::<f64>().map_err(|_| field_error(field, value))
}

fn field_error(field: &'static str, value: &str) -> PayloadError {
    PayloadError::Field {
        field,
        value: value.to_string(),
    }
}
