use std::sync::LazyLock;

use regex::Regex;

/// Message type carrying a sensor reading payload. The only registered type
/// at this time.
pub const MSG_TYPE_SENSOR_READING: u32 = 1;

pub const ENVELOPE_PATTERN: &str =
    r"^(?P<station>[A-Za-z0-9]{4,6})\|(?P<msg_type>\d+)\|(?P<digest>[0-9a-fA-F]{8})\|(?P<payload>.*)$";

pub static ENVELOPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(ENVELOPE_PATTERN).expect("envelope pattern"));
