use std::sync::LazyLock;

use regex::Regex;

/// Fields of a sensor reading, in wire order.
pub const FIELD_COUNT: usize = 4;

pub const SEQUENCE_PATTERN: &str = r"^\d+$";
pub const DECIMAL_PATTERN: &str = r"^-?\d+\.\d{2}$";

pub static SEQUENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(SEQUENCE_PATTERN).expect("sequence pattern"));

pub static DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DECIMAL_PATTERN).expect("decimal pattern"));
