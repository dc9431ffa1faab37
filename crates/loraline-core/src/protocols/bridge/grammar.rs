use std::sync::LazyLock;

use regex::Regex;

pub const BRIDGE_LINE_PATTERN: &str =
    r"^(?P<action>\w+)\s+\[(?P<rssi>-?\d+) RSSI\] -- (?P<envelope>.*)$";

pub static BRIDGE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(BRIDGE_LINE_PATTERN).expect("bridge line pattern"));
