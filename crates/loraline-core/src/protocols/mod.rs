//! Line-protocol decoding modules.
//!
//! Each layer follows the same structure:
//! - `grammar`: anchored patterns and dispatch constants (source of truth)
//! - `parser`: domain-level decoding (no ad-hoc string slicing)
//! - `error`: explicit, actionable errors
//!
//! Parsers are pure functions from text to record-or-error; there is no
//! parser state across lines or across layers. The layers nest strictly:
//! `bridge` extracts the envelope text, `envelope` selects and drives the
//! payload decoder, `sensor` decodes the numeric telemetry record.

pub mod bridge;
pub(crate) mod common;
pub mod envelope;
pub mod sensor;
