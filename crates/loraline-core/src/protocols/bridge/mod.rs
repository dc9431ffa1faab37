//! Bridge frame decoding.
//!
//! The outermost layer of a bridge line: an action keyword, the received
//! signal strength, and the opaque envelope text making up the rest of the
//! line. This is the single entry gate for a line; text that fails the
//! frame grammar never reaches the envelope decoder, and a frame is never
//! partially valid.
//!
//! Example: `RECV [-52 RSSI] -- W4PHO|1|3571c78c|4903|64.73|18.16|3.98`

pub mod error;
pub mod grammar;
pub mod parser;

pub use error::FrameError;
pub use parser::{Frame, parse_bridge_line};
