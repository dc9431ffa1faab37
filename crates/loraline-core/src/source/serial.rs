//! Serial connection provider for the radio bridge.
//!
//! The bridge enumerates as a USB serial device; discovery matches on the
//! USB vendor/product identifiers and opens the port 8-N-1 at the
//! configured baud rate. Reads carry a byte timeout so the ingestion loop
//! can poll cancellation; a timeout never loses data because partial lines
//! stay in the carry buffer until their line feed arrives.

use std::io::Read;
use std::time::Duration;

use serialport::{SerialPort, SerialPortType};
use tracing::debug;

use super::{LineSource, SourceError};

pub const DEFAULT_VID: u16 = 0x239a;
pub const DEFAULT_PID: u16 = 0x800c;
pub const DEFAULT_BAUD_RATE: u32 = 9600;
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_millis(200);

const READ_CHUNK: usize = 256;

#[derive(Debug, Clone)]
pub struct SerialConfig {
    pub vid: u16,
    pub pid: u16,
    pub baud_rate: u32,
    /// Byte timeout for reads; bounds shutdown latency.
    pub read_timeout: Duration,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            vid: DEFAULT_VID,
            pid: DEFAULT_PID,
            baud_rate: DEFAULT_BAUD_RATE,
            read_timeout: DEFAULT_READ_TIMEOUT,
        }
    }
}

pub struct SerialLineSource {
    port: Box<dyn SerialPort>,
    pending: Vec<u8>,
}

impl SerialLineSource {
    /// Enumerate serial ports and open the first one whose USB identifiers
    /// match the configured vendor/product pair.
    pub fn discover(config: &SerialConfig) -> Result<Self, SourceError> {
        let ports =
            serialport::available_ports().map_err(|e| SourceError::Serial(e.to_string()))?;
        let path = ports
            .into_iter()
            .find_map(|p| match p.port_type {
                SerialPortType::UsbPort(usb)
                    if usb.vid == config.vid && usb.pid == config.pid =>
                {
                    Some(p.port_name)
                }
                _ => None,
            })
            .ok_or(SourceError::NoDevice {
                vid: config.vid,
                pid: config.pid,
            })?;
        debug!(%path, "bridge device found");
        Self::open(&path, config)
    }

    /// Open an explicit device path with the configured line settings.
    pub fn open(path: &str, config: &SerialConfig) -> Result<Self, SourceError> {
        let port = serialport::new(path, config.baud_rate)
            .data_bits(serialport::DataBits::Eight)
            .parity(serialport::Parity::None)
            .stop_bits(serialport::StopBits::One)
            .timeout(config.read_timeout)
            .open()
            .map_err(|e| SourceError::Serial(e.to_string()))?;
        Ok(Self {
            port,
            pending: Vec::new(),
        })
    }
}

impl LineSource for SerialLineSource {
    fn next_line(&mut self) -> Result<Option<String>, SourceError> {
        loop {
            if let Some(line) = take_line(&mut self.pending) {
                return Ok(Some(line));
            }
            let mut chunk = [0u8; READ_CHUNK];
            match self.port.read(&mut chunk) {
                Ok(0) => return Ok(None),
                Ok(n) => self.pending.extend_from_slice(&chunk[..n]),
                Err(e) if e.kind() == std::io::ErrorKind::TimedOut => {
                    return Err(SourceError::TimedOut);
                }
                Err(e) => return Err(SourceError::Io(e)),
            }
        }
    }
}

/// Split the first complete line out of the carry buffer. The line feed is
/// consumed; a trailing carriage return is stripped. Radio noise may leave
/// non-UTF-8 bytes in a line, which decode lossily and fail the frame
/// grammar downstream instead of killing the source.
fn take_line(pending: &mut Vec<u8>) -> Option<String> {
    let pos = pending.iter().position(|&b| b == b'\n')?;
    let mut line: Vec<u8> = pending.drain(..=pos).collect();
    line.pop();
    if line.last() == Some(&b'\r') {
        line.pop();
    }
    Some(String::from_utf8_lossy(&line).into_owned())
}
