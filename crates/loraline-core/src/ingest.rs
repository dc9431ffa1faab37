//! Streaming ingestion loop.
//!
//! Turns a byte-oriented line source into a sequence of per-line decode
//! outcomes under a cooperative shutdown signal. The loop owns the source
//! exclusively for its lifetime and blocks only on the underlying read;
//! shutdown is polled between reads, so stop latency is bounded by the
//! source's read timeout, not by stream length.
//!
//! Invariants:
//! - Exactly one outcome per input line, in read order.
//! - A rejected line never terminates the loop and is never retried.
//! - The source is dropped (releasing the connection) on every exit path.

use tokio::sync::{broadcast, mpsc};
use tracing::trace;

use crate::protocols::bridge::{Frame, FrameError, parse_bridge_line};
use crate::source::{LineSource, SourceError};

/// Default capacity of the outcome channel. Bounded so a stalled consumer
/// backpressures the reader instead of buffering the stream.
pub const OUTCOME_CHANNEL_CAPACITY: usize = 64;

/// Per-line decode outcome delivered to the consumer.
#[derive(Debug)]
pub enum LineOutcome {
    /// The line decoded through all three layers.
    Decoded(Frame),
    /// The line was rejected; carries the raw text and the failing layer's
    /// error so the consumer can log without re-parsing.
    Rejected { line: String, error: FrameError },
}

/// Run the ingestion loop until end of input, shutdown, or a source
/// failure. Blocking; intended for `tokio::task::spawn_blocking`.
///
/// Read timeouts are treated as wake-ups to re-poll the shutdown signal. A
/// closed outcome channel (consumer gone) stops the loop cleanly.
pub fn run_ingest<S: LineSource>(
    mut source: S,
    outcomes: mpsc::Sender<LineOutcome>,
    mut shutdown: broadcast::Receiver<()>,
) -> Result<(), SourceError> {
    loop {
        match shutdown.try_recv() {
            Err(broadcast::error::TryRecvError::Empty) => {}
            _ => {
                trace!("ingest loop stopping on shutdown signal");
                return Ok(());
            }
        }

        match source.next_line() {
            Ok(Some(line)) => {
                let outcome = match parse_bridge_line(&line) {
                    Ok(frame) => LineOutcome::Decoded(frame),
                    Err(error) => LineOutcome::Rejected { line, error },
                };
                if outcomes.blocking_send(outcome).is_err() {
                    trace!("outcome consumer dropped; ingest loop stopping");
                    return Ok(());
                }
            }
            Ok(None) => {
                trace!("line source reached end of input");
                return Ok(());
            }
            Err(SourceError::TimedOut) => continue,
            Err(err) => return Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use tokio::sync::{broadcast, mpsc};

    use super::{LineOutcome, run_ingest};
    use crate::source::ReaderLineSource;

    const GOOD: &str = "RECV [-52 RSSI] -- W4PHO|1|3571c78c|4903|64.73|18.16|3.98";

    #[test]
    fn emits_one_outcome_per_line_in_order() {
        let input = format!("{GOOD}\nnot a frame\n{GOOD}\n");
        let source = ReaderLineSource::new(Cursor::new(input));
        let (tx, mut rx) = mpsc::channel(8);
        let (shutdown_tx, _) = broadcast::channel(1);

        run_ingest(source, tx, shutdown_tx.subscribe()).unwrap();

        assert!(matches!(rx.blocking_recv(), Some(LineOutcome::Decoded(_))));
        match rx.blocking_recv() {
            Some(LineOutcome::Rejected { line, .. }) => assert_eq!(line, "not a frame"),
            other => panic!("expected rejected outcome, got {other:?}"),
        }
        assert!(matches!(rx.blocking_recv(), Some(LineOutcome::Decoded(_))));
        assert!(rx.blocking_recv().is_none());
    }

    #[test]
    fn dropped_consumer_stops_loop() {
        let input = format!("{GOOD}\n").repeat(100);
        let source = ReaderLineSource::new(Cursor::new(input));
        let (tx, rx) = mpsc::channel(1);
        let (shutdown_tx, _) = broadcast::channel(1);
        drop(rx);

        run_ingest(source, tx, shutdown_tx.subscribe()).unwrap();
    }
}
