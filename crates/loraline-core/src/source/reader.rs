use std::io::BufRead;

use super::{LineSource, SourceError};

/// Line source over any buffered reader, used for offline replay (stdin,
/// recorded captures) and in tests.
pub struct ReaderLineSource<R> {
    reader: R,
}

impl<R: BufRead> ReaderLineSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> LineSource for ReaderLineSource<R> {
    fn next_line(&mut self) -> Result<Option<String>, SourceError> {
        let mut buf = String::new();
        let n = self.reader.read_line(&mut buf)?;
        if n == 0 {
            return Ok(None);
        }
        while buf.ends_with('\n') || buf.ends_with('\r') {
            buf.pop();
        }
        Ok(Some(buf))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::ReaderLineSource;
    use crate::source::LineSource;

    #[test]
    fn yields_lines_then_none() {
        let mut source = ReaderLineSource::new(Cursor::new("one\ntwo\n"));
        assert_eq!(source.next_line().unwrap().as_deref(), Some("one"));
        assert_eq!(source.next_line().unwrap().as_deref(), Some("two"));
        assert_eq!(source.next_line().unwrap(), None);
    }

    #[test]
    fn strips_carriage_return() {
        let mut source = ReaderLineSource::new(Cursor::new("one\r\n"));
        assert_eq!(source.next_line().unwrap().as_deref(), Some("one"));
    }

    #[test]
    fn final_unterminated_line_is_yielded() {
        let mut source = ReaderLineSource::new(Cursor::new("tail"));
        assert_eq!(source.next_line().unwrap().as_deref(), Some("tail"));
        assert_eq!(source.next_line().unwrap(), None);
    }
}
