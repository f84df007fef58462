//! Incremental accumulation of an ident reply line.
//!
//! [`ReplyBuffer`] is fed whatever chunks the transport hands back and reports
//! when the CR LF terminator has arrived. Only the newly appended bytes (plus
//! the last previously scanned byte, in case it was a CR) are searched on each
//! push, so a peer trickling one byte at a time costs linear work overall.

use memchr::memmem;

use crate::error::ResponseLengthExceeded;
use crate::tables::{ABORT_THRESHOLD, EOL};

/// Outcome of feeding a chunk into a [`ReplyBuffer`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ReplyProgress {
    /// No terminator yet; keep reading.
    NeedMore,
    /// The reply line, without its terminator. Bytes after the terminator are
    /// dropped because a connection carries exactly one reply.
    Complete(Vec<u8>),
}

/// Accumulates reply bytes until the line terminator is seen.
#[derive(Clone, Debug)]
pub struct ReplyBuffer {
    buffered: Vec<u8>,
    scanned: usize,
    limit: Option<usize>,
}

impl ReplyBuffer {
    /// Creates a buffer that aborts after [`ABORT_THRESHOLD`] unterminated bytes.
    #[must_use]
    pub fn new() -> Self {
        Self::with_limit(Some(ABORT_THRESHOLD))
    }

    /// Creates a buffer that aborts at [`ABORT_THRESHOLD`] only when `abort` is set.
    #[must_use]
    pub fn with_abort(abort: bool) -> Self {
        Self::with_limit(abort.then_some(ABORT_THRESHOLD))
    }

    /// Creates a buffer with an explicit abort threshold, or none at all.
    #[must_use]
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            buffered: Vec::new(),
            scanned: 0,
            limit,
        }
    }

    /// The abort threshold in effect.
    #[must_use]
    pub const fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Number of bytes buffered so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffered.len()
    }

    /// Reports whether nothing has been buffered yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffered.is_empty()
    }

    /// Bytes buffered so far.
    #[must_use]
    pub fn buffered(&self) -> &[u8] {
        &self.buffered
    }

    /// Appends `chunk` and checks for the terminator.
    ///
    /// The terminator is a CR immediately followed by LF; a lone CR or LF is
    /// ordinary data. When no terminator is present and the buffered length
    /// exceeds the threshold, [`ResponseLengthExceeded`] is returned and the
    /// caller is expected to drop the connection. After
    /// [`ReplyProgress::Complete`] the buffer is empty again.
    pub fn push(&mut self, chunk: &[u8]) -> Result<ReplyProgress, ResponseLengthExceeded> {
        self.buffered.extend_from_slice(chunk);

        let start = self.scanned.saturating_sub(1);
        if let Some(offset) = memmem::find(&self.buffered[start..], EOL) {
            let mut line = std::mem::take(&mut self.buffered);
            line.truncate(start + offset);
            self.scanned = 0;
            return Ok(ReplyProgress::Complete(line));
        }
        self.scanned = self.buffered.len();

        match self.limit {
            Some(limit) if self.buffered.len() > limit => Err(ResponseLengthExceeded {
                length: self.buffered.len(),
                limit,
            }),
            _ => Ok(ReplyProgress::NeedMore),
        }
    }
}

impl Default for ReplyBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete(progress: ReplyProgress) -> Vec<u8> {
        match progress {
            ReplyProgress::Complete(line) => line,
            ReplyProgress::NeedMore => panic!("expected a complete line"),
        }
    }

    #[test]
    fn single_chunk_with_terminator_completes() {
        let mut buffer = ReplyBuffer::new();
        let line = complete(buffer.push(b"6195, 23 : ERROR : NO-USER\r\n").expect("push"));
        assert_eq!(line, b"6195, 23 : ERROR : NO-USER");
        assert!(buffer.is_empty());
    }

    #[test]
    fn terminator_split_across_chunks_is_found() {
        let mut buffer = ReplyBuffer::new();
        assert_eq!(buffer.push(b"1,2:ERROR:NO-USER\r"), Ok(ReplyProgress::NeedMore));
        let line = complete(buffer.push(b"\n").expect("push"));
        assert_eq!(line, b"1,2:ERROR:NO-USER");
    }

    #[test]
    fn byte_at_a_time_accumulates() {
        let mut buffer = ReplyBuffer::new();
        let input = b"1,2:USERID:UNIX:bob\r\n";
        for byte in &input[..input.len() - 1] {
            assert_eq!(
                buffer.push(std::slice::from_ref(byte)),
                Ok(ReplyProgress::NeedMore)
            );
        }
        let line = complete(buffer.push(b"\n").expect("push"));
        assert_eq!(line, b"1,2:USERID:UNIX:bob");
    }

    #[test]
    fn lone_carriage_return_or_line_feed_is_data() {
        let mut buffer = ReplyBuffer::new();
        assert_eq!(buffer.push(b"a\rb\nc"), Ok(ReplyProgress::NeedMore));
        assert_eq!(buffer.push(b"\n\r"), Ok(ReplyProgress::NeedMore));
        assert_eq!(buffer.push(b"x"), Ok(ReplyProgress::NeedMore));
        let line = complete(buffer.push(b"\r\n").expect("push"));
        assert_eq!(line, b"a\rb\nc\n\rx");
    }

    #[test]
    fn bytes_after_terminator_are_discarded() {
        let mut buffer = ReplyBuffer::new();
        let line = complete(buffer.push(b"1,2:ERROR:NO-USER\r\ntrailing junk\r\n").expect("push"));
        assert_eq!(line, b"1,2:ERROR:NO-USER");
    }

    #[test]
    fn empty_chunk_needs_more() {
        let mut buffer = ReplyBuffer::new();
        assert_eq!(buffer.push(b""), Ok(ReplyProgress::NeedMore));
    }

    #[test]
    fn threshold_is_exclusive() {
        let mut buffer = ReplyBuffer::new();
        assert_eq!(buffer.push(&[b'a'; 1000]), Ok(ReplyProgress::NeedMore));
        assert_eq!(buffer.len(), 1000);

        let err = buffer.push(b"a").unwrap_err();
        assert_eq!(
            err,
            ResponseLengthExceeded {
                length: 1001,
                limit: 1000,
            }
        );
    }

    #[test]
    fn terminated_reply_beyond_threshold_still_completes() {
        let mut buffer = ReplyBuffer::new();
        let mut chunk = vec![b'a'; 1200];
        chunk.extend_from_slice(b"\r\n");
        let line = complete(buffer.push(&chunk).expect("push"));
        assert_eq!(line.len(), 1200);
    }

    #[test]
    fn disabled_abort_keeps_buffering() {
        let mut buffer = ReplyBuffer::with_abort(false);
        assert_eq!(buffer.limit(), None);
        for _ in 0..10 {
            assert_eq!(buffer.push(&[b'a'; 256]), Ok(ReplyProgress::NeedMore));
        }
        assert_eq!(buffer.len(), 2560);
        let line = complete(buffer.push(b"\r\n").expect("push"));
        assert_eq!(line.len(), 2560);
    }

    #[test]
    fn custom_limit_is_honoured() {
        let mut buffer = ReplyBuffer::with_limit(Some(4));
        assert_eq!(buffer.push(b"abcd"), Ok(ReplyProgress::NeedMore));
        assert!(buffer.push(b"e").is_err());
    }
}
