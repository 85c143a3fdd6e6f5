//! Newline framing for byte-stream transports

/// Frames longer than this without a newline are flushed as a line
pub const MAX_FRAME_LEN: usize = 256;

/// Accumulates received bytes and splits them into lines
///
/// Bytes are kept across reads, so a record split over several USB packets
/// is reassembled. Invalid UTF-8 is replaced rather than rejected; the
/// decoder reports such lines as malformed.
#[derive(Debug, Default)]
pub struct LineFramer {
    pending: Vec<u8>,
}

impl LineFramer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append received bytes
    pub fn extend(&mut self, bytes: &[u8]) {
        self.pending.extend_from_slice(bytes);
    }

    /// Take the next complete line, without its `\n` or `\r\n`
    pub fn next_line(&mut self) -> Option<String> {
        match self.pending.iter().position(|&b| b == b'\n') {
            Some(end) => {
                let mut line: Vec<u8> = self.pending.drain(..=end).collect();
                line.pop();
                if line.last() == Some(&b'\r') {
                    line.pop();
                }
                Some(to_text(&line))
            }
            None if self.pending.len() >= MAX_FRAME_LEN => {
                let line: Vec<u8> = self.pending.drain(..MAX_FRAME_LEN).collect();
                Some(to_text(&line))
            }
            None => None,
        }
    }

    /// Take whatever is buffered as a (partial) line
    pub fn take_partial(&mut self) -> Option<String> {
        if self.pending.is_empty() {
            None
        } else {
            let line = to_text(&self.pending);
            self.pending.clear();
            Some(line)
        }
    }

    /// Number of buffered bytes
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

fn to_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_across_reads() {
        let mut framer = LineFramer::new();
        framer.extend(b"43.7");
        assert_eq!(framer.next_line(), None);
        framer.extend(b"2,3,50000\r\n0.00,1,");
        assert_eq!(framer.next_line().as_deref(), Some("43.72,3,50000"));
        assert_eq!(framer.next_line(), None);
        assert_eq!(framer.pending_len(), 7);
        framer.extend(b"65535\n");
        assert_eq!(framer.next_line().as_deref(), Some("0.00,1,65535"));
    }

    #[test]
    fn test_multiple_lines_in_one_read() {
        let mut framer = LineFramer::new();
        framer.extend(b"a\n\nb\n");
        assert_eq!(framer.next_line().as_deref(), Some("a"));
        assert_eq!(framer.next_line().as_deref(), Some(""));
        assert_eq!(framer.next_line().as_deref(), Some("b"));
        assert_eq!(framer.next_line(), None);
    }

    #[test]
    fn test_take_partial() {
        let mut framer = LineFramer::new();
        assert_eq!(framer.take_partial(), None);
        framer.extend(b"12.3");
        assert_eq!(framer.take_partial().as_deref(), Some("12.3"));
        assert_eq!(framer.pending_len(), 0);
    }

    #[test]
    fn test_oversized_frame_is_flushed() {
        let mut framer = LineFramer::new();
        framer.extend(&[b'9'; MAX_FRAME_LEN + 10]);
        let line = framer.next_line().unwrap();
        assert_eq!(line.len(), MAX_FRAME_LEN);
        assert_eq!(framer.pending_len(), 10);
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let mut framer = LineFramer::new();
        framer.extend(&[0xff, b'1', b'\n']);
        assert_eq!(framer.next_line().as_deref(), Some("\u{fffd}1"));
    }
}
