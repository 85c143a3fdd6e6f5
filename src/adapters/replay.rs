//! Replay transport adapter
//!
//! Feeds the dashboard from any buffered reader: a captured serial log, a
//! pipe, or an in-memory buffer in tests. Reads never wait, so the timeout is
//! ignored and pacing comes from the monitor's cycle delay. Invalid UTF-8 is
//! replaced rather than rejected, so garbled lines reach the decoder.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Duration;

use crate::ports::transport::{LineTransport, TransportError};

/// Line transport over a `BufRead`
pub struct ReplayTransport<R: BufRead> {
    reader: R,
    endpoint: String,
    buf: Vec<u8>,
}

impl ReplayTransport<BufReader<File>> {
    /// Replay a capture file
    pub fn open(path: impl AsRef<Path>) -> Result<Self, TransportError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| TransportError::Open {
            endpoint: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self::new(BufReader::new(file), path.display().to_string()))
    }
}

impl<R: BufRead> ReplayTransport<R> {
    pub fn new(reader: R, endpoint: impl Into<String>) -> Self {
        Self {
            reader,
            endpoint: endpoint.into(),
            buf: Vec::new(),
        }
    }
}

impl<'a> ReplayTransport<&'a [u8]> {
    /// Replay an in-memory capture
    pub fn from_bytes(bytes: &'a [u8]) -> Self {
        Self::new(bytes, "memory")
    }
}

impl<R: BufRead> LineTransport for ReplayTransport<R> {
    fn read_line(&mut self, _timeout: Duration) -> Result<Option<String>, TransportError> {
        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
            return Err(TransportError::Closed);
        }
        let line = String::from_utf8_lossy(&self.buf);
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
