//! Transport port - abstraction for the host end of the telemetry stream
//!
//! The monitor reads newline-framed lines through this trait and never knows
//! whether they come from a serial port, a USB-host bridge or a capture file.
//! Opening is the adapter's constructor; dropping an adapter releases it.

use std::io;
use std::time::Duration;

use thiserror::Error;

/// Error type for transport operations
#[derive(Debug, Error)]
pub enum TransportError {
    /// The endpoint could not be opened
    #[error("cannot open {endpoint}: {reason}")]
    Open { endpoint: String, reason: String },

    /// Read or write failure on an open link
    #[error("link I/O error: {0}")]
    Io(#[from] io::Error),

    /// The stream reached its end (device gone or capture exhausted)
    #[error("stream closed")]
    Closed,
}

/// Port for reading telemetry lines on the host
pub trait LineTransport {
    /// Read one line, waiting at most about `timeout`
    ///
    /// - `Ok(Some(line))`: a line without its terminator. A partial line
    ///   that was pending when the timeout expired is returned as-is.
    /// - `Ok(None)`: nothing arrived before the timeout.
    /// - `Err(TransportError::Closed)`: the stream ended.
    fn read_line(&mut self, timeout: Duration) -> Result<Option<String>, TransportError>;

    /// Human-readable endpoint name for messages
    fn endpoint(&self) -> &str;

    /// Release the endpoint explicitly
    ///
    /// Dropping the adapter has the same effect; this hook exists so errors
    /// on close can be reported.
    fn close(&mut self) -> Result<(), TransportError> {
        Ok(())
    }
}

impl<T: LineTransport + ?Sized> LineTransport for Box<T> {
    fn read_line(&mut self, timeout: Duration) -> Result<Option<String>, TransportError> {
        (**self).read_line(timeout)
    }

    fn endpoint(&self) -> &str {
        (**self).endpoint()
    }

    fn close(&mut self) -> Result<(), TransportError> {
        (**self).close()
    }
}
