//! Serial port transport adapter
//!
//! Implements [`LineTransport`] over a desktop serial port (USB CDC ACM on
//! the Pico shows up as `/dev/ttyACM*` or `COMx`).

use std::io::{self, Read};
use std::time::{Duration, Instant};

use log::{debug, info};
use serialport::SerialPort;

use super::framing::LineFramer;
use crate::ports::transport::{LineTransport, TransportError};

/// Default baud rate. CDC ACM ignores it, but UART bridges do not.
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

/// Read chunk size (one full-speed USB packet)
const READ_CHUNK: usize = 64;

/// Serial port transport
///
/// The port is opened by [`SerialTransport::open`] and closed when the
/// adapter is dropped.
pub struct SerialTransport {
    port: Box<dyn SerialPort>,
    endpoint: String,
    timeout: Duration,
    framer: LineFramer,
}

impl SerialTransport {
    /// Open a serial port
    pub fn open(port_name: &str, baud_rate: u32, timeout: Duration) -> Result<Self, TransportError> {
        // On Windows, COM ports >= 10 need the \\.\COMxx format
        #[cfg(target_os = "windows")]
        let port_name = if port_name.starts_with("COM") && !port_name.starts_with(r"\\") {
            format!(r"\\.\{}", port_name)
        } else {
            port_name.to_string()
        };
        #[cfg(not(target_os = "windows"))]
        let port_name = port_name.to_string();

        let mut port = serialport::new(&port_name, baud_rate)
            .timeout(timeout)
            .flow_control(serialport::FlowControl::None)
            .open()
            .map_err(|e| TransportError::Open {
                endpoint: port_name.clone(),
                reason: e.to_string(),
            })?;

        // Some CDC devices hold their output until DTR is asserted
        port.write_data_terminal_ready(true)
            .map_err(|e| TransportError::Open {
                endpoint: port_name.clone(),
                reason: e.to_string(),
            })?;

        info!("opened {} at {} baud", port_name, baud_rate);

        Ok(Self {
            port,
            endpoint: port_name,
            timeout,
            framer: LineFramer::new(),
        })
    }

    fn apply_timeout(&mut self, timeout: Duration) -> Result<(), TransportError> {
        if timeout != self.timeout {
            self.port
                .set_timeout(timeout)
                .map_err(|e| TransportError::Io(e.into()))?;
            self.timeout = timeout;
        }
        Ok(())
    }
}

impl LineTransport for SerialTransport {
    fn read_line(&mut self, timeout: Duration) -> Result<Option<String>, TransportError> {
        if let Some(line) = self.framer.next_line() {
            return Ok(Some(line));
        }
        let deadline = Instant::now() + timeout;
        let mut chunk = [0u8; READ_CHUNK];
        loop {
            // Bytes trickling in without a newline must not extend the wait
            let Some(budget) = read_budget(deadline, Instant::now()) else {
                return Ok(self.framer.take_partial());
            };
            self.apply_timeout(budget)?;

            match self.port.read(&mut chunk) {
                Ok(0) => return Err(TransportError::Closed),
                Ok(n) => {
                    self.framer.extend(&chunk[..n]);
                    if let Some(line) = self.framer.next_line() {
                        return Ok(Some(line));
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::TimedOut => {
                    if self.framer.pending_len() > 0 {
                        debug!("read timeout with {} bytes pending", self.framer.pending_len());
                    }
                    return Ok(self.framer.take_partial());
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(TransportError::Io(e)),
            }
        }
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn close(&mut self) -> Result<(), TransportError> {
        self.port
            .write_data_terminal_ready(false)
            .map_err(|e| TransportError::Io(e.into()))
    }
}

/// Port timeout for the next read, `None` once the deadline has passed
fn read_budget(deadline: Instant, now: Instant) -> Option<Duration> {
    let remaining = deadline.saturating_duration_since(now);
    (!remaining.is_zero()).then_some(remaining)
}
