//! USB CDC link adapter
//!
//! This adapter implements the RecordLink trait for USB CDC ACM
//! (serial over USB) communication.

use embassy_usb::class::cdc_acm::CdcAcmClass;
use embassy_usb::driver::EndpointError;

use crate::ports::link::{LinkError, RecordLink};
use crate::record::Record;

/// USB packet size (CDC ACM max for full speed)
pub const USB_PACKET_SIZE: usize = 64;

/// USB CDC record link
///
/// Writes each record as one newline-terminated text line.
pub struct UsbCdcLink<'a, D: embassy_usb::driver::Driver<'a>> {
    /// USB CDC ACM class instance
    class: CdcAcmClass<'a, D>,
}

impl<'a, D: embassy_usb::driver::Driver<'a>> UsbCdcLink<'a, D> {
    /// Create a new USB CDC link
    pub fn new(class: CdcAcmClass<'a, D>) -> Self {
        Self { class }
    }

    /// Send bytes over USB CDC in packet-sized chunks
    async fn send_bytes(&mut self, data: &[u8]) -> Result<(), LinkError> {
        for chunk in data.chunks(USB_PACKET_SIZE) {
            self.class.write_packet(chunk).await.map_err(|e| match e {
                EndpointError::Disabled => LinkError::Disconnected,
                EndpointError::BufferOverflow => LinkError::SendFailed,
            })?;
        }
        // A full last packet needs a zero-length packet to end the transfer
        if data.len() % USB_PACKET_SIZE == 0 {
            self.class
                .write_packet(&[])
                .await
                .map_err(|_| LinkError::SendFailed)?;
        }
        Ok(())
    }
}

impl<'a, D: embassy_usb::driver::Driver<'a>> RecordLink for UsbCdcLink<'a, D> {
    async fn wait_connection(&mut self) {
        self.class.wait_connection().await;
    }

    fn is_connected(&self) -> bool {
        self.class.dtr()
    }

    async fn send_record(&mut self, record: &Record) -> Result<(), LinkError> {
        let line = record.encode();
        self.send_bytes(line.as_bytes()).await
    }
}
