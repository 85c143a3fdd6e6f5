//! Link port - abstraction for sending records to the host
//!
//! This trait allows the sampling loop to publish records without knowing the
//! specific transport (USB CDC, UART, etc.)

use thiserror::Error;

use crate::record::Record;

/// Error type for link operations
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError {
    /// Host closed the connection
    #[error("link disconnected")]
    Disconnected,
    /// Failed to write the record
    #[error("failed to send record")]
    SendFailed,
}

/// Port for the sensor-to-host record stream
///
/// # Example Implementation
///
/// ```ignore
/// impl<'d, D: Driver<'d>> RecordLink for UsbCdcLink<'d, D> {
///     async fn wait_connection(&mut self) {
///         self.class.wait_connection().await;
///     }
///
///     fn is_connected(&self) -> bool {
///         self.class.dtr()
///     }
///
///     async fn send_record(&mut self, record: &Record) -> Result<(), LinkError> {
///         let line = record.encode();
///         self.class.write_packet(line.as_bytes()).await.map_err(|_| LinkError::SendFailed)
///     }
/// }
/// ```
pub trait RecordLink {
    /// Wait until a host is listening
    fn wait_connection(&mut self) -> impl core::future::Future<Output = ()>;

    /// Check if connected
    fn is_connected(&self) -> bool;

    /// Send one record as a newline-terminated line
    fn send_record(
        &mut self,
        record: &Record,
    ) -> impl core::future::Future<Output = Result<(), LinkError>>;
}
