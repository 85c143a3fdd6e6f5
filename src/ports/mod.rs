//! Ports (interfaces) defining the boundaries of the application
//!
//! Ports are traits that define how the domain interacts with external systems.
//! They allow the domain to remain independent of specific implementations.
//!
//! # Hexagonal Architecture
//!
//! Sensor side:
//!
//! - **SensorPort**: How we sample the probe (RP2350 ADC, mock)
//! - **RecordLink**: How we publish records (USB CDC, UART)
//!
//! Host side (`std`):
//!
//! - **LineTransport**: How we receive lines (serial port, capture replay)
//! - **DisplaySurface**: How we show the dashboard (terminal, recorder)

pub mod link;
pub mod sensor;

#[cfg(feature = "std")]
pub mod surface;
#[cfg(feature = "std")]
pub mod transport;

pub use link::{LinkError, RecordLink};
pub use sensor::{widen_12bit, SensorError, SensorPort};

#[cfg(feature = "std")]
pub use surface::DisplaySurface;
#[cfg(feature = "std")]
pub use transport::{LineTransport, TransportError};
