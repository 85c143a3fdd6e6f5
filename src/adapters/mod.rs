//! Adapters - concrete implementations of ports
//!
//! Adapters connect the domain to the outside world by implementing
//! the port traits. Each adapter knows how to work with a specific
//! technology or hardware.
//!
//! # Available Adapters
//!
//! Sensor side (`embedded`):
//!
//! - **rp2350_moisture**: capacitive probe on an RP2350 ADC pin
//! - **usb_cdc**: USB CDC serial record link
//!
//! Host side (`std`):
//!
//! - **serial**: desktop serial port via `serialport`
//! - **replay**: captured logs or any buffered reader
//! - **terminal**: ANSI terminal dashboard via `colored`

#[cfg(feature = "embedded")]
pub mod rp2350_moisture;
#[cfg(feature = "embedded")]
pub mod usb_cdc;

#[cfg(feature = "std")]
pub mod framing;
#[cfg(feature = "std")]
pub mod replay;
#[cfg(feature = "std")]
pub mod serial;
#[cfg(feature = "std")]
pub mod terminal;

#[cfg(feature = "embedded")]
pub use rp2350_moisture::Rp2350MoistureSensor;
#[cfg(feature = "embedded")]
pub use usb_cdc::UsbCdcLink;

#[cfg(feature = "std")]
pub use replay::ReplayTransport;
#[cfg(feature = "std")]
pub use serial::SerialTransport;
#[cfg(feature = "std")]
pub use terminal::TerminalSurface;
