//! RP2350 Moisture Telemetry Library
//!
//! This library provides a hexagonal architecture for a capacitive soil
//! moisture probe on the RP2350 and the host dashboard that watches it.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Domain Layer                                 │
//! │  - CalibrationRange: raw sample -> percent                       │
//! │  - DepthLevel: percent -> depth 1..=6                            │
//! │  - StatusClassifier: raw sample -> Wet / Dry                     │
//! │  - SensorProfile: all three, producing a MoistureReading         │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Record (shared wire format)                  │
//! │  - "PERCENT,DEPTH,RAW\n" encode / tolerant decode                │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Ports (Traits)                               │
//! │  - SensorPort: read raw samples                                  │
//! │  - RecordLink: push records to the host                          │
//! │  - LineTransport: read lines on the host (std)                   │
//! │  - DisplaySurface: paint the dashboard (std)                     │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Adapters                                     │
//! │  - Rp2350MoistureSensor: ADC probe (embedded)                    │
//! │  - UsbCdcLink: USB CDC serial (embedded)                         │
//! │  - SerialTransport / ReplayTransport (std)                       │
//! │  - TerminalSurface: ANSI dashboard (std)                         │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The host side adds the [`dashboard`] view model and the [`monitor`] loop
//! that ties a transport to a surface.
//!
//! # Features
//!
//! - `std` (default): host transports, dashboard and monitor
//! - `embedded`: embassy-rp adapters for the sensor firmware

#![cfg_attr(not(feature = "std"), no_std)]

// ============================================================================
// Shared between host and device
// ============================================================================

/// Domain layer - pure business logic
pub mod domain;

pub mod record;

/// Ports - traits defining boundaries
pub mod ports;

pub use domain::{
    CalibrationError, CalibrationRange, DepthLevel, MoistureReading, RawSample, SensorProfile,
    Status, StatusClassifier,
};
pub use ports::{LinkError, RecordLink, SensorError, SensorPort};
pub use record::{DecodeError, Record};

// ============================================================================
// Adapters
// ============================================================================

/// Adapters - concrete implementations
#[cfg(any(feature = "std", feature = "embedded"))]
pub mod adapters;

#[cfg(feature = "embedded")]
pub use adapters::{Rp2350MoistureSensor, UsbCdcLink};

// ============================================================================
// Host
// ============================================================================

#[cfg(feature = "std")]
pub mod config;
#[cfg(feature = "std")]
pub mod dashboard;
#[cfg(feature = "std")]
pub mod monitor;

#[cfg(feature = "std")]
pub use adapters::{ReplayTransport, SerialTransport, TerminalSurface};
#[cfg(feature = "std")]
pub use dashboard::{Dashboard, DashboardConfig, DisplayState};
#[cfg(feature = "std")]
pub use monitor::{Cycle, Monitor, MonitorConfig, MonitorError, MonitorStats};
#[cfg(feature = "std")]
pub use ports::{DisplaySurface, LineTransport, TransportError};
