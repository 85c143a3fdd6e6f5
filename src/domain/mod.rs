//! Domain layer - pure moisture logic independent of infrastructure
//!
//! This module contains the calibration, quantization and classification
//! rules shared by the sensor firmware and the host dashboard.

pub mod calibration;
pub mod depth;
pub mod profile;
pub mod reading;
pub mod status;

pub use calibration::{CalibrationError, CalibrationRange, RawSample};
pub use depth::DepthLevel;
pub use profile::SensorProfile;
pub use reading::MoistureReading;
pub use status::{Status, StatusClassifier};
