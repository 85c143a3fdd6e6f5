//! Moisture reading domain entity
//!
//! This module defines the sensor-side view of one sampling instant. It has
//! no knowledge of how readings are encoded or transmitted.

use core::fmt;

use super::calibration::RawSample;
use super::depth::DepthLevel;
use super::status::Status;

/// A fully evaluated moisture sample.
///
/// `percent` and `depth` come from the calibration range, `status` from the
/// raw threshold. The two derivations are independent and may disagree near
/// the Wet/Dry boundary.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MoistureReading {
    /// Raw 16-bit ADC sample
    pub raw: RawSample,
    /// Calibrated moisture in percent (0.0..=100.0)
    pub percent: f32,
    /// Quantized depth level
    pub depth: DepthLevel,
    /// Raw-threshold status
    pub status: Status,
}

impl MoistureReading {
    pub const fn new(raw: RawSample, percent: f32, depth: DepthLevel, status: Status) -> Self {
        Self {
            raw,
            percent,
            depth,
            status,
        }
    }

    /// Human-readable summary for logs
    ///
    /// Formats as `Wet | Moisture: 43.72% | Depth: 3/6`.
    pub fn summary(&self) -> Summary<'_> {
        Summary(self)
    }
}

/// Display adapter returned by [`MoistureReading::summary`]
pub struct Summary<'a>(&'a MoistureReading);

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | Moisture: {:.2}% | Depth: {}/{}",
            self.0.status,
            self.0.percent,
            self.0.depth.value(),
            DepthLevel::LEVELS
        )
    }
}
