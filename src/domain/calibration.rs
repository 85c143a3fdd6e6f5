//! Moisture calibration domain service
//!
//! This module converts raw ADC samples into a moisture percentage using the
//! sensor's calibrated wet/dry extremes.

use thiserror::Error;

/// A raw 16-bit ADC sample.
pub type RawSample = u16;

/// Error returned when a calibration range is not strictly increasing
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[error("invalid calibration range: min_raw {min_raw} must be below max_raw {max_raw}")]
pub struct CalibrationError {
    pub min_raw: RawSample,
    pub max_raw: RawSample,
}

/// Calibrated wet/dry extremes of a capacitive moisture probe
///
/// `min_raw` is the reading with the probe fully wet (100%), `max_raw` the
/// reading in dry air (0%). A higher raw reading means a drier probe:
///
/// `percent = (max_raw - raw) / (max_raw - min_raw) * 100`, clamped to 0..=100
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibrationRange {
    min_raw: RawSample,
    max_raw: RawSample,
}

impl CalibrationRange {
    /// Pico 2 with a v1.2 capacitive probe on GP26
    ///
    /// Observed values:
    /// - ~30000 with the probe submerged
    /// - 65535 (saturated) in dry air
    pub const PICO_CAPACITIVE: Self = Self {
        min_raw: 30000,
        max_raw: 65535,
    };

    /// Create a calibration range, rejecting `min_raw >= max_raw`
    pub const fn new(min_raw: RawSample, max_raw: RawSample) -> Result<Self, CalibrationError> {
        if min_raw < max_raw {
            Ok(Self { min_raw, max_raw })
        } else {
            Err(CalibrationError { min_raw, max_raw })
        }
    }

    /// Raw reading of a fully wet probe
    pub const fn min_raw(&self) -> RawSample {
        self.min_raw
    }

    /// Raw reading of a fully dry probe
    pub const fn max_raw(&self) -> RawSample {
        self.max_raw
    }

    /// Convert a raw sample to a moisture percentage in `0.0..=100.0`
    ///
    /// Samples outside the range are valid and clamp to 100 (below
    /// `min_raw`) or 0 (above `max_raw`).
    #[inline]
    pub fn percent(&self, raw: RawSample) -> f32 {
        let span = (self.max_raw - self.min_raw) as f32;
        let dryness = self.max_raw as f32 - raw as f32;
        (dryness / span * 100.0).clamp(0.0, 100.0)
    }
}

impl Default for CalibrationRange {
    fn default() -> Self {
        Self::PICO_CAPACITIVE
    }
}
