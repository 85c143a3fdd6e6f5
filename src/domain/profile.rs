//! Sensor profile
//!
//! Bundles the calibration range and the status classifier of one probe so
//! the sampling loop turns a raw sample into a reading in a single call.

use super::calibration::{CalibrationRange, RawSample};
use super::depth::DepthLevel;
use super::reading::MoistureReading;
use super::status::StatusClassifier;

/// Calibration and classification parameters of a moisture probe
///
/// Built once at startup and passed to whoever evaluates samples.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorProfile {
    pub calibration: CalibrationRange,
    pub classifier: StatusClassifier,
}

impl SensorProfile {
    pub const fn new(calibration: CalibrationRange, classifier: StatusClassifier) -> Self {
        Self {
            calibration,
            classifier,
        }
    }

    /// Run calibrator, quantizer and classifier over one raw sample
    pub fn evaluate(&self, raw: RawSample) -> MoistureReading {
        let percent = self.calibration.percent(raw);
        MoistureReading::new(
            raw,
            percent,
            DepthLevel::from_percent(percent),
            self.classifier.classify(raw),
        )
    }
}
