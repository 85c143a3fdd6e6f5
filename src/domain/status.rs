//! Wet/Dry status classification
//!
//! Status is derived from the raw sample alone, not from the calibrated
//! percentage. A calibration change therefore never moves the Wet/Dry
//! boundary, and near the threshold a reading can show a high moisture bar
//! next to a "Dry" label.

use core::fmt;

use super::calibration::RawSample;

/// Binary moisture status
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Status {
    /// Raw sample below the dry threshold
    Wet,
    /// Raw sample at or above the dry threshold
    Dry,
}

impl Status {
    /// Display label
    pub const fn as_str(&self) -> &'static str {
        match self {
            Status::Wet => "Wet",
            Status::Dry => "Dry",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies raw samples against a fixed dry threshold
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusClassifier {
    dry_threshold: RawSample,
}

impl StatusClassifier {
    /// Threshold used by the Pico capacitive probe setup
    pub const DEFAULT_DRY_THRESHOLD: RawSample = 60000;

    pub const fn new(dry_threshold: RawSample) -> Self {
        Self { dry_threshold }
    }

    pub const fn dry_threshold(&self) -> RawSample {
        self.dry_threshold
    }

    /// `raw >= threshold` is Dry, anything below is Wet
    #[inline]
    pub const fn classify(&self, raw: RawSample) -> Status {
        if raw >= self.dry_threshold {
            Status::Dry
        } else {
            Status::Wet
        }
    }
}

impl Default for StatusClassifier {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DRY_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_threshold_boundary() {
        let classifier = StatusClassifier::default();
        assert_eq!(classifier.classify(59999), Status::Wet);
        assert_eq!(classifier.classify(60000), Status::Dry);
        assert_eq!(classifier.classify(65535), Status::Dry);
        assert_eq!(classifier.classify(0), Status::Wet);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Status::Wet.to_string(), "Wet");
        assert_eq!(Status::Dry.as_str(), "Dry");
    }

    proptest! {
        #[test]
        fn dry_iff_at_or_above_threshold(threshold in any::<u16>(), raw in any::<u16>()) {
            let status = StatusClassifier::new(threshold).classify(raw);
            prop_assert_eq!(status == Status::Dry, raw >= threshold);
        }
    }
}
