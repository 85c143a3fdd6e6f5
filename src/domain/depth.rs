//! Depth level quantization
//!
//! The moisture percentage is split into six equal-width bands. Level 6 means
//! the probe reads fully saturated, which in practice signals that it has
//! been pushed in past its marked line or is sitting in standing water.

/// Discretized moisture level in `1..=6`
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DepthLevel(u8);

impl DepthLevel {
    /// Lowest level (driest band)
    pub const MIN: DepthLevel = DepthLevel(1);

    /// Highest level, also the alert level
    pub const MAX: DepthLevel = DepthLevel(6);

    /// Number of bands
    pub const LEVELS: u8 = 6;

    /// Width of one band in percent
    pub const BAND_WIDTH: f32 = 100.0 / Self::LEVELS as f32;

    /// Create a depth level, returning `None` outside `1..=6`
    pub const fn new(level: u8) -> Option<Self> {
        if level >= Self::MIN.0 && level <= Self::MAX.0 {
            Some(Self(level))
        } else {
            None
        }
    }

    /// Quantize a moisture percentage
    ///
    /// `floor(percent / (100 / 6)) + 1`, clamped to 6 so that 100% does not
    /// land in a seventh band. NaN and negative inputs map to level 1.
    pub fn from_percent(percent: f32) -> Self {
        if !(percent > 0.0) {
            return Self::MIN;
        }
        // Truncation equals floor for non-negative values.
        let band = (percent / Self::BAND_WIDTH) as u32;
        Self(band.saturating_add(1).min(Self::LEVELS as u32) as u8)
    }

    /// Get the raw level value
    pub const fn value(&self) -> u8 {
        self.0
    }

    /// True for the highest band
    pub const fn is_max(&self) -> bool {
        self.0 == Self::MAX.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_band_edges() {
        assert_eq!(DepthLevel::from_percent(0.0).value(), 1);
        assert_eq!(DepthLevel::from_percent(16.0).value(), 1);
        assert_eq!(DepthLevel::from_percent(17.0).value(), 2);
        assert_eq!(DepthLevel::from_percent(43.72).value(), 3);
        assert_eq!(DepthLevel::from_percent(50.5).value(), 4);
        assert_eq!(DepthLevel::from_percent(83.4).value(), 6);
        assert_eq!(DepthLevel::from_percent(99.99).value(), 6);
    }

    #[test]
    fn test_full_saturation_stays_at_six() {
        assert_eq!(DepthLevel::from_percent(100.0), DepthLevel::MAX);
        assert!(DepthLevel::from_percent(100.0).is_max());
        assert_eq!(DepthLevel::from_percent(250.0), DepthLevel::MAX);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(DepthLevel::from_percent(f32::NAN), DepthLevel::MIN);
        assert_eq!(DepthLevel::from_percent(-3.0), DepthLevel::MIN);
    }

    #[test]
    fn test_new_validates_range() {
        assert_eq!(DepthLevel::new(0), None);
        assert_eq!(DepthLevel::new(7), None);
        assert_eq!(DepthLevel::new(6), Some(DepthLevel::MAX));
        assert_eq!(DepthLevel::new(1), Some(DepthLevel::MIN));
    }

    proptest! {
        #[test]
        fn level_is_in_range_and_non_decreasing(a in 0.0f32..=100.0, b in 0.0f32..=100.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let (d_lo, d_hi) = (DepthLevel::from_percent(lo), DepthLevel::from_percent(hi));
            prop_assert!((1..=6).contains(&d_lo.value()));
            prop_assert!((1..=6).contains(&d_hi.value()));
            prop_assert!(d_lo <= d_hi);
        }
    }
}
