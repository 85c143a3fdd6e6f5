//! Sensor port - abstraction for sampling the moisture probe
//!
//! This trait allows the sampling loop to read raw ADC values without knowing
//! the specific hardware implementation (RP2350 ADC, external ADC, mock, etc.)

use thiserror::Error;

use crate::domain::RawSample;

/// Error type for sensor operations
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Failed to read from the ADC
    #[error("ADC read failed")]
    ReadFailed,
    /// Sensor not initialized
    #[error("sensor not initialized")]
    NotInitialized,
    /// Timeout waiting for a conversion
    #[error("timed out waiting for ADC conversion")]
    Timeout,
}

/// Port for sampling a moisture probe
///
/// Implementations return the full 16-bit sample domain. Converters with a
/// narrower resolution must scale up (see [`widen_12bit`]).
///
/// # Example Implementation
///
/// ```ignore
/// struct Rp2350MoistureSensor<'a> {
///     adc: Adc<'a, Blocking>,
///     channel: AdcChannel<'a>,
/// }
///
/// impl SensorPort for Rp2350MoistureSensor<'_> {
///     async fn read_raw(&mut self) -> Result<RawSample, SensorError> {
///         let sample = self.adc.blocking_read(&mut self.channel)
///             .map_err(|_| SensorError::ReadFailed)?;
///         Ok(widen_12bit(sample))
///     }
/// }
/// ```
pub trait SensorPort {
    /// Take one raw sample
    fn read_raw(&mut self) -> impl core::future::Future<Output = Result<RawSample, SensorError>>;

    /// Get the last raw value (for diagnostics)
    ///
    /// Returns `None` before the first successful read or if the sensor
    /// doesn't track it.
    fn last_raw_value(&self) -> Option<RawSample> {
        None
    }
}

/// Scale a 12-bit conversion to the 16-bit sample domain
///
/// Replicates the top nibble into the low bits so that 0 maps to 0 and 4095
/// maps to 65535.
#[inline]
pub const fn widen_12bit(sample: u16) -> RawSample {
    let sample = sample & 0x0fff;
    (sample << 4) | (sample >> 8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widen_12bit_endpoints() {
        assert_eq!(widen_12bit(0), 0);
        assert_eq!(widen_12bit(0x0fff), u16::MAX);
    }

    #[test]
    fn test_widen_12bit_is_monotonic() {
        let mut previous = 0;
        for sample in 1..=0x0fff {
            let widened = widen_12bit(sample);
            assert!(widened > previous);
            previous = widened;
        }
    }

    #[test]
    fn test_widen_12bit_ignores_upper_bits() {
        assert_eq!(widen_12bit(0xf123), widen_12bit(0x0123));
        assert_eq!(widen_12bit(0x0800), 0x8008);
    }
}
