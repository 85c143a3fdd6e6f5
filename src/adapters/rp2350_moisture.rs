//! RP2350 moisture probe adapter
//!
//! This adapter implements the SensorPort trait for a capacitive moisture
//! probe wired to one of the RP2350's ADC-capable GPIOs (GP26..GP29).

use core::sync::atomic::{AtomicBool, AtomicU16, Ordering};
use embassy_rp::adc::{Adc, Blocking, Channel as AdcChannel};

use crate::domain::RawSample;
use crate::ports::sensor::{widen_12bit, SensorError, SensorPort};

/// RP2350 ADC moisture probe
///
/// The RP2350 ADC converts at 12 bits; samples are widened to the 16-bit
/// domain before they leave the adapter.
pub struct Rp2350MoistureSensor<'a> {
    /// ADC peripheral (blocking mode, one conversion per tick)
    adc: Adc<'a, Blocking>,
    /// Probe channel
    channel: AdcChannel<'a>,
    /// Last widened sample (for diagnostics)
    last_raw: AtomicU16,
    /// Whether `last_raw` holds a real sample
    has_sample: AtomicBool,
}

impl<'a> Rp2350MoistureSensor<'a> {
    /// Create a new probe adapter
    ///
    /// # Arguments
    ///
    /// * `adc` - ADC peripheral in blocking mode
    /// * `channel` - ADC channel of the probe pin, e.g.
    ///   `AdcChannel::new_pin(p.PIN_26, Pull::None)`
    pub fn new(adc: Adc<'a, Blocking>, channel: AdcChannel<'a>) -> Self {
        Self {
            adc,
            channel,
            last_raw: AtomicU16::new(0),
            has_sample: AtomicBool::new(false),
        }
    }
}

impl<'a> SensorPort for Rp2350MoistureSensor<'a> {
    async fn read_raw(&mut self) -> Result<RawSample, SensorError> {
        let sample = self
            .adc
            .blocking_read(&mut self.channel)
            .map_err(|_| SensorError::ReadFailed)?;

        let raw = widen_12bit(sample);
        self.last_raw.store(raw, Ordering::Relaxed);
        self.has_sample.store(true, Ordering::Relaxed);
        Ok(raw)
    }

    fn last_raw_value(&self) -> Option<RawSample> {
        self.has_sample
            .load(Ordering::Relaxed)
            .then(|| self.last_raw.load(Ordering::Relaxed))
    }
}
