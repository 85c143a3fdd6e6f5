//! Shared wire record for sensor-to-host telemetry
//!
//! This module defines the line format used between the RP2350 firmware and
//! the host dashboard. One record is sent per sampling tick:
//!
//! ```text
//! <percent, 2 decimals>,<depth 1-6>,<raw 0-65535>\n
//! 82.35,6,32100
//! ```
//!
//! Framing is purely newline-delimited text. There is no header and no
//! checksum, so the decoder treats every line as untrusted.

use core::fmt::{self, Write};
use core::num::{ParseFloatError, ParseIntError};
use core::str::FromStr;

use thiserror::Error;

use crate::domain::{DepthLevel, MoistureReading, RawSample};

/// Separator between record fields
pub const FIELD_DELIMITER: char = ',';

/// Number of fields in a record
pub const FIELD_COUNT: usize = 3;

/// Capacity of an encoded line. The longest record, `100.00,6,65535\n`, is
/// 15 bytes.
pub const MAX_RECORD_LEN: usize = 24;

/// Encoded record line including the trailing newline
pub type RecordLine = heapless::String<MAX_RECORD_LEN>;

// ============================================================================
// Decode Errors
// ============================================================================

/// Reasons a line is rejected by [`Record::decode`]
#[derive(Clone, Debug, PartialEq, Error)]
pub enum DecodeError {
    /// Blank line, typically a read timeout with no data
    #[error("empty line")]
    Empty,

    /// Wrong number of comma-separated fields
    #[error("expected {FIELD_COUNT} fields, found {found}")]
    FieldCount { found: usize },

    /// Percent field is not a number
    #[error("invalid percent field: {0}")]
    Percent(#[source] ParseFloatError),

    /// Percent parsed but lies outside 0..=100 (or is not finite)
    #[error("percent {0} outside 0..=100")]
    PercentOutOfRange(f32),

    /// Depth field is not an integer
    #[error("invalid depth field: {0}")]
    Depth(#[source] ParseIntError),

    /// Depth parsed but lies outside 1..=6
    #[error("depth {0} outside 1..=6")]
    DepthOutOfRange(i64),

    /// Raw field is not an integer in 0..=65535
    #[error("invalid raw sample field: {0}")]
    Raw(#[source] ParseIntError),
}

impl DecodeError {
    /// True for errors worth reporting to the operator
    ///
    /// Empty lines are expected whenever the sensor is idle.
    pub fn is_reportable(&self) -> bool {
        !matches!(self, DecodeError::Empty)
    }
}

// ============================================================================
// Record
// ============================================================================

/// One telemetry record as carried on the wire
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Record {
    percent: f32,
    depth: DepthLevel,
    raw: RawSample,
}

impl Record {
    /// Create a record
    ///
    /// `percent` is clamped to 0..=100 and NaN becomes 0, so every record
    /// encodes to a well-formed line.
    pub fn new(percent: f32, depth: DepthLevel, raw: RawSample) -> Self {
        let percent = if percent.is_nan() {
            0.0
        } else {
            positive_zero(percent.clamp(0.0, 100.0))
        };
        Self {
            percent,
            depth,
            raw,
        }
    }

    /// Moisture percentage
    pub fn percent(&self) -> f32 {
        self.percent
    }

    /// Depth level
    pub fn depth(&self) -> DepthLevel {
        self.depth
    }

    /// Raw ADC sample
    pub fn raw(&self) -> RawSample {
        self.raw
    }

    /// Write the record followed by a newline into any text sink
    pub fn write_line<W: Write>(&self, out: &mut W) -> fmt::Result {
        writeln!(out, "{}", self)
    }

    /// Encode into a fixed-capacity line, newline included
    pub fn encode(&self) -> RecordLine {
        let mut line = RecordLine::new();
        // Cannot overflow: percent is clamped, so the line is at most 15 bytes.
        let _ = self.write_line(&mut line);
        line
    }

    /// Parse one received line
    ///
    /// Surrounding whitespace (including `\r\n`) is ignored, as is whitespace
    /// around each field. Any failure rejects the whole line; no partial
    /// record is ever produced.
    pub fn decode(line: &str) -> Result<Self, DecodeError> {
        let line = line.trim();
        if line.is_empty() {
            return Err(DecodeError::Empty);
        }

        let mut fields = line.split(FIELD_DELIMITER);
        let (Some(percent), Some(depth), Some(raw), None) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            return Err(DecodeError::FieldCount {
                found: line.split(FIELD_DELIMITER).count(),
            });
        };

        let percent = f32::from_str(percent.trim()).map_err(DecodeError::Percent)?;
        if !(0.0..=100.0).contains(&percent) {
            return Err(DecodeError::PercentOutOfRange(percent));
        }

        let depth_value = i64::from_str(depth.trim()).map_err(DecodeError::Depth)?;
        let depth = u8::try_from(depth_value)
            .ok()
            .and_then(DepthLevel::new)
            .ok_or(DecodeError::DepthOutOfRange(depth_value))?;

        let raw = RawSample::from_str(raw.trim()).map_err(DecodeError::Raw)?;

        Ok(Self {
            percent: positive_zero(percent),
            depth,
            raw,
        })
    }
}

/// Map `-0.0` to `0.0`; `{:.2}` would print it as `-0.00`
#[inline]
fn positive_zero(percent: f32) -> f32 {
    percent + 0.0
}

impl From<MoistureReading> for Record {
    fn from(reading: MoistureReading) -> Self {
        Self::new(reading.percent, reading.depth, reading.raw)
    }
}

impl From<&MoistureReading> for Record {
    fn from(reading: &MoistureReading) -> Self {
        Self::from(*reading)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.2}{}{}{}{}",
            self.percent,
            FIELD_DELIMITER,
            self.depth.value(),
            FIELD_DELIMITER,
            self.raw
        )
    }
}

impl FromStr for Record {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SensorProfile;
    use proptest::prelude::*;

    fn depth(level: u8) -> DepthLevel {
        DepthLevel::new(level).unwrap()
    }

    #[test]
    fn test_encode_format() {
        let record = Record::new(82.35, depth(6), 32100);
        assert_eq!(record.encode().as_str(), "82.35,6,32100\n");
        assert_eq!(record.to_string(), "82.35,6,32100");
    }

    #[test]
    fn test_encode_longest_record_fits() {
        let record = Record::new(100.0, DepthLevel::MAX, u16::MAX);
        assert_eq!(record.encode().as_str(), "100.00,6,65535\n");
    }

    #[test]
    fn test_new_clamps_percent() {
        assert_eq!(Record::new(180.0, depth(6), 1).percent(), 100.0);
        assert_eq!(Record::new(-2.0, depth(1), 1).percent(), 0.0);
        assert_eq!(Record::new(f32::NAN, depth(1), 1).percent(), 0.0);
        assert_eq!(
            Record::new(f32::INFINITY, depth(6), 1).encode().as_str(),
            "100.00,6,1\n"
        );
    }

    #[test]
    fn test_negative_zero_encodes_unsigned() {
        let record = Record::new(-0.0, depth(1), 65535);
        assert!(record.percent().is_sign_positive());
        assert_eq!(record.encode().as_str(), "0.00,1,65535\n");

        let decoded = Record::decode("-0.00,1,65535").unwrap();
        assert!(decoded.percent().is_sign_positive());
        assert_eq!(decoded.to_string(), "0.00,1,65535");
    }

    #[test]
    fn test_decode_valid() {
        let record = Record::decode("82.35,6,32100\r\n").unwrap();
        assert_eq!(record.percent(), 82.35);
        assert_eq!(record.depth(), depth(6));
        assert_eq!(record.raw(), 32100);
    }

    #[test]
    fn test_decode_tolerates_field_whitespace() {
        let record: Record = "  43.72 , 3 ,50000 ".parse().unwrap();
        assert_eq!(record, Record::new(43.72, depth(3), 50000));
    }

    #[test]
    fn test_decode_malformed_lines() {
        assert_eq!(Record::decode(""), Err(DecodeError::Empty));
        assert_eq!(Record::decode("   \r\n"), Err(DecodeError::Empty));
        assert_eq!(
            Record::decode("1,2"),
            Err(DecodeError::FieldCount { found: 2 })
        );
        assert_eq!(
            Record::decode("1,2,3,4"),
            Err(DecodeError::FieldCount { found: 4 })
        );
        assert!(matches!(
            Record::decode("a,b,c"),
            Err(DecodeError::Percent(_))
        ));
        assert!(matches!(
            Record::decode("50.0,x,100"),
            Err(DecodeError::Depth(_))
        ));
        assert!(matches!(
            Record::decode("50.0,3,-1"),
            Err(DecodeError::Raw(_))
        ));
        assert!(matches!(
            Record::decode("50.0,3,65536"),
            Err(DecodeError::Raw(_))
        ));
        assert!(matches!(
            Record::decode("50.0,3,"),
            Err(DecodeError::Raw(_))
        ));
    }

    #[test]
    fn test_decode_rejects_out_of_domain_values() {
        assert_eq!(
            Record::decode("100.01,6,1"),
            Err(DecodeError::PercentOutOfRange(100.01))
        );
        assert!(matches!(
            Record::decode("NaN,6,1"),
            Err(DecodeError::PercentOutOfRange(_))
        ));
        assert!(matches!(
            Record::decode("inf,6,1"),
            Err(DecodeError::PercentOutOfRange(_))
        ));
        assert_eq!(
            Record::decode("50.0,0,1"),
            Err(DecodeError::DepthOutOfRange(0))
        );
        assert_eq!(
            Record::decode("50.0,7,1"),
            Err(DecodeError::DepthOutOfRange(7))
        );
        assert_eq!(
            Record::decode("50.0,300,1"),
            Err(DecodeError::DepthOutOfRange(300))
        );
    }

    #[test]
    fn test_empty_is_not_reportable() {
        assert!(!DecodeError::Empty.is_reportable());
        assert!(DecodeError::FieldCount { found: 1 }.is_reportable());
    }

    #[test]
    fn test_reading_round_trip_scenarios() {
        let profile = SensorProfile::default();

        let wet = Record::from(profile.evaluate(30000));
        assert_eq!(wet.encode().as_str(), "100.00,6,30000\n");
        assert_eq!(Record::decode(&wet.encode()), Ok(wet));

        let dry = Record::from(profile.evaluate(65535));
        assert_eq!(dry.encode().as_str(), "0.00,1,65535\n");
        assert_eq!(Record::decode(&dry.encode()), Ok(dry));

        let mid = Record::from(profile.evaluate(50000));
        assert_eq!(mid.encode().as_str(), "43.72,3,50000\n");
        let decoded = Record::decode(&mid.encode()).unwrap();
        assert_eq!(decoded.percent(), 43.72);
        assert_eq!(decoded.encode(), mid.encode());
    }

    proptest! {
        #[test]
        fn two_decimal_records_round_trip(hundredths in 0u32..=10_000, level in 1u8..=6, raw in any::<u16>()) {
            let record = Record::new(hundredths as f32 / 100.0, depth(level), raw);
            prop_assert_eq!(Record::decode(&record.encode()), Ok(record));
        }

        #[test]
        fn encoding_rounds_to_two_decimals(percent in 0.0f32..=100.0, level in 1u8..=6, raw in any::<u16>()) {
            let record = Record::new(percent, depth(level), raw);
            let decoded = Record::decode(&record.encode()).unwrap();
            prop_assert!((decoded.percent() - record.percent()).abs() <= 0.0051);
            prop_assert_eq!(decoded.depth(), record.depth());
            prop_assert_eq!(decoded.raw(), record.raw());
            prop_assert_eq!(decoded.encode(), record.encode());
        }

        #[test]
        fn decode_never_panics(line in ".{0,64}") {
            let _ = Record::decode(&line);
        }

        #[test]
        fn wrong_field_counts_are_rejected(fields in proptest::collection::vec("[0-9.]{0,4}", 0..8usize)) {
            prop_assume!(fields.len() != FIELD_COUNT);
            let line = fields.join(",");
            let result = Record::decode(&line);
            prop_assert!(result.is_err());
        }
    }
}
