//! Pure display conversions shared by every table and status line.

use std::str::FromStr;

use thiserror::Error;
use time::{PrimitiveDateTime, format_description::FormatItem, macros::format_description};

/// Layout used for every timestamp shown on the console.
pub const TIMESTAMP_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Errors raised by the byte-size formatter.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    /// The requested unit is neither `gb` nor `tb`.
    #[error("Failed to identify size unit '{0}'")]
    InvalidUnit(String),
    /// The timestamp could not be rendered with [`TIMESTAMP_FORMAT`].
    #[error("Failed to format timestamp: {0}")]
    Timestamp(String),
}

/// Binary size units understood by [`size_to_unit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeUnit {
    Gigabytes,
    Terabytes,
}

impl SizeUnit {
    fn power(self) -> i32 {
        match self {
            SizeUnit::Gigabytes => 3,
            SizeUnit::Terabytes => 4,
        }
    }

    /// Scale a byte count into this unit, rounded to two decimal places.
    pub fn convert(self, bytes: u64) -> f64 {
        let scaled = bytes as f64 / 1024f64.powi(self.power());
        (scaled * 100.0).round() / 100.0
    }
}

impl FromStr for SizeUnit {
    type Err = FormatError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "gb" => Ok(SizeUnit::Gigabytes),
            "tb" => Ok(SizeUnit::Terabytes),
            _ => Err(FormatError::InvalidUnit(value.to_string())),
        }
    }
}

/// Convert `bytes` to gigabytes (`"gb"`) or terabytes (`"tb"`).
///
/// The unit match is case-insensitive. The result is rounded to two decimal
/// places.
pub fn size_to_unit(bytes: u64, unit: &str) -> Result<f64, FormatError> {
    Ok(unit.parse::<SizeUnit>()?.convert(bytes))
}

/// Render a second count as `HH:MM:SS`.
///
/// Every field is padded to two digits; hours grow past two digits instead of
/// wrapping.
pub fn duration_to_clock(total_seconds: u64) -> String {
    let (total_minutes, seconds) = (total_seconds / 60, total_seconds % 60);
    let (hours, minutes) = (total_minutes / 60, total_minutes % 60);
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Render a timestamp as `YYYY-MM-DD HH:MM:SS`.
pub fn format_timestamp(value: PrimitiveDateTime) -> Result<String, FormatError> {
    value
        .format(TIMESTAMP_FORMAT)
        .map_err(|err| FormatError::Timestamp(err.to_string()))
}

/// Display a rounded decimal, keeping at least one fractional digit.
pub fn format_decimal(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

/// Serde adapter for manager timestamps (`YYYY-MM-DD HH:MM:SS[.ffffff]`).
///
/// Fractional seconds are accepted on input and dropped on output.
pub mod serde_timestamp {
    use serde::{Deserialize, Deserializer, Serializer, de::Error as _, ser::Error as _};
    use time::{PrimitiveDateTime, format_description::FormatItem, macros::format_description};

    const INPUT_FORMAT: &[FormatItem<'static>] = format_description!(
        "[year]-[month]-[day] [hour]:[minute]:[second][optional [.[subsecond]]]"
    );

    pub fn serialize<S: Serializer>(
        value: &PrimitiveDateTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let text = super::format_timestamp(*value).map_err(S::Error::custom)?;
        serializer.serialize_str(&text)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<PrimitiveDateTime, D::Error> {
        let text = String::deserialize(deserializer)?;
        PrimitiveDateTime::parse(&text, INPUT_FORMAT).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    const TERABYTE: u64 = 1_099_511_627_776;

    #[test]
    fn one_terabyte_is_exact() {
        assert_eq!(size_to_unit(TERABYTE, "tb").unwrap(), 1.0);
        assert_eq!(size_to_unit(TERABYTE, "gb").unwrap(), 1024.0);
    }

    #[test]
    fn unit_match_ignores_case() {
        assert_eq!(
            size_to_unit(5 * TERABYTE / 3, "TB").unwrap(),
            size_to_unit(5 * TERABYTE / 3, "tb").unwrap()
        );
        assert_eq!("Gb".parse::<SizeUnit>().unwrap(), SizeUnit::Gigabytes);
    }

    #[test]
    fn unknown_unit_is_rejected() {
        assert_eq!(
            size_to_unit(100, "pb"),
            Err(FormatError::InvalidUnit("pb".to_string()))
        );
        assert!(size_to_unit(100, "").is_err());
    }

    #[test]
    fn rounds_to_two_places() {
        // 1.5 GiB plus a little
        let bytes = 1_610_612_736 + 3_000_000;
        assert_eq!(size_to_unit(bytes, "gb").unwrap(), 1.5);
    }

    #[test]
    fn clock_examples() {
        assert_eq!(duration_to_clock(3661), "01:01:01");
        assert_eq!(duration_to_clock(59), "00:00:59");
        assert_eq!(duration_to_clock(0), "00:00:00");
    }

    #[test]
    fn clock_hours_are_unbounded() {
        assert_eq!(duration_to_clock(100 * 3600 + 5), "100:00:05");
    }

    #[test]
    fn timestamp_layout() {
        let value = datetime!(2021-05-09 07:03:01);
        assert_eq!(format_timestamp(value).unwrap(), "2021-05-09 07:03:01");
    }

    #[test]
    fn decimal_keeps_fraction() {
        assert_eq!(format_decimal(1.0), "1.0");
        assert_eq!(format_decimal(1.5), "1.5");
        assert_eq!(format_decimal(1.23), "1.23");
        assert_eq!(format_decimal(0.0), "0.0");
    }
}
