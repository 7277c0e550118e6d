//! ISO 8601 timestamps as sent by Discord.
//!
//! Discord emits two formats: with microseconds
//! (`2021-01-01T01:01:01.010000+00:00`) and without
//! (`2021-01-01T01:01:01+00:00`). Both decode losslessly into a
//! timezone-aware [`chrono::DateTime`], as does any finer RFC 3339
//! fraction down to nanoseconds.

mod error;

pub use self::error::TimestampParseError;

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use serde::{
    de::{Deserialize, Deserializer, Error as DeError, Visitor},
    ser::{Serialize, Serializer},
};
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

/// Number of microseconds in a second.
const MICROSECONDS_PER_SECOND: i64 = 1_000_000;

/// A timezone-aware instant.
///
/// Equality compares instants, so `01:00:00+01:00` equals `00:00:00+00:00`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Timestamp(DateTime<FixedOffset>);

impl Timestamp {
    /// Parse a timestamp from an ISO 8601 datetime string.
    ///
    /// # Errors
    ///
    /// Returns [`TimestampParseError::Format`] if the string is not a
    /// datetime or carries no UTC offset.
    pub fn parse(datetime: &str) -> Result<Self, TimestampParseError> {
        DateTime::parse_from_rfc3339(datetime)
            .map(Self)
            .map_err(TimestampParseError::Format)
    }

    /// Total number of seconds since the Unix epoch.
    pub fn as_secs(&self) -> i64 {
        self.0.timestamp()
    }

    /// Total number of microseconds since the Unix epoch.
    pub fn as_micros(&self) -> i64 {
        self.0.timestamp() * MICROSECONDS_PER_SECOND + i64::from(self.0.timestamp_subsec_micros())
    }

    /// The underlying datetime, in the offset it was sent with.
    pub const fn as_datetime(&self) -> &DateTime<FixedOffset> {
        &self.0
    }

    /// The instant in UTC.
    pub fn to_utc(&self) -> DateTime<Utc> {
        self.0.with_timezone(&Utc)
    }

    /// Format in Discord's wire form, with microseconds.
    ///
    /// Instants with sub-microsecond precision are written with
    /// nanoseconds instead, so formatting never loses precision.
    pub fn iso_8601(&self) -> String {
        let format = if self.0.timestamp_subsec_nanos() % 1_000 == 0 {
            SecondsFormat::Micros
        } else {
            SecondsFormat::Nanos
        };

        self.0.to_rfc3339_opts(format, false)
    }
}

impl From<DateTime<FixedOffset>> for Timestamp {
    fn from(datetime: DateTime<FixedOffset>) -> Self {
        Self(datetime)
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.iso_8601())
    }
}

impl FromStr for Timestamp {
    type Err = TimestampParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.iso_8601())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TimestampVisitor;

        impl Visitor<'_> for TimestampVisitor {
            type Value = Timestamp;

            fn expecting(&self, f: &mut Formatter<'_>) -> FmtResult {
                f.write_str("an ISO 8601 datetime string")
            }

            fn visit_str<E: DeError>(self, v: &str) -> Result<Self::Value, E> {
                Timestamp::parse(v).map_err(DeError::custom)
            }
        }

        deserializer.deserialize_any(TimestampVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::Timestamp;
    use serde_test::Token;
    use std::str::FromStr;

    #[test]
    fn parse_with_microseconds() {
        let ts = Timestamp::from_str("2020-02-02T02:02:02.020000+00:00").unwrap();
        assert_eq!(ts.iso_8601(), "2020-02-02T02:02:02.020000+00:00");
    }

    #[test]
    fn parse_without_microseconds() {
        let ts = Timestamp::from_str("2021-01-01T01:01:01+00:00").unwrap();
        assert_eq!(ts.as_secs(), 1_609_462_861);
    }

    #[test]
    fn parse_too_short() {
        assert!(Timestamp::from_str("2021-01-01").is_err());
    }

    #[test]
    fn parse_requires_offset() {
        assert!(Timestamp::from_str("2021-01-01T01:01:01").is_err());
    }

    #[test]
    fn offsets_compare_as_instants() {
        let utc = Timestamp::parse("2021-01-01T00:00:00+00:00").unwrap();
        let cet = Timestamp::parse("2021-01-01T01:00:00+01:00").unwrap();
        assert_eq!(utc, cet);
        assert_eq!(cet.to_utc(), utc.to_utc());
    }

    #[test]
    fn parse_then_as_micros() {
        let ts = Timestamp::from_str("2021-08-10T11:16:37.123456+00:00").unwrap();
        assert_eq!(ts.as_micros(), 1_628_594_197_123_456);
    }

    #[test]
    fn serializes_in_wire_form() {
        let ts = Timestamp::from_str("2021-08-10T11:16:37+00:00").unwrap();
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, "\"2021-08-10T11:16:37.000000+00:00\"");
        assert_eq!(Timestamp::parse(&ts.to_string()).unwrap(), ts);
    }

    #[test]
    fn nanoseconds_survive_formatting() {
        let text = "2021-08-10T11:16:37.123456789+00:00";
        let ts = Timestamp::parse(text).unwrap();
        assert_eq!(ts.iso_8601(), text);
        assert_eq!(Timestamp::parse(&ts.iso_8601()).unwrap(), ts);
    }

    #[test]
    fn deserializes_from_text() {
        let ts = Timestamp::parse("2021-01-01T01:01:01+00:00").unwrap();
        serde_test::assert_de_tokens(&ts, &[Token::Str("2021-01-01T01:01:01+00:00")]);
        serde_test::assert_de_tokens_error::<Timestamp>(
            &[Token::Str("next tuesday")],
            "provided value is not in an iso 8601 format",
        );
    }
}
