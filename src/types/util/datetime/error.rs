//! Error type for [`Timestamp`] parsing.
//!
//! [`Timestamp`]: super::Timestamp

/// Reason that an ISO 8601 timestamp couldn't be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimestampParseError {
    /// The text is not an RFC 3339 datetime with an explicit UTC offset.
    ///
    /// Naive datetimes (no offset) land here too: a timestamp must name an
    /// instant, not a wall-clock reading.
    #[error("provided value is not in an iso 8601 format")]
    Format(#[source] chrono::ParseError),
}
