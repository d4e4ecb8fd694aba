//! Receipt timestamps for inbound webhooks
//!
//! Every request captures a single [`ReceiptTime`] before dispatch so that all
//! records and generated identifiers produced by that request agree on when it
//! arrived.

use time::{OffsetDateTime, UtcOffset, macros::format_description};

/// The instant a webhook was received.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceiptTime {
    at: OffsetDateTime,
}

impl ReceiptTime {
    /// Capture the current UTC time.
    pub fn now() -> Self {
        Self {
            at: OffsetDateTime::now_utc(),
        }
    }

    /// Wrap a fixed instant (useful for deterministic tests).
    pub fn from_datetime(at: OffsetDateTime) -> Self {
        Self { at }
    }

    /// RFC 3339 UTC timestamp with millisecond precision, e.g.
    /// `2025-03-01T09:15:02.123Z`.
    pub fn iso(&self) -> String {
        let format =
            format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z");
        self.at
            .to_offset(UtcOffset::UTC)
            .format(format)
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Failed to format receipt time, using epoch millis");
                self.unix_millis().to_string()
            })
    }

    /// Milliseconds since the Unix epoch, used for generated identifiers.
    pub fn unix_millis(&self) -> i64 {
        (self.at.unix_timestamp_nanos() / 1_000_000) as i64
    }
}

impl Default for ReceiptTime {
    fn default() -> Self {
        Self::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iso_format_has_millisecond_precision() {
        let at = OffsetDateTime::from_unix_timestamp_nanos(1_700_000_000_123_456_789).unwrap();
        let receipt = ReceiptTime::from_datetime(at);

        assert_eq!(receipt.iso(), "2023-11-14T22:13:20.123Z");
        assert_eq!(receipt.unix_millis(), 1_700_000_000_123);
    }

    #[test]
    fn test_iso_pads_small_components() {
        let at = OffsetDateTime::from_unix_timestamp(0).unwrap();
        assert_eq!(ReceiptTime::from_datetime(at).iso(), "1970-01-01T00:00:00.000Z");
    }

    #[test]
    fn test_iso_truncates_sub_millisecond_digits() {
        let at = OffsetDateTime::from_unix_timestamp_nanos(1_700_000_000_999_999_999).unwrap();
        assert_eq!(ReceiptTime::from_datetime(at).iso(), "2023-11-14T22:13:20.999Z");
    }

    #[test]
    fn test_iso_normalizes_offset_to_utc() {
        let at = OffsetDateTime::from_unix_timestamp(0)
            .unwrap()
            .to_offset(time::macros::offset!(+2));
        assert_eq!(ReceiptTime::from_datetime(at).iso(), "1970-01-01T00:00:00.000Z");
    }
}
