//! Time related utils.

use crate::Error;
use crate::Result;

/// DateTime is the alias for `chrono::DateTime<Utc>`.
pub type DateTime = chrono::DateTime<chrono::Utc>;

/// Create datetime of now.
pub fn now() -> DateTime {
    chrono::Utc::now()
}

/// Format time into RFC 2822 with the `-0000` zone: "Thu, 30 Jul 2025 00:00:00 -0000"
///
/// `-0000` marks the time as UTC without claiming a local offset, which is
/// what Duo's reference clients emit.
pub fn format_rfc2822(t: DateTime) -> String {
    t.format("%a, %d %b %Y %H:%M:%S -0000").to_string()
}

/// Parse time from RFC 2822 format, accepting `-0000` as UTC.
pub fn parse_rfc2822(s: &str) -> Result<DateTime> {
    let t = chrono::DateTime::parse_from_rfc2822(s)
        .map_err(|e| Error::unexpected(format!("invalid RFC 2822 time: {s}")).with_source(e))?;

    Ok(t.with_timezone(&chrono::Utc))
}
