//! UTC datetime utilities without timezone dependencies.
//!
//! Provides a lightweight `DateTimeUtc` struct for date/time handling,
//! sized for feed generation (RFC 2822 for RSS, RFC 3339 for Atom).
//!
//! # Examples
//!
//! ```ignore
//! // Parse from ISO format
//! let dt = DateTimeUtc::parse("2024-06-15").unwrap();
//! let dt = DateTimeUtc::parse("2024-06-15T14:30:45Z").unwrap();
//!
//! // Format for RSS
//! assert_eq!(dt.to_rfc2822(), "Sat, 15 Jun 2024 14:30:45 GMT");
//! ```

use anyhow::{Result, bail};
use serde::Deserialize;
use std::time::{SystemTime, UNIX_EPOCH};

/// UTC datetime without timezone complexity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTimeUtc {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl DateTimeUtc {
    pub const fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    pub const fn from_ymd(year: u16, month: u8, day: u8) -> Self {
        Self::new(year, month, day, 0, 0, 0)
    }

    /// Current UTC time from the system clock.
    pub fn now() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self::from_unix_seconds(secs)
    }

    /// Convert seconds since the Unix epoch to a civil UTC datetime.
    pub const fn from_unix_seconds(secs: u64) -> Self {
        let days = secs / 86_400;
        let rem = secs % 86_400;
        let (year, month, day) = civil_from_days(days);
        Self {
            year,
            month,
            day,
            hour: (rem / 3600) as u8,
            minute: ((rem / 60) % 60) as u8,
            second: (rem % 60) as u8,
        }
    }

    /// Parse from "YYYY-MM-DD" or "YYYY-MM-DDTHH:MM:SSZ" format
    pub fn parse(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();

        // Minimum: "YYYY-MM-DD" (10 chars)
        if bytes.len() < 10 {
            return None;
        }

        // Parse date part
        let year = parse_u16(&bytes[0..4])?;
        if bytes[4] != b'-' {
            return None;
        }
        let month = parse_u8(&bytes[5..7])?;
        if bytes[7] != b'-' {
            return None;
        }
        let day = parse_u8(&bytes[8..10])?;

        // Check for time part (RFC3339)
        let (hour, minute, second) = if bytes.len() >= 20 && bytes[10] == b'T' && bytes[19] == b'Z'
        {
            if bytes[13] != b':' || bytes[16] != b':' {
                return None;
            }
            (
                parse_u8(&bytes[11..13])?,
                parse_u8(&bytes[14..16])?,
                parse_u8(&bytes[17..19])?,
            )
        } else if bytes.len() == 10 {
            (0, 0, 0)
        } else {
            return None;
        };

        let dt = Self::new(year, month, day, hour, minute, second);
        dt.validate().ok()?;
        Some(dt)
    }

    #[allow(clippy::trivially_copy_pass_by_ref)] // Method style is more idiomatic
    pub fn validate(&self) -> Result<()> {
        let Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        } = *self;

        if !(1..=12).contains(&month) {
            bail!("month is invalid: {month}");
        }

        let max_days = Self::days_in_month(year, month);
        if day == 0 || day > max_days {
            bail!("day is invalid: {day}");
        }
        if hour > 23 {
            bail!("hour is invalid: {hour}");
        }
        if minute > 59 {
            bail!("minute is invalid: {minute}");
        }
        if second > 59 {
            bail!("second is invalid: {second}");
        }

        Ok(())
    }

    #[inline]
    #[allow(clippy::manual_is_multiple_of)] // Manual impl for const fn
    const fn is_leap_year(year: u16) -> bool {
        year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
    }

    #[inline]
    const fn days_in_month(year: u16, month: u8) -> u8 {
        match month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            2 if Self::is_leap_year(year) => 29,
            2 => 28,
            _ => 0,
        }
    }

    /// Format as RFC 3339 (ISO 8601) for Atom feeds.
    ///
    /// Returns: `YYYY-MM-DDTHH:MM:SSZ`
    pub fn to_rfc3339(self) -> String {
        format!(
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }

    pub fn to_rfc2822(self) -> String {
        const WEEKDAYS: [&str; 7] = ["Sat", "Sun", "Mon", "Tue", "Wed", "Thu", "Fri"];
        const MONTHS: [&str; 12] = [
            "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
        ];

        // Zeller's congruence for weekday calculation
        let weekday = self.weekday_index();

        format!(
            "{}, {:02} {} {:04} {:02}:{:02}:{:02} GMT",
            WEEKDAYS[weekday],
            self.day,
            MONTHS[(self.month - 1) as usize],
            self.year,
            self.hour,
            self.minute,
            self.second
        )
    }

    #[inline]
    #[allow(clippy::trivially_copy_pass_by_ref)] // Method style is more idiomatic
    #[allow(clippy::cast_sign_loss)] // Result of % 7 is always 0-6
    fn weekday_index(&self) -> usize {
        let (y, m) = if self.month < 3 {
            (i32::from(self.year) - 1, i32::from(self.month) + 12)
        } else {
            (i32::from(self.year), i32::from(self.month))
        };
        let d = i32::from(self.day);
        ((d + (13 * (m + 1)) / 5 + y + y / 4 - y / 100 + y / 400) % 7) as usize
    }
}

impl Default for DateTimeUtc {
    /// The Unix epoch.
    fn default() -> Self {
        Self::from_ymd(1970, 1, 1)
    }
}

impl<'de> Deserialize<'de> for DateTimeUtc {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid datetime: {s}")))
    }
}

/// Gregorian date from days since 1970-01-01 (Hinnant's civil algorithm).
#[allow(clippy::cast_possible_truncation)] // Month and day always fit u8
const fn civil_from_days(days: u64) -> (u16, u8, u8) {
    let z = days + 719_468;
    let era = z / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let y = if m <= 2 { y + 1 } else { y };
    (y as u16, m as u8, d as u8)
}

/// Parse 2-digit ASCII number
#[inline]
fn parse_u8(bytes: &[u8]) -> Option<u8> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = bytes[0].wrapping_sub(b'0');
    let d2 = bytes[1].wrapping_sub(b'0');
    if d1 > 9 || d2 > 9 {
        return None;
    }
    Some(d1 * 10 + d2)
}

/// Parse 4-digit ASCII number
#[inline]
fn parse_u16(bytes: &[u8]) -> Option<u16> {
    if bytes.len() != 4 {
        return None;
    }
    let mut result = 0u16;
    for &b in bytes {
        let d = b.wrapping_sub(b'0');
        if d > 9 {
            return None;
        }
        result = result * 10 + u16::from(d);
    }
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_only() {
        let dt = DateTimeUtc::parse("2024-06-15").unwrap();
        assert_eq!(dt, DateTimeUtc::from_ymd(2024, 6, 15));
    }

    #[test]
    fn test_parse_with_time() {
        let dt = DateTimeUtc::parse("2024-06-15T14:30:45Z").unwrap();
        assert_eq!(dt, DateTimeUtc::new(2024, 6, 15, 14, 30, 45));
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(DateTimeUtc::parse("not a date"), None);
        assert_eq!(DateTimeUtc::parse("2024-6-15"), None);
        assert_eq!(DateTimeUtc::parse("2024-06-15T14:30"), None);
        assert_eq!(DateTimeUtc::parse("2024-13-01"), None);
        assert_eq!(DateTimeUtc::parse("2023-02-29"), None);
    }

    #[test]
    fn test_from_unix_seconds_epoch() {
        let dt = DateTimeUtc::from_unix_seconds(0);
        assert_eq!(dt, DateTimeUtc::from_ymd(1970, 1, 1));
    }

    #[test]
    fn test_from_unix_seconds_known_instant() {
        // 2024-06-15T14:30:45Z
        let dt = DateTimeUtc::from_unix_seconds(1_718_461_845);
        assert_eq!(dt, DateTimeUtc::new(2024, 6, 15, 14, 30, 45));
    }

    #[test]
    fn test_from_unix_seconds_leap_day() {
        // 2024-02-29T00:00:00Z
        let dt = DateTimeUtc::from_unix_seconds(1_709_164_800);
        assert_eq!(dt, DateTimeUtc::from_ymd(2024, 2, 29));
    }

    #[test]
    fn test_validate_valid() {
        assert!(DateTimeUtc::new(2024, 6, 15, 14, 30, 45).validate().is_ok());
        assert!(DateTimeUtc::new(2024, 1, 1, 0, 0, 0).validate().is_ok());
        assert!(
            DateTimeUtc::new(2024, 12, 31, 23, 59, 59)
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn test_validate_invalid_month() {
        assert!(DateTimeUtc::new(2024, 0, 15, 12, 0, 0).validate().is_err());
        assert!(DateTimeUtc::new(2024, 13, 15, 12, 0, 0).validate().is_err());
    }

    #[test]
    fn test_validate_invalid_day() {
        assert!(DateTimeUtc::new(2024, 6, 0, 12, 0, 0).validate().is_err());
        assert!(DateTimeUtc::new(2024, 1, 32, 12, 0, 0).validate().is_err());
        assert!(DateTimeUtc::new(2024, 4, 31, 12, 0, 0).validate().is_err());
        assert!(DateTimeUtc::new(2024, 2, 30, 12, 0, 0).validate().is_err());
    }

    #[test]
    fn test_validate_leap_year() {
        assert!(DateTimeUtc::new(2024, 2, 29, 12, 0, 0).validate().is_ok());
        assert!(DateTimeUtc::new(2000, 2, 29, 12, 0, 0).validate().is_ok()); // divisible by 400

        assert!(DateTimeUtc::new(2023, 2, 29, 12, 0, 0).validate().is_err());
        assert!(DateTimeUtc::new(1900, 2, 29, 12, 0, 0).validate().is_err()); // divisible by 100 but not 400
    }

    #[test]
    fn test_validate_invalid_time() {
        assert!(DateTimeUtc::new(2024, 6, 15, 24, 0, 0).validate().is_err());
        assert!(DateTimeUtc::new(2024, 6, 15, 12, 60, 0).validate().is_err());
        assert!(
            DateTimeUtc::new(2024, 6, 15, 12, 30, 60)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_to_rfc2822() {
        let dt = DateTimeUtc::new(2024, 6, 15, 14, 30, 45);
        assert_eq!(dt.to_rfc2822(), "Sat, 15 Jun 2024 14:30:45 GMT");

        let dt = DateTimeUtc::new(2024, 1, 15, 10, 30, 45);
        assert_eq!(dt.to_rfc2822(), "Mon, 15 Jan 2024 10:30:45 GMT");
    }

    #[test]
    fn test_to_rfc2822_format() {
        let dt = DateTimeUtc::new(2024, 6, 15, 14, 30, 45);
        let rfc2822 = dt.to_rfc2822();

        // Check the general format: "Day, DD Mon YYYY HH:MM:SS GMT"
        let parts: Vec<&str> = rfc2822.split(' ').collect();
        assert_eq!(parts.len(), 6);
        assert!(parts[0].ends_with(','));
        assert_eq!(parts[5], "GMT");
    }

    #[test]
    fn test_to_rfc3339() {
        let dt = DateTimeUtc::new(2024, 6, 15, 14, 30, 45);
        assert_eq!(dt.to_rfc3339(), "2024-06-15T14:30:45Z");

        let dt = DateTimeUtc::from_ymd(2013, 12, 12);
        assert_eq!(dt.to_rfc3339(), "2013-12-12T00:00:00Z");
    }

    #[test]
    fn test_deserialize_from_string() {
        #[derive(Deserialize)]
        struct Holder {
            time: DateTimeUtc,
        }

        let holder: Holder = toml::from_str("time = \"2024-05-01T10:00:00Z\"").unwrap();
        assert_eq!(holder.time, DateTimeUtc::new(2024, 5, 1, 10, 0, 0));

        let result: Result<Holder, _> = toml::from_str("time = \"yesterday\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_all_months() {
        let months = [
            (1, "Jan"),
            (2, "Feb"),
            (3, "Mar"),
            (4, "Apr"),
            (5, "May"),
            (6, "Jun"),
            (7, "Jul"),
            (8, "Aug"),
            (9, "Sep"),
            (10, "Oct"),
            (11, "Nov"),
            (12, "Dec"),
        ];

        for (month_num, month_name) in months {
            let dt = DateTimeUtc::new(2024, month_num, 15, 12, 0, 0);
            assert!(dt.validate().is_ok());
            let rfc2822 = dt.to_rfc2822();
            assert!(
                rfc2822.contains(month_name),
                "Month {} should contain {}",
                month_num,
                month_name
            );
        }
    }
}
