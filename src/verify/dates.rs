//! Date library check: parsing in several formats plus calendar arithmetic.

use chrono::{DateTime, Duration, FixedOffset, Months, NaiveDate, NaiveDateTime, SecondsFormat};

use crate::error::{DepVerifyError, Result};

use super::clock::Clock;
use super::report::{DateCalculations, DateLibraryCheck, ParsedDates};

/// Strict ISO-8601 sample with a `Z` suffix.
pub const ISO_SAMPLE: &str = "2025-10-22T14:30:00Z";
/// "Month Day, Year" sample.
pub const NATURAL_SAMPLE: &str = "October 22, 2025";

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

// %B and %b each accept both full and abbreviated month names when parsing.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%B %d, %Y", "%B %d %Y", "%d %B %Y"];

/// A parsed timestamp, with or without a UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedTimestamp {
    Zoned(DateTime<FixedOffset>),
    Naive(NaiveDateTime),
}

impl ParsedTimestamp {
    /// ISO-8601 rendering; zoned values carry a `+HH:MM` offset.
    pub fn to_iso(&self) -> String {
        match self {
            ParsedTimestamp::Zoned(dt) => iso_timestamp(dt),
            ParsedTimestamp::Naive(dt) => dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string(),
        }
    }

    pub fn date(&self) -> NaiveDate {
        match self {
            ParsedTimestamp::Zoned(dt) => dt.date_naive(),
            ParsedTimestamp::Naive(dt) => dt.date(),
        }
    }
}

/// Parse `input` in any supported format.
///
/// Tried in order: RFC 3339, naive ISO date-time, then date-only formats
/// (which resolve to midnight).
pub fn parse_timestamp(input: &str) -> Result<ParsedTimestamp> {
    let s = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(ParsedTimestamp::Zoned(dt));
    }

    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(ParsedTimestamp::Naive(dt));
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(ParsedTimestamp::Naive(date.and_time(chrono::NaiveTime::MIN)));
        }
    }

    Err(DepVerifyError::DateParse(input.to_string()))
}

/// Move `from` forward by whole calendar months, then by days.
///
/// Month addition clamps to the last day of the target month
/// (Nov 30 + 3 months = Feb 28).
pub fn add_months_and_days(
    from: DateTime<FixedOffset>,
    months: u32,
    days: i64,
) -> Result<DateTime<FixedOffset>> {
    from.checked_add_months(Months::new(months))
        .and_then(|dt| dt.checked_add_signed(Duration::days(days)))
        .ok_or_else(|| {
            DepVerifyError::DateOutOfRange(format!("{} + {} months {} days", from, months, days))
        })
}

/// Move `from` back by `days` days.
pub fn sub_days(from: DateTime<FixedOffset>, days: i64) -> Result<DateTime<FixedOffset>> {
    from.checked_sub_signed(Duration::days(days))
        .ok_or_else(|| DepVerifyError::DateOutOfRange(format!("{} - {} days", from, days)))
}

/// ISO-8601 with offset. Fractional seconds are truncated to microseconds
/// and omitted when that leaves zero.
pub fn iso_timestamp(dt: &DateTime<FixedOffset>) -> String {
    let format = if dt.timestamp_subsec_micros() == 0 {
        SecondsFormat::Secs
    } else {
        SecondsFormat::Micros
    };
    dt.to_rfc3339_opts(format, false)
}

/// `YYYY-MM-DD`.
pub fn calendar_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Run the date library check relative to `clock`.
pub fn check_date_library(clock: &dyn Clock) -> Result<DateLibraryCheck> {
    let iso = parse_timestamp(ISO_SAMPLE)?;
    let natural = parse_timestamp(NATURAL_SAMPLE)?;

    let now = clock.now();
    let future = add_months_and_days(now, 3, 15)?;
    let past = sub_days(now, 30)?;

    Ok(DateLibraryCheck {
        test: "Date parsing and manipulation".to_string(),
        parsed_dates: ParsedDates {
            iso: iso.to_iso(),
            natural: calendar_date(natural.date()),
            current_time: iso_timestamp(&now),
        },
        calculations: DateCalculations {
            in_3_months_15_days: calendar_date(future.date_naive()),
            days_ago_30: calendar_date(past.date_naive()),
        },
    })
}
