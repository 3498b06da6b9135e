//! Date normalization
//!
//! Both exports write dates as Japan local time without an offset. Two
//! shapes are recognized, anything else normalizes to `None`:
//!
//! - `YYYY/MM/DD HH:MM:SS` (PayPay transaction timestamp)
//! - `YYYY/MM/DD` (Money Forward date, taken as midnight)
//!
//! Also holds the date-range bookkeeping that `Stats` accumulates through.

use crate::types::{Stats, Timestamp};
use chrono::{FixedOffset, NaiveDate, TimeZone};
use regex::Regex;
use std::sync::LazyLock;

/// Offset of Japan Standard Time from UTC, in seconds
pub const JST_OFFSET_SECONDS: i32 = 9 * 3600;

static DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4})/(\d{2})/(\d{2})(?: (\d{2}):(\d{2}):(\d{2}))?$")
        .expect("date pattern is a valid regex")
});

/// Parse a date string from either export into a UTC+9 timestamp
///
/// Returns `None` for a missing value, an unrecognized shape, or a
/// calendar-invalid date or time such as `2024/02/30`.
pub fn parse_date(raw: Option<&str>) -> Option<Timestamp> {
    let caps = DATE_PATTERN.captures(raw?.trim())?;
    let field = |i: usize| caps.get(i).map(|m| m.as_str().parse::<u32>());

    let year = caps[1].parse::<i32>().ok()?;
    let month = field(2)?.ok()?;
    let day = field(3)?.ok()?;
    let (hour, minute, second) = match (field(4), field(5), field(6)) {
        (Some(h), Some(m), Some(s)) => (h.ok()?, m.ok()?, s.ok()?),
        _ => (0, 0, 0),
    };

    let naive = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, second)?;
    FixedOffset::east_opt(JST_OFFSET_SECONDS)?
        .from_local_datetime(&naive)
        .single()
}

/// Widen `(min, max)` with `date`
///
/// A `None` date leaves the range unchanged. The first date seen sets both
/// bounds; later dates replace a bound only when strictly beyond it, so the
/// range never narrows and ties keep the existing bound.
pub fn update_date_range(
    date: Option<Timestamp>,
    min: Option<Timestamp>,
    max: Option<Timestamp>,
) -> (Option<Timestamp>, Option<Timestamp>) {
    let Some(date) = date else {
        return (min, max);
    };

    let min = match min {
        Some(current) if date >= current => current,
        _ => date,
    };
    let max = match max {
        Some(current) if date <= current => current,
        _ => date,
    };

    (Some(min), Some(max))
}

/// Count one more row in `stats` and widen its range with the row's timestamp
///
/// An unparseable date (`None`) still counts the row but leaves the range as
/// it was.
pub fn observe_row(stats: Stats, date: Option<Timestamp>) -> Stats {
    let (start_date, end_date) = update_date_range(date, stats.start_date, stats.end_date);

    Stats {
        count: stats.count + 1,
        start_date,
        end_date,
    }
}
