//! Interval expressions: absolute partial dates and relative offsets.
//!
//! An expression is classified once into an [`IntervalExpression`] and then
//! resolved against an explicit "now" anchor. Nothing in this module reads
//! the system clock.
//!
//! # Grammar
//!
//! - `YYYY` — a whole year
//! - `YYYYMM` — a whole month
//! - `YYYYMMDD` — a whole day
//! - anything else is read as a [`RelativeOffset`] (`-1w`, `1h10s`)
//!
//! An all-digit expression of any other length (`1`, `20145`) is an error,
//! never an offset.
//!
//! # Boundaries
//!
//! Absolute ranges run from `00:00:00` on the first day to `23:59:59` on
//! the last day, UTC. Months end on their real last calendar day, so
//! `201402` ends on Feb 28 (Feb 29 in leap years).

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, SubsecRound, Utc};

use crate::duration::RelativeOffset;
use crate::error::{Result, TimespanError};
use crate::span::Timespan;

/// A classified interval expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalExpression {
    /// `YYYY`
    Year(i32),
    /// `YYYYMM`
    YearMonth { year: i32, month: u32 },
    /// `YYYYMMDD`
    YearMonthDay(NaiveDate),
    /// Signed duration from now.
    RelativeOffset(RelativeOffset),
}

impl IntervalExpression {
    /// Resolve into a concrete range anchored at `now`.
    ///
    /// Only [`IntervalExpression::RelativeOffset`] depends on `now`; its
    /// sub-second component is truncated first so every boundary lands on
    /// a whole second.
    pub fn resolve(&self, now: DateTime<Utc>) -> Result<Timespan> {
        match *self {
            IntervalExpression::Year(year) => {
                whole_days(first_of_month(year, 1)?, last_of_month(year, 12)?)
            }
            IntervalExpression::YearMonth { year, month } => {
                whole_days(first_of_month(year, month)?, last_of_month(year, month)?)
            }
            IntervalExpression::YearMonthDay(date) => whole_days(date, date),
            IntervalExpression::RelativeOffset(offset) => offset.apply(now.trunc_subsecs(0)),
        }
    }
}

impl FromStr for IntervalExpression {
    type Err = TimespanError;

    fn from_str(s: &str) -> Result<Self> {
        if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
            return classify_digits(s);
        }
        s.parse().map(IntervalExpression::RelativeOffset)
    }
}

/// Parse `expression` and resolve it against `now`.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use timespan::parse_interval;
///
/// let now = Utc.with_ymd_and_hms(2026, 2, 18, 14, 30, 0).unwrap();
/// let span = parse_interval("201405", now).unwrap();
/// assert_eq!(span.start, Utc.with_ymd_and_hms(2014, 5, 1, 0, 0, 0).unwrap());
/// assert_eq!(span.end, Utc.with_ymd_and_hms(2014, 5, 31, 23, 59, 59).unwrap());
///
/// let span = parse_interval("-1w", now).unwrap();
/// assert_eq!(span.end, now);
/// ```
///
/// # Errors
///
/// Returns [`TimespanError::InvalidFormat`] if the expression matches no
/// grammar, or [`TimespanError::OutOfRange`] if a relative offset leaves the
/// representable calendar.
pub fn parse_interval(expression: &str, now: DateTime<Utc>) -> Result<Timespan> {
    expression.parse::<IntervalExpression>()?.resolve(now)
}

// ── Internal helpers ────────────────────────────────────────────────────────

fn classify_digits(s: &str) -> Result<IntervalExpression> {
    match s.len() {
        4 => Ok(IntervalExpression::Year(digits(s, 0..4)?)),
        6 => {
            let year = digits(s, 0..4)?;
            let month = digits(s, 4..6)?;
            // Reject month 00 / 13+ here rather than at resolve time.
            first_of_month(year, month)?;
            Ok(IntervalExpression::YearMonth { year, month })
        }
        8 => {
            let (year, month, day) = (digits(s, 0..4)?, digits(s, 4..6)?, digits(s, 6..8)?);
            NaiveDate::from_ymd_opt(year, month, day)
                .map(IntervalExpression::YearMonthDay)
                .ok_or_else(|| TimespanError::InvalidFormat(format!("'{s}' is not a calendar date")))
        }
        n => Err(TimespanError::InvalidFormat(format!(
            "'{s}' has {n} digits; expected YYYY, YYYYMM or YYYYMMDD"
        ))),
    }
}

fn digits<T: FromStr>(s: &str, range: std::ops::Range<usize>) -> Result<T> {
    s[range]
        .parse()
        .map_err(|_| TimespanError::InvalidFormat(format!("invalid digits in '{s}'")))
}

fn first_of_month(year: i32, month: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
        TimespanError::InvalidFormat(format!("no such month: {year:04}-{month:02}"))
    })
}

fn last_of_month(year: i32, month: u32) -> Result<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    first_of_month(next_year, next_month)?
        .pred_opt()
        .ok_or_else(|| {
            TimespanError::OutOfRange(format!("end of {year:04}-{month:02}"))
        })
}

/// `[first 00:00:00, last 23:59:59]` in UTC.
fn whole_days(first: NaiveDate, last: NaiveDate) -> Result<Timespan> {
    let start = first.and_hms_opt(0, 0, 0);
    let end = last.and_hms_opt(23, 59, 59);
    match (start, end) {
        (Some(start), Some(end)) => Ok(Timespan::new(start.and_utc(), end.and_utc())),
        _ => Err(TimespanError::OutOfRange(format!("{first} to {last}"))),
    }
}
