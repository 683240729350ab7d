//! Relative offsets anchored to "now".
//!
//! An offset is an optional sign followed by one or more `<digits><unit>`
//! components written back to back, e.g. `-1w`, `1h10s`, `+2d12h`.
//!
//! | Unit | Meaning |
//! |------|---------|
//! | `w`  | weeks (7 days) |
//! | `d`  | days (86 400 seconds, UTC) |
//! | `h`  | hours |
//! | `m`  | minutes |
//! | `s`  | seconds |

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};

use crate::error::{Result, TimespanError};
use crate::span::Timespan;

const SECS_PER_MINUTE: i64 = 60;
const SECS_PER_HOUR: i64 = 3_600;
const SECS_PER_DAY: i64 = 86_400;
const SECS_PER_WEEK: i64 = 7 * SECS_PER_DAY;

/// A parsed relative offset. Component values are magnitudes; the sign
/// applies to the whole offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RelativeOffset {
    pub negative: bool,
    pub weeks: i64,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl RelativeOffset {
    /// The signed offset as a `chrono::Duration`.
    ///
    /// # Errors
    ///
    /// Returns [`TimespanError::OutOfRange`] if the total does not fit in a
    /// `chrono::Duration`.
    pub fn to_duration(&self) -> Result<Duration> {
        let overflow = || TimespanError::OutOfRange(format!("offset '{self}' is too large"));

        let total = [
            (self.weeks, SECS_PER_WEEK),
            (self.days, SECS_PER_DAY),
            (self.hours, SECS_PER_HOUR),
            (self.minutes, SECS_PER_MINUTE),
            (self.seconds, 1),
        ]
        .iter()
        .try_fold(0i64, |acc, &(n, factor)| {
            n.checked_mul(factor).and_then(|secs| acc.checked_add(secs))
        })
        .ok_or_else(overflow)?;

        let magnitude = Duration::try_seconds(total).ok_or_else(overflow)?;
        Ok(if self.negative { -magnitude } else { magnitude })
    }

    /// Apply the offset to `now`.
    ///
    /// A negative offset spans `[now + offset, now]`; anything else
    /// (including zero) spans `[now, now + offset]`.
    pub fn apply(&self, now: DateTime<Utc>) -> Result<Timespan> {
        let delta = self.to_duration()?;
        let shifted = now.checked_add_signed(delta).ok_or_else(|| {
            TimespanError::OutOfRange(format!("'{now}' shifted by '{self}'"))
        })?;

        if delta < Duration::zero() {
            Ok(Timespan::new(shifted, now))
        } else {
            Ok(Timespan::new(now, shifted))
        }
    }
}

impl FromStr for RelativeOffset {
    type Err = TimespanError;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(TimespanError::InvalidFormat("empty expression".to_string()));
        }

        let (negative, rest) = match s.as_bytes().first() {
            Some(b'+') => (false, &s[1..]),
            Some(b'-') => (true, &s[1..]),
            _ => (false, s),
        };

        if rest.is_empty() {
            return Err(TimespanError::InvalidFormat(format!(
                "offset has no components: '{s}'"
            )));
        }

        let mut offset = RelativeOffset {
            negative,
            ..Default::default()
        };
        let mut num_buf = String::new();

        for ch in rest.chars() {
            if ch.is_ascii_digit() {
                num_buf.push(ch);
                continue;
            }
            if num_buf.is_empty() {
                return Err(TimespanError::InvalidFormat(format!(
                    "expected number before '{ch}' in '{s}'"
                )));
            }
            let n: i64 = num_buf
                .parse()
                .map_err(|_| TimespanError::InvalidFormat(format!("invalid number in '{s}'")))?;
            num_buf.clear();

            let slot = match ch {
                'w' => &mut offset.weeks,
                'd' => &mut offset.days,
                'h' => &mut offset.hours,
                'm' => &mut offset.minutes,
                's' => &mut offset.seconds,
                _ => {
                    return Err(TimespanError::InvalidFormat(format!(
                        "unknown unit '{ch}' in '{s}'"
                    )));
                }
            };
            *slot = slot
                .checked_add(n)
                .ok_or_else(|| TimespanError::InvalidFormat(format!("invalid number in '{s}'")))?;
        }

        if !num_buf.is_empty() {
            return Err(TimespanError::InvalidFormat(format!(
                "number without unit at end of '{s}'"
            )));
        }

        Ok(offset)
    }
}

impl fmt::Display for RelativeOffset {
    /// Canonical form, e.g. `-1w2d` or `1h10s`. Zero renders as `0s`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            f.write_str("-")?;
        }
        let parts = [
            (self.weeks, 'w'),
            (self.days, 'd'),
            (self.hours, 'h'),
            (self.minutes, 'm'),
            (self.seconds, 's'),
        ];
        let mut wrote = false;
        for (n, unit) in parts {
            if n != 0 {
                write!(f, "{n}{unit}")?;
                wrote = true;
            }
        }
        if !wrote {
            f.write_str("0s")?;
        }
        Ok(())
    }
}
