//! Turn request parameters into a [`Timespan`].
//!
//! Callers either send one `interval` expression or a `start`/`end` pair:
//!
//! 1. `interval` present and non-empty: the whole range comes from it.
//! 2. otherwise `start` and `end` both present: the range runs from the
//!    start of the `start` expression to the end of the `end` expression.
//! 3. otherwise [`TimespanError::MissingParameters`].
//!
//! Any other parameter is ignored.

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::{Result, TimespanError};
use crate::interval::parse_interval;
use crate::span::Timespan;

pub const INTERVAL_PARAM: &str = "interval";
pub const START_PARAM: &str = "start";
pub const END_PARAM: &str = "end";

/// Read-only access to decoded request parameters.
pub trait ParamSource {
    /// The value for `key`. For multi-valued keys, the first value.
    fn param(&self, key: &str) -> Option<&str>;
}

impl<K, V, S> ParamSource for HashMap<K, V, S>
where
    K: Borrow<str> + Hash + Eq,
    V: AsRef<str>,
    S: BuildHasher,
{
    fn param(&self, key: &str) -> Option<&str> {
        self.get(key).map(|v| v.as_ref())
    }
}

impl<K, V> ParamSource for BTreeMap<K, V>
where
    K: Borrow<str> + Ord,
    V: AsRef<str>,
{
    fn param(&self, key: &str) -> Option<&str> {
        self.get(key).map(|v| v.as_ref())
    }
}

impl<K: AsRef<str>, V: AsRef<str>> ParamSource for [(K, V)] {
    fn param(&self, key: &str) -> Option<&str> {
        self.iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v.as_ref())
    }
}

impl<K: AsRef<str>, V: AsRef<str>> ParamSource for Vec<(K, V)> {
    fn param(&self, key: &str) -> Option<&str> {
        self.as_slice().param(key)
    }
}

impl<T: ParamSource + ?Sized> ParamSource for &T {
    fn param(&self, key: &str) -> Option<&str> {
        (**self).param(key)
    }
}

/// The timespan parameters of a request, ready for a framework's query
/// or form extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TimespanRequest {
    pub interval: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

impl ParamSource for TimespanRequest {
    fn param(&self, key: &str) -> Option<&str> {
        match key {
            INTERVAL_PARAM => self.interval.as_deref(),
            START_PARAM => self.start.as_deref(),
            END_PARAM => self.end.as_deref(),
            _ => None,
        }
    }
}

/// Resolve `params` against the current wall-clock time.
///
/// The clock is read exactly once, so relative `start` and `end`
/// expressions share the same anchor.
pub fn resolve_timespan<P: ParamSource + ?Sized>(params: &P) -> Result<Timespan> {
    resolve_timespan_at(params, Utc::now())
}

/// Resolve `params` against an explicit `now`.
///
/// For a `start`/`end` pair each side is parsed on its own and only one
/// component is kept: the start of `start` and the end of `end`. So
/// `end=1h` ends an hour after `now`, while `end=-1h` ends at `now`.
///
/// # Errors
///
/// - [`TimespanError::MissingParameters`] if neither `interval` nor both
///   `start` and `end` are supplied.
/// - Any error from parsing `interval`, `start`, or `end`, in that order
///   of precedence. No bound is checked against the other.
pub fn resolve_timespan_at<P: ParamSource + ?Sized>(
    params: &P,
    now: DateTime<Utc>,
) -> Result<Timespan> {
    if let Some(interval) = params.param(INTERVAL_PARAM).filter(|v| !v.is_empty()) {
        return parse_interval(interval, now);
    }

    match (params.param(START_PARAM), params.param(END_PARAM)) {
        (Some(start), Some(end)) => {
            let start = parse_interval(start, now)?.start;
            let end = parse_interval(end, now)?.end;
            Ok(Timespan::new(start, end))
        }
        _ => Err(TimespanError::MissingParameters),
    }
}
