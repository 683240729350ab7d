//! # timespan
//!
//! Resolve request parameters into an inclusive UTC time range.
//!
//! Reporting endpoints accept either a single `interval` expression or a
//! `start`/`end` pair. Expressions are absolute partial dates (`2014`,
//! `201405`, `20140526`) or offsets from now (`-1w`, `1h10s`). Every
//! function takes "now" explicitly except [`resolve_timespan`], which
//! samples the clock once per call.
//!
//! ## Modules
//!
//! - [`interval`] — classify and resolve a single expression
//! - [`duration`] — relative offset grammar and arithmetic
//! - [`resolver`] — `interval` vs. `start`/`end` dispatch over request parameters
//! - [`span`] — the resolved range
//! - [`error`] — Error types

pub mod duration;
pub mod error;
pub mod interval;
pub mod resolver;
pub mod span;

pub use duration::RelativeOffset;
pub use error::TimespanError;
pub use interval::{parse_interval, IntervalExpression};
pub use resolver::{resolve_timespan, resolve_timespan_at, ParamSource, TimespanRequest};
pub use span::Timespan;
