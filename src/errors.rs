use chrono::{NaiveDate, NaiveTime};
use chrono_tz::Tz;
use thiserror::Error;

use crate::types::calendar::Exchange;
use crate::types::chart_range::ChartRange;
use crate::types::market::Market;

/// Failures reported by the range engine. None of them are transient: each
/// one means the caller supplied input the engine cannot turn into a valid
/// range or resolution.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RangeError {
    /// A parameter the requested range needs was not supplied, e.g. the
    /// previous close for a session market's 1D range, or custom dates for
    /// Custom and Max.
    #[error("missing required parameter `{parameter}` for {range} on {market}")]
    MissingRequiredParameter {
        parameter: &'static str,
        range: ChartRange,
        market: Market,
    },

    /// The backward walk for the previous trading day ran past its cap.
    #[error("no trading day found for {exchange} within {max_lookback_days} days")]
    UnresolvableCalendarSearch {
        exchange: Exchange,
        max_lookback_days: u32,
    },

    /// Every density band and every timespan/multiplier pair was rejected.
    #[error("no resolution fits {elapsed_minutes:.2} elapsed minutes")]
    NoResolutionFound { elapsed_minutes: f64 },

    #[error("custom range starts on {from} after it ends on {to}")]
    InvertedCustomDates { from: NaiveDate, to: NaiveDate },

    #[error("timestamp {0} is out of range")]
    InvalidTimestamp(i64),

    #[error("unsupported chart range: {0}")]
    UnsupportedRange(String),

    #[error("unsupported market: {0}")]
    UnsupportedMarket(String),

    /// The session time falls in a daylight-saving gap on that date.
    #[error("local time {time} does not exist on {date} in {timezone}")]
    NonexistentLocalTime {
        date: NaiveDate,
        time: NaiveTime,
        timezone: Tz,
    },

    #[error("invalid trading session for {market}: {reason}")]
    InvalidSession { market: Market, reason: String },
}
