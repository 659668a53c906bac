use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::types::calendar::CalendarStatus;
use crate::types::chart_range::ChartRange;
use crate::types::market::Market;
use crate::types::timespan::Timespan;

/// Calendar dates for Custom ranges and the second phase of Max.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomDates {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartRangeRequest {
    pub range: ChartRange,
    pub market: Market,
    pub extended_hours: bool,

    /// Previous trading day as epoch seconds. Required for 1D on session markets.
    pub previous_close: Option<i64>,

    /// Today's calendar status. Required for 1D on session markets.
    pub today_status: Option<CalendarStatus>,

    pub custom_dates: Option<CustomDates>,
}

impl ChartRangeRequest {
    pub fn new(range: ChartRange, market: Market) -> Self {
        Self {
            range,
            market,
            extended_hours: false,
            previous_close: None,
            today_status: None,
            custom_dates: None,
        }
    }

    pub fn extended_hours(mut self, extended_hours: bool) -> Self {
        self.extended_hours = extended_hours;
        self
    }

    pub fn with_calendar(mut self, previous_close: i64, today_status: CalendarStatus) -> Self {
        self.previous_close = Some(previous_close);
        self.today_status = Some(today_status);
        self
    }

    pub fn with_custom_dates(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.custom_dates = Some(CustomDates { from, to });
        self
    }
}

/// Query window in epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedRange {
    pub from: i64,
    pub to: i64,
}

impl ResolvedRange {
    pub fn new<Tz: chrono::TimeZone>(from: DateTime<Tz>, to: DateTime<Tz>) -> Self {
        Self {
            from: from.timestamp_millis(),
            to: to.timestamp_millis(),
        }
    }

    pub fn elapsed_minutes(&self) -> f64 {
        (self.to - self.from) as f64 / 60_000.0
    }

    pub fn from_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.from)
    }

    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.to)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub timespan: Timespan,
    pub multiplier: u32,
    pub from: i64,
    pub to: i64,

    /// Estimated number of bars the chart will draw
    pub pixels: f64,
}
