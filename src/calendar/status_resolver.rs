use chrono::{Datelike, Days, NaiveTime, TimeZone, Weekday};
use chrono_tz::Tz;
use tracing::debug;

use crate::clock::Clock;
use crate::errors::RangeError;
use crate::types::calendar::{CalendarStatus, Exchange, MarketCalendar};

pub const DEFAULT_MAX_LOOKBACK_DAYS: u32 = 10;

const NOON: NaiveTime = match NaiveTime::from_hms_opt(12, 0, 0) {
    Some(t) => t,
    None => panic!("Invalid time"),
};

/// Answers calendar questions about "today" for an exchange.
pub struct CalendarStatusResolver<'a> {
    calendar: &'a MarketCalendar,
    clock: &'a dyn Clock,
    max_lookback_days: u32,
}

impl<'a> CalendarStatusResolver<'a> {
    pub fn new(calendar: &'a MarketCalendar, clock: &'a dyn Clock) -> Self {
        Self {
            calendar,
            clock,
            max_lookback_days: DEFAULT_MAX_LOOKBACK_DAYS,
        }
    }

    pub fn with_max_lookback_days(mut self, max_lookback_days: u32) -> Self {
        self.max_lookback_days = max_lookback_days;
        self
    }

    /// Weekends are closed; weekdays take the calendar entry for today, or
    /// open when there is none.
    pub fn session_status_today(&self, timezone: Tz, exchange: Exchange) -> CalendarStatus {
        let today = self.clock.now().with_timezone(&timezone);

        if is_weekend(today.weekday()) {
            return CalendarStatus::Closed;
        }

        self.calendar
            .find(today.date_naive(), exchange)
            .map(|day| day.status)
            .unwrap_or(CalendarStatus::Open)
    }

    /// Most recent weekday before today that the calendar does not mark
    /// closed, as epoch seconds at the current local time of day.
    pub fn previous_close_date(&self, timezone: Tz, exchange: Exchange) -> Result<i64, RangeError> {
        let now = self.clock.now().with_timezone(&timezone);
        let today = now.date_naive();

        for days_back in 1..=self.max_lookback_days {
            let Some(date) = today.checked_sub_days(Days::new(days_back.into())) else {
                break;
            };

            if is_weekend(date.weekday()) || self.calendar.is_closed(date, exchange) {
                continue;
            }

            let instant = timezone
                .from_local_datetime(&date.and_time(now.time()))
                .earliest()
                .or_else(|| timezone.from_local_datetime(&date.and_time(NOON)).earliest())
                .ok_or(RangeError::NonexistentLocalTime {
                    date,
                    time: now.time(),
                    timezone,
                })?;

            debug!(%exchange, %date, days_back, "found previous trading day");
            return Ok(instant.timestamp());
        }

        Err(RangeError::UnresolvableCalendarSearch {
            exchange,
            max_lookback_days: self.max_lookback_days,
        })
    }
}

pub(crate) fn is_weekend(weekday: Weekday) -> bool {
    matches!(weekday, Weekday::Sat | Weekday::Sun)
}
