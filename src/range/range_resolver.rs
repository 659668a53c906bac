use chrono::{DateTime, Datelike, Days, Months, NaiveDate};
use chrono_tz::Tz;
use tracing::debug;

use crate::calendar::status_resolver::is_weekend;
use crate::clock::Clock;
use crate::errors::RangeError;
use crate::types::calendar::CalendarStatus;
use crate::types::chart_range::ChartRange;
use crate::types::range::{ChartRangeRequest, ResolvedRange};
use crate::types::session_table::MarketSessionTable;
use crate::types::trading_hours::{SessionTimes, TradingSession};

/// First phase of the Max protocol looks this far back for the earliest bar.
pub const MAX_DISCOVERY_YEARS: u32 = 50;

/// Turns a symbolic chart range into concrete query bounds.
pub struct RangeResolver<'a> {
    sessions: &'a MarketSessionTable,
    clock: &'a dyn Clock,
}

impl<'a> RangeResolver<'a> {
    pub fn new(sessions: &'a MarketSessionTable, clock: &'a dyn Clock) -> Self {
        Self { sessions, clock }
    }

    pub fn resolve(&self, request: &ChartRangeRequest) -> Result<ResolvedRange, RangeError> {
        let session = self.sessions.get(request.market);
        let times = session.times(request.extended_hours);
        let now = self.clock.now().with_timezone(&session.timezone);
        let today = now.date_naive();

        let (from, to) = match request.range {
            ChartRange::Custom | ChartRange::Max => {
                let dates = request
                    .custom_dates
                    .ok_or_else(|| missing(request, "custom_dates"))?;
                if dates.from > dates.to {
                    return Err(RangeError::InvertedCustomDates {
                        from: dates.from,
                        to: dates.to,
                    });
                }
                (
                    session.at(dates.from, times.open)?,
                    session.at(dates.to, times.close)?,
                )
            }
            ChartRange::YearToDate => {
                let new_year = NaiveDate::from_ymd_opt(today.year(), 1, 1)
                    .ok_or_else(|| unsupported(request.range))?;
                (session.at(new_year, times.open)?.min(now), now)
            }
            ChartRange::OneDay if request.market.is_continuous() => {
                let yesterday = today
                    .checked_sub_days(Days::new(1))
                    .ok_or_else(|| unsupported(request.range))?;
                (session.at(yesterday, times.open)?, now)
            }
            ChartRange::OneDay => self.trading_day(request, session, times, now)?,
            range => {
                let start = range
                    .offset()?
                    .subtract_from(now)
                    .ok_or_else(|| unsupported(range))?;
                (session.at(start.date_naive(), times.open)?, now)
            }
        };

        let resolved = ResolvedRange::new(from, to);
        debug!(
            range = %request.range,
            market = %request.market,
            extended_hours = request.extended_hours,
            from = resolved.from,
            to = resolved.to,
            "resolved chart range"
        );

        Ok(resolved)
    }

    /// First phase of Max: a wide window ending now, used only to discover
    /// the earliest available date before re-requesting with custom dates.
    pub fn max_discovery_range(
        &self,
        request: &ChartRangeRequest,
    ) -> Result<ResolvedRange, RangeError> {
        let session = self.sessions.get(request.market);
        let times = session.times(request.extended_hours);
        let now = self.clock.now().with_timezone(&session.timezone);

        let start = now
            .checked_sub_months(Months::new(MAX_DISCOVERY_YEARS * 12))
            .ok_or_else(|| unsupported(ChartRange::Max))?;

        Ok(ResolvedRange::new(
            session.at(start.date_naive(), times.open)?,
            now,
        ))
    }

    /// 1D on a session market: today's session when it has started, the
    /// previous trading session otherwise.
    fn trading_day(
        &self,
        request: &ChartRangeRequest,
        session: &TradingSession,
        times: SessionTimes,
        now: DateTime<Tz>,
    ) -> Result<(DateTime<Tz>, DateTime<Tz>), RangeError> {
        let previous_close = request
            .previous_close
            .ok_or_else(|| missing(request, "previous_close"))?;
        let status = request
            .today_status
            .ok_or_else(|| missing(request, "today_status"))?;

        let today = now.date_naive();
        let today_open = session.at(today, times.open)?;
        let not_started = is_weekend(now.weekday()) || now < today_open;

        match status {
            CalendarStatus::Open if !not_started => {
                Ok((today_open, session.at(today, times.close)?))
            }
            CalendarStatus::EarlyClose if !not_started => {
                Ok((today_open, session.at(today, times.early_close)?))
            }
            _ => {
                let previous = DateTime::from_timestamp(previous_close, 0)
                    .ok_or(RangeError::InvalidTimestamp(previous_close))?
                    .with_timezone(&session.timezone)
                    .date_naive();
                debug!(%status, %previous, "using previous trading session");

                Ok((
                    session.at(previous, times.open)?,
                    session.at(previous, times.close)?,
                ))
            }
        }
    }
}

fn missing(request: &ChartRangeRequest, parameter: &'static str) -> RangeError {
    RangeError::MissingRequiredParameter {
        parameter,
        range: request.range,
        market: request.market,
    }
}

fn unsupported(range: ChartRange) -> RangeError {
    RangeError::UnsupportedRange(range.to_string())
}
