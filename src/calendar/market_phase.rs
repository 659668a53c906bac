use std::fmt;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::status_resolver::is_weekend;
use crate::types::calendar::CalendarStatus;
use crate::types::market::Market;
use crate::types::trading_hours::TradingSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarketPhase {
    Open,
    Closed,
    EarlyHours,
    AfterHours,
}

impl MarketPhase {
    pub fn at(
        market: Market,
        session: &TradingSession,
        status: CalendarStatus,
        now: DateTime<Utc>,
    ) -> Self {
        if market.is_continuous() {
            return Self::Open;
        }

        let local = now.with_timezone(&session.timezone);
        if status == CalendarStatus::Closed || is_weekend(local.weekday()) {
            return Self::Closed;
        }

        let (open, close, after_hours_close) = match (status, session.early_close) {
            (CalendarStatus::EarlyClose, Some(early_close)) => (
                early_close.open,
                early_close.close,
                Some(early_close.after_hours_close),
            ),
            _ => (session.open, session.close, session.after_hours_close),
        };

        let time = local.time();
        if time >= open && time < close {
            Self::Open
        } else if session
            .early_hours_open
            .is_some_and(|early_hours_open| time >= early_hours_open && time < open)
        {
            Self::EarlyHours
        } else if after_hours_close.is_some_and(|after| time >= close && time < after) {
            Self::AfterHours
        } else {
            Self::Closed
        }
    }
}

impl fmt::Display for MarketPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Closed => write!(f, "closed"),
            Self::EarlyHours => write!(f, "early-hours"),
            Self::AfterHours => write!(f, "after-hours"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::America::New_York;
    use chrono_tz::Europe::London;

    fn ny(d: u32, h: u32, m: u32) -> DateTime<Utc> {
        New_York
            .with_ymd_and_hms(2024, 7, d, h, m, 0)
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn regular_day_phases() {
        let session = TradingSession::us_equities(New_York);
        let phase = |h, m| MarketPhase::at(Market::Stocks, &session, CalendarStatus::Open, ny(17, h, m));

        assert_eq!(phase(3, 59), MarketPhase::Closed);
        assert_eq!(phase(4, 0), MarketPhase::EarlyHours);
        assert_eq!(phase(9, 30), MarketPhase::Open);
        assert_eq!(phase(16, 0), MarketPhase::AfterHours);
        assert_eq!(phase(20, 0), MarketPhase::Closed);
    }

    #[test]
    fn early_close_day_moves_after_hours_forward() {
        let session = TradingSession::us_equities(New_York);
        let phase =
            |h| MarketPhase::at(Market::Options, &session, CalendarStatus::EarlyClose, ny(3, h, 0));

        assert_eq!(phase(12), MarketPhase::Open);
        assert_eq!(phase(13), MarketPhase::AfterHours);
        assert_eq!(phase(17), MarketPhase::Closed);
    }

    #[test]
    fn closed_days_and_weekends() {
        let session = TradingSession::us_equities(New_York);
        assert_eq!(
            MarketPhase::at(Market::Stocks, &session, CalendarStatus::Closed, ny(4, 11, 0)),
            MarketPhase::Closed
        );
        assert_eq!(
            MarketPhase::at(Market::Stocks, &session, CalendarStatus::Open, ny(20, 11, 0)),
            MarketPhase::Closed
        );
    }

    #[test]
    fn continuous_markets_are_always_open() {
        let session = TradingSession::continuous(London);
        assert_eq!(
            MarketPhase::at(Market::Crypto, &session, CalendarStatus::Closed, ny(20, 23, 59)),
            MarketPhase::Open
        );
    }
}
