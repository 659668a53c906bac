use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono_tz::America::New_York;
use chrono_tz::Europe::London;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::errors::RangeError;
use crate::types::market::Market;
use crate::types::trading_hours::TradingSession;

/// Trading sessions for every market. Passed by reference into each
/// resolution; timezone overrides return a new table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketSessionTable {
    pub crypto: TradingSession,
    pub fx: TradingSession,
    pub stocks: TradingSession,
    pub options: TradingSession,
}

impl Default for MarketSessionTable {
    fn default() -> Self {
        Self {
            crypto: TradingSession::continuous(London),
            fx: TradingSession::continuous(London),
            stocks: TradingSession::us_equities(New_York),
            options: TradingSession::us_equities(New_York),
        }
    }
}

impl MarketSessionTable {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read trading sessions {}", path.display()))?;

        let table: MarketSessionTable = serde_yaml::from_str(&raw)
            .with_context(|| format!("failed to parse trading sessions {}", path.display()))?;

        table
            .validate()
            .context("trading sessions config validation failed")?;

        Ok(table)
    }

    pub fn get(&self, market: Market) -> &TradingSession {
        match market {
            Market::Crypto => &self.crypto,
            Market::Fx => &self.fx,
            Market::Stocks => &self.stocks,
            Market::Options => &self.options,
        }
    }

    fn get_mut(&mut self, market: Market) -> &mut TradingSession {
        match market {
            Market::Crypto => &mut self.crypto,
            Market::Fx => &mut self.fx,
            Market::Stocks => &mut self.stocks,
            Market::Options => &mut self.options,
        }
    }

    /// Copy of this table with every market moved to `timezone`.
    pub fn with_timezone(&self, timezone: Tz) -> Self {
        let mut table = self.clone();
        for market in Market::ALL {
            table.get_mut(market).timezone = timezone;
        }
        table
    }

    /// Copy of this table with only `market` moved to `timezone`.
    pub fn with_market_timezone(&self, market: Market, timezone: Tz) -> Self {
        let mut table = self.clone();
        table.get_mut(market).timezone = timezone;
        table
    }

    pub fn validate(&self) -> Result<(), RangeError> {
        for market in Market::ALL {
            self.get(market)
                .validate()
                .map_err(|reason| RangeError::InvalidSession { market, reason })?;
        }
        Ok(())
    }
}
