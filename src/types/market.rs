use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::errors::RangeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Market {
    Crypto,
    Fx,
    Stocks,
    Options,
}

impl Market {
    pub const ALL: [Market; 4] = [Market::Crypto, Market::Fx, Market::Stocks, Market::Options];

    /// Crypto and FX trade around the clock; stocks and options follow an
    /// exchange session and holiday calendar.
    pub fn is_continuous(self) -> bool {
        matches!(self, Self::Crypto | Self::Fx)
    }

    pub fn is_session_based(self) -> bool {
        !self.is_continuous()
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Crypto => write!(f, "crypto"),
            Self::Fx => write!(f, "fx"),
            Self::Stocks => write!(f, "stocks"),
            Self::Options => write!(f, "options"),
        }
    }
}

impl FromStr for Market {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "crypto" => Ok(Self::Crypto),
            "fx" | "forex" => Ok(Self::Fx),
            "stocks" => Ok(Self::Stocks),
            "options" => Ok(Self::Options),
            other => Err(RangeError::UnsupportedMarket(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn continuity_splits_markets() {
        assert!(Market::Crypto.is_continuous());
        assert!(Market::Fx.is_continuous());
        assert!(Market::Stocks.is_session_based());
        assert!(Market::Options.is_session_based());
    }

    #[test]
    fn parses_known_markets_and_rejects_others() {
        for market in Market::ALL {
            assert_eq!(market.to_string().parse::<Market>(), Ok(market));
        }
        assert_eq!(
            "futures".parse::<Market>(),
            Err(RangeError::UnsupportedMarket("futures".to_string()))
        );
    }
}
