use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Exchange {
    #[default]
    Nyse,
    Nasdaq,
}

impl fmt::Display for Exchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nyse => write!(f, "NYSE"),
            Self::Nasdaq => write!(f, "NASDAQ"),
        }
    }
}

impl FromStr for Exchange {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "NYSE" => Ok(Self::Nyse),
            "NASDAQ" => Ok(Self::Nasdaq),
            other => Err(anyhow!("unknown exchange: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CalendarStatus {
    Open,
    Closed,
    EarlyClose,
}

impl fmt::Display for CalendarStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Closed => write!(f, "closed"),
            Self::EarlyClose => write!(f, "early-close"),
        }
    }
}

/// One exception record from the exchange calendar feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub exchange: Exchange,
    pub status: CalendarStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketCalendar {
    pub days: Vec<CalendarDay>,
}

impl MarketCalendar {
    pub fn new(days: Vec<CalendarDay>) -> Self {
        Self { days }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read market calendar {}", path.display()))?;

        serde_yaml::from_str::<MarketCalendar>(&raw)
            .with_context(|| format!("failed to parse market calendar {}", path.display()))
    }

    pub fn find(&self, date: NaiveDate, exchange: Exchange) -> Option<&CalendarDay> {
        self.days
            .iter()
            .find(|day| day.date == date && day.exchange == exchange)
    }

    pub fn is_closed(&self, date: NaiveDate, exchange: Exchange) -> bool {
        self.days.iter().any(|day| {
            day.date == date && day.exchange == exchange && day.status == CalendarStatus::Closed
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_calendar_yaml() {
        let yaml = r#"
days:
  - { date: "2024-07-04", exchange: NYSE, status: closed }
  - { date: "2024-07-03", exchange: NYSE, status: early-close }
  - { date: "2024-07-04", exchange: NASDAQ, status: open }
"#;
        let path = std::env::temp_dir().join("chart_range_calendar.yml");
        fs::write(&path, yaml).unwrap();

        let calendar = MarketCalendar::from_file(&path).unwrap();
        let july_4 = NaiveDate::from_ymd_opt(2024, 7, 4).unwrap();
        assert_eq!(calendar.days.len(), 3);
        assert!(calendar.is_closed(july_4, Exchange::Nyse));
        assert!(!calendar.is_closed(july_4, Exchange::Nasdaq));
        assert_eq!(
            calendar
                .find(NaiveDate::from_ymd_opt(2024, 7, 3).unwrap(), Exchange::Nyse)
                .map(|day| day.status),
            Some(CalendarStatus::EarlyClose)
        );
    }

    #[test]
    fn shipped_calendar_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config/calendar.yml");
        let calendar = MarketCalendar::from_file(path).unwrap();
        let christmas = NaiveDate::from_ymd_opt(2026, 12, 25).unwrap();
        assert!(calendar.is_closed(christmas, Exchange::Nyse));
    }

    #[test]
    fn missing_calendar_file_is_reported() {
        let error = MarketCalendar::from_file("/nonexistent/calendar.yml").unwrap_err();
        assert!(error.to_string().contains("failed to read market calendar"));
    }

    #[test]
    fn parses_exchange_names() {
        assert_eq!("nasdaq".parse::<Exchange>().unwrap(), Exchange::Nasdaq);
        assert!("LSE".parse::<Exchange>().is_err());
    }
}
