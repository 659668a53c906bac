use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::errors::RangeError;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarlyCloseSession {
    pub open: NaiveTime,
    pub close: NaiveTime,
    pub after_hours_close: NaiveTime,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradingSession {
    /// Regular session open, local to `timezone`
    pub open: NaiveTime,

    /// Regular session close, local to `timezone`
    pub close: NaiveTime,

    pub timezone: Tz,

    /// Pre-market open
    #[serde(default)]
    pub early_hours_open: Option<NaiveTime>,

    /// After-hours close
    #[serde(default)]
    pub after_hours_close: Option<NaiveTime>,

    /// Shortened session used on early-close calendar days
    #[serde(default)]
    pub early_close: Option<EarlyCloseSession>,
}

/// Open and close times after applying the extended-hours flag.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SessionTimes {
    pub open: NaiveTime,
    pub close: NaiveTime,
    pub early_close: NaiveTime,
}

impl TradingSession {
    pub fn continuous(timezone: Tz) -> Self {
        Self {
            open: const_time(0, 0, 0),
            close: const_time(23, 59, 59),
            timezone,
            early_hours_open: None,
            after_hours_close: None,
            early_close: None,
        }
    }

    pub fn us_equities(timezone: Tz) -> Self {
        Self {
            open: const_time(9, 30, 0),
            close: const_time(16, 0, 0),
            timezone,
            early_hours_open: Some(const_time(4, 0, 0)),
            after_hours_close: Some(const_time(20, 0, 0)),
            early_close: Some(EarlyCloseSession {
                open: const_time(9, 30, 0),
                close: const_time(13, 0, 0),
                after_hours_close: const_time(17, 0, 0),
            }),
        }
    }

    pub fn has_extended_hours(&self) -> bool {
        self.early_hours_open.is_some() && self.after_hours_close.is_some()
    }

    /// Extended times replace the regular ones only when the session defines
    /// both an early-hours open and an after-hours close.
    pub fn times(&self, extended_hours: bool) -> SessionTimes {
        match (extended_hours, self.early_hours_open, self.after_hours_close) {
            (true, Some(early_hours_open), Some(after_hours_close)) => SessionTimes {
                open: early_hours_open,
                close: after_hours_close,
                early_close: self
                    .early_close
                    .map(|session| session.after_hours_close)
                    .unwrap_or(self.close),
            },
            _ => SessionTimes {
                open: self.open,
                close: self.close,
                early_close: self
                    .early_close
                    .map(|session| session.close)
                    .unwrap_or(self.close),
            },
        }
    }

    /// The instant `time` on `date` in this session's timezone. Times that
    /// occur twice on a DST change resolve to the earlier one.
    pub fn at(&self, date: NaiveDate, time: NaiveTime) -> Result<DateTime<Tz>, RangeError> {
        self.timezone
            .from_local_datetime(&date.and_time(time))
            .earliest()
            .ok_or(RangeError::NonexistentLocalTime {
                date,
                time,
                timezone: self.timezone,
            })
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.open > self.close {
            return Err(format!("open {} is after close {}", self.open, self.close));
        }
        if let Some(early_hours_open) = self.early_hours_open {
            if early_hours_open > self.open {
                return Err(format!(
                    "early hours open {early_hours_open} is after open {}",
                    self.open
                ));
            }
        }
        if let Some(after_hours_close) = self.after_hours_close {
            if after_hours_close < self.close {
                return Err(format!(
                    "after hours close {after_hours_close} is before close {}",
                    self.close
                ));
            }
        }
        if let Some(early_close) = self.early_close {
            if early_close.open > early_close.close {
                return Err(format!(
                    "early close open {} is after early close {}",
                    early_close.open, early_close.close
                ));
            }
            if early_close.after_hours_close < early_close.close {
                return Err(format!(
                    "early close after hours {} is before early close {}",
                    early_close.after_hours_close, early_close.close
                ));
            }
        }
        Ok(())
    }
}

const fn const_time(hour: u32, min: u32, sec: u32) -> NaiveTime {
    match NaiveTime::from_hms_opt(hour, min, sec) {
        Some(t) => t,
        None => panic!("Invalid time"),
    }
}
