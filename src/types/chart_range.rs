use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Days, Months, TimeDelta, TimeZone};
use serde::{Deserialize, Serialize};

use crate::errors::RangeError;

/// The symbolic ranges a chart can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartRange {
    #[serde(rename = "1D")]
    OneDay,
    #[serde(rename = "1W")]
    OneWeek,
    #[serde(rename = "1M")]
    OneMonth,
    #[serde(rename = "6M")]
    SixMonths,
    #[serde(rename = "YTD")]
    YearToDate,
    #[serde(rename = "1Y")]
    OneYear,
    #[serde(rename = "5Y")]
    FiveYears,
    Max,
    Custom,
}

impl ChartRange {
    pub const ALL: [ChartRange; 9] = [
        ChartRange::OneDay,
        ChartRange::OneWeek,
        ChartRange::OneMonth,
        ChartRange::SixMonths,
        ChartRange::YearToDate,
        ChartRange::OneYear,
        ChartRange::FiveYears,
        ChartRange::Max,
        ChartRange::Custom,
    ];

    pub fn token(self) -> &'static str {
        match self {
            Self::OneDay => "1D",
            Self::OneWeek => "1W",
            Self::OneMonth => "1M",
            Self::SixMonths => "6M",
            Self::YearToDate => "YTD",
            Self::OneYear => "1Y",
            Self::FiveYears => "5Y",
            Self::Max => "Max",
            Self::Custom => "Custom",
        }
    }

    /// Count and unit to step back from now. Only the count-bearing ranges
    /// (1D, 1W, 1M, 6M, 1Y, 5Y) have one.
    pub fn offset(self) -> Result<RangeOffset, RangeError> {
        RangeOffset::parse(self.token())
    }
}

impl fmt::Display for ChartRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for ChartRange {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|range| range.token() == s)
            .ok_or_else(|| RangeError::UnsupportedRange(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeUnit {
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Quarter,
    Year,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeOffset {
    pub count: u32,
    pub unit: RangeUnit,
}

impl RangeOffset {
    /// Splits a token such as `6M` into its count and unit.
    ///
    /// `M` (month) and `Q` (quarter) are matched case-sensitively so that
    /// `m` stays a minute; every other unit is case-insensitive. Day counts
    /// are reduced by one so that `1D` means "start of today".
    pub fn parse(token: &str) -> Result<Self, RangeError> {
        let unsupported = || RangeError::UnsupportedRange(token.to_string());

        let digits: String = token.chars().filter(|c| c.is_ascii_digit()).collect();
        let text: String = token.chars().filter(|c| !c.is_ascii_digit()).collect();
        if digits.is_empty() {
            return Err(unsupported());
        }
        let count: u32 = digits.parse().map_err(|_| unsupported())?;

        let unit = match text.as_str() {
            "M" => RangeUnit::Month,
            "Q" => RangeUnit::Quarter,
            other => match other.to_lowercase().as_str() {
                "m" => RangeUnit::Minute,
                "h" => RangeUnit::Hour,
                "d" => RangeUnit::Day,
                "w" => RangeUnit::Week,
                "y" => RangeUnit::Year,
                _ => return Err(unsupported()),
            },
        };

        let count = match unit {
            RangeUnit::Day => count.saturating_sub(1),
            _ => count,
        };

        Ok(Self { count, unit })
    }

    /// Steps `count` units back from `at`, clamping to month ends the way
    /// calendar arithmetic does (31 March minus one month is 29 February in
    /// a leap year).
    pub fn subtract_from<Tz: TimeZone>(&self, at: DateTime<Tz>) -> Option<DateTime<Tz>> {
        let count = self.count;
        match self.unit {
            RangeUnit::Minute => at.checked_sub_signed(TimeDelta::try_minutes(count.into())?),
            RangeUnit::Hour => at.checked_sub_signed(TimeDelta::try_hours(count.into())?),
            RangeUnit::Day => at.checked_sub_days(Days::new(count.into())),
            RangeUnit::Week => at.checked_sub_days(Days::new(u64::from(count) * 7)),
            RangeUnit::Month => at.checked_sub_months(Months::new(count)),
            RangeUnit::Quarter => at.checked_sub_months(Months::new(count.checked_mul(3)?)),
            RangeUnit::Year => at.checked_sub_months(Months::new(count.checked_mul(12)?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::America::New_York;

    #[test]
    fn parses_count_bearing_ranges() {
        let expected = [
            (ChartRange::OneDay, 0, RangeUnit::Day),
            (ChartRange::OneWeek, 1, RangeUnit::Week),
            (ChartRange::OneMonth, 1, RangeUnit::Month),
            (ChartRange::SixMonths, 6, RangeUnit::Month),
            (ChartRange::OneYear, 1, RangeUnit::Year),
            (ChartRange::FiveYears, 5, RangeUnit::Year),
        ];
        for (range, count, unit) in expected {
            assert_eq!(range.offset(), Ok(RangeOffset { count, unit }), "{range}");
        }
    }

    #[test]
    fn ranges_without_count_have_no_offset() {
        for range in [ChartRange::YearToDate, ChartRange::Max, ChartRange::Custom] {
            assert!(matches!(range.offset(), Err(RangeError::UnsupportedRange(_))));
        }
    }

    #[test]
    fn month_and_minute_differ_by_case() {
        assert_eq!(RangeOffset::parse("15m").unwrap().unit, RangeUnit::Minute);
        assert_eq!(RangeOffset::parse("15M").unwrap().unit, RangeUnit::Month);
        assert_eq!(RangeOffset::parse("2Q").unwrap().unit, RangeUnit::Quarter);
        assert_eq!(RangeOffset::parse("4H").unwrap().unit, RangeUnit::Hour);
        assert_eq!(
            RangeOffset::parse("3D").unwrap(),
            RangeOffset { count: 2, unit: RangeUnit::Day }
        );
        assert!(RangeOffset::parse("2q").is_err());
        assert!(RangeOffset::parse("3X").is_err());
    }

    #[test]
    fn month_subtraction_clamps_to_month_end() {
        let at = New_York.with_ymd_and_hms(2024, 3, 31, 12, 0, 0).unwrap();
        let offset = RangeOffset { count: 1, unit: RangeUnit::Month };
        let stepped = offset.subtract_from(at).unwrap();
        assert_eq!(stepped.date_naive().to_string(), "2024-02-29");
    }

    #[test]
    fn round_trips_tokens() {
        for range in ChartRange::ALL {
            assert_eq!(range.token().parse::<ChartRange>(), Ok(range));
        }
        assert!("2W".parse::<ChartRange>().is_err());
    }
}
