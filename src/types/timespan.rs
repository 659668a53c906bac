use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timespan {
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Quarter,
    Year,
}

impl Timespan {
    /// Finest to coarsest; the selector walks them in this order.
    pub const ALL: [Timespan; 7] = [
        Timespan::Minute,
        Timespan::Hour,
        Timespan::Day,
        Timespan::Week,
        Timespan::Month,
        Timespan::Quarter,
        Timespan::Year,
    ];

    /// Length in minutes. Months are 30.4 days and quarters three of those.
    pub fn minutes(self) -> u32 {
        match self {
            Self::Minute => 1,
            Self::Hour => 60,
            Self::Day => 1_440,
            Self::Week => 10_080,
            Self::Month => 43_800,
            Self::Quarter => 131_400,
            Self::Year => 525_600,
        }
    }

    pub fn multipliers(self) -> &'static [u32] {
        match self {
            Self::Minute => &[1, 2, 3, 5, 10, 15, 30],
            Self::Hour => &[1, 2, 3, 4, 6, 8, 12],
            Self::Day => &[1, 2, 3, 4, 5, 6],
            Self::Week => &[1, 2],
            Self::Month => &[1, 2, 3, 4, 6],
            Self::Quarter => &[1, 2],
            Self::Year => &[1],
        }
    }

    pub fn is_intraday(self) -> bool {
        matches!(self, Self::Minute | Self::Hour)
    }
}

impl fmt::Display for Timespan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Quarter => "quarter",
            Self::Year => "year",
        };
        f.write_str(name)
    }
}
