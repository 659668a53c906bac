use tracing::debug;

use crate::errors::RangeError;
use crate::types::chart_range::ChartRange;
use crate::types::market::Market;
use crate::types::range::{Resolution, ResolvedRange};
use crate::types::timespan::Timespan;

/// Length of a regular equity session, used to compress wall-clock minutes
/// into trading minutes for intraday timespans.
pub const TRADING_DAY_HOURS: f64 = 6.5;

/// Acceptable bar counts, both bounds exclusive.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DensityBand {
    pub min_pixels: f64,
    pub max_pixels: f64,
}

impl DensityBand {
    pub const fn new(min_pixels: f64, max_pixels: f64) -> Self {
        Self {
            min_pixels,
            max_pixels,
        }
    }

    pub fn contains(&self, pixels: f64) -> bool {
        pixels > self.min_pixels && pixels < self.max_pixels
    }
}

pub const DEFAULT_BANDS: [DensityBand; 4] = [
    DensityBand::new(80.0, 120.0),
    DensityBand::new(70.0, 140.0),
    DensityBand::new(60.0, 160.0),
    DensityBand::new(55.0, 170.0),
];

/// Picks the bar size for a query window. Bands are tried in order, and
/// within a band the first timespan/multiplier pair that fits wins.
#[derive(Debug, Clone)]
pub struct ResolutionSelector {
    bands: Vec<DensityBand>,
}

impl Default for ResolutionSelector {
    fn default() -> Self {
        Self::new(DEFAULT_BANDS.to_vec())
    }
}

impl ResolutionSelector {
    pub fn new(bands: Vec<DensityBand>) -> Self {
        Self { bands }
    }

    pub fn select(
        &self,
        range: &ResolvedRange,
        market: Market,
        chart_range: ChartRange,
    ) -> Result<Resolution, RangeError> {
        let elapsed_minutes = range.elapsed_minutes();

        for band in &self.bands {
            for timespan in Timespan::ALL {
                let adjustment = trading_time_adjustment(timespan, market, chart_range);
                let span_minutes = f64::from(timespan.minutes());

                for &multiplier in timespan.multipliers() {
                    let pixels =
                        (elapsed_minutes * adjustment) / (f64::from(multiplier) * span_minutes);
                    if band.contains(pixels) {
                        debug!(
                            %timespan,
                            multiplier,
                            pixels,
                            min_pixels = band.min_pixels,
                            max_pixels = band.max_pixels,
                            "selected resolution"
                        );

                        return Ok(Resolution {
                            timespan,
                            multiplier,
                            from: range.from,
                            to: range.to,
                            pixels,
                        });
                    }
                }
            }
        }

        Err(RangeError::NoResolutionFound { elapsed_minutes })
    }
}

// Session markets only trade ~6.5 of 24 hours, so multi-day windows hold far
// fewer intraday bars than their wall-clock length suggests.
fn trading_time_adjustment(timespan: Timespan, market: Market, chart_range: ChartRange) -> f64 {
    if timespan.is_intraday() && market.is_session_based() && chart_range != ChartRange::OneDay {
        1.0 / (24.0 / TRADING_DAY_HOURS)
    } else {
        1.0
    }
}
