pub mod calendar;
pub mod clock;
pub mod errors;
pub mod range;
pub mod resolution;
pub mod types;

pub use calendar::market_phase::MarketPhase;
pub use calendar::status_resolver::CalendarStatusResolver;
pub use clock::{Clock, FixedClock, SystemClock};
pub use errors::RangeError;
pub use range::range_resolver::RangeResolver;
pub use resolution::resolution_selector::ResolutionSelector;
pub use types::range::{ChartRangeRequest, Resolution, ResolvedRange};
