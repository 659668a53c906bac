pub mod market_phase;
pub mod status_resolver;
