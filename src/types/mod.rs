pub mod calendar;
pub mod chart_range;
pub mod market;
pub mod range;
pub mod session_table;
pub mod timespan;
pub mod trading_hours;
