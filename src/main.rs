use std::path::PathBuf;

use anyhow::{Result, bail};
use chrono::NaiveDate;
use chrono_tz::Tz;
use clap::Parser;
use dotenvy::dotenv;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use chart_range::types::calendar::{CalendarStatus, Exchange, MarketCalendar};
use chart_range::types::chart_range::ChartRange;
use chart_range::types::market::Market;
use chart_range::types::session_table::MarketSessionTable;
use chart_range::{
    CalendarStatusResolver, ChartRangeRequest, Clock, MarketPhase, RangeResolver, Resolution,
    ResolutionSelector, ResolvedRange, SystemClock,
};

#[derive(Debug, Clone, Parser)]
struct Args {
    /// 1D, 1W, 1M, 6M, YTD, 1Y, 5Y, Max or Custom
    #[arg(long, default_value = "1D")]
    pub range: ChartRange,

    #[arg(long, value_enum, default_value = "stocks")]
    pub market: Market,

    #[arg(long)]
    pub extended_hours: bool,

    #[arg(long, value_enum, default_value = "nyse")]
    pub exchange: Exchange,

    /// YAML trading sessions; the built-in table when omitted
    #[arg(long)]
    pub sessions: Option<PathBuf>,

    /// YAML exchange calendar exceptions
    #[arg(long)]
    pub calendar: Option<PathBuf>,

    /// Move every market to this IANA timezone
    #[arg(long, value_parser = parse_timezone)]
    pub timezone: Option<Tz>,

    #[arg(long)]
    pub from: Option<NaiveDate>,

    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// Print the wide first-phase window for Max instead of resolving it
    #[arg(long)]
    pub discover_max: bool,
}

#[derive(Debug, Serialize)]
struct ChartQuery {
    range: ChartRange,
    market: Market,
    exchange: Exchange,
    calendar_status: CalendarStatus,
    phase: MarketPhase,
    window: ResolvedRange,
    resolution: Resolution,
}

fn parse_timezone(value: &str) -> Result<Tz, String> {
    value.parse::<Tz>().map_err(|error| error.to_string())
}

fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("chart_range=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let sessions = match &args.sessions {
        Some(path) => MarketSessionTable::from_file(path)?,
        None => MarketSessionTable::default(),
    };
    let sessions = match args.timezone {
        Some(timezone) => sessions.with_timezone(timezone),
        None => sessions,
    };
    let calendar = match &args.calendar {
        Some(path) => MarketCalendar::from_file(path)?,
        None => MarketCalendar::default(),
    };

    let clock = SystemClock;
    let session = sessions.get(args.market);
    let status_resolver = CalendarStatusResolver::new(&calendar, &clock);
    let calendar_status = status_resolver.session_status_today(session.timezone, args.exchange);

    let mut request =
        ChartRangeRequest::new(args.range, args.market).extended_hours(args.extended_hours);

    if args.market.is_session_based() {
        let previous_close = status_resolver.previous_close_date(session.timezone, args.exchange)?;
        request = request.with_calendar(previous_close, calendar_status);
    }

    match (args.from, args.to) {
        (Some(from), Some(to)) => request = request.with_custom_dates(from, to),
        (None, None) => {}
        _ => bail!("--from and --to must be given together"),
    }

    let resolver = RangeResolver::new(&sessions, &clock);
    let window = if args.discover_max {
        resolver.max_discovery_range(&request)?
    } else {
        resolver.resolve(&request)?
    };
    let resolution = ResolutionSelector::default().select(&window, args.market, args.range)?;
    let phase = MarketPhase::at(args.market, session, calendar_status, clock.now());

    info!(
        range = %args.range,
        market = %args.market,
        %phase,
        timespan = %resolution.timespan,
        multiplier = resolution.multiplier,
        "chart query ready"
    );

    let query = ChartQuery {
        range: args.range,
        market: args.market,
        exchange: args.exchange,
        calendar_status,
        phase,
        window,
        resolution,
    };
    println!("{}", serde_json::to_string_pretty(&query)?);

    Ok(())
}
