//! Demo host: a live dashboard over a synthetic sales table.
//!
//! Run: `cargo run --example dashboard [config.yaml]`
//! Logs: `RUST_LOG=trueno_dash=debug cargo run --example dashboard 2> dash.log`
//!
//! Quit with `Esc` or `Ctrl-C`. Click the table's `< Prev` / `Next >` controls
//! to page through records.

use std::io::stdout;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use trueno_dash::prelude::*;

const DEMO_CONFIG: &str = r"
title: Regional sales (synthetic)
refresh_ms: 1000
redraw_ms: 250
rows_per_page: 6
widgets:
  - kind: scatter
    title: price vs units
    x_col: price
    y_col: units
  - kind: histogram
    title: price distribution
    value_col: price
    bins: 12
  - kind: radar
    title: revenue by region
    label_col: region
    value_col: revenue
  - kind: funnel
    title: pipeline
    value_col: units
  - kind: pie
    title: unit share
    value_col: units
  - kind: table
    title: records
";

const REGIONS: [&str; 6] = ["north", "south", "east", "west", "central", "online"];

fn init_tracing() {
    if std::env::var_os("RUST_LOG").is_none() {
        return;
    }
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Deterministic pseudo-random sales records that drift with `step`.
fn synthetic_snapshot(step: u64) -> DataSnapshot {
    let header = ["region", "price", "units", "revenue"]
        .map(String::from)
        .to_vec();
    let records = (0..24_u64)
        .map(|i| {
            let seed = (i * 7919 + step * 104_729) % 1000;
            let price = 5.0 + (seed as f64 / 1000.0) * 45.0;
            let units = 10 + (seed * 31 + i * 17) % 90;
            let region = REGIONS[(i as usize) % REGIONS.len()];
            vec![
                region.to_string(),
                format!("{price:.2}"),
                units.to_string(),
                format!("{:.0}", price * units as f64),
            ]
        })
        .collect();
    DataSnapshot::new(header, records)
}

fn main() -> Result<()> {
    init_tracing();

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| DashboardConfig::default_path().filter(|p| p.exists()));
    let config = match path {
        Some(path) => DashboardConfig::load(&path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => DashboardConfig::parse(DEMO_CONFIG)?,
    };

    let store = Arc::new(SnapshotStore::new(synthetic_snapshot(0)));
    let (dashboard, feeds) = Dashboard::from_config(&config, &store)?;

    let runtime = tokio::runtime::Runtime::new()?;
    let scheduler = {
        let _guard = runtime.enter();
        let mut scheduler = RefreshScheduler::new();
        for feed in feeds {
            scheduler.spawn_feed(feed);
        }

        let producer = Arc::clone(&store);
        let mut step = 0;
        scheduler.spawn("producer", config.refresh_interval(), move || {
            step += 1;
            producer.replace(synthetic_snapshot(step));
            Ok(())
        });
        scheduler
    };
    info!(tasks = scheduler.len(), "refresh tasks running");

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = run(&mut terminal, &dashboard, config.redraw_interval());

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(DisableMouseCapture)?;
    stdout().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    runtime.block_on(scheduler.stop());
    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    dashboard: &Dashboard,
    redraw: Duration,
) -> Result<()> {
    let mut last_draw: Option<Instant> = None;
    loop {
        if last_draw.map_or(true, |at| at.elapsed() >= redraw) {
            terminal.draw(|frame| {
                let area = frame.area();
                for (index, err) in dashboard.render(area, frame.buffer_mut()) {
                    debug!(panel = index, error = %err, "panel not drawn");
                }
            })?;
            last_draw = Some(Instant::now());
        }

        let timeout = last_draw.map_or(Duration::ZERO, |at| redraw.saturating_sub(at.elapsed()));
        if event::poll(timeout)? && dashboard.handle_event(&event::read()?) == Control::Quit {
            return Ok(());
        }
    }
}
