//! smallville — a runnable scenario for the microsimulation.
//!
//! Builds a synthetic two-region town (see `population`), runs the standard
//! yearly pipeline over it and writes year summaries, event counts and trace
//! lines to `--out`.
//!
//! ```text
//! smallville --years 20 --households 5000 --seed 7 --out output/smallville
//! smallville --config scenario.json --log-level debug
//! ```

mod population;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use log::{LevelFilter, info};

use ms_core::Year;
use ms_model::Counts;
use ms_output::{OutputWriter, SimOutputObserver};
use ms_sim::{ScenarioConfig, SimBuilder, SimObserver};

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "smallville", about = "Run the smallville housing and population scenario")]
struct Args {
    /// Scenario JSON; omitted sections keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Years to simulate, overriding the scenario's end year.
    #[arg(long)]
    years: Option<i32>,

    /// Master seed, overriding the scenario's.
    #[arg(long)]
    seed: Option<u64>,

    /// Base-year households.
    #[arg(long, default_value_t = 2_000)]
    households: u32,

    /// Output directory, created if missing.
    #[arg(long, default_value = "output/smallville")]
    out: PathBuf,

    /// Write `output.db` instead of CSV files.
    #[cfg(feature = "sqlite")]
    #[arg(long)]
    sqlite: bool,

    /// One of off, error, warn, info, debug, trace.
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn init_logging(level: &str) -> Result<()> {
    let level: LevelFilter = level.parse().map_err(|_| anyhow!("unknown log level `{level}`"))?;
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[{:<5} {}] {}", record.level(), record.target(), message))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()
        .map_err(|e| anyhow!("installing the logger: {e}"))
}

// ── Observer wrapper to print progress ───────────────────────────────────────

/// Forwards to the output observer and keeps the population per year for
/// the closing table.
struct ProgressObserver<W: OutputWriter> {
    inner:   SimOutputObserver<W>,
    history: Vec<(Year, usize, usize, usize)>,
}

impl<W: OutputWriter> SimObserver for ProgressObserver<W> {
    fn on_year_start(&mut self, year: Year) {
        self.inner.on_year_start(year);
    }

    fn on_year_end(&mut self, year: Year, counts: &Counts, trace: &[ms_model::TraceLine]) {
        self.inner.on_year_end(year, counts, trace);
    }

    fn on_snapshot(&mut self, year: Year, state: &ms_model::SimulationState) {
        let r = &state.registry;
        self.history.push((year, r.person_count(), r.household_count(), r.vacant_dwellings().len()));
        self.inner.on_snapshot(year, state);
    }

    fn on_sim_end(&mut self, final_year: Year, totals: &Counts) {
        self.inner.on_sim_end(final_year, totals);
    }
}

fn run<W: OutputWriter>(mut sim: ms_sim::Sim, writer: W) -> Result<()> {
    let mut obs = ProgressObserver { inner: SimOutputObserver::new(writer), history: Vec::new() };

    let t0 = Instant::now();
    sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        bail!("writing output: {e}");
    }
    info!("simulation complete in {:.3} s", elapsed.as_secs_f64());

    println!("{:<6} {:>9} {:>11} {:>8}", "Year", "Persons", "Households", "Vacant");
    println!("{}", "-".repeat(37));
    for (year, persons, households, vacant) in &obs.history {
        println!("{:<6} {persons:>9} {households:>11} {vacant:>8}", year.0);
    }
    Ok(())
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level)?;

    let mut config = match &args.config {
        Some(path) => ScenarioConfig::from_json_path(path)?,
        None => ScenarioConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.sim.seed = seed;
    }
    if let Some(years) = args.years {
        config.sim.end_year = Year(config.sim.start_year.0 + years);
    }
    config.validate()?;

    let geography = population::geography()?;
    let registry = population::build(args.households, config.sim.seed, config.registry.max_quality, &geography)
        .context("building the base-year population")?;
    info!(
        "smallville: {} persons in {} households, {} dwellings, {} jobs",
        registry.person_count(),
        registry.household_count(),
        registry.dwelling_count(),
        registry.job_count()
    );

    let sim = SimBuilder::new(config, registry, geography).build()?;
    info!("pipeline: {}", sim.model_names().join(" → "));

    std::fs::create_dir_all(&args.out).with_context(|| format!("creating {}", args.out.display()))?;
    let out: &Path = &args.out;

    #[cfg(feature = "sqlite")]
    if args.sqlite {
        return run(sim, ms_output::SqliteWriter::new(out)?);
    }
    run(sim, ms_output::CsvWriter::new(out)?)
}
