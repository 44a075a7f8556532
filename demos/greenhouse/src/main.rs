//! greenhouse: command-line driver for the mars_garden growth simulator.
//!
//! ```text
//! greenhouse generate --out data/env            # tabulate one synthetic Martian year
//! greenhouse run --config greenhouse.toml       # simulate and write output
//! ```
//!
//! Set `RUST_LOG=info` (or `debug` for one line per day) to see progress.

mod config;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use log::info;

use mg_core::{CropId, Day, SOLS_PER_YEAR, SimConfig};
use mg_crop::{CropProfile, CropTable, CropTableBuilder, load_crops_csv};
use mg_env::{
    EnvironmentSeries, SyntheticEnvironment, SyntheticYear, load_environment_dir,
    write_environment_dir,
};
use mg_growth::DayConditions;
use mg_output::{CsvWriter, OutputWriter, SimOutputObserver};
use mg_sim::{GrowthRecord, ProgressLogger, SimBuilder, SimObserver};

use config::{GreenhouseConfig, OutputFormat};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(author, version, about = "Mars regolith crop growth simulator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Write solar, temperature and dust CSVs for one synthetic Martian year.
    Generate {
        /// Directory for the three CSV files
        #[arg(long, default_value = "data/env")]
        out: PathBuf,

        /// Seed for the dust noise
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Number of sols to tabulate
        #[arg(long, default_value_t = SOLS_PER_YEAR)]
        sols: u32,
    },

    /// Run a simulation.
    Run {
        /// Path to the TOML configuration (defaults apply when omitted)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the day count
        #[arg(long)]
        days: Option<u32>,

        /// Override the RNG seed
        #[arg(long)]
        seed: Option<u64>,

        /// Override the environment CSV directory
        #[arg(long)]
        env_dir: Option<PathBuf>,

        /// Override the output directory
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
}

// ── Observer ──────────────────────────────────────────────────────────────────

/// Output writer plus progress logging.
struct RunObserver<W: OutputWriter> {
    output:   SimOutputObserver<W>,
    progress: ProgressLogger,
    deaths:   Vec<(CropId, Day)>,
}

impl<W: OutputWriter> SimObserver for RunObserver<W> {
    fn on_sim_start(&mut self, config: &SimConfig, crops: &CropTable) {
        self.progress.on_sim_start(config, crops);
        self.output.on_sim_start(config, crops);
    }

    fn on_day_end(&mut self, day: Day, conditions: &DayConditions) {
        self.progress.on_day_end(day, conditions);
        self.output.on_day_end(day, conditions);
    }

    fn on_crop_death(&mut self, crop: CropId, day: Day) {
        self.deaths.push((crop, day));
        self.progress.on_crop_death(crop, day);
    }

    fn on_snapshot(&mut self, day: Day, crops: &CropTable, record: &GrowthRecord) {
        self.output.on_snapshot(day, crops, record);
    }

    fn on_sim_end(&mut self, record: &GrowthRecord) {
        self.progress.on_sim_end(record);
        self.output.on_sim_end(record);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    pretty_env_logger::init_timed();
    match Cli::parse().command {
        Command::Generate { out, seed, sols } => generate(out, seed, sols),
        Command::Run { config, days, seed, env_dir, out_dir } => {
            let mut cfg = match config {
                Some(path) => GreenhouseConfig::load(&path)?,
                None => GreenhouseConfig::default(),
            };
            if let Some(days) = days {
                cfg.sim.days = days;
            }
            if let Some(seed) = seed {
                cfg.sim.seed = seed;
            }
            if env_dir.is_some() {
                cfg.environment.dir = env_dir;
            }
            if let Some(dir) = out_dir {
                cfg.output.dir = dir;
            }
            run(cfg)
        }
    }
}

fn generate(out: PathBuf, seed: u64, sols: u32) -> Result<()> {
    if sols == 0 {
        bail!("--sols must be positive");
    }
    std::fs::create_dir_all(&out).with_context(|| format!("creating {}", out.display()))?;
    let year = SyntheticYear::generate(sols, seed);
    write_environment_dir(&out, &year)?;
    println!(
        "Wrote {sols} sols ({} temperature rows) to {}",
        year.temperature.len(),
        out.display()
    );
    Ok(())
}

fn run(cfg: GreenhouseConfig) -> Result<()> {
    #[cfg(feature = "parallel")]
    if let Some(n) = cfg.sim.num_threads {
        rayon::ThreadPoolBuilder::new().num_threads(n).build_global()?;
    }

    // 1. Crops.
    let profiles = match &cfg.crops.file {
        Some(path) => load_crops_csv(path)
            .with_context(|| format!("loading crops from {}", path.display()))?,
        None => CropProfile::mars_defaults(),
    };
    let mut builder = CropTableBuilder::new(cfg.sim.seed).crops(profiles);
    if cfg.crops.optimal_soil {
        builder = builder.optimal_soil();
    }
    let crops = builder.build()?;

    // 2. Environment.
    let environment: Box<dyn EnvironmentSeries> = match &cfg.environment.dir {
        Some(dir) => {
            let boundary = cfg.environment.boundary.to_boundary(cfg.sim.calendar.sols_per_year);
            let env = load_environment_dir(dir, boundary)
                .with_context(|| format!("loading environment from {}", dir.display()))?;
            info!("environment tables loaded from {}", dir.display());
            Box::new(env)
        }
        None => {
            info!("no environment directory configured, using closed-form generators");
            Box::new(SyntheticEnvironment { sols_per_year: cfg.sim.calendar.sols_per_year })
        }
    };

    // 3. Sim.
    let mut builder = SimBuilder::new(cfg.sim.clone(), crops, environment, cfg.model.build());
    if let Some(budget) = cfg.resources {
        builder = builder.resources(budget);
    }
    let sim = builder.build()?;

    println!("=== greenhouse: mars_garden ===");
    println!(
        "Crops: {}  |  Days: {}  |  Seed: {}",
        sim.crops.len(),
        cfg.sim.days,
        cfg.sim.seed
    );

    // 4. Output + run.
    std::fs::create_dir_all(&cfg.output.dir)
        .with_context(|| format!("creating {}", cfg.output.dir.display()))?;
    let progress = ProgressLogger::new(cfg.sim.output_interval_days.max(1).saturating_mul(10));
    let t0 = Instant::now();
    let (record, deaths) = match cfg.output.format {
        OutputFormat::Csv => {
            let writer = CsvWriter::new(&cfg.output.dir)?;
            run_with(&sim, writer, progress)?
        }
        #[cfg(feature = "sqlite")]
        OutputFormat::Sqlite => {
            let writer = mg_output::SqliteWriter::new(&cfg.output.dir)?;
            run_with(&sim, writer, progress)?
        }
        #[cfg(not(feature = "sqlite"))]
        OutputFormat::Sqlite => bail!("SQLite output requires the `sqlite` feature"),
    };
    println!("Simulation complete in {:.3} s", t0.elapsed().as_secs_f64());
    println!("Output written to {}", cfg.output.dir.display());
    println!();

    // 5. Final state table.
    let last = Day(cfg.sim.days - 1);
    println!("{:<12} {:>12} {:>10} {:>8}", "Crop", "Biomass kg", "Height m", "Died");
    println!("{}", "-".repeat(45));
    for (id, profile, _) in sim.crops.iter() {
        let died = deaths
            .iter()
            .find(|(crop, _)| *crop == id)
            .map_or_else(|| "-".to_string(), |(_, day)| day.to_string());
        println!(
            "{:<12} {:>12.5} {:>10.5} {:>8}",
            profile.name,
            record.biomass.get(id, last),
            record.height.get(id, last),
            died
        );
    }

    Ok(())
}

fn run_with<W, E, M>(
    sim:      &mg_sim::Sim<E, M>,
    writer:   W,
    progress: ProgressLogger,
) -> Result<(GrowthRecord, Vec<(CropId, Day)>)>
where
    W: OutputWriter,
    E: EnvironmentSeries,
    M: mg_growth::GrowthModel,
{
    let mut obs = RunObserver { output: SimOutputObserver::new(writer), progress, deaths: vec![] };
    let record = sim.run(&mut obs)?;
    if let Some(e) = obs.output.take_error() {
        return Err(e).context("writing simulation output");
    }
    Ok((record, obs.deaths))
}

#[cfg(test)]
mod tests {
    use mg_env::{DUST_FILE, SOLAR_FILE, TEMPERATURE_FILE};
    use mg_output::csv::{CONDITIONS_FILE, GROWTH_FILE};

    use super::*;
    use crate::config::BoundaryChoice;

    fn line_count(path: &std::path::Path) -> usize {
        std::fs::read_to_string(path).unwrap().lines().count()
    }

    #[test]
    fn generate_rejects_zero_sols() {
        let dir = tempfile::tempdir().unwrap();
        assert!(generate(dir.path().join("env"), 1, 0).is_err());
    }

    #[test]
    fn generated_tables_drive_a_run() {
        let dir = tempfile::tempdir().unwrap();
        let env_dir = dir.path().join("env");
        generate(env_dir.clone(), 7, 20).unwrap();
        for file in [SOLAR_FILE, TEMPERATURE_FILE, DUST_FILE] {
            assert!(env_dir.join(file).exists(), "{file} missing");
        }

        let out_dir = dir.path().join("out");
        let mut cfg = GreenhouseConfig::default();
        cfg.sim.days = 10;
        cfg.environment.dir = Some(env_dir);
        cfg.environment.boundary = BoundaryChoice::Clamp;
        cfg.output.dir = out_dir.clone();
        run(cfg).unwrap();

        // Header plus seven crops on days 0..=9.
        assert_eq!(line_count(&out_dir.join(GROWTH_FILE)), 1 + 7 * 10);
        assert_eq!(line_count(&out_dir.join(CONDITIONS_FILE)), 1 + 9);
    }

    #[test]
    fn huge_output_interval_runs() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = GreenhouseConfig::default();
        cfg.sim.days = 3;
        cfg.sim.output_interval_days = u32::MAX;
        cfg.output.dir = dir.path().to_path_buf();
        run(cfg).unwrap();
        // Only day 0 is a snapshot.
        assert_eq!(line_count(&dir.path().join(GROWTH_FILE)), 1 + 7);
    }

    #[test]
    fn rerun_overwrites_output() {
        let dir = tempfile::tempdir().unwrap();
        let config = |days| {
            let mut cfg = GreenhouseConfig::default();
            cfg.sim.days = days;
            cfg.output.dir = dir.path().to_path_buf();
            cfg
        };
        run(config(6)).unwrap();
        run(config(3)).unwrap();
        assert_eq!(line_count(&dir.path().join(GROWTH_FILE)), 1 + 7 * 3);
    }
}
