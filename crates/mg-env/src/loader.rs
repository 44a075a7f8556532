//! CSV environment loader and writer.
//!
//! # CSV format
//!
//! Three files, each with a header row and one row per sample, sorted
//! ascending by sol (then hour).  Columns are read by position, so the header
//! text is informational only.
//!
//! ```csv
//! Sol,Solar Radiation          Sol,Hour,Temperature          Sol,Dust Opacity
//! 0,426.5                      0,0,-54.0                     0,4.97
//! 1,429.2                      0,1,-77.0                     1,5.31
//! ```
//!
//! Rows that are out of order are rejected rather than sorted: a shuffled
//! file usually means a broken generator.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::Writer;
use log::info;

use crate::{Boundary, EnvError, EnvResult, SampleTable, SyntheticYear, TableEnvironment};

pub const SOLAR_FILE: &str = "solar_radiation.csv";
pub const TEMPERATURE_FILE: &str = "temperature.csv";
pub const DUST_FILE: &str = "dust_storm.csv";

// ── Readers ───────────────────────────────────────────────────────────────────

/// Load a `(sol, value)` table from a CSV file.
pub fn load_daily_csv(path: &Path, name: &str) -> EnvResult<SampleTable> {
    let file = File::open(path).map_err(EnvError::Io)?;
    load_daily_reader(file, name)
}

/// Like [`load_daily_csv`] but accepts any `Read` source.
pub fn load_daily_reader<R: Read>(reader: R, name: &str) -> EnvResult<SampleTable> {
    let rows = read_rows::<R, (f64, f64)>(reader, name)?;
    SampleTable::new(name, rows)
}

/// Load a `(sol, hour, value)` table from a CSV file.
pub fn load_hourly_csv(path: &Path, name: &str) -> EnvResult<SampleTable> {
    let file = File::open(path).map_err(EnvError::Io)?;
    load_hourly_reader(file, name)
}

/// Like [`load_hourly_csv`] but accepts any `Read` source.
pub fn load_hourly_reader<R: Read>(reader: R, name: &str) -> EnvResult<SampleTable> {
    let rows = read_rows::<R, (f64, f64, f64)>(reader, name)?;
    TableEnvironment::hourly_table(name, rows)
}

/// Load the three standard files from `dir` and apply `boundary` to each.
pub fn load_environment_dir(dir: &Path, boundary: Boundary) -> EnvResult<TableEnvironment> {
    let solar = load_daily_csv(&dir.join(SOLAR_FILE), "solar")?.with_boundary(boundary)?;
    let temperature =
        load_hourly_csv(&dir.join(TEMPERATURE_FILE), "temperature")?.with_boundary(boundary)?;
    let dust = load_daily_csv(&dir.join(DUST_FILE), "dust opacity")?.with_boundary(boundary)?;

    info!(
        "loaded environment from {}: {} solar, {} temperature, {} dust samples",
        dir.display(),
        solar.len(),
        temperature.len(),
        dust.len()
    );
    Ok(TableEnvironment::new(solar, temperature, dust))
}

fn read_rows<R, T>(reader: R, name: &str) -> EnvResult<Vec<T>>
where
    R: Read,
    T: serde::de::DeserializeOwned,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    csv_reader
        .deserialize::<T>()
        .enumerate()
        .map(|(i, row)| row.map_err(|e| EnvError::Parse(format!("{name} row {}: {e}", i + 1))))
        .collect()
}

// ── Writer ────────────────────────────────────────────────────────────────────

/// Write a tabulated year to the three standard files in `dir`, with the
/// `Sol,Solar Radiation`, `Sol,Hour,Temperature` and `Sol,Dust Opacity` headers.
pub fn write_environment_dir(dir: &Path, year: &SyntheticYear) -> EnvResult<()> {
    let mut solar = Writer::from_path(dir.join(SOLAR_FILE))?;
    solar.write_record(["Sol", "Solar Radiation"])?;
    for (sol, value) in &year.solar {
        solar.write_record(&[sol.to_string(), value.to_string()])?;
    }
    solar.flush()?;

    let mut temperature = Writer::from_path(dir.join(TEMPERATURE_FILE))?;
    temperature.write_record(["Sol", "Hour", "Temperature"])?;
    for (sol, hour, value) in &year.temperature {
        temperature.write_record(&[sol.to_string(), hour.to_string(), value.to_string()])?;
    }
    temperature.flush()?;

    let mut dust = Writer::from_path(dir.join(DUST_FILE))?;
    dust.write_record(["Sol", "Dust Opacity"])?;
    for (sol, value) in &year.dust {
        dust.write_record(&[sol.to_string(), value.to_string()])?;
    }
    dust.flush()?;

    info!(
        "wrote {} sols of synthetic environment to {}",
        year.solar.len(),
        dir.display()
    );
    Ok(())
}
