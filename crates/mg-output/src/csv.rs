//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `growth.csv`
//! - `conditions.csv`
//! - `soil.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{ConditionsRow, GrowthRow, OutputResult, SoilRow};

pub const GROWTH_FILE: &str = "growth.csv";
pub const CONDITIONS_FILE: &str = "conditions.csv";
pub const SOIL_FILE: &str = "soil.csv";

/// Writes simulation output to three CSV files.
pub struct CsvWriter {
    growth:     Writer<File>,
    conditions: Writer<File>,
    soil:       Writer<File>,
    finished:   bool,
}

impl CsvWriter {
    /// Open (or create) the three CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut growth = Writer::from_path(dir.join(GROWTH_FILE))?;
        growth.write_record(["crop_id", "crop", "day", "biomass", "height", "alive"])?;

        let mut conditions = Writer::from_path(dir.join(CONDITIONS_FILE))?;
        conditions.write_record([
            "day",
            "sol_of_year",
            "hour",
            "solar",
            "temperature",
            "dust_opacity",
        ])?;

        let mut soil = Writer::from_path(dir.join(SOIL_FILE))?;
        soil.write_record(["crop_id", "crop", "ph", "nitrogen", "phosphorus", "potassium"])?;

        Ok(Self { growth, conditions, soil, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_soil(&mut self, rows: &[SoilRow<'_>]) -> OutputResult<()> {
        for row in rows {
            self.soil.write_record(&[
                row.crop_id.to_string(),
                row.crop.to_string(),
                row.ph.to_string(),
                row.nitrogen.to_string(),
                row.phosphorus.to_string(),
                row.potassium.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_growth(&mut self, rows: &[GrowthRow<'_>]) -> OutputResult<()> {
        for row in rows {
            self.growth.write_record(&[
                row.crop_id.to_string(),
                row.crop.to_string(),
                row.day.to_string(),
                row.biomass.to_string(),
                row.height.to_string(),
                (row.alive as u8).to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_conditions(&mut self, row: &ConditionsRow) -> OutputResult<()> {
        self.conditions.write_record(&[
            row.day.to_string(),
            row.sol_of_year.to_string(),
            row.hour.to_string(),
            row.solar.to_string(),
            row.temperature.to_string(),
            row.dust_opacity.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.growth.flush()?;
        self.conditions.flush()?;
        self.soil.flush()?;
        Ok(())
    }
}
