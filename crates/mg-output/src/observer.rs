//! `SimOutputObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use log::{info, warn};
use mg_core::{Day, SimConfig};
use mg_crop::CropTable;
use mg_growth::DayConditions;
use mg_sim::{GrowthRecord, SimObserver};

use crate::row::{ConditionsRow, GrowthRow, SoilRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes soil samples, daily conditions, and growth
/// snapshots to any [`OutputWriter`] backend (CSV, SQLite, …).
///
/// Growth rows are written on snapshot days only, so
/// `config.output_interval_days` controls how dense `growth` is.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    rows:       usize,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, rows: 0, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                warn!("output write failed: {e}");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_sim_start(&mut self, _config: &SimConfig, crops: &CropTable) {
        let rows: Vec<SoilRow<'_>> = crops
            .iter()
            .map(|(id, profile, soil)| SoilRow {
                crop_id:    id.0,
                crop:       &profile.name,
                ph:         soil.ph,
                nitrogen:   soil.nitrogen,
                phosphorus: soil.phosphorus,
                potassium:  soil.potassium,
            })
            .collect();
        let result = self.writer.write_soil(&rows);
        self.store_err(result);
    }

    fn on_day_end(&mut self, day: Day, conditions: &DayConditions) {
        let row = ConditionsRow {
            day:          day.0,
            sol_of_year:  conditions.position.sol_of_year,
            hour:         conditions.position.hour,
            solar:        conditions.reading.solar,
            temperature:  conditions.reading.temperature,
            dust_opacity: conditions.reading.dust_opacity,
        };
        let result = self.writer.write_conditions(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, day: Day, crops: &CropTable, record: &GrowthRecord) {
        let rows: Vec<GrowthRow<'_>> = crops
            .iter()
            .map(|(id, profile, _)| GrowthRow {
                crop_id: id.0,
                crop:    &profile.name,
                day:     day.0,
                biomass: record.biomass.get(id, day),
                height:  record.height.get(id, day),
                alive:   record.is_alive(id, day),
            })
            .collect();

        if !rows.is_empty() {
            self.rows += rows.len();
            let result = self.writer.write_growth(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, record: &GrowthRecord) {
        let result = self.writer.finish();
        self.store_err(result);
        info!(
            "wrote {} growth rows and {} condition rows",
            self.rows,
            record.conditions.len()
        );
    }
}
