//! Simulation observer trait for progress reporting and data collection.

use log::info;
use mg_core::{CropId, Day, SimConfig};
use mg_crop::CropTable;
use mg_growth::DayConditions;

use crate::GrowthRecord;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// day loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: biomass printer
///
/// ```rust,ignore
/// struct BiomassPrinter;
///
/// impl SimObserver for BiomassPrinter {
///     fn on_snapshot(&mut self, day: Day, crops: &CropTable, record: &GrowthRecord) {
///         for (id, profile, _) in crops.iter() {
///             println!("{day} {}: {:.4} kg", profile.name, record.biomass.get(id, day));
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called once before day 1, after day 0 has been filled in.
    fn on_sim_start(&mut self, _config: &SimConfig, _crops: &CropTable) {}

    /// Called at the very start of each day, before the environment is read.
    fn on_day_start(&mut self, _day: Day) {}

    /// Called after every crop has been stepped.
    fn on_day_end(&mut self, _day: Day, _conditions: &DayConditions) {}

    /// Called on the day a crop's water or nutrient pool runs out.
    fn on_crop_death(&mut self, _crop: CropId, _day: Day) {}

    /// Called at snapshot intervals (every `config.output_interval_days`
    /// days, day 0 included).
    ///
    /// `record` is filled in up to and including `day`.
    fn on_snapshot(&mut self, _day: Day, _crops: &CropTable, _record: &GrowthRecord) {}

    /// Called once after the final day completes.
    fn on_sim_end(&mut self, _record: &GrowthRecord) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

/// Logs a progress line every `interval` days at `info` level.
pub struct ProgressLogger {
    pub interval: u32,
    total:        u32,
    deaths:       usize,
}

impl ProgressLogger {
    pub fn new(interval: u32) -> Self {
        Self { interval, total: 0, deaths: 0 }
    }
}

impl SimObserver for ProgressLogger {
    fn on_sim_start(&mut self, config: &SimConfig, crops: &CropTable) {
        self.total = config.days;
        info!("simulating {} crops over {} days", crops.len(), config.days);
    }

    fn on_day_end(&mut self, day: Day, conditions: &DayConditions) {
        if self.interval > 0 && day.0.is_multiple_of(self.interval) {
            info!(
                "day {}/{}: {} solar {:.1} W/m², {:.1} °C, dust {:.2}",
                day.0,
                self.total.saturating_sub(1),
                conditions.position,
                conditions.reading.solar,
                conditions.reading.temperature,
                conditions.reading.dust_opacity
            );
        }
    }

    fn on_crop_death(&mut self, _crop: CropId, _day: Day) {
        self.deaths += 1;
    }

    fn on_sim_end(&mut self, record: &GrowthRecord) {
        info!(
            "finished {} days: {} of {} crops alive",
            record.day_count(),
            record.crop_count() - self.deaths,
            record.crop_count()
        );
    }
}
