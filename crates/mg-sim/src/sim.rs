//! The `Sim` struct and its day loop.

use log::{debug, info, warn};
use mg_core::{CropId, Day, SimConfig};
use mg_crop::{CropProfile, CropTable, SoilChemistry};
use mg_env::EnvironmentSeries;
use mg_growth::{DayConditions, GrowthError, GrowthModel, PlantState};

use crate::{GrowthRecord, ResourceBudget, ResourcePools, SimError, SimObserver, SimResult};

// ── Per-crop running state ────────────────────────────────────────────────────

/// What one crop carries from day to day.
#[derive(Clone, Copy, Debug)]
struct CropState {
    plant: PlantState,
    pools: Option<ResourcePools>,
    dead:  bool,
}

/// Outcome of stepping one crop for one day.
struct StepOutcome {
    state: CropState,
    /// The crop's pools ran out today.
    died:  bool,
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim<E, M>` holds the immutable inputs of a run and drives the day loop:
///
/// 1. **Calendar**: map day `j` onto the Martian calendar.
/// 2. **Environment**: read solar, temperature and dust once for the day.
/// 3. **Growth** (optionally parallel with the `parallel` feature): step
///    every live crop from day `j - 1` to day `j` with the [`GrowthModel`].
/// 4. **Resources**: if a [`ResourceBudget`] is set, deduct the day's water
///    and nutrient use; a crop whose pool runs out dies and is frozen.
/// 5. **Record**: write the states into the [`GrowthRecord`] in crop order.
///
/// Any error aborts the whole run: no partial record is returned.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<E: EnvironmentSeries, M: GrowthModel> {
    /// Day count, calendar, seed.
    pub config: SimConfig,

    /// Crop profiles and soil samples.
    pub crops: CropTable,

    /// Source of the daily environment reading.
    pub environment: E,

    /// The growth rule.  Called once per live crop per day.
    pub model: M,

    /// Water and nutrient depletion.  `None` disables it.
    pub resources: Option<ResourceBudget>,
}

impl<E: EnvironmentSeries, M: GrowthModel> Sim<E, M> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run days `1..config.days` and return the filled-in record.
    ///
    /// Calls observer hooks at every day boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&self, observer: &mut O) -> SimResult<GrowthRecord> {
        let days = self.config.days as usize;
        let mut record = GrowthRecord::new(self.crops.len(), days);

        let mut states: Vec<CropState> = self
            .crops
            .profiles()
            .iter()
            .map(|profile| CropState {
                plant: self.model.initial_state(profile),
                pools: self.resources.map(|budget| budget.initial_pools()),
                dead:  false,
            })
            .collect();
        for (i, state) in states.iter().enumerate() {
            record.set_state(crop_id(i), Day::ZERO, state.plant);
        }

        info!(
            "starting run: {} crops, {} days, seed {}, resources {}",
            self.crops.len(),
            self.config.days,
            self.config.seed,
            if self.resources.is_some() { "on" } else { "off" }
        );
        observer.on_sim_start(&self.config, &self.crops);
        self.maybe_snapshot(Day::ZERO, &record, observer);

        for d in 1..self.config.days {
            let day = Day(d);
            observer.on_day_start(day);

            let conditions = self.conditions(day)?;
            debug!(
                "{}: solar {:.2}, temperature {:.2}, dust {:.3}",
                conditions.position,
                conditions.reading.solar,
                conditions.reading.temperature,
                conditions.reading.dust_opacity
            );

            let outcomes = self.step_crops(&conditions, &states)?;
            for (i, outcome) in outcomes.into_iter().enumerate() {
                let crop = crop_id(i);
                if outcome.died {
                    warn!(
                        "{} ({}) ran out of resources on {day}",
                        self.crops.profile(crop).name,
                        crop
                    );
                    record.death_day[i] = Some(day);
                    observer.on_crop_death(crop, day);
                }
                record.set_state(crop, day, outcome.state.plant);
                states[i] = outcome.state;
            }
            record.conditions.push(conditions);

            observer.on_day_end(day, &conditions);
            self.maybe_snapshot(day, &record, observer);
        }

        let alive = record.death_day.iter().filter(|d| d.is_none()).count();
        info!(
            "run complete: {} days, {alive}/{} crops alive",
            self.config.days,
            self.crops.len()
        );
        observer.on_sim_end(&record);
        Ok(record)
    }

    /// Calendar position and environment reading of `day`.
    pub fn conditions(&self, day: Day) -> SimResult<DayConditions> {
        let position = self.config.calendar.position(day);
        let reading = self
            .environment
            .read(&position)
            .map_err(|source| SimError::Environment { day, source })?;
        Ok(DayConditions::new(position, reading))
    }

    // ── Core day processing ───────────────────────────────────────────────

    /// Step every crop for one day.
    ///
    /// With the `parallel` Cargo feature the crops run on Rayon's thread
    /// pool.  Outcomes come back in crop order, and on failure the error of
    /// the lowest-numbered failing crop is returned, so both builds behave
    /// identically.
    fn step_crops(
        &self,
        conditions: &DayConditions,
        states:     &[CropState],
    ) -> SimResult<Vec<StepOutcome>> {
        let profiles = self.crops.profiles();
        let soil = self.crops.soil_samples();
        let budget = self.resources.as_ref();
        let step = |i: usize| {
            step_crop(&self.model, budget, &profiles[i], &soil[i], conditions, states[i])
        };

        #[cfg(not(feature = "parallel"))]
        let results: Vec<Result<StepOutcome, GrowthError>> =
            (0..states.len()).map(step).collect();

        #[cfg(feature = "parallel")]
        let results: Vec<Result<StepOutcome, GrowthError>> = {
            use rayon::prelude::*;
            (0..states.len()).into_par_iter().map(step).collect()
        };

        results
            .into_iter()
            .enumerate()
            .map(|(i, result)| {
                result.map_err(|source| SimError::Growth {
                    crop: crop_id(i),
                    name: profiles[i].name.clone(),
                    day: conditions.day(),
                    source,
                })
            })
            .collect()
    }

    fn maybe_snapshot<O: SimObserver>(&self, day: Day, record: &GrowthRecord, observer: &mut O) {
        let interval = self.config.output_interval_days;
        if interval > 0 && day.0.is_multiple_of(interval) {
            observer.on_snapshot(day, &self.crops, record);
        }
    }
}

/// One crop, one day.  Dead crops keep their last state.
fn step_crop<M: GrowthModel>(
    model:      &M,
    budget:     Option<&ResourceBudget>,
    profile:    &CropProfile,
    soil:       &SoilChemistry,
    conditions: &DayConditions,
    prev:       CropState,
) -> Result<StepOutcome, GrowthError> {
    if prev.dead {
        return Ok(StepOutcome { state: prev, died: false });
    }

    let plant = model.step(profile, soil, conditions, prev.plant)?.check_finite()?;
    let mut state = CropState { plant, ..prev };

    if let (Some(budget), Some(pools)) = (budget, state.pools.as_mut()) {
        state.dead = pools.consume(plant.biomass, budget);
    }
    Ok(StepOutcome { state, died: state.dead })
}

/// Crop ids are dense `0..len`, and `CropTable` caps the count at `u16`.
#[inline]
fn crop_id(i: usize) -> CropId {
    CropId(i as u16)
}

// ── Convenience ───────────────────────────────────────────────────────────────

/// Build and run a simulation without observers or resource depletion.
pub fn simulate_growth<E, M>(
    config:      SimConfig,
    crops:       CropTable,
    environment: E,
    model:       M,
) -> SimResult<GrowthRecord>
where
    E: EnvironmentSeries,
    M: GrowthModel,
{
    crate::SimBuilder::new(config, crops, environment, model)
        .build()?
        .run(&mut crate::NoopObserver)
}
