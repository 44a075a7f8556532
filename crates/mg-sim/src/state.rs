//! The output matrices of a run.

use mg_core::{CropId, Day};
use mg_growth::{DayConditions, PlantState};

// ── GrowthMatrix ──────────────────────────────────────────────────────────────

/// A dense `[crops × days]` matrix, one row per crop.
#[derive(Clone, Debug, PartialEq)]
pub struct GrowthMatrix {
    days:   usize,
    values: Vec<f64>,
}

impl GrowthMatrix {
    pub fn new(crops: usize, days: usize) -> Self {
        Self { days, values: vec![0.0; crops * days] }
    }

    pub fn crop_count(&self) -> usize {
        self.values.len().checked_div(self.days).unwrap_or(0)
    }

    pub fn day_count(&self) -> usize {
        self.days
    }

    /// # Panics
    /// Panics if `crop` or `day` is out of bounds.
    #[inline]
    pub fn get(&self, crop: CropId, day: Day) -> f64 {
        self.values[self.offset(crop, day)]
    }

    #[inline]
    pub fn set(&mut self, crop: CropId, day: Day, value: f64) {
        let i = self.offset(crop, day);
        self.values[i] = value;
    }

    /// The full time series of one crop.
    pub fn row(&self, crop: CropId) -> &[f64] {
        let start = crop.index() * self.days;
        &self.values[start..start + self.days]
    }

    #[inline]
    fn offset(&self, crop: CropId, day: Day) -> usize {
        assert!(day.index() < self.days, "{day} out of bounds ({} days)", self.days);
        crop.index() * self.days + day.index()
    }
}

// ── GrowthRecord ──────────────────────────────────────────────────────────────

/// Everything a run produces.
///
/// `biomass` and `height` cover day 0 (the initial state) through
/// `config.days - 1`.  `conditions[j - 1]` is what every crop saw on day `j`.
#[derive(Clone, Debug, PartialEq)]
pub struct GrowthRecord {
    pub biomass:    GrowthMatrix,
    pub height:     GrowthMatrix,
    /// Day each crop ran out of water or nutrients, if it did.
    pub death_day:  Vec<Option<Day>>,
    pub conditions: Vec<DayConditions>,
}

impl GrowthRecord {
    pub fn new(crops: usize, days: usize) -> Self {
        Self {
            biomass:    GrowthMatrix::new(crops, days),
            height:     GrowthMatrix::new(crops, days),
            death_day:  vec![None; crops],
            conditions: Vec::with_capacity(days.saturating_sub(1)),
        }
    }

    pub fn crop_count(&self) -> usize {
        self.death_day.len()
    }

    pub fn day_count(&self) -> usize {
        self.biomass.day_count()
    }

    pub fn state(&self, crop: CropId, day: Day) -> PlantState {
        PlantState::new(self.biomass.get(crop, day), self.height.get(crop, day))
    }

    pub fn set_state(&mut self, crop: CropId, day: Day, state: PlantState) {
        self.biomass.set(crop, day, state.biomass);
        self.height.set(crop, day, state.height);
    }

    /// `false` from the crop's death day onwards.
    pub fn is_alive(&self, crop: CropId, day: Day) -> bool {
        self.death_day[crop.index()].is_none_or(|death| day < death)
    }

    /// Conditions of `day`, or `None` for day 0 and days not yet simulated.
    pub fn conditions_on(&self, day: Day) -> Option<&DayConditions> {
        day.prev().and_then(|d| self.conditions.get(d.index()))
    }
}
