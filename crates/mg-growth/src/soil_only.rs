//! A growth model that ignores the environment.

use mg_crop::{CropProfile, SoilChemistry};

use crate::{DayConditions, GrowthModel, GrowthResult, GrowthSettings, PlantState, SoilFactors};

/// Growth curve scaled by the four soil factors only.
///
/// The day's conditions are never read, so the result depends only on the
/// crop's profile and soil sample.  Useful as a baseline against
/// [`StandardGrowth`][crate::StandardGrowth] and for runs without
/// environment data (pair it with a `ConstantEnvironment`).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SoilOnlyGrowth {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub settings: GrowthSettings,
}

impl SoilOnlyGrowth {
    pub fn new(settings: GrowthSettings) -> Self {
        Self { settings }
    }
}

impl GrowthModel for SoilOnlyGrowth {
    fn initial_state(&self, _crop: &CropProfile) -> PlantState {
        self.settings.initial_state()
    }

    fn step(
        &self,
        crop:        &CropProfile,
        soil:        &SoilChemistry,
        _conditions: &DayConditions,
        prev:        PlantState,
    ) -> GrowthResult<PlantState> {
        let multiplier = SoilFactors::compute(soil, &crop.soil_optimum)?.product();
        self.settings.advance(crop, prev, multiplier)
    }
}
