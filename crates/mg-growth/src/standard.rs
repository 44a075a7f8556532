//! The full soil-and-environment growth model.

use mg_crop::{CropProfile, SoilChemistry};

use crate::factors::SOLAR_MAX;
use crate::{
    DayConditions, EnvEffects, GrowthError, GrowthModel, GrowthResult, GrowthSettings, PlantState,
    SoilFactors,
};

/// Growth curve scaled by the four soil factors and the three environment
/// effects:
///
/// ```text
/// biomass[j] = curve(biomass[j-1], max_biomass) · pH · N · P · K · solar · temp · dust
/// height[j]  = curve(height[j-1],  max_height)  · pH · N · P · K · solar · temp · dust
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StandardGrowth {
    /// Radiation that yields a solar ratio of 1 (W/m²).
    pub solar_max: f64,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub settings:  GrowthSettings,
}

impl Default for StandardGrowth {
    fn default() -> Self {
        Self { solar_max: SOLAR_MAX, settings: GrowthSettings::default() }
    }
}

impl StandardGrowth {
    pub fn new(settings: GrowthSettings) -> Self {
        Self { settings, ..Self::default() }
    }

    pub fn with_solar_max(mut self, solar_max: f64) -> Self {
        self.solar_max = solar_max;
        self
    }

    /// The combined multiplier applied on top of the curve.
    pub fn multiplier(
        &self,
        crop:       &CropProfile,
        soil:       &SoilChemistry,
        conditions: &DayConditions,
    ) -> GrowthResult<f64> {
        if self.solar_max == 0.0 {
            return Err(GrowthError::DivideByZero { value: conditions.reading.solar });
        }
        let soil = SoilFactors::compute(soil, &crop.soil_optimum)?;
        let env = EnvEffects::compute(&conditions.reading, &crop.sensitivity, self.solar_max)?;
        Ok(soil.product() * env.product())
    }
}

impl GrowthModel for StandardGrowth {
    fn initial_state(&self, _crop: &CropProfile) -> PlantState {
        self.settings.initial_state()
    }

    fn step(
        &self,
        crop:       &CropProfile,
        soil:       &SoilChemistry,
        conditions: &DayConditions,
        prev:       PlantState,
    ) -> GrowthResult<PlantState> {
        let multiplier = self.multiplier(crop, soil, conditions)?;
        self.settings.advance(crop, prev, multiplier)
    }
}
