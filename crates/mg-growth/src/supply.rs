//! A growth model limited by each crop's own water and CO₂ supply.

use std::collections::BTreeMap;
use std::f64::consts::PI;

use mg_crop::{CropProfile, SoilChemistry};

use crate::{DayConditions, GrowthError, GrowthModel, GrowthResult, PlantState, Supply};

/// Per-crop starting size and daily draw of the supply-limited model.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SupplyNeeds {
    /// Day-0 biomass (kg).  Demand is also expressed per unit of this mass.
    pub mass:   f64,
    /// Day-0 height (m).
    pub height: f64,
    /// Water drawn per day (kg).
    pub water:  f64,
    /// CO₂ drawn per day (kg).
    pub co2:    f64,
}

impl SupplyNeeds {
    pub const fn new(mass: f64, height: f64, water: f64, co2: f64) -> Self {
        Self { mass, height, water, co2 }
    }

    /// Needs of the seven regolith crops, keyed by crop name.
    pub fn mars_defaults() -> BTreeMap<String, SupplyNeeds> {
        [
            ("potato",    SupplyNeeds::new(0.10, 0.3, 0.025, 0.005)),
            ("tomato",    SupplyNeeds::new(0.05, 0.5, 0.050, 0.010)),
            ("radish",    SupplyNeeds::new(0.01, 0.1, 0.010, 0.005)),
            ("lettuce",   SupplyNeeds::new(0.02, 0.2, 0.015, 0.005)),
            ("bean",      SupplyNeeds::new(0.03, 0.4, 0.020, 0.010)),
            ("pepper",    SupplyNeeds::new(0.04, 0.3, 0.030, 0.010)),
            ("dandelion", SupplyNeeds::new(0.02, 0.4, 0.020, 0.005)),
        ]
        .into_iter()
        .map(|(name, needs)| (name.to_string(), needs))
        .collect()
    }

    fn check(&self, crop: &str) -> GrowthResult<()> {
        for (what, value) in
            [("reference mass", self.mass), ("water demand", self.water), ("co2 demand", self.co2)]
        {
            if !(value.is_finite() && value > 0.0) {
                return Err(GrowthError::NonPositive { crop: crop.to_string(), what, value });
            }
        }
        Ok(())
    }
}

/// Growth driven by light and temperature, capped by whichever of water or
/// CO₂ is scarcer:
///
/// ```text
/// factor  = solar · exp(-((T - T_opt) / width)²) · min(water / demand_w / mass_0,
///                                                      co2   / demand_c / mass_0)
/// biomass = biomass + factor · growth_rate
/// height  = height  + factor · growth_rate / mass_0
/// water   = max(0, water - demand_w + soil_water · soil_organic · column(height))
/// co2     = max(0, co2   - demand_c + co2_fraction · atmosphere  · column(height))
/// ```
///
/// where `column(h) = h · π · (h / 2)²` is the volume the plant draws from.
/// Soil chemistry and dust are not consulted.  Crops missing from `needs`
/// use `fallback`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SupplyLimitedGrowth {
    /// Water fraction of the regolith.
    pub soil_water:          f64,
    /// Organic fraction of the regolith.
    pub soil_organic:        f64,
    /// CO₂ fraction of the atmosphere.
    pub co2_fraction:        f64,
    /// Surface pressure (kPa).
    pub atmosphere:          f64,
    /// Temperature of peak growth (°C).
    pub temperature_optimum: f64,
    /// Width of the temperature response (°C).
    pub temperature_width:   f64,
    pub fallback:            SupplyNeeds,
    pub needs:               BTreeMap<String, SupplyNeeds>,
}

impl Default for SupplyLimitedGrowth {
    fn default() -> Self {
        Self {
            soil_water:          0.1,
            soil_organic:        0.1,
            co2_fraction:        0.95,
            atmosphere:          0.006,
            temperature_optimum: 20.0,
            temperature_width:   10.0,
            fallback:            SupplyNeeds::new(0.02, 0.2, 0.02, 0.005),
            needs:               SupplyNeeds::mars_defaults(),
        }
    }
}

impl SupplyLimitedGrowth {
    pub fn needs_of(&self, crop: &str) -> &SupplyNeeds {
        self.needs.get(crop).unwrap_or(&self.fallback)
    }

    /// Water and CO₂ a plant of `height` draws in one day.
    pub fn replenishment(&self, height: f64) -> Supply {
        let column = height * PI * (height / 2.0).powi(2);
        Supply {
            water: self.soil_water * self.soil_organic * column,
            co2:   self.co2_fraction * self.atmosphere * column,
        }
    }

    /// Gaussian response around `temperature_optimum`.
    pub fn temperature_effect(&self, temperature: f64) -> f64 {
        let z = (temperature - self.temperature_optimum) / self.temperature_width;
        (-z * z).exp()
    }
}

impl GrowthModel for SupplyLimitedGrowth {
    fn initial_state(&self, crop: &CropProfile) -> PlantState {
        let needs = self.needs_of(&crop.name);
        PlantState::new(needs.mass, needs.height).with_supply(self.replenishment(needs.height))
    }

    fn step(
        &self,
        crop:       &CropProfile,
        _soil:      &SoilChemistry,
        conditions: &DayConditions,
        prev:       PlantState,
    ) -> GrowthResult<PlantState> {
        let needs = self.needs_of(&crop.name);
        needs.check(&crop.name)?;

        let supply = prev.supply;
        let limit = (supply.water / needs.water / needs.mass)
            .min(supply.co2 / needs.co2 / needs.mass);
        let factor = conditions.reading.solar
            * self.temperature_effect(conditions.reading.temperature)
            * limit;
        let gain = factor * crop.growth_rate;

        let height = prev.height + gain / needs.mass;
        let fresh = self.replenishment(height);
        PlantState {
            biomass: prev.biomass + gain,
            height,
            supply: Supply {
                water: (supply.water - needs.water + fresh.water).max(0.0),
                co2:   (supply.co2 - needs.co2 + fresh.co2).max(0.0),
            },
        }
        .check_finite()
    }
}
