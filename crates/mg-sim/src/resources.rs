//! Per-crop water and nutrient pools.
//!
//! Each crop draws on its own pools; crops never compete for resources.
//! After a crop grows on day `j` the pools lose
//!
//! ```text
//! water    -= biomass[j] · water_use    / 1000
//! nutrient -= biomass[j] · nutrient_use / 1000
//! ```
//!
//! and the crop dies on day `j` if either pool is now negative.

use crate::{SimError, SimResult};

/// Starting pool sizes and per-biomass consumption rates.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ResourceBudget {
    /// Initial water content (fraction of soil mass).
    pub water:        f64,
    /// Initial nutrient content (fraction of soil mass).
    pub nutrient:     f64,
    /// Water used per kg of biomass per day.
    pub water_use:    f64,
    /// Nutrients used per kg of biomass per day.
    pub nutrient_use: f64,
}

impl Default for ResourceBudget {
    fn default() -> Self {
        Self {
            water:        0.05,
            nutrient:     0.02,
            water_use:    0.0005,
            nutrient_use: 0.00005,
        }
    }
}

impl ResourceBudget {
    pub fn validate(&self) -> SimResult<()> {
        let fields = [
            ("water", self.water),
            ("nutrient", self.nutrient),
            ("water_use", self.water_use),
            ("nutrient_use", self.nutrient_use),
        ];
        for (what, v) in fields {
            if !(v.is_finite() && v >= 0.0) {
                return Err(SimError::Config(format!(
                    "resource {what} must be finite and non-negative, got {v}"
                )));
            }
        }
        Ok(())
    }

    pub fn initial_pools(&self) -> ResourcePools {
        ResourcePools { water: self.water, nutrient: self.nutrient }
    }
}

/// What is left in one crop's pools.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResourcePools {
    pub water:    f64,
    pub nutrient: f64,
}

impl ResourcePools {
    /// Deduct one day's consumption for `biomass`.  Returns `true` if either
    /// pool is now exhausted.
    pub fn consume(&mut self, biomass: f64, budget: &ResourceBudget) -> bool {
        self.water -= biomass * budget.water_use / 1000.0;
        self.nutrient -= biomass * budget.nutrient_use / 1000.0;
        self.is_exhausted()
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.water < 0.0 || self.nutrient < 0.0
    }
}
