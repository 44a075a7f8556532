//! Per-crop growth parameters.

use crate::{CropError, CropResult, SoilChemistry};

/// Optima of the three environmental growth factors.
///
/// - `solar`: dust-attenuated irradiance the crop grows best under (W/m²).
/// - `temperature`: preferred air temperature (°C).
/// - `dust`: preferred atmospheric transmittance `1 / (1 + opacity)`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnvSensitivity {
    pub solar:       f64,
    pub temperature: f64,
    pub dust:        f64,
}

/// Immutable growth parameters for one crop.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CropProfile {
    pub name: String,
    /// Carrying capacity of the biomass curve (kg).
    pub max_biomass: f64,
    /// Carrying capacity of the height curve (m).
    pub max_height: f64,
    /// Base growth rate per day.
    pub growth_rate: f64,
    /// Soil chemistry at which every soil factor equals 1.
    pub soil_optimum: SoilChemistry,
    pub sensitivity: EnvSensitivity,
}

impl CropProfile {
    /// The seven crops of the regolith experiment.
    ///
    /// Capacities, rates and soil optima are the experiment's values.  The
    /// environmental optima were chosen per crop family: warm-season fruiting
    /// crops want more light and heat, leafy and root crops less.
    pub fn mars_defaults() -> Vec<CropProfile> {
        //   name         biomass height rate  pH   N      P     K      solar  temp  dust
        let rows: [(&str, f64, f64, f64, f64, f64, f64, f64, f64, f64, f64); 7] = [
            ("potato",    1.0,  1.0,  0.02, 6.5, 150.0, 50.0, 100.0, 250.0, 18.0, 0.80),
            ("tomato",    0.5,  2.0,  0.03, 6.5, 150.0, 50.0, 100.0, 400.0, 24.0, 0.90),
            ("lettuce",   0.2,  0.3,  0.04, 6.5, 150.0, 50.0, 100.0, 200.0, 16.0, 0.70),
            ("radish",    0.1,  0.2,  0.05, 6.5, 150.0, 50.0, 100.0, 220.0, 15.0, 0.70),
            ("bean",      0.4,  1.5,  0.03, 6.5, 200.0, 50.0, 100.0, 350.0, 22.0, 0.85),
            ("pepper",    0.3,  1.0,  0.02, 6.5, 150.0, 50.0, 100.0, 420.0, 26.0, 0.90),
            ("dandelion", 0.15, 0.5,  0.01, 7.0, 100.0, 50.0, 100.0, 180.0, 12.0, 0.50),
        ];
        rows.iter()
            .map(|&(name, max_biomass, max_height, growth_rate, ph, n, p, k, solar, temp, dust)| {
                CropProfile {
                    name: name.to_string(),
                    max_biomass,
                    max_height,
                    growth_rate,
                    soil_optimum: SoilChemistry::new(ph, n, p, k),
                    sensitivity: EnvSensitivity { solar, temperature: temp, dust },
                }
            })
            .collect()
    }

    /// Check every parameter the growth model divides by or converges to.
    pub fn validate(&self) -> CropResult<()> {
        let invalid = |reason: String| CropError::Invalid {
            crop: self.name.clone(),
            reason,
        };

        if self.name.trim().is_empty() {
            return Err(invalid("name is empty".into()));
        }
        for (what, v) in [("max_biomass", self.max_biomass), ("max_height", self.max_height)] {
            if !(v.is_finite() && v > 0.0) {
                return Err(invalid(format!("{what} must be positive, got {v}")));
            }
        }
        if !(self.growth_rate.is_finite() && self.growth_rate >= 0.0) {
            return Err(invalid(format!(
                "growth_rate must be non-negative, got {}",
                self.growth_rate
            )));
        }

        let optima = [
            ("ph optimum", self.soil_optimum.ph),
            ("nitrogen optimum", self.soil_optimum.nitrogen),
            ("phosphorus optimum", self.soil_optimum.phosphorus),
            ("potassium optimum", self.soil_optimum.potassium),
            ("solar factor", self.sensitivity.solar),
            ("temperature factor", self.sensitivity.temperature),
            ("dust factor", self.sensitivity.dust),
        ];
        for (what, v) in optima {
            if !v.is_finite() || v == 0.0 {
                return Err(invalid(format!("{what} must be finite and non-zero, got {v}")));
            }
        }
        Ok(())
    }
}
