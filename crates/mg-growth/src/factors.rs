//! Growth factors and growth curves.
//!
//! Every multiplier the models apply comes from one function:
//!
//! ```text
//! growth_factor(v, opt) = exp(-|v - opt| / opt)
//! ```
//!
//! which is exactly 1 at the optimum and decays exponentially with the
//! relative deviation from it.  Factors are never clamped.

use mg_crop::{EnvSensitivity, SoilChemistry};
use mg_env::EnvReading;

use crate::{GrowthError, GrowthResult};

/// Peak solar radiation used to normalise the solar effect (W/m²).
pub const SOLAR_MAX: f64 = 717.0;

/// Adequacy of `value` relative to `optimum`, in `(0, 1]` for positive optima.
///
/// Returns [`GrowthError::DivideByZero`] when `optimum` is zero.
#[inline]
pub fn growth_factor(value: f64, optimum: f64) -> GrowthResult<f64> {
    if optimum == 0.0 {
        return Err(GrowthError::DivideByZero { value });
    }
    Ok((-(value - optimum).abs() / optimum).exp())
}

/// The literal logistic update of the regolith experiment:
/// `k·x / (x + k − x·init/k)`.
///
/// `init` is the starting value of the quantity being grown.  For small `x`
/// the denominator exceeds `k`, so repeated application shrinks `x` towards
/// zero rather than growing it; see [`GrowthCurve::Legacy`].
#[inline]
pub fn logistic_growth(x: f64, k: f64, init: f64) -> f64 {
    k * x / (x + k - x * init / k)
}

/// Discrete logistic (Beverton–Holt) update with per-day rate `r`:
/// `(1 + r)·k·x / (k + r·x)`.
///
/// For `0 < x < k` and `r > 0` the result lies strictly between `x` and `k`,
/// so iterating converges monotonically to `k` from below.  `k` is a fixed
/// point for every rate.
#[inline]
pub fn rate_logistic(x: f64, k: f64, r: f64) -> f64 {
    (1.0 + r) * k * x / (k + r * x)
}

// ── GrowthCurve ───────────────────────────────────────────────────────────────

/// Which bounded-growth update a model applies before the factors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum GrowthCurve {
    /// [`rate_logistic`] driven by the crop's base growth rate.
    #[default]
    Logistic,
    /// [`logistic_growth`] exactly.  Kept to reproduce old
    /// results; it decays instead of converging to the carrying capacity.
    Legacy,
}

impl GrowthCurve {
    /// One step of the curve for a quantity with carrying capacity `k`.
    #[inline]
    pub fn apply(self, x: f64, k: f64, rate: f64, init: f64) -> f64 {
        match self {
            GrowthCurve::Logistic => rate_logistic(x, k, rate),
            GrowthCurve::Legacy => logistic_growth(x, k, init),
        }
    }
}

/// Which initial value the height curve is parameterised with.
///
/// Only [`GrowthCurve::Legacy`] reads it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum HeightReference {
    /// The initial height.
    #[default]
    InitialHeight,
    /// The initial biomass, as the regolith experiment did.
    InitialBiomass,
}

// ── Soil factors ──────────────────────────────────────────────────────────────

/// The four soil adequacy factors of one crop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SoilFactors {
    pub ph:         f64,
    pub nitrogen:   f64,
    pub phosphorus: f64,
    pub potassium:  f64,
}

impl SoilFactors {
    pub fn compute(sample: &SoilChemistry, optimum: &SoilChemistry) -> GrowthResult<Self> {
        Ok(Self {
            ph:         growth_factor(sample.ph, optimum.ph)?,
            nitrogen:   growth_factor(sample.nitrogen, optimum.nitrogen)?,
            phosphorus: growth_factor(sample.phosphorus, optimum.phosphorus)?,
            potassium:  growth_factor(sample.potassium, optimum.potassium)?,
        })
    }

    #[inline]
    pub fn product(&self) -> f64 {
        self.ph * self.nitrogen * self.phosphorus * self.potassium
    }
}

// ── Environment effects ───────────────────────────────────────────────────────

/// The three environmental effects of one crop on one day.
///
/// ```text
/// solar = (solar / solar_max) · growth_factor(solar / (1 + dust), crop.solar)
/// temp  = growth_factor(temperature, crop.temperature)
/// dust  = growth_factor(1 / (1 + dust), crop.dust)
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnvEffects {
    pub solar:       f64,
    pub temperature: f64,
    pub dust:        f64,
}

impl EnvEffects {
    pub fn compute(
        reading:     &EnvReading,
        sensitivity: &EnvSensitivity,
        solar_max:   f64,
    ) -> GrowthResult<Self> {
        let transmittance = 1.0 / (1.0 + reading.dust_opacity);
        let attenuated = reading.solar * transmittance;
        Ok(Self {
            solar: (reading.solar / solar_max) * growth_factor(attenuated, sensitivity.solar)?,
            temperature: growth_factor(reading.temperature, sensitivity.temperature)?,
            dust: growth_factor(transmittance, sensitivity.dust)?,
        })
    }

    #[inline]
    pub fn product(&self) -> f64 {
        self.solar * self.temperature * self.dust
    }
}
