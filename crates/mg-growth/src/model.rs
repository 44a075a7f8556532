//! The `GrowthModel` trait and the state it advances.

use mg_crop::{CropProfile, SoilChemistry};

use crate::{DayConditions, GrowthCurve, GrowthError, GrowthResult, HeightReference};

/// Water and CO₂ available to one crop (kg).
///
/// Only models that track their own supply touch these; the rest carry the
/// zero default through unchanged.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Supply {
    pub water: f64,
    pub co2:   f64,
}

/// Biomass (kg) and height (m) of one crop on one day.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlantState {
    pub biomass: f64,
    pub height:  f64,
    /// Carried from day to day by the simulator but not recorded.
    pub supply:  Supply,
}

impl PlantState {
    #[inline]
    pub fn new(biomass: f64, height: f64) -> Self {
        Self { biomass, height, supply: Supply::default() }
    }

    #[inline]
    pub fn with_supply(mut self, supply: Supply) -> Self {
        self.supply = supply;
        self
    }

    /// Fail with [`GrowthError::NumericOverflow`] if either value is NaN or
    /// infinite.
    pub fn check_finite(self) -> GrowthResult<Self> {
        if !self.biomass.is_finite() {
            return Err(GrowthError::NumericOverflow { quantity: "biomass", value: self.biomass });
        }
        if !self.height.is_finite() {
            return Err(GrowthError::NumericOverflow { quantity: "height", value: self.height });
        }
        if !self.supply.water.is_finite() {
            return Err(GrowthError::NumericOverflow { quantity: "water", value: self.supply.water });
        }
        if !self.supply.co2.is_finite() {
            return Err(GrowthError::NumericOverflow { quantity: "co2", value: self.supply.co2 });
        }
        Ok(self)
    }
}

// ── GrowthSettings ────────────────────────────────────────────────────────────

/// Curve selection and day-0 values shared by the built-in models.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GrowthSettings {
    pub curve:            GrowthCurve,
    pub height_reference: HeightReference,
    /// Day-0 biomass of every crop (kg).
    pub init_biomass:     f64,
    /// Day-0 height of every crop (m).
    pub init_height:      f64,
}

impl Default for GrowthSettings {
    fn default() -> Self {
        Self {
            curve:            GrowthCurve::Logistic,
            height_reference: HeightReference::InitialHeight,
            init_biomass:     0.01,
            init_height:      0.1,
        }
    }
}

impl GrowthSettings {
    pub fn initial_state(&self) -> PlantState {
        PlantState::new(self.init_biomass, self.init_height)
    }

    /// Apply the curve to both quantities, scale by `multiplier`, and check
    /// the result is finite.
    pub fn advance(
        &self,
        crop:       &CropProfile,
        prev:       PlantState,
        multiplier: f64,
    ) -> GrowthResult<PlantState> {
        let height_init = match self.height_reference {
            HeightReference::InitialHeight => self.init_height,
            HeightReference::InitialBiomass => self.init_biomass,
        };
        let rate = crop.growth_rate;

        PlantState {
            biomass: self.curve.apply(prev.biomass, crop.max_biomass, rate, self.init_biomass)
                * multiplier,
            height: self.curve.apply(prev.height, crop.max_height, rate, height_init)
                * multiplier,
            supply: prev.supply,
        }
        .check_finite()
    }
}

// ── GrowthModel ───────────────────────────────────────────────────────────────

/// Pluggable daily growth rule.
///
/// A model maps one crop's state on day `j - 1` to its state on day `j`,
/// given the crop's profile, its soil sample, and day `j`'s conditions.  It
/// sees nothing else: no other crop, no later day.  Anything a model needs to
/// remember between days travels in [`PlantState::supply`].
///
/// # Thread safety
///
/// The simulation loop may step many crops in parallel via Rayon, so
/// implementations must be `Send + Sync` and keep no per-crop mutable state
/// of their own.
///
/// # Example
///
/// ```rust
/// use mg_crop::{CropProfile, SoilChemistry};
/// use mg_growth::{DayConditions, GrowthModel, GrowthResult, PlantState};
///
/// /// Every crop jumps straight to its carrying capacity.
/// struct Instant;
///
/// impl GrowthModel for Instant {
///     fn initial_state(&self, _crop: &CropProfile) -> PlantState {
///         PlantState::new(0.0, 0.0)
///     }
///
///     fn step(
///         &self,
///         crop: &CropProfile,
///         _soil: &SoilChemistry,
///         _conditions: &DayConditions,
///         _prev: PlantState,
///     ) -> GrowthResult<PlantState> {
///         Ok(PlantState::new(crop.max_biomass, crop.max_height))
///     }
/// }
/// ```
pub trait GrowthModel: Send + Sync {
    /// The crop's state on day 0.
    fn initial_state(&self, crop: &CropProfile) -> PlantState;

    /// Advance one day.
    fn step(
        &self,
        crop:       &CropProfile,
        soil:       &SoilChemistry,
        conditions: &DayConditions,
        prev:       PlantState,
    ) -> GrowthResult<PlantState>;
}

impl<T: GrowthModel + ?Sized> GrowthModel for Box<T> {
    fn initial_state(&self, crop: &CropProfile) -> PlantState {
        (**self).initial_state(crop)
    }

    fn step(
        &self,
        crop:       &CropProfile,
        soil:       &SoilChemistry,
        conditions: &DayConditions,
        prev:       PlantState,
    ) -> GrowthResult<PlantState> {
        (**self).step(crop, soil, conditions, prev)
    }
}
