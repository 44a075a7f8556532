//! `mg-growth`: growth factors, growth curves, and daily growth models.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                       |
//! |---------------|----------------------------------------------------------------|
//! | [`factors`]   | `growth_factor`, `logistic_growth`, `rate_logistic`, `GrowthCurve`, `SoilFactors`, `EnvEffects` |
//! | [`context`]   | `DayConditions`: calendar position and environment of one day |
//! | [`model`]     | `GrowthModel` trait, `PlantState`, `Supply`, `GrowthSettings`  |
//! | [`standard`]  | `StandardGrowth`: soil factors × environment effects          |
//! | [`soil_only`] | `SoilOnlyGrowth`: soil factors only                           |
//! | [`supply`]    | `SupplyLimitedGrowth`: light and temperature capped by water and CO₂ |
//! | [`error`]     | `GrowthError`, `GrowthResult<T>`                               |
//!
//! # Design notes
//!
//! A model is a pure function of `(profile, soil, conditions, previous
//! state)`.  Whatever a model keeps between days, such as the water and CO₂
//! pools of [`SupplyLimitedGrowth`], rides along in [`PlantState`].  mg-sim
//! reads the environment once per day into a [`DayConditions`] and hands the
//! same value to every crop; the model never
//! touches the environment series, the calendar, or another crop's state.
//! That is what makes crops independent and the recurrence strictly
//! forward.

pub mod context;
pub mod error;
pub mod factors;
pub mod model;
pub mod soil_only;
pub mod standard;
pub mod supply;


pub use context::DayConditions;
pub use error::{GrowthError, GrowthResult};
pub use factors::{
    EnvEffects, GrowthCurve, HeightReference, SOLAR_MAX, SoilFactors, growth_factor,
    logistic_growth, rate_logistic,
};
pub use model::{GrowthModel, GrowthSettings, PlantState, Supply};
pub use soil_only::SoilOnlyGrowth;
pub use standard::StandardGrowth;
pub use supply::{SupplyLimitedGrowth, SupplyNeeds};
