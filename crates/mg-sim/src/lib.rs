//! `mg-sim`: day loop orchestrator for the mars_garden simulator.
//!
//! # Day loop
//!
//! ```text
//! day 0: every crop starts at GrowthModel::initial_state
//! for day in 1..config.days:
//!   ① Calendar   : day → (sol_of_year, hour) via MarsCalendar
//!   ② Environment: one EnvironmentSeries::read shared by all crops
//!   ③ Growth     : GrowthModel::step per live crop
//!                   (parallel with the `parallel` feature)
//!   ④ Resources  : optional water/nutrient depletion; exhausted crops die
//!   ⑤ Record     : states written into GrowthRecord in crop order
//! ```
//!
//! Day `j` reads only day `j - 1` of the same crop, so crops never interact
//! and nothing flows backwards in time.  The first error aborts the run.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the growth phase on Rayon's thread pool.          |
//! | `serde`    | Serde derives on `ResourceBudget`.                     |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use mg_crop::{CropProfile, CropTableBuilder};
//! use mg_env::{Boundary, load_environment_dir};
//! use mg_growth::StandardGrowth;
//! use mg_sim::{ProgressLogger, SimBuilder};
//!
//! let crops = CropTableBuilder::new(config.seed).crops(CropProfile::mars_defaults()).build()?;
//! let env = load_environment_dir(dir, Boundary::periodic_year(669))?;
//! let sim = SimBuilder::new(config, crops, env, StandardGrowth::default()).build()?;
//! let record = sim.run(&mut ProgressLogger::new(10))?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod resources;
pub mod sim;
pub mod state;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, ProgressLogger, SimObserver};
pub use resources::{ResourceBudget, ResourcePools};
pub use sim::{Sim, simulate_growth};
pub use state::{GrowthMatrix, GrowthRecord};
