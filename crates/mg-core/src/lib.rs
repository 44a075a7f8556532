//! `mg-core`: foundational types for the `mars_garden` growth simulator.
//!
//! This crate is a dependency of every other `mg-*` crate.  It intentionally
//! has no `mg-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `CropId`                                              |
//! | [`time`]        | `Day`, `MarsCalendar`, `SolPosition`, `SimConfig`     |
//! | [`rng`]         | `CropRng` (per-crop), `SimRng` (global)               |
//! | [`error`]       | `MgError`, `MgResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | `Serialize`/`Deserialize` on all public types (TOML config) |

pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{MgError, MgResult};
pub use ids::CropId;
pub use rng::{CropRng, SimRng};
pub use time::{
    Day, EARTH_DAYS_PER_SOL, HOURS_PER_SOL, MarsCalendar, SOLS_PER_YEAR, SimConfig, SolPosition,
};
