//! `mg-env`: environment series for the growth simulator.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`series`]      | `SampleTable` (sorted samples, linear interpolation), `Boundary` |
//! | [`environment`] | `EnvironmentSeries` trait, `EnvReading`, `TableEnvironment`, `ConstantEnvironment` |
//! | [`synth`]       | Closed-form generators, `SyntheticEnvironment`, `SyntheticYear` |
//! | [`loader`]      | `load_environment_dir`, per-file CSV readers and writers   |
//! | [`error`]       | `EnvError`, `EnvResult<T>`                                 |
//!
//! # Lookup model (summary)
//!
//! Every series is a sorted table of `(key, value)` samples where the key is a
//! sol of the Martian year.  The hourly temperature table is flattened onto
//! the same axis with `key = sol + hour / 24`.  Between samples the value is
//! interpolated linearly; outside the sampled domain the table's
//! [`Boundary`] policy decides:
//!
//! ```text
//! Strict            → EnvError::OutOfRange
//! Clamp             → value of the nearest boundary sample
//! Periodic{period}  → wrap into [min, min + period), interpolating across
//!                     the seam between the last and first samples
//! ```

pub mod environment;
pub mod error;
pub mod loader;
pub mod series;
pub mod synth;

#[cfg(test)]
mod tests;

pub use environment::{ConstantEnvironment, EnvReading, EnvironmentSeries, TableEnvironment};
pub use error::{EnvError, EnvResult};
pub use loader::{
    DUST_FILE, SOLAR_FILE, TEMPERATURE_FILE, load_daily_csv, load_daily_reader,
    load_environment_dir, load_hourly_csv, load_hourly_reader, write_environment_dir,
};
pub use series::{Boundary, SampleTable};
pub use synth::{SyntheticEnvironment, SyntheticYear};
