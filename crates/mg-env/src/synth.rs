//! Closed-form synthetic Martian environment.
//!
//! All three series are sinusoids over one Martian year (solar, dust) or one
//! sol (temperature).  The formulas are illustrative, not validated physics.
//!
//! ```text
//! solar(sol)        = (MAX + MIN)/2 + (MAX - MIN)/2 · sin(2π·sol/669)
//! temperature(hour) = (MAX + MIN)/2 + (MAX - MIN)/2 · sin(2π·(hour - 12)/24)
//! dust(sol, u)      = MIN + (MAX - MIN) · (0.5 + 0.5·sin(2π·sol/669) + u)
//! ```
//!
//! `u` is uniform noise in `[-0.1, 0.1)`.  It is drawn from a seeded
//! [`SimRng`] when a year of samples is tabulated, and is zero for the
//! function-backed [`SyntheticEnvironment`].

use std::f64::consts::TAU;

use mg_core::{SOLS_PER_YEAR, SimRng};

use crate::environment::check_hour;
use crate::{Boundary, EnvResult, EnvironmentSeries, SampleTable, TableEnvironment};

/// Solar radiation at aphelion (W/m²).
pub const SOLAR_MIN: f64 = 136.0;
/// Solar radiation at perihelion (W/m²).
pub const SOLAR_MAX: f64 = 717.0;
/// Coldest surface temperature (°C).
pub const TEMP_MIN: f64 = -143.0;
/// Warmest surface temperature (°C).
pub const TEMP_MAX: f64 = 35.0;
/// Clear-sky dust opacity.
pub const DUST_MIN: f64 = 0.01;
/// Global dust-storm opacity.
pub const DUST_MAX: f64 = 9.9;
/// Half-width of the uniform dust noise.
pub const DUST_NOISE: f64 = 0.1;

const HOURS: u32 = 24;

pub fn solar_radiation(sol: f64, year: f64) -> f64 {
    (SOLAR_MAX + SOLAR_MIN) / 2.0 + (SOLAR_MAX - SOLAR_MIN) / 2.0 * (TAU * sol / year).sin()
}

/// Diurnal cycle only; peaks at 18:00 and bottoms out at 06:00.
pub fn temperature(hour: f64) -> f64 {
    (TEMP_MAX + TEMP_MIN) / 2.0
        + (TEMP_MAX - TEMP_MIN) / 2.0 * (TAU * (hour - 12.0) / HOURS as f64).sin()
}

pub fn dust_opacity(sol: f64, year: f64, noise: f64) -> f64 {
    DUST_MIN + (DUST_MAX - DUST_MIN) * (0.5 + 0.5 * (TAU * sol / year).sin() + noise)
}

// ── SyntheticEnvironment ──────────────────────────────────────────────────────

/// Function-backed environment: evaluates the formulas directly, without
/// noise.  Defined for every finite sol, so it never reports out-of-range
/// sols; hours must still lie in `[0, 24)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SyntheticEnvironment {
    pub sols_per_year: u32,
}

impl Default for SyntheticEnvironment {
    fn default() -> Self {
        Self { sols_per_year: SOLS_PER_YEAR }
    }
}

impl EnvironmentSeries for SyntheticEnvironment {
    fn solar(&self, sol: f64) -> EnvResult<f64> {
        finite("solar", sol)?;
        Ok(solar_radiation(sol, self.sols_per_year as f64))
    }

    fn temperature(&self, sol: f64, hour: f64) -> EnvResult<f64> {
        finite("temperature", sol)?;
        check_hour(hour)?;
        Ok(temperature(hour))
    }

    fn dust_opacity(&self, sol: f64) -> EnvResult<f64> {
        finite("dust opacity", sol)?;
        Ok(dust_opacity(sol, self.sols_per_year as f64, 0.0))
    }
}

fn finite(series: &str, sol: f64) -> EnvResult<()> {
    if sol.is_finite() {
        Ok(())
    } else {
        Err(crate::EnvError::OutOfRange {
            series: series.into(),
            key:    sol,
            min:    f64::NEG_INFINITY,
            max:    f64::INFINITY,
        })
    }
}

// ── SyntheticYear ─────────────────────────────────────────────────────────────

/// One Martian year of tabulated samples, one row per sol (per hour for
/// temperature), in the same shape as the CSV files.
#[derive(Clone, Debug, PartialEq)]
pub struct SyntheticYear {
    pub solar:       Vec<(u32, f64)>,
    pub temperature: Vec<(u32, u32, f64)>,
    pub dust:        Vec<(u32, f64)>,
}

impl SyntheticYear {
    /// Tabulate `sols` sols.  Dust noise comes from a stream seeded by `seed`.
    pub fn generate(sols: u32, seed: u64) -> Self {
        let year = sols as f64;
        let mut rng = SimRng::new(seed);

        let solar = (0..sols)
            .map(|sol| (sol, solar_radiation(sol as f64, year)))
            .collect();
        let temperature = (0..sols)
            .flat_map(|sol| (0..HOURS).map(move |hour| (sol, hour, temperature(hour as f64))))
            .collect();
        let dust = (0..sols)
            .map(|sol| {
                let noise = rng.gen_range(-DUST_NOISE..DUST_NOISE);
                (sol, dust_opacity(sol as f64, year, noise))
            })
            .collect();

        Self { solar, temperature, dust }
    }

    /// Turn the rows into interpolating tables sharing one boundary policy.
    pub fn into_environment(self, boundary: Boundary) -> EnvResult<TableEnvironment> {
        let solar = SampleTable::new("solar", self.solar.into_iter().map(|(s, v)| (s as f64, v)))?
            .with_boundary(boundary)?;
        let temperature = TableEnvironment::hourly_table(
            "temperature",
            self.temperature.into_iter().map(|(s, h, v)| (s as f64, h as f64, v)),
        )?
        .with_boundary(boundary)?;
        let dust = SampleTable::new("dust opacity", self.dust.into_iter().map(|(s, v)| (s as f64, v)))?
            .with_boundary(boundary)?;
        Ok(TableEnvironment::new(solar, temperature, dust))
    }
}
