//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Day` counter (Earth days since the
//! start of the run).  The mapping onto the Martian calendar is held in
//! `MarsCalendar`:
//!
//!   absolute_sol = start_sol + day / EARTH_DAYS_PER_SOL
//!   sol_of_year  = absolute_sol mod sols_per_year
//!   hour         = frac(absolute_sol) * 24
//!
//! Environment tables are indexed by `sol_of_year` (and `hour` for the
//! temperature table), so a run of any length keeps cycling through one
//! Martian year of samples.

use std::fmt;

use crate::{MgError, MgResult};

/// Length of one sol expressed in Earth days (24 h 39 m 35 s).
pub const EARTH_DAYS_PER_SOL: f64 = 1.027_491_251_7;

/// Sols in one Martian year, matching the generated environment tables.
pub const SOLS_PER_YEAR: u32 = 669;

/// Hours per sol used by the temperature table.
pub const HOURS_PER_SOL: f64 = 24.0;

// ── Day ──────────────────────────────────────────────────────────────────────

/// An absolute simulation day counter.  Day 0 holds the initial state.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Day(pub u32);

impl Day {
    pub const ZERO: Day = Day(0);

    /// The previous day, or `None` at day 0.
    #[inline]
    pub fn prev(self) -> Option<Day> {
        self.0.checked_sub(1).map(Day)
    }

    /// Cast to `usize` for direct use as a matrix column index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "D{}", self.0)
    }
}

// ── SolPosition ───────────────────────────────────────────────────────────────

/// Where a simulation day falls on the Martian calendar.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolPosition {
    pub day: Day,
    /// Sols elapsed since sol 0 of the calendar's reference year.
    pub absolute_sol: f64,
    /// Fractional sol within the current Martian year, in `[0, sols_per_year)`.
    pub sol_of_year: f64,
    /// Local hour in `[0, 24)`.
    pub hour: f64,
}

impl SolPosition {
    /// Whole sol of the year (row key of the hourly temperature table).
    #[inline]
    pub fn sol_index(&self) -> u32 {
        self.sol_of_year.floor() as u32
    }
}

impl fmt::Display for SolPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (sol {:.3}, {:05.2} h)",
            self.day, self.sol_of_year, self.hour
        )
    }
}

// ── MarsCalendar ──────────────────────────────────────────────────────────────

/// Converts Earth-day counters into positions on the Martian calendar.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MarsCalendar {
    /// Sol (possibly fractional) at which day 0 starts.
    pub start_sol: f64,
    /// Sols per Martian year.  Default: 669.
    pub sols_per_year: u32,
    /// Earth days per sol.  Default: [`EARTH_DAYS_PER_SOL`].
    pub earth_days_per_sol: f64,
}

impl Default for MarsCalendar {
    fn default() -> Self {
        Self {
            start_sol:          0.0,
            sols_per_year:      SOLS_PER_YEAR,
            earth_days_per_sol: EARTH_DAYS_PER_SOL,
        }
    }
}

impl MarsCalendar {
    /// Check that the calendar constants describe a usable calendar.
    pub fn validate(&self) -> MgResult<()> {
        if !self.start_sol.is_finite() || self.start_sol < 0.0 {
            return Err(MgError::Config(format!(
                "start_sol must be a finite non-negative number, got {}",
                self.start_sol
            )));
        }
        if self.sols_per_year == 0 {
            return Err(MgError::Config("sols_per_year must be positive".into()));
        }
        if !self.earth_days_per_sol.is_finite() || self.earth_days_per_sol <= 0.0 {
            return Err(MgError::Config(format!(
                "earth_days_per_sol must be positive, got {}",
                self.earth_days_per_sol
            )));
        }
        Ok(())
    }

    /// Map a simulation day onto the Martian calendar.
    pub fn position(&self, day: Day) -> SolPosition {
        let absolute_sol = self.start_sol + day.0 as f64 / self.earth_days_per_sol;
        SolPosition {
            day,
            absolute_sol,
            sol_of_year: absolute_sol.rem_euclid(self.sols_per_year as f64),
            hour:        absolute_sol.rem_euclid(1.0) * HOURS_PER_SOL,
        }
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Typically loaded from a TOML file by the application crate and passed to
/// the simulation builder.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Number of matrix columns, day 0 included.  The regolith experiment used 100.
    pub days: u32,

    /// Master RNG seed for soil sampling.  The same seed always produces
    /// identical results.
    pub seed: u64,

    /// Day → sol mapping.
    pub calendar: MarsCalendar,

    /// Worker thread count passed to Rayon.  `None` uses all logical cores.
    pub num_threads: Option<usize>,

    /// Call `on_snapshot` every N days.  0 disables snapshots.
    pub output_interval_days: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            days:                 100,
            seed:                 42,
            calendar:             MarsCalendar::default(),
            num_threads:          None,
            output_interval_days: 1,
        }
    }
}

impl SimConfig {
    /// Validate the day count and the calendar.
    pub fn validate(&self) -> MgResult<()> {
        if self.days == 0 {
            return Err(MgError::Config(
                "days must be at least 1 (day 0 holds the initial state)".into(),
            ));
        }
        self.calendar.validate()
    }
}
