//! The `EnvironmentSeries` trait and its table and constant backends.

use mg_core::{HOURS_PER_SOL, SolPosition};

use crate::series::hourly_key;
use crate::{EnvError, EnvResult, SampleTable};

/// One day's environment as seen by the growth model.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnvReading {
    /// Solar radiation at the surface (W/m²).
    pub solar: f64,
    /// Air temperature (°C).
    pub temperature: f64,
    /// Atmospheric dust opacity (unitless).
    pub dust_opacity: f64,
}

/// Source of the three environment lookups.
///
/// The simulator only talks to this trait, so the data can come from CSV
/// tables, in-memory tables, or closed-form functions.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync`: the simulator may read the
/// environment from several worker threads.
pub trait EnvironmentSeries: Send + Sync {
    /// Solar radiation (W/m²) at a fractional sol of the year.
    fn solar(&self, sol: f64) -> EnvResult<f64>;

    /// Temperature (°C) at a sol and local hour in `[0, 24)`.
    fn temperature(&self, sol: f64, hour: f64) -> EnvResult<f64>;

    /// Dust opacity at a fractional sol of the year.
    fn dust_opacity(&self, sol: f64) -> EnvResult<f64>;

    /// Read all three series at a calendar position.
    ///
    /// Temperature is read at the whole sol plus the local hour; the other
    /// two at the fractional sol.
    fn read(&self, pos: &SolPosition) -> EnvResult<EnvReading> {
        Ok(EnvReading {
            solar:        self.solar(pos.sol_of_year)?,
            temperature:  self.temperature(f64::from(pos.sol_index()), pos.hour)?,
            dust_opacity: self.dust_opacity(pos.sol_of_year)?,
        })
    }
}

impl<T: EnvironmentSeries + ?Sized> EnvironmentSeries for Box<T> {
    fn solar(&self, sol: f64) -> EnvResult<f64> {
        (**self).solar(sol)
    }

    fn temperature(&self, sol: f64, hour: f64) -> EnvResult<f64> {
        (**self).temperature(sol, hour)
    }

    fn dust_opacity(&self, sol: f64) -> EnvResult<f64> {
        (**self).dust_opacity(sol)
    }
}

/// Reject hours outside one sol before they are folded into a table key.
pub(crate) fn check_hour(hour: f64) -> EnvResult<()> {
    if (0.0..HOURS_PER_SOL).contains(&hour) {
        Ok(())
    } else {
        Err(EnvError::OutOfRange {
            series: "temperature hour".into(),
            key:    hour,
            min:    0.0,
            max:    HOURS_PER_SOL,
        })
    }
}

// ── TableEnvironment ──────────────────────────────────────────────────────────

/// Environment backed by three [`SampleTable`]s.
///
/// The temperature table is keyed by `sol + hour / 24`; build it from
/// `(sol, hour, value)` rows with [`TableEnvironment::hourly_table`].
#[derive(Clone, Debug)]
pub struct TableEnvironment {
    pub solar:       SampleTable,
    pub temperature: SampleTable,
    pub dust:        SampleTable,
}

impl TableEnvironment {
    pub fn new(solar: SampleTable, temperature: SampleTable, dust: SampleTable) -> Self {
        Self { solar, temperature, dust }
    }

    /// Flatten `(sol, hour, value)` rows into a sol-keyed table.
    pub fn hourly_table(
        name: impl Into<String>,
        rows: impl IntoIterator<Item = (f64, f64, f64)>,
    ) -> EnvResult<SampleTable> {
        let samples = rows
            .into_iter()
            .map(|(sol, hour, value)| {
                check_hour(hour)?;
                Ok((hourly_key(sol, hour), value))
            })
            .collect::<EnvResult<Vec<_>>>()?;
        SampleTable::new(name, samples)
    }
}

impl EnvironmentSeries for TableEnvironment {
    fn solar(&self, sol: f64) -> EnvResult<f64> {
        self.solar.lookup(sol)
    }

    fn temperature(&self, sol: f64, hour: f64) -> EnvResult<f64> {
        check_hour(hour)?;
        self.temperature.lookup(hourly_key(sol.floor(), hour))
    }

    fn dust_opacity(&self, sol: f64) -> EnvResult<f64> {
        self.dust.lookup(sol)
    }
}

// ── ConstantEnvironment ───────────────────────────────────────────────────────

/// The same reading on every sol and hour.  Handy for controlled experiments
/// and tests.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstantEnvironment(pub EnvReading);

impl ConstantEnvironment {
    pub fn new(solar: f64, temperature: f64, dust_opacity: f64) -> Self {
        Self(EnvReading { solar, temperature, dust_opacity })
    }
}

impl EnvironmentSeries for ConstantEnvironment {
    fn solar(&self, _sol: f64) -> EnvResult<f64> {
        Ok(self.0.solar)
    }

    fn temperature(&self, _sol: f64, hour: f64) -> EnvResult<f64> {
        check_hour(hour)?;
        Ok(self.0.temperature)
    }

    fn dust_opacity(&self, _sol: f64) -> EnvResult<f64> {
        Ok(self.0.dust_opacity)
    }
}
