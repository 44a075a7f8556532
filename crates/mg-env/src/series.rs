//! Sorted sample tables with linear interpolation.

use crate::{EnvError, EnvResult};

/// What a [`SampleTable`] does with keys outside its sampled domain.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Boundary {
    /// Fail with [`EnvError::OutOfRange`].
    #[default]
    Strict,
    /// Return the value of the nearest boundary sample.
    Clamp,
    /// Treat the table as one cycle of length `period` starting at the first
    /// key.  Keys in the gap between the last sample and `first + period`
    /// are interpolated towards the first sample.
    Periodic { period: f64 },
}

impl Boundary {
    /// One Martian year of sol-indexed samples.
    pub fn periodic_year(sols: u32) -> Self {
        Boundary::Periodic { period: sols as f64 }
    }
}

/// Flatten a `(sol, hour)` pair onto the sol axis.
#[inline]
pub fn hourly_key(sol: f64, hour: f64) -> f64 {
    sol + hour / mg_core::HOURS_PER_SOL
}

/// A monotonic `(key, value)` table.
///
/// Keys are strictly ascending and every sample is finite; both are checked
/// at construction.  The table is immutable once built.
#[derive(Clone, Debug)]
pub struct SampleTable {
    name:     String,
    keys:     Vec<f64>,
    values:   Vec<f64>,
    boundary: Boundary,
}

impl SampleTable {
    /// Build a table with the [`Boundary::Strict`] policy.
    pub fn new(
        name: impl Into<String>,
        samples: impl IntoIterator<Item = (f64, f64)>,
    ) -> EnvResult<Self> {
        let name = name.into();
        let (keys, values): (Vec<f64>, Vec<f64>) = samples.into_iter().unzip();

        if keys.is_empty() {
            return Err(EnvError::EmptyTable(name));
        }
        for row in 0..keys.len() {
            if !keys[row].is_finite() || !values[row].is_finite() {
                return Err(EnvError::NonFinite { series: name, row });
            }
            if row > 0 && keys[row] <= keys[row - 1] {
                return Err(EnvError::Unsorted { series: name, row });
            }
        }

        Ok(Self { name, keys, values, boundary: Boundary::Strict })
    }

    /// Replace the boundary policy.
    ///
    /// A periodic period must be finite and at least as long as the sampled
    /// span, otherwise samples would overlap after wrapping.
    pub fn with_boundary(mut self, boundary: Boundary) -> EnvResult<Self> {
        if let Boundary::Periodic { period } = boundary {
            let (min, max) = self.domain();
            if !(period.is_finite() && period > 0.0 && period >= max - min) {
                return Err(EnvError::InvalidBoundary {
                    series: self.name,
                    reason: format!("period {period} is shorter than the sampled span {}", max - min),
                });
            }
        }
        self.boundary = boundary;
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// First and last sampled key.
    pub fn domain(&self) -> (f64, f64) {
        (self.keys[0], self.keys[self.keys.len() - 1])
    }

    /// Iterate the raw samples in key order.
    pub fn samples(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.keys.iter().copied().zip(self.values.iter().copied())
    }

    /// Linear interpolation inside the sampled domain only.
    ///
    /// Ignores the boundary policy: any key outside `[min, max]`, or NaN,
    /// is an [`EnvError::OutOfRange`].
    pub fn interpolate(&self, key: f64) -> EnvResult<f64> {
        let (min, max) = self.domain();
        if !(min..=max).contains(&key) {
            return Err(self.out_of_range(key));
        }

        // First index whose key is strictly greater than `key`.
        let upper = self.keys.partition_point(|&k| k <= key);
        if upper == self.keys.len() {
            return Ok(self.values[upper - 1]);
        }
        let lower = upper - 1;
        let t = (key - self.keys[lower]) / (self.keys[upper] - self.keys[lower]);
        Ok(lerp(self.values[lower], self.values[upper], t))
    }

    /// Interpolated value at `key`, applying the boundary policy.
    pub fn lookup(&self, key: f64) -> EnvResult<f64> {
        if key.is_nan() {
            return Err(self.out_of_range(key));
        }
        let (min, max) = self.domain();

        match self.boundary {
            Boundary::Strict => self.interpolate(key),
            Boundary::Clamp => self.interpolate(key.clamp(min, max)),
            Boundary::Periodic { period } => {
                if key.is_infinite() {
                    return Err(self.out_of_range(key));
                }
                let wrapped = min + (key - min).rem_euclid(period);
                if wrapped <= max {
                    return self.interpolate(wrapped);
                }
                // Seam: between the last sample and the first sample of the
                // next cycle.
                let seam_end = min + period;
                let t = (wrapped - max) / (seam_end - max);
                Ok(lerp(self.values[self.values.len() - 1], self.values[0], t.min(1.0)))
            }
        }
    }

    fn out_of_range(&self, key: f64) -> EnvError {
        let (min, max) = self.domain();
        EnvError::OutOfRange { series: self.name.clone(), key, min, max }
    }
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}
