//! Soil chemistry and seeded sampling ranges.

use std::ops::Range;

use mg_core::CropRng;

use crate::{CropError, CropResult};

/// pH, nitrogen, phosphorus and potassium of a soil patch.
///
/// Used both as a crop's tolerance optimum and as the sampled soil a crop
/// actually grows in.  Nutrients are in mg/kg; pH is unitless.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SoilChemistry {
    pub ph:         f64,
    pub nitrogen:   f64,
    pub phosphorus: f64,
    pub potassium:  f64,
}

impl SoilChemistry {
    pub const fn new(ph: f64, nitrogen: f64, phosphorus: f64, potassium: f64) -> Self {
        Self { ph, nitrogen, phosphorus, potassium }
    }

    /// The four components in `[ph, nitrogen, phosphorus, potassium]` order.
    #[inline]
    pub fn as_array(&self) -> [f64; 4] {
        [self.ph, self.nitrogen, self.phosphorus, self.potassium]
    }

    pub fn is_finite(&self) -> bool {
        self.as_array().iter().all(|v| v.is_finite())
    }
}

/// Uniform sampling ranges for each soil component.
///
/// The defaults are the ranges of the Martian-regolith experiment:
/// pH 5.5–8.5, N 50–250, P 10–90, K 50–150 mg/kg.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SoilRanges {
    pub ph:         Range<f64>,
    pub nitrogen:   Range<f64>,
    pub phosphorus: Range<f64>,
    pub potassium:  Range<f64>,
}

impl Default for SoilRanges {
    fn default() -> Self {
        Self {
            ph:         5.5..8.5,
            nitrogen:   50.0..250.0,
            phosphorus: 10.0..90.0,
            potassium:  50.0..150.0,
        }
    }
}

impl SoilRanges {
    /// Reject empty, reversed or non-finite ranges (`gen_range` would panic).
    pub fn validate(&self) -> CropResult<()> {
        let named = [
            ("ph", &self.ph),
            ("nitrogen", &self.nitrogen),
            ("phosphorus", &self.phosphorus),
            ("potassium", &self.potassium),
        ];
        for (what, r) in named {
            if !(r.start.is_finite() && r.end.is_finite() && r.start < r.end) {
                return Err(CropError::EmptyRange { what, start: r.start, end: r.end });
            }
        }
        Ok(())
    }

    /// Draw one sample, components in pH, N, P, K order.
    pub fn sample(&self, rng: &mut CropRng) -> SoilChemistry {
        SoilChemistry {
            ph:         rng.gen_range(self.ph.clone()),
            nitrogen:   rng.gen_range(self.nitrogen.clone()),
            phosphorus: rng.gen_range(self.phosphorus.clone()),
            potassium:  rng.gen_range(self.potassium.clone()),
        }
    }
}
