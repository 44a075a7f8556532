//! Fluent builder for constructing a validated `CropTable`.
//!
//! # Usage
//!
//! ```rust
//! use mg_crop::{CropProfile, CropTableBuilder};
//!
//! let table = CropTableBuilder::new(/*seed=*/ 42)
//!     .crops(CropProfile::mars_defaults())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(table.len(), 7);
//! ```

use std::collections::HashSet;

use log::debug;
use mg_core::{CropId, CropRng};

use crate::{CropError, CropProfile, CropResult, CropTable, SoilChemistry, SoilRanges};

/// Where the per-crop soil samples come from.
enum SoilSource {
    /// Draw each crop's sample from its own seeded stream.
    Sampled(SoilRanges),
    /// Use caller-supplied samples, one per crop, in crop order.
    Explicit(Vec<SoilChemistry>),
    /// Every crop grows in soil exactly at its optimum.
    Optimal,
}

/// Fluent builder for [`CropTable`].
///
/// Soil defaults to seeded sampling from [`SoilRanges::default`].
pub struct CropTableBuilder {
    seed:     u64,
    profiles: Vec<CropProfile>,
    soil:     SoilSource,
}

impl CropTableBuilder {
    /// Create an empty builder using `seed` for soil sampling.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            profiles: Vec::new(),
            soil:     SoilSource::Sampled(SoilRanges::default()),
        }
    }

    /// Append one crop.
    pub fn crop(mut self, profile: CropProfile) -> Self {
        self.profiles.push(profile);
        self
    }

    /// Append several crops in order.
    pub fn crops(mut self, profiles: impl IntoIterator<Item = CropProfile>) -> Self {
        self.profiles.extend(profiles);
        self
    }

    /// Sample soil from custom ranges instead of the defaults.
    pub fn soil_ranges(mut self, ranges: SoilRanges) -> Self {
        self.soil = SoilSource::Sampled(ranges);
        self
    }

    /// Supply soil samples directly (must be one per crop).
    pub fn soil_samples(mut self, samples: Vec<SoilChemistry>) -> Self {
        self.soil = SoilSource::Explicit(samples);
        self
    }

    /// Put every crop in soil matching its own optimum.
    pub fn optimal_soil(mut self) -> Self {
        self.soil = SoilSource::Optimal;
        self
    }

    /// Validate profiles, resolve soil samples, and return the table.
    pub fn build(self) -> CropResult<CropTable> {
        if self.profiles.is_empty() {
            return Err(CropError::Empty);
        }
        if self.profiles.len() > CropId::INVALID.index() {
            return Err(CropError::TooManyCrops(self.profiles.len()));
        }

        let mut names = HashSet::with_capacity(self.profiles.len());
        for profile in &self.profiles {
            profile.validate()?;
            if !names.insert(profile.name.to_ascii_lowercase()) {
                return Err(CropError::DuplicateName(profile.name.clone()));
            }
        }

        let soil = match self.soil {
            SoilSource::Sampled(ranges) => {
                ranges.validate()?;
                (0..self.profiles.len())
                    .map(|i| {
                        let mut rng = CropRng::new(self.seed, CropId(i as u16));
                        ranges.sample(&mut rng)
                    })
                    .collect()
            }
            SoilSource::Explicit(samples) => {
                if samples.len() != self.profiles.len() {
                    return Err(CropError::SoilCountMismatch {
                        expected: self.profiles.len(),
                        got:      samples.len(),
                    });
                }
                if let Some((i, _)) = samples.iter().enumerate().find(|(_, s)| !s.is_finite()) {
                    return Err(CropError::Invalid {
                        crop:   self.profiles[i].name.clone(),
                        reason: "soil sample contains a non-finite value".into(),
                    });
                }
                samples
            }
            SoilSource::Optimal => self.profiles.iter().map(|p| p.soil_optimum).collect(),
        };

        for (profile, sample) in self.profiles.iter().zip(&soil) {
            debug!(
                "soil for {:<10} pH {:5.2}  N {:6.2}  P {:6.2}  K {:6.2}",
                profile.name, sample.ph, sample.nitrogen, sample.phosphorus, sample.potassium
            );
        }

        Ok(CropTable::new(self.profiles, soil))
    }
}
