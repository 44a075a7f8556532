//! `CropTable`: crop profiles and their soil samples, indexed by `CropId`.

use mg_core::CropId;

use crate::{CropProfile, SoilChemistry};

/// Parallel arrays of crop profiles and soil samples.
///
/// Both `Vec`s have exactly `len()` elements and the `CropId` value is the
/// index into both.  The table is immutable once built; construct it with
/// [`CropTableBuilder`][crate::CropTableBuilder].
#[derive(Clone, Debug)]
pub struct CropTable {
    profiles: Vec<CropProfile>,
    soil:     Vec<SoilChemistry>,
}

impl CropTable {
    /// Assemble a table from already validated parts.
    pub(crate) fn new(profiles: Vec<CropProfile>, soil: Vec<SoilChemistry>) -> Self {
        debug_assert_eq!(profiles.len(), soil.len());
        Self { profiles, soil }
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    #[inline]
    pub fn profile(&self, crop: CropId) -> &CropProfile {
        &self.profiles[crop.index()]
    }

    #[inline]
    pub fn soil(&self, crop: CropId) -> &SoilChemistry {
        &self.soil[crop.index()]
    }

    pub fn profiles(&self) -> &[CropProfile] {
        &self.profiles
    }

    pub fn soil_samples(&self) -> &[SoilChemistry] {
        &self.soil
    }

    /// All crop IDs in table order.
    pub fn ids(&self) -> impl Iterator<Item = CropId> + '_ {
        (0..self.profiles.len()).map(|i| CropId(i as u16))
    }

    /// Iterate `(id, profile, soil)` in table order.
    pub fn iter(&self) -> impl Iterator<Item = (CropId, &CropProfile, &SoilChemistry)> + '_ {
        self.ids()
            .zip(self.profiles.iter())
            .zip(self.soil.iter())
            .map(|((id, p), s)| (id, p, s))
    }
}
