//! Crop identifiers.

use std::fmt;

/// Row index of a crop in a `CropTable` and in every output matrix.
///
/// Ids are dense: a table of `n` crops uses `CropId(0)..CropId(n)`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CropId(pub u16);

impl CropId {
    /// Never assigned; a table holds at most `INVALID.index()` crops.
    pub const INVALID: CropId = CropId(u16::MAX);

    #[inline]
    pub fn index(self) -> usize {
        usize::from(self.0)
    }
}

impl fmt::Display for CropId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "crop {}", self.0)
    }
}
