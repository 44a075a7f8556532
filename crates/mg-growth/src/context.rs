//! Per-day inputs shared by every crop's growth step.

use mg_core::{Day, SolPosition};
use mg_env::EnvReading;

/// The calendar position and environment reading of one simulated day.
///
/// Built once per day by mg-sim and shared (immutably) by all crops, so
/// every crop sees the same environment on the same day.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DayConditions {
    pub position: SolPosition,
    pub reading:  EnvReading,
}

impl DayConditions {
    #[inline]
    pub fn new(position: SolPosition, reading: EnvReading) -> Self {
        Self { position, reading }
    }

    #[inline]
    pub fn day(&self) -> Day {
        self.position.day
    }
}
