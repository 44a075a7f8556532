//! The `OutputWriter` trait implemented by all backend writers.

use crate::{ConditionsRow, GrowthRow, OutputResult, SoilRow};

/// Trait implemented by the CSV and SQLite writers.
///
/// All methods are infallible from the observer's perspective: errors are
/// stored internally and retrieved with
/// [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    /// Write one soil row per crop.  Called once, before day 1.
    fn write_soil(&mut self, rows: &[SoilRow<'_>]) -> OutputResult<()>;

    /// Write a batch of per-crop growth rows for one day.
    fn write_growth(&mut self, rows: &[GrowthRow<'_>]) -> OutputResult<()>;

    /// Write one day's conditions.
    fn write_conditions(&mut self, row: &ConditionsRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
