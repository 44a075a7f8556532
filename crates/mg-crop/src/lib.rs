//! `mg-crop`: crop profiles, soil samples, and the crop table.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`profile`]  | `CropProfile`, `EnvSensitivity`, the seven built-in crops  |
//! | [`soil`]     | `SoilChemistry`, `SoilRanges` (seeded uniform sampling)    |
//! | [`table`]    | `CropTable` (profiles + one soil sample per crop)          |
//! | [`builder`]  | `CropTableBuilder` (fluent construction and validation)    |
//! | [`loader`]   | `load_crops_csv`, `load_crops_reader`                      |
//! | [`error`]    | `CropError`, `CropResult<T>`                               |
//!
//! Everything in a built `CropTable` is immutable: the simulator only ever
//! borrows it.

pub mod builder;
pub mod error;
pub mod loader;
pub mod profile;
pub mod soil;
pub mod table;


pub use builder::CropTableBuilder;
pub use error::{CropError, CropResult};
pub use loader::{load_crops_csv, load_crops_reader};
pub use profile::{CropProfile, EnvSensitivity};
pub use soil::{SoilChemistry, SoilRanges};
pub use table::CropTable;
