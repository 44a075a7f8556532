//! `mg-output`: simulation output writers for the mars_garden simulator.
//!
//! Two backends are provided:
//!
//! | Feature   | Backend     | Files created                                 |
//! |-----------|-------------|-----------------------------------------------|
//! | *(none)*  | CSV         | `growth.csv`, `conditions.csv`, `soil.csv`    |
//! | `sqlite`  | SQLite      | `output.db` (tables `growth`, `conditions`, `soil`) |
//!
//! Both implement [`OutputWriter`] and are driven by [`SimOutputObserver`],
//! which implements `mg_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use mg_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output")).unwrap();
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(&mut obs).unwrap();
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{ConditionsRow, GrowthRow, SoilRow};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
