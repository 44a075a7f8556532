//! CSV crop-profile loader.
//!
//! # CSV format
//!
//! One row per crop, in `CropId` order.
//!
//! ```csv
//! name,max_biomass,max_height,growth_rate,ph,nitrogen,phosphorus,potassium,solar_factor,temp_factor,dust_factor
//! potato,1.0,1.0,0.02,6.5,150,50,100,250,18,0.8
//! tomato,0.5,2.0,0.03,6.5,150,50,100,400,24,0.9
//! ```
//!
//! Rows are only parsed here; validation happens in
//! [`CropTableBuilder::build`][crate::CropTableBuilder::build].

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::{CropError, CropProfile, EnvSensitivity, SoilChemistry};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct CropRecord {
    name:         String,
    max_biomass:  f64,
    max_height:   f64,
    growth_rate:  f64,
    ph:           f64,
    nitrogen:     f64,
    phosphorus:   f64,
    potassium:    f64,
    solar_factor: f64,
    temp_factor:  f64,
    dust_factor:  f64,
}

impl From<CropRecord> for CropProfile {
    fn from(r: CropRecord) -> Self {
        CropProfile {
            name:         r.name.trim().to_string(),
            max_biomass:  r.max_biomass,
            max_height:   r.max_height,
            growth_rate:  r.growth_rate,
            soil_optimum: SoilChemistry::new(r.ph, r.nitrogen, r.phosphorus, r.potassium),
            sensitivity:  EnvSensitivity {
                solar:       r.solar_factor,
                temperature: r.temp_factor,
                dust:        r.dust_factor,
            },
        }
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load crop profiles from a CSV file.
pub fn load_crops_csv(path: &Path) -> Result<Vec<CropProfile>, CropError> {
    let file = std::fs::File::open(path)
        .map_err(CropError::Io)?;
    load_crops_reader(file)
}

/// Like [`load_crops_csv`] but accepts any `Read` source.
pub fn load_crops_reader<R: Read>(reader: R) -> Result<Vec<CropProfile>, CropError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    csv_reader
        .deserialize::<CropRecord>()
        .map(|row| {
            row.map(CropProfile::from)
                .map_err(|e| CropError::Parse(e.to_string()))
        })
        .collect()
}
