//! TOML run configuration.
//!
//! Every section is optional; an empty file runs the seven default crops for
//! 100 days against the closed-form environment.
//!
//! ```toml
//! [sim]
//! days = 100
//! seed = 42
//! output_interval_days = 1
//!
//! [crops]
//! file = "crops.csv"
//!
//! [environment]
//! dir = "data/env"
//! boundary = "periodic"
//!
//! [model]
//! kind = "standard"
//! curve = "logistic"
//!
//! [resources]
//! water = 0.05
//!
//! [output]
//! dir = "output/greenhouse"
//! format = "csv"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use mg_core::SimConfig;
use mg_env::Boundary;
use mg_growth::{
    GrowthModel, GrowthSettings, SOLAR_MAX, SoilOnlyGrowth, StandardGrowth, SupplyLimitedGrowth,
};
use mg_sim::ResourceBudget;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GreenhouseConfig {
    pub sim:         SimConfig,
    pub crops:       CropSection,
    pub environment: EnvironmentSection,
    pub model:       ModelSection,
    /// Present only when resource depletion is wanted.
    pub resources:   Option<ResourceBudget>,
    pub output:      OutputSection,
}

impl GreenhouseConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }
}

// ── Sections ──────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CropSection {
    /// Crop profile CSV.  `None` uses the built-in defaults.
    pub file:         Option<PathBuf>,
    /// Give every crop its own optimum instead of sampled soil.
    pub optimal_soil: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnvironmentSection {
    /// Directory holding the three environment CSVs.  `None` evaluates the
    /// closed-form generators instead.
    pub dir:      Option<PathBuf>,
    pub boundary: BoundaryChoice,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryChoice {
    Strict,
    Clamp,
    /// Wrap every table over one Martian year.
    #[default]
    Periodic,
}

impl BoundaryChoice {
    pub fn to_boundary(self, sols_per_year: u32) -> Boundary {
        match self {
            BoundaryChoice::Strict => Boundary::Strict,
            BoundaryChoice::Clamp => Boundary::Clamp,
            BoundaryChoice::Periodic => Boundary::periodic_year(sols_per_year),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    #[default]
    Standard,
    SoilOnly,
    SupplyLimited,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ModelSection {
    pub kind:      ModelKind,
    /// Radiation giving a solar ratio of 1.  Ignored by `soil_only`.
    pub solar_max: f64,
    #[serde(flatten)]
    pub settings:  GrowthSettings,
    /// Parameters of `supply_limited`, under `[model.supply]`.
    pub supply:    SupplyLimitedGrowth,
}

impl Default for ModelSection {
    fn default() -> Self {
        Self {
            kind:      ModelKind::Standard,
            solar_max: SOLAR_MAX,
            settings:  GrowthSettings::default(),
            supply:    SupplyLimitedGrowth::default(),
        }
    }
}

impl ModelSection {
    pub fn build(&self) -> Box<dyn GrowthModel> {
        match self.kind {
            ModelKind::Standard => {
                Box::new(StandardGrowth::new(self.settings).with_solar_max(self.solar_max))
            }
            ModelKind::SoilOnly => Box::new(SoilOnlyGrowth::new(self.settings)),
            ModelKind::SupplyLimited => Box::new(self.supply.clone()),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Csv,
    Sqlite,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputSection {
    pub dir:    PathBuf,
    pub format: OutputFormat,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self { dir: PathBuf::from("output/greenhouse"), format: OutputFormat::Csv }
    }
}
