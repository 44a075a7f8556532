//! Fluent builder for constructing a [`Sim`].

use mg_core::SimConfig;
use mg_crop::CropTable;
use mg_env::EnvironmentSeries;
use mg_growth::GrowthModel;

use crate::{ResourceBudget, Sim, SimError, SimResult};

/// Fluent builder for [`Sim<E, M>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: day count, calendar, seed, …
/// - [`CropTable`]: from [`mg_crop::CropTableBuilder`]
/// - `E: EnvironmentSeries`: e.g. [`mg_env::TableEnvironment`]
/// - `M: GrowthModel`: e.g. [`mg_growth::StandardGrowth`]
///
/// # Optional inputs (have defaults)
///
/// | Method            | Default                 |
/// |-------------------|-------------------------|
/// | `.resources(b)`   | No resource depletion   |
///
/// # Example
///
/// ```rust
/// use mg_core::SimConfig;
/// use mg_crop::{CropProfile, CropTableBuilder};
/// use mg_env::ConstantEnvironment;
/// use mg_growth::StandardGrowth;
/// use mg_sim::{NoopObserver, ResourceBudget, SimBuilder};
///
/// let crops = CropTableBuilder::new(42)
///     .crops(CropProfile::mars_defaults())
///     .build()
///     .unwrap();
/// let sim = SimBuilder::new(
///     SimConfig { days: 10, ..SimConfig::default() },
///     crops,
///     ConstantEnvironment::new(500.0, 20.0, 0.5),
///     StandardGrowth::default(),
/// )
/// .resources(ResourceBudget::default())
/// .build()
/// .unwrap();
/// let record = sim.run(&mut NoopObserver).unwrap();
/// assert_eq!(record.day_count(), 10);
/// ```
pub struct SimBuilder<E: EnvironmentSeries, M: GrowthModel> {
    config:      SimConfig,
    crops:       CropTable,
    environment: E,
    model:       M,
    resources:   Option<ResourceBudget>,
}

impl<E: EnvironmentSeries, M: GrowthModel> SimBuilder<E, M> {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, crops: CropTable, environment: E, model: M) -> Self {
        Self { config, crops, environment, model, resources: None }
    }

    /// Enable per-crop water and nutrient depletion.
    pub fn resources(mut self, budget: ResourceBudget) -> Self {
        self.resources = Some(budget);
        self
    }

    /// Validate inputs and return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<E, M>> {
        self.config.validate()?;
        if self.crops.is_empty() {
            return Err(SimError::Config("crop table is empty".into()));
        }
        if let Some(budget) = &self.resources {
            budget.validate()?;
        }

        Ok(Sim {
            config:      self.config,
            crops:       self.crops,
            environment: self.environment,
            model:       self.model,
            resources:   self.resources,
        })
    }
}
