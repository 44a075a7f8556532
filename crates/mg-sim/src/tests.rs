//! Integration tests for mg-sim.

use mg_core::{CropId, Day, SimConfig};
use mg_crop::{CropProfile, CropTable, CropTableBuilder, EnvSensitivity, SoilChemistry};
use mg_env::ConstantEnvironment;
use mg_growth::{DayConditions, StandardGrowth};

use crate::{GrowthRecord, NoopObserver, SimBuilder, SimObserver};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn test_config(days: u32) -> SimConfig {
    SimConfig {
        days,
        seed: 42,
        num_threads: Some(1),
        output_interval_days: 1,
        ..SimConfig::default()
    }
}

/// A crop whose every factor is exactly 1 under [`unit_env`].
fn unit_crop(name: &str) -> CropProfile {
    CropProfile {
        name:         name.to_string(),
        max_biomass:  1.0,
        max_height:   1.0,
        growth_rate:  1.0,
        soil_optimum: SoilChemistry::new(6.5, 150.0, 50.0, 100.0),
        sensitivity:  EnvSensitivity { solar: 717.0, temperature: 20.0, dust: 1.0 },
    }
}

fn unit_env() -> ConstantEnvironment {
    ConstantEnvironment::new(717.0, 20.0, 0.0)
}

fn optimal_table(crops: Vec<CropProfile>) -> CropTable {
    CropTableBuilder::new(42).crops(crops).optimal_soil().build().unwrap()
}

fn run_unit(days: u32) -> GrowthRecord {
    SimBuilder::new(
        test_config(days),
        optimal_table(vec![unit_crop("unit")]),
        unit_env(),
        StandardGrowth::default(),
    )
    .build()
    .unwrap()
    .run(&mut NoopObserver)
    .unwrap()
}

/// Counts every hook call.
#[derive(Default)]
struct CountingObserver {
    starts:     usize,
    day_starts: Vec<Day>,
    day_ends:   Vec<Day>,
    snapshots:  Vec<Day>,
    deaths:     Vec<(CropId, Day)>,
    ends:       usize,
}

impl SimObserver for CountingObserver {
    fn on_sim_start(&mut self, _config: &SimConfig, _crops: &CropTable) {
        self.starts += 1;
    }
    fn on_day_start(&mut self, day: Day) {
        self.day_starts.push(day);
    }
    fn on_day_end(&mut self, day: Day, conditions: &DayConditions) {
        assert_eq!(conditions.day(), day);
        self.day_ends.push(day);
    }
    fn on_crop_death(&mut self, crop: CropId, day: Day) {
        self.deaths.push((crop, day));
    }
    fn on_snapshot(&mut self, day: Day, _crops: &CropTable, record: &GrowthRecord) {
        // The snapshot day is already filled in.
        assert!(record.biomass.get(CropId(0), day) > 0.0);
        self.snapshots.push(day);
    }
    fn on_sim_end(&mut self, _record: &GrowthRecord) {
        self.ends += 1;
    }
}

// ── GrowthMatrix / GrowthRecord ───────────────────────────────────────────────

#[cfg(test)]
mod state_tests {
    use super::*;
    use crate::GrowthMatrix;

    #[test]
    fn matrix_get_set_row() {
        let mut m = GrowthMatrix::new(2, 3);
        assert_eq!(m.crop_count(), 2);
        assert_eq!(m.day_count(), 3);
        m.set(CropId(1), Day(2), 4.5);
        assert_eq!(m.get(CropId(1), Day(2)), 4.5);
        assert_eq!(m.row(CropId(1)), &[0.0, 0.0, 4.5]);
        assert_eq!(m.row(CropId(0)), &[0.0, 0.0, 0.0]);
    }

    #[test]
    #[should_panic]
    fn matrix_day_out_of_bounds_panics() {
        let m = GrowthMatrix::new(2, 3);
        m.get(CropId(0), Day(3));
    }

    #[test]
    fn record_alive_and_conditions() {
        let mut record = GrowthRecord::new(1, 4);
        record.death_day[0] = Some(Day(2));
        assert!(record.is_alive(CropId(0), Day(1)));
        assert!(!record.is_alive(CropId(0), Day(2)));
        assert!(!record.is_alive(CropId(0), Day(3)));
        assert!(record.conditions_on(Day(0)).is_none());
        assert!(record.conditions_on(Day(1)).is_none());
    }
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;
    use crate::{ResourceBudget, SimError};

    #[test]
    fn builds_successfully_with_defaults() {
        let sim = SimBuilder::new(
            test_config(10),
            optimal_table(vec![unit_crop("a"), unit_crop("b")]),
            unit_env(),
            StandardGrowth::default(),
        )
        .build()
        .unwrap();
        assert_eq!(sim.crops.len(), 2);
        assert!(sim.resources.is_none());
    }

    #[test]
    fn zero_days_rejected() {
        let result = SimBuilder::new(
            test_config(0),
            optimal_table(vec![unit_crop("a")]),
            unit_env(),
            StandardGrowth::default(),
        )
        .build();
        assert!(matches!(result, Err(SimError::Core(_))));
    }

    #[test]
    fn negative_budget_rejected() {
        let budget = ResourceBudget { water: -1.0, ..ResourceBudget::default() };
        let result = SimBuilder::new(
            test_config(10),
            optimal_table(vec![unit_crop("a")]),
            unit_env(),
            StandardGrowth::default(),
        )
        .resources(budget)
        .build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }
}

// ── Growth run ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use float_eq::assert_float_eq;
    use mg_env::{Boundary, SyntheticEnvironment, SyntheticYear};

    use super::*;
    use crate::simulate_growth;

    #[test]
    fn five_days_match_hand_recurrence() {
        // x' = 2x / (1 + x) from x0 = 0.01, i.e. x_n = 1 / (1 + 99 / 2^n).
        let record = run_unit(5);
        let expected = [0.01, 1.0 / 50.5, 1.0 / 25.75, 1.0 / 13.375, 1.0 / 7.1875];
        let row = record.biomass.row(CropId(0));
        assert_eq!(row.len(), 5);
        for (got, want) in row.iter().zip(expected) {
            assert_float_eq!(*got, want, rmax <= 1e-12);
        }
        assert!(row.windows(2).all(|w| w[1] > w[0]));
        assert!(row.iter().all(|&b| b < 1.0));
    }

    #[test]
    fn height_starts_at_initial_height() {
        let record = run_unit(3);
        assert_eq!(record.height.get(CropId(0), Day(0)), 0.1);
        assert!(record.height.get(CropId(0), Day(2)) > 0.1);
    }

    #[test]
    fn converges_monotonically_to_max_biomass() {
        let record = run_unit(300);
        let row = record.biomass.row(CropId(0));
        assert!(row.windows(2).all(|w| w[1] + 1e-12 >= w[0]));
        assert!(row.iter().all(|&b| b <= 1.0 + 1e-12));
        assert_float_eq!(row[299], 1.0, abs <= 1e-9);
    }

    #[test]
    fn conditions_recorded_per_day() {
        let record = run_unit(4);
        assert_eq!(record.conditions.len(), 3);
        let c = record.conditions_on(Day(2)).unwrap();
        assert_eq!(c.day(), Day(2));
        assert_eq!(c.reading.solar, 717.0);
        assert!(record.conditions_on(Day(4)).is_none());
    }

    #[test]
    fn single_day_holds_initial_state_only() {
        let record = run_unit(1);
        assert_eq!(record.day_count(), 1);
        assert!(record.conditions.is_empty());
        assert_eq!(record.biomass.get(CropId(0), Day(0)), 0.01);
    }

    #[test]
    fn deterministic_for_same_seed() {
        let run = |seed| {
            let crops = CropTableBuilder::new(seed)
                .crops(CropProfile::mars_defaults())
                .build()
                .unwrap();
            let config = SimConfig { seed, ..test_config(60) };
            let env = SyntheticEnvironment::default();
            simulate_growth(config, crops, env, StandardGrowth::default()).unwrap()
        };
        let a = run(7);
        let b = run(7);
        let c = run(8);
        assert_eq!(a, b);
        assert_ne!(a.biomass, c.biomass);
    }

    #[test]
    fn crops_do_not_interact() {
        let env = SyntheticEnvironment::default();
        let potato = CropProfile::mars_defaults().remove(0);
        let alone = CropTableBuilder::new(3).crop(potato.clone()).build().unwrap();
        let together = CropTableBuilder::new(3)
            .crops(CropProfile::mars_defaults())
            .build()
            .unwrap();

        let a = simulate_growth(test_config(40), alone, env, StandardGrowth::default()).unwrap();
        let b = simulate_growth(test_config(40), together, env, StandardGrowth::default()).unwrap();
        assert_eq!(a.biomass.row(CropId(0)), b.biomass.row(CropId(0)));
        assert_eq!(a.height.row(CropId(0)), b.height.row(CropId(0)));
    }

    #[test]
    fn later_days_do_not_change_earlier_ones() {
        let env = SyntheticEnvironment::default();
        let run = |days| {
            let crops = CropTableBuilder::new(5)
                .crops(CropProfile::mars_defaults())
                .build()
                .unwrap();
            simulate_growth(test_config(days), crops, env, StandardGrowth::default()).unwrap()
        };
        let short = run(10);
        let long = run(30);
        for id in 0..7u16 {
            assert_eq!(short.biomass.row(CropId(id)), &long.biomass.row(CropId(id))[..10]);
        }
    }

    #[test]
    fn out_of_range_lookup_aborts_run() {
        // Three sols of samples; day 3 maps to sol ≈ 2.92, past the last
        // solar sample at sol 2.
        let env = SyntheticYear::generate(3, 1).into_environment(Boundary::Strict).unwrap();
        let crops = CropTableBuilder::new(1).crops(CropProfile::mars_defaults()).build().unwrap();
        let result = simulate_growth(test_config(10), crops, env, StandardGrowth::default());
        match result {
            Err(crate::SimError::Environment { day, source }) => {
                assert_eq!(day, Day(3));
                assert!(matches!(source, mg_env::EnvError::OutOfRange { .. }));
            }
            other => panic!("expected Environment error, got {other:?}"),
        }
    }

    #[test]
    fn periodic_tables_run_past_the_year() {
        let env = SyntheticYear::generate(3, 1)
            .into_environment(Boundary::Periodic { period: 3.0 })
            .unwrap();
        let crops = CropTableBuilder::new(1).crops(CropProfile::mars_defaults()).build().unwrap();
        let record =
            simulate_growth(test_config(10), crops, env, StandardGrowth::default()).unwrap();
        assert_eq!(record.conditions.len(), 9);
    }

    #[test]
    fn observer_hooks_fire_in_order() {
        let sim = SimBuilder::new(
            SimConfig { output_interval_days: 2, ..test_config(5) },
            optimal_table(vec![unit_crop("unit")]),
            unit_env(),
            StandardGrowth::default(),
        )
        .build()
        .unwrap();
        let mut obs = CountingObserver::default();
        sim.run(&mut obs).unwrap();
        assert_eq!(obs.starts, 1);
        assert_eq!(obs.day_starts, vec![Day(1), Day(2), Day(3), Day(4)]);
        assert_eq!(obs.day_ends, obs.day_starts);
        assert_eq!(obs.snapshots, vec![Day(0), Day(2), Day(4)]);
        assert!(obs.deaths.is_empty());
        assert_eq!(obs.ends, 1);
    }

    #[test]
    fn progress_logger_runs() {
        let sim = SimBuilder::new(
            test_config(12),
            optimal_table(vec![unit_crop("unit")]),
            unit_env(),
            StandardGrowth::default(),
        )
        .build()
        .unwrap();
        assert!(sim.run(&mut crate::ProgressLogger::new(5)).is_ok());
    }

    #[test]
    fn supply_pools_carried_between_days() {
        use mg_growth::{GrowthModel, SupplyLimitedGrowth};

        let slow = |name: &str| CropProfile { growth_rate: 0.001, ..unit_crop(name) };
        let model = SupplyLimitedGrowth::default();
        let crops = optimal_table(vec![slow("potato"), slow("bean")]);
        let env = ConstantEnvironment::new(100.0, 20.0, 0.0);
        let record = simulate_growth(test_config(4), crops.clone(), env, model.clone()).unwrap();

        let conditions = DayConditions::new(
            SimConfig::default().calendar.position(Day(1)),
            mg_env::EnvReading { solar: 100.0, temperature: 20.0, dust_opacity: 0.0 },
        );
        for (id, profile, soil) in crops.iter() {
            let mut state = model.initial_state(profile);
            assert_eq!(record.biomass.get(id, Day::ZERO), state.biomass);
            for d in 1..4 {
                state = model.step(profile, soil, &conditions, state).unwrap();
                assert_eq!(record.biomass.get(id, Day(d)), state.biomass);
                assert_eq!(record.height.get(id, Day(d)), state.height);
            }
        }
        // Potato drains its water on day 1; bean keeps growing on replenished supply.
        let potato = record.biomass.row(CropId(0));
        assert_eq!(potato[1], potato[3]);
        let bean = record.biomass.row(CropId(1));
        assert!(bean[3] > bean[2] && bean[2] > bean[1]);
    }
}

// ── Failure and resource depletion ────────────────────────────────────────────

#[cfg(test)]
mod failure_tests {
    use mg_growth::{GrowthError, GrowthModel, GrowthResult, PlantState};

    use super::*;
    use crate::{ResourceBudget, SimError};

    /// Doubles biomass every day; overflows to infinity eventually.
    struct Exploding;

    impl GrowthModel for Exploding {
        fn initial_state(&self, _crop: &CropProfile) -> PlantState {
            PlantState::new(f64::MAX / 2.0, 1.0)
        }

        fn step(
            &self,
            _crop:       &CropProfile,
            _soil:       &SoilChemistry,
            _conditions: &DayConditions,
            prev:        PlantState,
        ) -> GrowthResult<PlantState> {
            Ok(PlantState::new(prev.biomass * 2.0, prev.height))
        }
    }

    #[test]
    fn non_finite_growth_aborts_with_crop_and_day() {
        let sim = SimBuilder::new(
            test_config(10),
            optimal_table(vec![unit_crop("boom")]),
            unit_env(),
            Exploding,
        )
        .build()
        .unwrap();
        match sim.run(&mut NoopObserver) {
            Err(SimError::Growth { crop, name, day, source }) => {
                assert_eq!(crop, CropId(0));
                assert_eq!(name, "boom");
                // MAX/2 → MAX on day 1, inf on day 2.
                assert_eq!(day, Day(2));
                assert!(matches!(source, GrowthError::NumericOverflow { .. }));
            }
            other => panic!("expected Growth error, got {other:?}"),
        }
    }

    #[test]
    fn lowest_failing_crop_reported() {
        // A NaN temperature poisons every crop's temperature factor.
        let sim = SimBuilder::new(
            test_config(3),
            optimal_table(vec![unit_crop("first"), unit_crop("second")]),
            ConstantEnvironment::new(717.0, f64::NAN, 0.0),
            StandardGrowth::default(),
        )
        .build()
        .unwrap();
        match sim.run(&mut NoopObserver) {
            Err(SimError::Growth { crop, day, source, .. }) => {
                assert_eq!(crop, CropId(0));
                assert_eq!(day, Day(1));
                assert!(matches!(source, GrowthError::NumericOverflow { .. }));
            }
            other => panic!("expected Growth error, got {other:?}"),
        }
    }

    #[test]
    fn exhausted_pool_kills_and_freezes_crop() {
        // Day 1 uses 1.98e-5 of 3e-5 water; day 2 uses 3.88e-5 and runs dry.
        let budget = ResourceBudget {
            water:        3e-5,
            nutrient:     1.0,
            water_use:    1.0,
            nutrient_use: 0.0,
        };
        let sim = SimBuilder::new(
            test_config(6),
            optimal_table(vec![unit_crop("thirsty")]),
            unit_env(),
            StandardGrowth::default(),
        )
        .resources(budget)
        .build()
        .unwrap();

        let mut obs = CountingObserver::default();
        let record = sim.run(&mut obs).unwrap();

        assert_eq!(record.death_day[0], Some(Day(2)));
        assert_eq!(obs.deaths, vec![(CropId(0), Day(2))]);
        assert!(record.is_alive(CropId(0), Day(1)));
        assert!(!record.is_alive(CropId(0), Day(2)));

        let row = record.biomass.row(CropId(0));
        assert!(row[2] > row[1]);
        assert!(row[3..].iter().all(|&b| b == row[2]));
        let heights = record.height.row(CropId(0));
        assert!(heights[3..].iter().all(|&h| h == heights[2]));
    }

    #[test]
    fn default_budget_keeps_crops_alive() {
        let crops = CropTableBuilder::new(9).crops(CropProfile::mars_defaults()).build().unwrap();
        let sim = SimBuilder::new(
            test_config(100),
            crops,
            mg_env::SyntheticEnvironment::default(),
            StandardGrowth::default(),
        )
        .resources(ResourceBudget::default())
        .build()
        .unwrap();
        let record = sim.run(&mut NoopObserver).unwrap();
        assert!(record.death_day.iter().all(Option::is_none));
    }
}
