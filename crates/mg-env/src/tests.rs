//! Unit tests for mg-env.

use crate::{Boundary, SampleTable};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Samples at sols 0, 1, 2, 3 with values 10, 20, 40, 10.
fn four_sols() -> SampleTable {
    SampleTable::new("test", [(0.0, 10.0), (1.0, 20.0), (2.0, 40.0), (3.0, 10.0)]).unwrap()
}

// ── SampleTable ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod sample_table {
    use float_eq::assert_float_eq;

    use super::*;
    use crate::EnvError;

    #[test]
    fn exact_samples_returned() {
        let t = four_sols();
        assert_eq!(t.lookup(0.0).unwrap(), 10.0);
        assert_eq!(t.lookup(2.0).unwrap(), 40.0);
        assert_eq!(t.lookup(3.0).unwrap(), 10.0);
    }

    #[test]
    fn interpolates_between_samples() {
        let t = four_sols();
        assert_float_eq!(t.lookup(0.5).unwrap(), 15.0, abs <= 1e-12);
        assert_float_eq!(t.lookup(1.25).unwrap(), 25.0, abs <= 1e-12);
        assert_float_eq!(t.lookup(2.9).unwrap(), 13.0, abs <= 1e-9);
    }

    #[test]
    fn strict_is_default_and_rejects_outside() {
        let t = four_sols();
        assert_eq!(t.boundary(), Boundary::Strict);
        assert!(matches!(t.lookup(-1.0), Err(EnvError::OutOfRange { .. })));
        assert!(matches!(t.lookup(3.0001), Err(EnvError::OutOfRange { .. })));
        assert!(matches!(t.lookup(f64::NAN), Err(EnvError::OutOfRange { .. })));
    }

    #[test]
    fn out_of_range_reports_domain() {
        match four_sols().lookup(7.0) {
            Err(EnvError::OutOfRange { series, key, min, max }) => {
                assert_eq!(series, "test");
                assert_eq!(key, 7.0);
                assert_eq!((min, max), (0.0, 3.0));
            }
            other => panic!("expected OutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn clamp_uses_boundary_values() {
        let t = four_sols().with_boundary(Boundary::Clamp).unwrap();
        assert_eq!(t.lookup(-5.0).unwrap(), 10.0);
        assert_eq!(t.lookup(99.0).unwrap(), 10.0);
        assert!(t.lookup(f64::NAN).is_err());
    }

    #[test]
    fn periodic_wraps_and_crosses_seam() {
        let t = four_sols().with_boundary(Boundary::Periodic { period: 4.0 }).unwrap();
        // One full period later.
        assert_float_eq!(t.lookup(5.5).unwrap(), t.lookup(1.5).unwrap(), abs <= 1e-12);
        // Negative keys wrap backwards.
        assert_float_eq!(t.lookup(-3.5).unwrap(), 15.0, abs <= 1e-12);
        // Seam: halfway between sample 3 (10) and next cycle's sample 0 (10).
        assert_float_eq!(t.lookup(3.5).unwrap(), 10.0, abs <= 1e-12);
    }

    #[test]
    fn periodic_seam_interpolates_towards_first_sample() {
        let t = SampleTable::new("seam", [(0.0, 0.0), (1.0, 100.0)])
            .unwrap()
            .with_boundary(Boundary::Periodic { period: 2.0 })
            .unwrap();
        assert_float_eq!(t.lookup(1.5).unwrap(), 50.0, abs <= 1e-12);
        assert_float_eq!(t.lookup(1.75).unwrap(), 25.0, abs <= 1e-12);
    }

    #[test]
    fn periodic_period_must_cover_span() {
        let result = four_sols().with_boundary(Boundary::Periodic { period: 2.0 });
        assert!(matches!(result, Err(EnvError::InvalidBoundary { .. })));
        let result = four_sols().with_boundary(Boundary::Periodic { period: f64::NAN });
        assert!(result.is_err());
    }

    #[test]
    fn single_sample_table() {
        let t = SampleTable::new("one", [(5.0, 1.5)]).unwrap();
        assert_eq!(t.lookup(5.0).unwrap(), 1.5);
        assert!(t.lookup(5.1).is_err());
        let t = t.with_boundary(Boundary::Periodic { period: 1.0 }).unwrap();
        assert_eq!(t.lookup(100.3).unwrap(), 1.5);
    }

    #[test]
    fn unsorted_rejected() {
        let result = SampleTable::new("bad", [(0.0, 1.0), (2.0, 1.0), (1.0, 1.0)]);
        assert!(matches!(result, Err(EnvError::Unsorted { row: 2, .. })));
    }

    #[test]
    fn duplicate_keys_rejected() {
        let result = SampleTable::new("bad", [(0.0, 1.0), (0.0, 2.0)]);
        assert!(matches!(result, Err(EnvError::Unsorted { row: 1, .. })));
    }

    #[test]
    fn empty_and_non_finite_rejected() {
        assert!(matches!(
            SampleTable::new("empty", Vec::<(f64, f64)>::new()),
            Err(EnvError::EmptyTable(_))
        ));
        assert!(matches!(
            SampleTable::new("nan", [(0.0, f64::NAN)]),
            Err(EnvError::NonFinite { row: 0, .. })
        ));
    }
}

// ── TableEnvironment ──────────────────────────────────────────────────────────

#[cfg(test)]
mod table_environment {
    use float_eq::assert_float_eq;
    use mg_core::{Day, MarsCalendar};

    use crate::{EnvError, EnvironmentSeries, SampleTable, TableEnvironment};

    fn env() -> TableEnvironment {
        let solar = SampleTable::new("solar", [(0.0, 100.0), (1.0, 200.0), (2.0, 300.0)]).unwrap();
        let temperature = TableEnvironment::hourly_table(
            "temperature",
            (0..3).flat_map(|sol| {
                (0..24).map(move |h| (sol as f64, h as f64, h as f64 + 100.0 * sol as f64))
            }),
        )
        .unwrap();
        let dust = SampleTable::new("dust opacity", [(0.0, 1.0), (2.0, 3.0)]).unwrap();
        TableEnvironment::new(solar, temperature, dust)
    }

    #[test]
    fn daily_series_interpolate() {
        let e = env();
        assert_float_eq!(e.solar(1.5).unwrap(), 250.0, abs <= 1e-12);
        assert_float_eq!(e.dust_opacity(1.0).unwrap(), 2.0, abs <= 1e-12);
    }

    #[test]
    fn temperature_interpolates_within_sol() {
        let e = env();
        assert_float_eq!(e.temperature(1.0, 6.5).unwrap(), 106.5, abs <= 1e-9);
        // Fractional sols are truncated to the whole sol.
        assert_float_eq!(e.temperature(1.7, 6.0).unwrap(), 106.0, abs <= 1e-9);
    }

    #[test]
    fn temperature_crosses_midnight() {
        let e = env();
        // Between (sol 0, 23 h) = 23 and (sol 1, 0 h) = 100.
        assert_float_eq!(e.temperature(0.0, 23.5).unwrap(), 61.5, abs <= 1e-9);
    }

    #[test]
    fn bad_hour_rejected() {
        let e = env();
        assert!(matches!(e.temperature(0.0, 24.0), Err(EnvError::OutOfRange { .. })));
        assert!(matches!(e.temperature(0.0, -0.5), Err(EnvError::OutOfRange { .. })));
    }

    #[test]
    fn negative_day_is_out_of_range() {
        let e = env();
        assert!(matches!(e.solar(-1.0), Err(EnvError::OutOfRange { .. })));
        assert!(matches!(e.temperature(-1.0, 3.0), Err(EnvError::OutOfRange { .. })));
        assert!(matches!(e.dust_opacity(-1.0), Err(EnvError::OutOfRange { .. })));
    }

    #[test]
    fn day_beyond_table_is_out_of_range() {
        let e = env();
        assert!(matches!(e.solar(2.5), Err(EnvError::OutOfRange { .. })));
    }

    #[test]
    fn read_combines_series() {
        let e = env();
        let pos = MarsCalendar::default().position(Day(1));
        let reading = e.read(&pos).unwrap();
        assert_float_eq!(reading.solar, e.solar(pos.sol_of_year).unwrap(), abs <= 1e-12);
        assert_float_eq!(
            reading.temperature,
            e.temperature(0.0, pos.hour).unwrap(),
            abs <= 1e-12
        );
    }
}

// ── Synthetic generators ──────────────────────────────────────────────────────

#[cfg(test)]
mod synth {
    use float_eq::assert_float_eq;

    use crate::synth::{
        DUST_MAX, DUST_MIN, SOLAR_MAX, SOLAR_MIN, TEMP_MAX, TEMP_MIN, dust_opacity,
        solar_radiation, temperature,
    };
    use crate::{Boundary, EnvironmentSeries, SyntheticEnvironment, SyntheticYear};

    #[test]
    fn solar_stays_within_orbit_extremes() {
        for sol in 0..669 {
            let v = solar_radiation(sol as f64, 669.0);
            assert!((SOLAR_MIN - 1e-9..=SOLAR_MAX + 1e-9).contains(&v));
        }
        assert_float_eq!(solar_radiation(0.0, 669.0), 426.5, abs <= 1e-9);
    }

    #[test]
    fn temperature_diurnal_extremes() {
        assert_float_eq!(temperature(18.0), TEMP_MAX, abs <= 1e-9);
        assert_float_eq!(temperature(6.0), TEMP_MIN, abs <= 1e-9);
        assert_float_eq!(temperature(12.0), (TEMP_MAX + TEMP_MIN) / 2.0, abs <= 1e-9);
    }

    #[test]
    fn dust_without_noise_in_range() {
        for sol in 0..669 {
            let v = dust_opacity(sol as f64, 669.0, 0.0);
            assert!((DUST_MIN - 1e-9..=DUST_MAX + 1e-9).contains(&v));
        }
    }

    #[test]
    fn year_shapes() {
        let year = SyntheticYear::generate(669, 1);
        assert_eq!(year.solar.len(), 669);
        assert_eq!(year.dust.len(), 669);
        assert_eq!(year.temperature.len(), 669 * 24);
        assert_eq!(year.temperature[25], (1, 1, temperature(1.0)));
    }

    #[test]
    fn year_dust_noise_is_seeded() {
        let a = SyntheticYear::generate(50, 9);
        let b = SyntheticYear::generate(50, 9);
        let c = SyntheticYear::generate(50, 10);
        assert_eq!(a, b);
        assert_ne!(a.dust, c.dust);
        // Noise never exceeds ±0.1 of the span.
        for (sol, v) in &a.dust {
            let clean = dust_opacity(*sol as f64, 50.0, 0.0);
            assert!((v - clean).abs() <= 0.1 * (DUST_MAX - DUST_MIN) + 1e-9);
        }
    }

    #[test]
    fn tabulated_year_wraps_periodically() {
        let env = SyntheticYear::generate(669, 3)
            .into_environment(Boundary::periodic_year(669))
            .unwrap();
        // Past the last sample: interpolated across the year seam.
        let v = env.solar(668.5).unwrap();
        let last = solar_radiation(668.0, 669.0);
        let first = solar_radiation(0.0, 669.0);
        assert_float_eq!(v, (last + first) / 2.0, abs <= 1e-9);
        assert!(env.temperature(668.0, 23.9).is_ok());
    }

    #[test]
    fn function_backend_matches_formulas() {
        let env = SyntheticEnvironment::default();
        assert_float_eq!(env.solar(100.0).unwrap(), solar_radiation(100.0, 669.0), abs <= 1e-12);
        assert_float_eq!(env.temperature(3.0, 18.0).unwrap(), TEMP_MAX, abs <= 1e-9);
        assert!(env.solar(f64::NAN).is_err());
        assert!(env.temperature(0.0, 30.0).is_err());
    }
}

// ── CSV loader ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::io::Cursor;

    use float_eq::assert_float_eq;
    use tempfile::TempDir;

    use crate::{
        Boundary, EnvError, EnvironmentSeries, SyntheticYear, load_daily_reader,
        load_environment_dir, load_hourly_reader, write_environment_dir,
    };

    #[test]
    fn daily_reader_parses_by_position() {
        let csv = "Sol,Solar Radiation\n0,100.0\n1,150.0\n";
        let t = load_daily_reader(Cursor::new(csv), "solar").unwrap();
        assert_eq!(t.len(), 2);
        assert_float_eq!(t.lookup(0.5).unwrap(), 125.0, abs <= 1e-12);
    }

    #[test]
    fn hourly_reader_flattens_hours() {
        let csv = "Sol,Hour,Temperature\n0,0,-10\n0,12,10\n1,0,-10\n";
        let t = load_hourly_reader(Cursor::new(csv), "temperature").unwrap();
        assert_eq!(t.domain(), (0.0, 1.0));
        assert_float_eq!(t.lookup(0.25).unwrap(), 0.0, abs <= 1e-12);
    }

    #[test]
    fn unsorted_file_rejected() {
        let csv = "Sol,Dust Opacity\n1,0.5\n0,0.7\n";
        assert!(matches!(
            load_daily_reader(Cursor::new(csv), "dust opacity"),
            Err(EnvError::Unsorted { .. })
        ));
    }

    #[test]
    fn garbage_value_rejected() {
        let csv = "Sol,Dust Opacity\n0,high\n";
        assert!(matches!(
            load_daily_reader(Cursor::new(csv), "dust opacity"),
            Err(EnvError::Parse(_))
        ));
    }

    #[test]
    fn write_then_load_directory() {
        let dir = TempDir::new().expect("create temp dir");
        let year = SyntheticYear::generate(669, 42);
        write_environment_dir(dir.path(), &year).unwrap();

        let env = load_environment_dir(dir.path(), Boundary::periodic_year(669)).unwrap();
        assert_eq!(env.solar.len(), 669);
        assert_eq!(env.temperature.len(), 669 * 24);
        assert_float_eq!(env.dust_opacity(10.0).unwrap(), year.dust[10].1, abs <= 1e-9);
    }

    #[test]
    fn missing_directory_is_io_error() {
        let dir = TempDir::new().expect("create temp dir");
        let result = load_environment_dir(&dir.path().join("nope"), Boundary::Strict);
        assert!(matches!(result, Err(EnvError::Io(_))));
    }
}
