use crate::error::ModelError;
use crate::model::arrivals::{ArrivalConfig, run_once, run_replications};
use crate::rng::SimRng;

#[test]
fn default_config_mirrors_reference_experiment() {
    let cfg = ArrivalConfig::default();
    assert_eq!(cfg.arrival_rate, 15.0);
    assert_eq!(cfg.depart_rate, None);
    assert_eq!(cfg.duration, 100.0);
    assert_eq!(cfg.replications, 100);
    assert_eq!(cfg.seed, 42);
}

#[test]
fn first_arrival_happens_at_time_zero() {
    let cfg = ArrivalConfig {
        duration: 1e-9,
        ..ArrivalConfig::default()
    };
    let world = run_once(&cfg, SimRng::new(1));
    assert!(world.nb_packets >= 1);
    assert_eq!(world.buffer_length.first(), Some(&1));
}

#[test]
fn replicated_rate_estimate_is_close_to_lambda() {
    let report = run_replications(&ArrivalConfig::default()).expect("report");
    assert_eq!(report.observed_rates.len(), 100);
    assert!((report.ci_95.mean - 15.0).abs() < 0.5, "mean {}", report.ci_95.mean);
    assert!(report.ci_95.half_width > 0.0);
    assert!(report.ci_95.low < report.ci_95.high);
}

#[test]
fn departures_never_drive_the_count_negative() {
    let cfg = ArrivalConfig {
        arrival_rate: 5.0,
        depart_rate: Some(20.0),
        duration: 20.0,
        replications: 5,
        seed: 1,
    };
    let world = run_once(&cfg, SimRng::new(2));
    assert!(world.buffer_length.len() > 100);
    let report = run_replications(&cfg).expect("report");
    assert!(report.ci_95.mean < 5.0);
}

#[test]
fn invalid_arrival_config_is_rejected() {
    let zero_reps = ArrivalConfig {
        replications: 0,
        ..ArrivalConfig::default()
    };
    assert_eq!(
        run_replications(&zero_reps).err(),
        Some(ModelError::NoReplications)
    );
    let bad_rate = ArrivalConfig {
        depart_rate: Some(-1.0),
        ..ArrivalConfig::default()
    };
    assert!(matches!(
        run_replications(&bad_rate),
        Err(ModelError::InvalidRate { name: "depart_rate", .. })
    ));
}

#[test]
fn config_with_too_many_expected_events_is_rejected() {
    let cfg = ArrivalConfig {
        arrival_rate: 1e12,
        ..ArrivalConfig::default()
    };
    assert!(matches!(
        run_replications(&cfg),
        Err(ModelError::TooManyEvents { .. })
    ));
}
