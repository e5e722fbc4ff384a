use crate::rng::{Dist, DistError, SimRng};

#[test]
fn dist_validate_rejects_bad_parameters() {
    assert_eq!(
        Dist::exponential(0.0).validate(),
        Err(DistError::NonPositiveRate(0.0))
    );
    assert!(matches!(
        Dist::exponential(-1.0).validate(),
        Err(DistError::Negative { name: "rate", .. })
    ));
    assert!(matches!(
        Dist::constant(f64::NAN).validate(),
        Err(DistError::NotFinite { name: "value", .. })
    ));
    assert_eq!(
        Dist::uniform(2.0, 1.0).validate(),
        Err(DistError::InvertedBounds { low: 2.0, high: 1.0 })
    );
    assert!(Dist::uniform(0.0, 0.0).validate().is_ok());
    assert!(Dist::exponential(7.5).validate().is_ok());
}

#[test]
fn constant_and_degenerate_uniform_are_deterministic() {
    let mut rng = SimRng::new(1);
    assert_eq!(Dist::constant(3.25).sample(&mut rng), 3.25);
    assert_eq!(Dist::uniform(0.0, 0.0).sample(&mut rng), 0.0);
    assert_eq!(Dist::uniform(5.0, 5.0).sample(&mut rng), 5.0);
}

#[test]
fn uniform_samples_stay_within_bounds() {
    let mut rng = SimRng::new(2);
    let d = Dist::uniform(10.0, 20.0);
    for _ in 0..10_000 {
        let x = d.sample(&mut rng);
        assert!((10.0..20.0).contains(&x), "sample {x} out of range");
    }
    assert_eq!(d.mean(), 15.0);
}

#[test]
fn exponential_sample_mean_matches_rate() {
    let mut rng = SimRng::new(3);
    let d = Dist::exponential(2.0);
    let n = 20_000;
    let mut sum = 0.0;
    for _ in 0..n {
        let x = d.sample(&mut rng);
        assert!(x >= 0.0 && x.is_finite());
        sum += x;
    }
    let mean = sum / f64::from(n);
    assert!((mean - 0.5).abs() < 0.02, "mean {mean}");
    assert_eq!(d.mean(), 0.5);
}

#[test]
fn same_seed_gives_same_stream_and_children_differ() {
    let mut a = SimRng::new(42);
    let mut b = SimRng::new(42);
    let d = Dist::exponential(1.0);
    for _ in 0..100 {
        assert_eq!(d.sample(&mut a), d.sample(&mut b));
    }

    let mut root = SimRng::new(7);
    let mut c0 = root.child(0);
    let mut c1 = root.child(1);
    assert_ne!(d.sample(&mut c0), d.sample(&mut c1));
}

#[test]
fn dist_json_uses_kind_tag() {
    let d: Dist = serde_json::from_str(r#"{ "kind": "exponential", "rate": 7.5 }"#).expect("parse");
    assert_eq!(d, Dist::exponential(7.5));
    let d: Dist =
        serde_json::from_str(r#"{ "kind": "uniform", "low": 0, "high": 10 }"#).expect("parse");
    assert_eq!(d, Dist::uniform(0.0, 10.0));
    let raw = serde_json::to_string(&Dist::constant(1.0)).expect("serialize");
    assert_eq!(raw, r#"{"kind":"constant","value":1.0}"#);
}
