use crate::model::aloha::{AlohaScenario, ReplicationResult, run_replication, run_sweep, summarize_point};
use crate::net::ServerStats;
use crate::rng::{Dist, SimRng};
use crate::stats::{Z_99, mean, std_dev};

fn small() -> AlohaScenario {
    AlohaScenario {
        sim_time_s: 20.0,
        replications: 3,
        backoff_max_s: vec![0.0, 5.0],
        seed: 7,
        ..AlohaScenario::default()
    }
}

#[test]
fn sweep_produces_one_point_per_backoff_value() {
    let report = run_sweep(&small(), false).expect("sweep");
    assert_eq!(report.points.len(), 2);
    for p in &report.points {
        assert_eq!(p.replications.len(), 3);
        assert_eq!(p.server_drop_ratios.len(), 2);
        assert!((0.0..=1.0).contains(&p.mean_total_drop_ratio));
        for ratios in &p.server_drop_ratios {
            assert_eq!(ratios.len(), 3);
            assert!(ratios.iter().all(|r| (0.0..=1.0).contains(r)));
        }
        if let Some(lat) = p.mean_latency_s {
            assert!(lat > 0.0);
        }
    }
    assert_eq!(report.summary.server_drop_ratio_ci_99.len(), 2);
    assert_eq!(report.summary.server_drop_ratio_ci_99[0].name, "Router1");
    assert!(report.trace.is_none());
    assert_eq!(report.latency_series().len(), 2);
    assert_eq!(report.pending_series()[1].0, 5.0);
    assert_eq!(report.drop_ratio_series().len(), 2);
}

#[test]
fn sweep_is_reproducible_for_a_seed() {
    let a = run_sweep(&small(), false).expect("a");
    let b = run_sweep(&small(), false).expect("b");
    let ja = serde_json::to_string(&a).expect("json a");
    let jb = serde_json::to_string(&b).expect("json b");
    assert_eq!(ja, jb);

    let other = AlohaScenario {
        seed: 8,
        ..small()
    };
    let c = run_sweep(&other, false).expect("c");
    assert_ne!(ja, serde_json::to_string(&c).expect("json c"));
}

#[test]
fn sweep_captures_trace_only_when_asked() {
    let report = run_sweep(&small(), true).expect("sweep");
    let trace = report.trace.expect("trace captured");
    assert!(!trace.is_empty());
    assert!(trace.windows(2).all(|w| w[0].t_ns <= w[1].t_ns));
}

#[test]
fn sweep_without_collision_detection_has_no_drops() {
    let sc = AlohaScenario {
        collision: false,
        ..small()
    };
    let report = run_sweep(&sc, false).expect("sweep");
    for p in &report.points {
        assert_eq!(p.mean_total_drop_ratio, 0.0);
        for r in &p.replications {
            assert_eq!(r.collisions, 0);
        }
    }
}

#[test]
fn single_source_never_collides() {
    let sc = AlohaScenario {
        sources: 1,
        inter_arrival: Dist::exponential(2.0),
        ..small()
    };
    let (result, trace) = run_replication(&sc, 10.0, SimRng::new(3), false);
    assert!(trace.is_none());
    assert_eq!(result.collisions, 0);
    assert_eq!(result.total_drop_ratio, 0.0);
    assert!(result.successes > 0);
    assert!(result.mean_latency_s.is_some());
}

#[test]
fn invalid_scenario_is_rejected_before_running() {
    let sc = AlohaScenario {
        sources: 0,
        ..small()
    };
    assert!(run_sweep(&sc, false).is_err());
}

fn rep(latency: Option<f64>, pending: u64, drops: [(u64, u64); 2]) -> ReplicationResult {
    let servers: Vec<ServerStats> = drops
        .iter()
        .enumerate()
        .map(|(i, &(packet_count, collision_drops))| ServerStats {
            name: format!("Router{}", i + 1),
            packet_count,
            collision_drops,
            ..ServerStats::default()
        })
        .collect();
    ReplicationResult {
        backoff_max_s: 10.0,
        mean_latency_s: latency,
        pending_packets: pending,
        total_drop_ratio: crate::net::total_drop_ratio(&servers),
        servers,
        successes: usize::from(latency.is_some()),
        collisions: 0,
    }
}

#[test]
fn point_latency_skips_replications_without_successes() {
    let reps = vec![
        rep(Some(2.0), 1, [(3, 1), (4, 0)]),
        rep(None, 4, [(1, 1), (1, 1)]),
        rep(Some(4.0), 7, [(2, 0), (3, 1)]),
    ];
    let p = summarize_point(10.0, reps, 2);
    assert_eq!(p.mean_latency_s, Some(3.0));
    assert_eq!(p.mean_pending_packets, 4.0);
    assert_eq!(p.server_drop_ratios[0], vec![0.25, 0.5, 0.0]);
    assert_eq!(p.server_drop_ratios[1], vec![0.0, 0.5, 0.25]);
    let expected_drop = (1.0 / 8.0 + 2.0 / 4.0 + 1.0 / 6.0) / 3.0;
    assert!((p.mean_total_drop_ratio - expected_drop).abs() < 1e-12);

    let none = summarize_point(10.0, vec![rep(None, 0, [(0, 0), (0, 0)])], 2);
    assert_eq!(none.mean_latency_s, None);
    assert_eq!(none.mean_total_drop_ratio, 0.0);
}

#[test]
fn sweep_aggregates_match_per_replication_results() {
    // 4000 B at 8000 B/s holds the channel for 0.5 s; with a 1 s horizon
    // many replications end before any packet gets through
    let sc = AlohaScenario {
        size: Dist::constant(4_000.0),
        inter_arrival: Dist::exponential(2.0),
        sim_time_s: 1.0,
        replications: 12,
        backoff_max_s: vec![0.0, 1.0, 2.0],
        seed: 5,
        ..AlohaScenario::default()
    };
    let report = run_sweep(&sc, false).expect("sweep");

    for p in &report.points {
        let lat: Vec<f64> = p.replications.iter().filter_map(|r| r.mean_latency_s).collect();
        assert_eq!(p.mean_latency_s, mean(&lat));
        let pending: Vec<f64> = p.replications.iter().map(|r| r.pending_packets as f64).collect();
        assert_eq!(Some(p.mean_pending_packets), mean(&pending));
        let drops: Vec<f64> = p.replications.iter().map(|r| r.total_drop_ratio).collect();
        assert_eq!(Some(p.mean_total_drop_ratio), mean(&drops));
    }

    let per_point: Vec<f64> = report.points.iter().filter_map(|p| p.mean_latency_s).collect();
    match report.summary.latency_ci_99 {
        Some(ci) => {
            assert_eq!(Some(ci.mean), mean(&per_point));
            let sd = std_dev(&per_point).expect("samples");
            let expected = Z_99 * sd / (sc.replications as f64).sqrt();
            assert!((ci.half_width - expected).abs() < 1e-12);
        }
        None => assert!(per_point.is_empty()),
    }

    let last = report.points.last().expect("points");
    for (i, s) in report.summary.server_drop_ratio_ci_99.iter().enumerate() {
        let ratios = &last.server_drop_ratios[i];
        let sd = std_dev(ratios).expect("ratios");
        assert_eq!(Some(s.ci_99.mean), mean(ratios));
        assert!((s.ci_99.half_width - Z_99 * sd / (sc.replications as f64).sqrt()).abs() < 1e-12);
    }
}

#[test]
fn zero_gap_scenario_is_rejected_before_running() {
    let sc = AlohaScenario {
        inter_arrival: Dist::constant(0.0),
        sim_time_s: 1.0,
        ..small()
    };
    assert!(run_sweep(&sc, false).is_err());
}
