use crate::net::{Packet, SourceId};
use crate::sim::SimTime;

#[test]
fn packet_latency_is_output_minus_generation() {
    let mut p = Packet::new(7, SourceId(1), 400, SimTime::from_millis(1_500));
    assert_eq!(p.attempts, 0);
    p.output_at = SimTime::from_secs(4);
    assert!((p.latency_secs() - 2.5).abs() < 1e-12);
}

#[test]
fn packet_size_from_sample_rounds_up_to_whole_bytes() {
    assert_eq!(Packet::size_from_sample(399.1), 400);
    assert_eq!(Packet::size_from_sample(400.0), 400);
    assert_eq!(Packet::size_from_sample(0.2), 1);
    assert_eq!(Packet::size_from_sample(0.0), 1);
    assert_eq!(Packet::size_from_sample(f64::NAN), 1);
    assert_eq!(Packet::size_from_sample(1e20), u32::MAX);
}
