use crate::net::{Packet, SourceId};
use crate::queue::{DropTailQueue, PacketQueue};
use crate::sim::SimTime;

fn pkt(id: u64, size_bytes: u32) -> Packet {
    Packet::new(id, SourceId(0), size_bytes, SimTime::ZERO)
}

#[test]
fn droptail_queue_enforces_capacity_and_preserves_order() {
    let mut q = DropTailQueue::new(100);
    assert_eq!(q.capacity_bytes(), 100);
    assert!(q.is_empty());
    assert_eq!(q.bytes(), 0);

    assert!(q.enqueue(pkt(1, 60)).is_ok());
    assert_eq!(q.len(), 1);
    assert_eq!(q.bytes(), 60);

    let dropped = q.enqueue(pkt(2, 50)).expect_err("should drop");
    assert_eq!(dropped.id, 2);
    assert_eq!(q.len(), 1);
    assert_eq!(q.bytes(), 60);

    assert!(q.enqueue(pkt(3, 40)).is_ok());
    assert_eq!(q.bytes(), 100);

    assert_eq!(q.dequeue().expect("pkt").id, 1);
    assert_eq!(q.bytes(), 40);
    assert_eq!(q.dequeue().expect("pkt").id, 3);
    assert_eq!(q.bytes(), 0);
    assert!(q.dequeue().is_none());
}

#[test]
fn droptail_queue_frees_capacity_on_dequeue() {
    let mut q = DropTailQueue::new(100);
    assert!(q.enqueue(pkt(1, 100)).is_ok());
    assert!(q.enqueue(pkt(2, 1)).is_err());
    q.dequeue().expect("pkt");
    assert!(q.enqueue(pkt(3, 100)).is_ok());
}

#[test]
fn unbounded_queue_accepts_large_packets() {
    let mut q = DropTailQueue::unbounded();
    assert!(q.is_unbounded());
    for i in 0..1_000 {
        assert!(q.enqueue(pkt(i, u32::MAX)).is_ok());
    }
    assert_eq!(q.len(), 1_000);
    assert_eq!(q.bytes(), 1_000 * u64::from(u32::MAX));
    let order: Vec<u64> = q.iter().take(3).map(|p| p.id).collect();
    assert_eq!(order, vec![0, 1, 2]);
}
