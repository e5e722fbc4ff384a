use crate::sim::{Event, SimTime, Simulator, World};
use std::any::Any;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct DummyWorld {
    ticks: usize,
}

impl World for DummyWorld {
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn on_tick(&mut self, _sim: &mut Simulator) {
        self.ticks = self.ticks.saturating_add(1);
    }
}

struct Push {
    id: u32,
    log: Arc<Mutex<Vec<(u32, SimTime)>>>,
}

impl Event for Push {
    fn execute(self: Box<Self>, sim: &mut Simulator, _world: &mut dyn World) {
        let Push { id, log } = *self;
        log.lock().expect("log lock").push((id, sim.now()));
    }
}

struct PushThenSchedule {
    id: u32,
    next_id: u32,
    at: SimTime,
    log: Arc<Mutex<Vec<(u32, SimTime)>>>,
}

impl Event for PushThenSchedule {
    fn execute(self: Box<Self>, sim: &mut Simulator, _world: &mut dyn World) {
        let PushThenSchedule {
            id,
            next_id,
            at,
            log,
        } = *self;
        log.lock().expect("log lock").push((id, sim.now()));
        sim.schedule(at, Push { id: next_id, log });
    }
}

fn ids(log: &Arc<Mutex<Vec<(u32, SimTime)>>>) -> Vec<u32> {
    log.lock().expect("log lock").iter().map(|(id, _)| *id).collect()
}

fn push(id: u32, log: &Arc<Mutex<Vec<(u32, SimTime)>>>) -> Push {
    Push {
        id,
        log: Arc::clone(log),
    }
}

#[test]
fn scheduled_events_order_by_time_then_seq() {
    let log = Arc::new(Mutex::new(Vec::new()));

    let mut sim = Simulator::default();
    sim.schedule(SimTime(10), push(1, &log));
    sim.schedule(SimTime(5), push(2, &log));
    sim.schedule(SimTime(10), push(3, &log));
    assert_eq!(sim.pending(), 3);

    let mut world = DummyWorld::default();
    sim.run(&mut world);

    assert_eq!(ids(&log), vec![2, 1, 3]);
    assert_eq!(world.ticks, 3);
    assert_eq!(sim.executed(), 3);
    assert_eq!(sim.pending(), 0);
    assert_eq!(sim.now(), SimTime(10));
}

#[test]
fn event_scheduled_at_same_time_inside_event_runs_after_current_event() {
    let log = Arc::new(Mutex::new(Vec::new()));

    let mut sim = Simulator::default();
    sim.schedule(
        SimTime(4),
        PushThenSchedule {
            id: 1,
            next_id: 2,
            at: SimTime(4),
            log: Arc::clone(&log),
        },
    );
    sim.schedule(SimTime(4), push(3, &log));

    let mut world = DummyWorld::default();
    sim.run(&mut world);

    assert_eq!(ids(&log), vec![1, 3, 2]);
    assert_eq!(sim.now(), SimTime(4));
}

#[test]
fn scheduling_in_the_past_runs_at_current_time() {
    let log = Arc::new(Mutex::new(Vec::new()));

    let mut sim = Simulator::default();
    sim.schedule(
        SimTime(10),
        PushThenSchedule {
            id: 1,
            next_id: 2,
            at: SimTime(3),
            log: Arc::clone(&log),
        },
    );

    let mut world = DummyWorld::default();
    sim.run(&mut world);

    let entries = log.lock().expect("log lock").clone();
    assert_eq!(entries, vec![(1, SimTime(10)), (2, SimTime(10))]);
}

#[test]
fn schedule_in_is_relative_to_now() {
    let log = Arc::new(Mutex::new(Vec::new()));

    let mut sim = Simulator::default();
    let mut world = DummyWorld::default();
    sim.run_until(SimTime(100), &mut world);
    sim.schedule_in(SimTime(5), push(1, &log));
    sim.run(&mut world);

    let entries = log.lock().expect("log lock").clone();
    assert_eq!(entries, vec![(1, SimTime(105))]);
}

#[test]
fn run_until_skips_events_after_until_and_advances_time() {
    let log = Arc::new(Mutex::new(Vec::new()));

    let mut sim = Simulator::default();
    sim.schedule(SimTime::ZERO, push(1, &log));
    sim.schedule(SimTime(10), push(2, &log));

    let mut world = DummyWorld::default();
    sim.run_until(SimTime(5), &mut world);

    assert_eq!(ids(&log), vec![1]);
    assert_eq!(world.ticks, 1);
    assert_eq!(sim.now(), SimTime(5));

    sim.run(&mut world);
    assert_eq!(ids(&log), vec![1, 2]);
    assert_eq!(world.ticks, 2);
    assert_eq!(sim.now(), SimTime(10));
}

#[test]
fn run_until_executes_events_scheduled_exactly_at_until() {
    let log = Arc::new(Mutex::new(Vec::new()));

    let mut sim = Simulator::default();
    sim.schedule(SimTime(5), push(1, &log));

    let mut world = DummyWorld::default();
    sim.run_until(SimTime(5), &mut world);

    assert_eq!(ids(&log), vec![1]);
    assert_eq!(world.ticks, 1);
    assert_eq!(sim.now(), SimTime(5));
}

#[test]
fn run_until_advances_time_even_if_there_are_no_events() {
    let mut sim = Simulator::default();
    let mut world = DummyWorld::default();

    sim.run_until(SimTime(7), &mut world);
    assert_eq!(sim.now(), SimTime(7));
    assert_eq!(world.ticks, 0);
}
