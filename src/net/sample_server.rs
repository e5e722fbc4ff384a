//! 监视器采样事件

use super::id::MonitorId;
use super::net_world::NetWorld;
use crate::sim::{Event, Simulator, World};

#[derive(Debug)]
pub struct SampleServer {
    pub monitor: MonitorId,
}

impl Event for SampleServer {
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let SampleServer { monitor } = *self;
        let w = world
            .as_any_mut()
            .downcast_mut::<NetWorld>()
            .expect("world must be NetWorld");
        w.net.on_sample(monitor, sim);
    }
}
