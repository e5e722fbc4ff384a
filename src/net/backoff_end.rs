//! 退避结束事件

use super::id::ServerId;
use super::net_world::NetWorld;
use crate::sim::{Event, Simulator, World};

/// 事件：冲突后的随机等待结束，服务器重发持有的 packet。
#[derive(Debug)]
pub struct BackoffEnd {
    pub server: ServerId,
}

impl Event for BackoffEnd {
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let BackoffEnd { server } = *self;
        let w = world
            .as_any_mut()
            .downcast_mut::<NetWorld>()
            .expect("world must be NetWorld");
        w.net.on_backoff_end(server, sim);
    }
}
