//! 数据包生成事件

use super::id::SourceId;
use super::net_world::NetWorld;
use crate::sim::{Event, Simulator, World};

/// 事件：源生成下一个 packet。
#[derive(Debug)]
pub struct GeneratePacket {
    pub source: SourceId,
}

impl Event for GeneratePacket {
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let GeneratePacket { source } = *self;
        let w = world
            .as_any_mut()
            .downcast_mut::<NetWorld>()
            .expect("world must be NetWorld");
        w.net.on_generate(source, sim);
    }
}
