//! 发送结束事件
//!
//! 服务器占用信道 `size / service_rate` 秒后触发，决定交付还是退避重发。

use super::id::ServerId;
use super::net_world::NetWorld;
use crate::sim::{Event, Simulator, World};
use tracing::trace;

/// 事件：服务器完成一次发送。
#[derive(Debug)]
pub struct TxEnd {
    pub server: ServerId,
}

impl Event for TxEnd {
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let TxEnd { server } = *self;
        trace!(server = server.0, now = ?sim.now(), "📡 发送结束事件执行");
        let w = world
            .as_any_mut()
            .downcast_mut::<NetWorld>()
            .expect("world must be NetWorld");
        w.net.on_tx_end(server, sim);
    }
}
