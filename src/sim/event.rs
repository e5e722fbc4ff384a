//! 事件 trait
//!
//! 定义仿真事件接口。

use super::simulator::Simulator;
use super::world::World;

/// 事件：到期时被仿真器取出并执行一次。
///
/// 使用 `self: Box<Self>` 让事件在执行时拿回自身字段的所有权（例如携带的 packet）。
pub trait Event: 'static {
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World);

    /// 事件名称，仅用于日志。
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
