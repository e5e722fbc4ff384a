//! 世界 trait
//!
//! 定义仿真世界接口。

use super::simulator::Simulator;
use std::any::Any;

/// 仿真世界：持有模型状态（服务器、信道、计数器等），事件通过 downcast 访问具体类型。
pub trait World: Any {
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// 每执行完一个事件后回调。
    fn on_tick(&mut self, _sim: &mut Simulator) {}
}
