//! 仿真事件轨迹（结构化 JSON，用于离线回放或绘图）
//!
//! 每条记录带仿真时间、packet id 与事件类型；仿真结束后整体写成一个 JSON 数组。

mod types;

pub use types::{TraceEvent, TraceEventKind, TraceLogger};
