//! 数据包源
//!
//! 按到达间隔分布周期性地生成 packet，并交给挂接的服务器。

use super::id::{ServerId, SourceId};
use crate::rng::Dist;
use crate::sim::SimTime;

/// 数据包源（packet generator）
#[derive(Debug, Clone)]
pub struct Source {
    pub(crate) id: SourceId,
    pub(crate) name: String,
    /// 首个到达间隔开始计时前的等待
    pub(crate) init_delay: SimTime,
    /// 到达间隔（秒）
    pub(crate) inter_arrival: Dist,
    /// 包长（字节）
    pub(crate) size: Dist,
    pub(crate) destination: Option<ServerId>,
    pub(crate) packet_count: u64,
}

impl Source {
    pub fn new(id: SourceId, name: impl Into<String>, inter_arrival: Dist, size: Dist) -> Self {
        Self {
            id,
            name: name.into(),
            init_delay: SimTime::ZERO,
            inter_arrival,
            size,
            destination: None,
            packet_count: 0,
        }
    }

    pub fn id(&self) -> SourceId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 已生成的 packet 数（无论是否有下游）
    pub fn packet_count(&self) -> u64 {
        self.packet_count
    }

    pub fn destination(&self) -> Option<ServerId> {
        self.destination
    }
}
