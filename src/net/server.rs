//! 排队服务器
//!
//! 一个 FIFO 缓冲区加一个服务台。服务台通过共享信道发送 packet；
//! 发送失败（冲突）时保留该 packet，随机退避后优先重发。

use super::id::ServerId;
use super::packet::Packet;
use super::stats::ServerStats;
use crate::queue::{DropTailQueue, PacketQueue};
use crate::rng::Dist;

/// 服务台状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerState {
    Idle,
    Transmitting,
    /// 冲突后等待随机时延，手里仍持有待重发的 packet
    Backoff,
}

#[derive(Debug)]
pub struct QueuedServer {
    pub(crate) id: ServerId,
    pub(crate) name: String,
    pub(crate) buffer: DropTailQueue,
    /// 服务速率（bytes/s）
    pub(crate) service_rate: f64,
    pub(crate) backoff: Dist,
    pub(crate) destination: Option<ServerId>,
    pub(crate) state: ServerState,
    pub(crate) in_service: Option<Packet>,
    pub(crate) collision: bool,
    pub(crate) packet_count: u64,
    pub(crate) collision_drops: u64,
    pub(crate) overflow_drops: u64,
    pub(crate) sent: u64,
    /// 无下游时成功发送的 packet 留在这里
    pub(crate) delivered: Vec<Packet>,
}

impl QueuedServer {
    pub fn new(
        id: ServerId,
        name: impl Into<String>,
        buffer_max_bytes: Option<u64>,
        service_rate: f64,
        backoff: Dist,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            buffer: buffer_max_bytes.map_or_else(DropTailQueue::unbounded, DropTailQueue::new),
            service_rate,
            backoff,
            destination: None,
            state: ServerState::Idle,
            in_service: None,
            collision: false,
            packet_count: 0,
            collision_drops: 0,
            overflow_drops: 0,
            sent: 0,
            delivered: Vec::new(),
        }
    }

    pub fn id(&self) -> ServerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> ServerState {
        self.state
    }

    /// 服务台上是否有 packet（发送中或退避中）
    pub fn busy(&self) -> bool {
        self.in_service.is_some()
    }

    pub fn buffer(&self) -> &DropTailQueue {
        &self.buffer
    }

    pub fn delivered(&self) -> &[Packet] {
        &self.delivered
    }

    /// 系统内 packet 数：缓冲区长度 + 服务台上的 0/1 个
    pub fn in_system(&self) -> u64 {
        self.buffer.len() as u64 + u64::from(self.busy())
    }

    /// 发送 `size_bytes` 所需的时间（秒）
    pub(crate) fn service_secs(&self, size_bytes: u32) -> f64 {
        f64::from(size_bytes) / self.service_rate
    }

    pub fn stats(&self) -> ServerStats {
        ServerStats {
            name: self.name.clone(),
            packet_count: self.packet_count,
            collision_drops: self.collision_drops,
            overflow_drops: self.overflow_drops,
            sent: self.sent,
        }
    }
}
