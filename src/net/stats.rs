//! 统计信息
//!
//! 一次仿真结束时各服务器的计数快照。

use serde::{Deserialize, Serialize};

/// 服务器统计
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerStats {
    pub name: String,
    /// 交给该服务器的 packet 数（含溢出丢弃的）
    pub packet_count: u64,
    /// 因冲突作废的发送次数
    pub collision_drops: u64,
    /// 因缓冲区满被丢弃的 packet 数
    pub overflow_drops: u64,
    /// 成功发送的 packet 数
    pub sent: u64,
}

impl ServerStats {
    /// `collision_drops / (packet_count + collision_drops)`，分母为 0 时返回 0。
    pub fn drop_ratio(&self) -> f64 {
        let denom = self.packet_count + self.collision_drops;
        if denom == 0 {
            0.0
        } else {
            self.collision_drops as f64 / denom as f64
        }
    }
}

/// 多个服务器合计的丢弃率
pub fn total_drop_ratio(servers: &[ServerStats]) -> f64 {
    let drops: u64 = servers.iter().map(|s| s.collision_drops).sum();
    let count: u64 = servers.iter().map(|s| s.packet_count).sum();
    let denom = count + drops;
    if denom == 0 {
        0.0
    } else {
        drops as f64 / denom as f64
    }
}
