//! 数据包类型
//!
//! 定义网络数据包及其时间戳。

use super::id::SourceId;
use crate::sim::SimTime;

/// 网络数据包
#[derive(Debug, Clone, PartialEq)]
pub struct Packet {
    pub id: u64,
    pub source: SourceId,
    pub size_bytes: u32,
    /// 在源处生成的时刻
    pub generated_at: SimTime,
    /// 最近一次离开服务器（完成发送）的时刻
    pub output_at: SimTime,
    /// 已尝试发送的次数（含因冲突失败的）
    pub attempts: u32,
}

impl Packet {
    pub fn new(id: u64, source: SourceId, size_bytes: u32, generated_at: SimTime) -> Self {
        Self {
            id,
            source,
            size_bytes,
            generated_at,
            output_at: SimTime::ZERO,
            attempts: 0,
        }
    }

    /// 端到端时延（秒）：`output_at - generated_at`
    pub fn latency_secs(&self) -> f64 {
        self.output_at.saturating_sub(self.generated_at).as_secs_f64()
    }

    /// 把连续的包长样本转换为整字节数：向上取整，至少 1 字节。
    pub fn size_from_sample(sample: f64) -> u32 {
        if !sample.is_finite() || sample <= 1.0 {
            return 1;
        }
        let bytes = sample.ceil();
        if bytes >= u32::MAX as f64 {
            u32::MAX
        } else {
            bytes as u32
        }
    }
}
