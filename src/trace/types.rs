use serde::{Deserialize, Serialize};

/// 轨迹事件类型
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TraceEventKind {
    /// 源生成一个 packet
    Generate { source: usize, size_bytes: u32 },
    /// packet 进入服务器缓冲区
    Enqueue {
        server: usize,
        q_bytes: u64,
        q_len: usize,
    },
    /// 缓冲区已满，packet 被尾丢弃
    Overflow { server: usize, q_bytes: u64 },
    /// 服务器开始在信道上发送
    TxStart {
        server: usize,
        attempt: u32,
        end_ns: u64,
    },
    /// 发送完成且未冲突
    TxEnd { server: usize },
    /// 信道上出现冲突，列出所有受影响的发送者
    Collision { senders: Vec<usize> },
    /// 冲突后进入随机退避
    Backoff { server: usize, resume_ns: u64 },
    /// packet 被交给下游服务器
    Forward { from: usize, to: usize },
    /// 监视器采样
    Sample { server: usize, value: u64 },
}

/// 一条轨迹记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEvent {
    /// 仿真时间（纳秒，和 `SimTime.0` 同口径）
    pub t_ns: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pkt_id: Option<u64>,
    #[serde(flatten)]
    pub kind: TraceEventKind,
}

/// 内存中的事件收集器
#[derive(Debug, Default)]
pub struct TraceLogger {
    pub events: Vec<TraceEvent>,
}

impl TraceLogger {
    pub fn push(&mut self, ev: TraceEvent) {
        self.events.push(ev);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
