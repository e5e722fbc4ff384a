//! 共享信道
//!
//! 所有服务器共用一条信道。开启冲突检测时（纯 ALOHA），同一时刻有两个及以上
//! 发送者即视为冲突，当时在信道上的所有发送者都会被标记。

use super::id::ServerId;
use super::packet::Packet;

#[derive(Debug, Clone)]
pub struct Channel {
    pub(crate) name: String,
    pub(crate) collision_enabled: bool,
    senders: Vec<ServerId>,
    /// 成功通过信道的 packet（按完成顺序）
    pub(crate) successes: Vec<Packet>,
    /// 触发冲突的次数
    pub(crate) collisions: u64,
}

impl Channel {
    pub fn new(name: impl Into<String>, collision_enabled: bool) -> Self {
        Self {
            name: name.into(),
            collision_enabled,
            senders: Vec::new(),
            successes: Vec::new(),
            collisions: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn collision_enabled(&self) -> bool {
        self.collision_enabled
    }

    pub fn busy(&self) -> bool {
        !self.senders.is_empty()
    }

    /// 当前正在发送的服务器
    pub fn senders(&self) -> &[ServerId] {
        &self.senders
    }

    pub fn successes(&self) -> &[Packet] {
        &self.successes
    }

    pub fn collisions(&self) -> u64 {
        self.collisions
    }

    /// 登记一个发送者。返回 true 表示发生冲突，调用方需标记 `senders()` 中的每一个。
    pub fn add_sender(&mut self, sender: ServerId) -> bool {
        self.senders.push(sender);
        if self.collision_enabled && self.senders.len() > 1 {
            self.collisions += 1;
            return true;
        }
        false
    }

    pub fn remove_sender(&mut self, sender: ServerId) {
        if let Some(pos) = self.senders.iter().position(|s| *s == sender) {
            self.senders.remove(pos);
        }
    }

    pub(crate) fn record_success(&mut self, pkt: Packet) {
        self.successes.push(pkt);
    }

    /// 成功 packet 的平均端到端时延（秒）；没有成功 packet 时为 None。
    pub fn mean_latency_secs(&self) -> Option<f64> {
        let lat: Vec<f64> = self.successes.iter().map(Packet::latency_secs).collect();
        crate::stats::mean(&lat)
    }
}
