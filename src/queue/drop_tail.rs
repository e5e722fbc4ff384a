//! DropTail（尾丢弃）FIFO 缓冲区

use std::collections::VecDeque;

use crate::net::Packet;

use super::PacketQueue;

#[derive(Debug)]
pub struct DropTailQueue {
    max_bytes: u64,
    cur_bytes: u64,
    q: VecDeque<Packet>,
}

impl DropTailQueue {
    pub fn new(max_bytes: u64) -> Self {
        Self {
            max_bytes,
            cur_bytes: 0,
            q: VecDeque::new(),
        }
    }

    /// 容量不限
    pub fn unbounded() -> Self {
        Self::new(u64::MAX)
    }

    pub fn is_unbounded(&self) -> bool {
        self.max_bytes == u64::MAX
    }

    pub fn iter(&self) -> impl Iterator<Item = &Packet> {
        self.q.iter()
    }
}

impl PacketQueue for DropTailQueue {
    fn enqueue(&mut self, pkt: Packet) -> Result<(), Packet> {
        let sz = u64::from(pkt.size_bytes);
        match self.cur_bytes.checked_add(sz) {
            Some(next) if next <= self.max_bytes => {
                self.cur_bytes = next;
                self.q.push_back(pkt);
                Ok(())
            }
            _ => Err(pkt),
        }
    }

    fn dequeue(&mut self) -> Option<Packet> {
        let pkt = self.q.pop_front()?;
        self.cur_bytes = self.cur_bytes.saturating_sub(u64::from(pkt.size_bytes));
        Some(pkt)
    }

    fn len(&self) -> usize {
        self.q.len()
    }

    fn bytes(&self) -> u64 {
        self.cur_bytes
    }

    fn capacity_bytes(&self) -> u64 {
        self.max_bytes
    }
}
