//! 服务器监视器
//!
//! 按采样间隔分布观察一个服务器，记录系统内 packet 数或缓冲字节数。

use super::id::{MonitorId, ServerId};
use crate::rng::Dist;
use crate::stats::TimeSeries;

#[derive(Debug, Clone)]
pub struct QueuedServerMonitor {
    pub(crate) id: MonitorId,
    pub(crate) server: ServerId,
    pub(crate) sample: Dist,
    /// true：记录缓冲区字节数；false：记录 packet 数
    pub(crate) count_bytes: bool,
    pub(crate) sizes: Vec<u64>,
    pub(crate) series: TimeSeries,
}

impl QueuedServerMonitor {
    pub fn new(id: MonitorId, server: ServerId, sample: Dist, count_bytes: bool) -> Self {
        Self {
            id,
            server,
            sample,
            count_bytes,
            sizes: Vec::new(),
            series: TimeSeries::default(),
        }
    }

    pub fn id(&self) -> MonitorId {
        self.id
    }

    pub fn server(&self) -> ServerId {
        self.server
    }

    pub fn sizes(&self) -> &[u64] {
        &self.sizes
    }

    pub fn series(&self) -> &TimeSeries {
        &self.series
    }

    /// 采样次数
    pub fn time_count(&self) -> usize {
        self.sizes.len()
    }

    pub fn last(&self) -> Option<u64> {
        self.sizes.last().copied()
    }
}
