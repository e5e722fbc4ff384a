//! 网络模型
//!
//! 持有源、服务器、共享信道与监视器，实现 packet 的生成、排队、发送、冲突与退避。

use super::backoff_end::BackoffEnd;
use super::channel::Channel;
use super::generate_packet::GeneratePacket;
use super::id::{MonitorId, ServerId, SourceId};
use super::monitor::QueuedServerMonitor;
use super::packet::Packet;
use super::sample_server::SampleServer;
use super::server::{QueuedServer, ServerState};
use super::source::Source;
use super::stats::{ServerStats, total_drop_ratio};
use super::tx_end::TxEnd;
use crate::queue::PacketQueue;
use crate::rng::{Dist, SimRng};
use crate::sim::{SimTime, Simulator};
use crate::trace::{TraceEvent, TraceEventKind, TraceLogger};
use tracing::{debug, trace, warn};

/// 网络：一条共享信道，若干源与排队服务器
pub struct Network {
    sources: Vec<Source>,
    servers: Vec<QueuedServer>,
    monitors: Vec<QueuedServerMonitor>,
    channel: Channel,
    next_pkt_id: u64,
    pub rng: SimRng,
    pub trace: Option<TraceLogger>,
}

impl Default for Network {
    fn default() -> Self {
        Self::new(Channel::new("channel", true), SimRng::new(0))
    }
}

impl Network {
    pub fn new(channel: Channel, rng: SimRng) -> Self {
        Self {
            sources: Vec::new(),
            servers: Vec::new(),
            monitors: Vec::new(),
            channel,
            next_pkt_id: 0,
            rng,
            trace: None,
        }
    }

    /// 添加数据包源（尚未挂接下游）
    pub fn add_source(&mut self, name: impl Into<String>, inter_arrival: Dist, size: Dist) -> SourceId {
        let id = SourceId(self.sources.len());
        self.sources.push(Source::new(id, name, inter_arrival, size));
        id
    }

    /// 设置源的初始等待
    pub fn set_init_delay(&mut self, src: SourceId, delay: SimTime) {
        self.sources[src.0].init_delay = delay;
    }

    /// 添加排队服务器。`buffer_max_bytes = None` 表示缓冲区不限容量。
    pub fn add_server(
        &mut self,
        name: impl Into<String>,
        buffer_max_bytes: Option<u64>,
        service_rate: f64,
        backoff: Dist,
    ) -> ServerId {
        let id = ServerId(self.servers.len());
        self.servers
            .push(QueuedServer::new(id, name, buffer_max_bytes, service_rate, backoff));
        id
    }

    /// 为服务器添加监视器
    pub fn add_monitor(&mut self, server: ServerId, sample: Dist, count_bytes: bool) -> MonitorId {
        let id = MonitorId(self.monitors.len());
        self.monitors
            .push(QueuedServerMonitor::new(id, server, sample, count_bytes));
        id
    }

    /// 源 -> 服务器
    pub fn attach_source(&mut self, src: SourceId, dst: ServerId) {
        self.sources[src.0].destination = Some(dst);
    }

    /// 服务器 -> 服务器（串联）
    pub fn attach_server(&mut self, from: ServerId, to: ServerId) {
        self.servers[from.0].destination = Some(to);
    }

    pub fn source(&self, id: SourceId) -> &Source {
        &self.sources[id.0]
    }

    pub fn server(&self, id: ServerId) -> &QueuedServer {
        &self.servers[id.0]
    }

    pub fn monitor(&self, id: MonitorId) -> &QueuedServerMonitor {
        &self.monitors[id.0]
    }

    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    pub fn servers(&self) -> &[QueuedServer] {
        &self.servers
    }

    pub fn monitors(&self) -> &[QueuedServerMonitor] {
        &self.monitors
    }

    pub fn channel(&self) -> &Channel {
        &self.channel
    }

    /// 调度每个源的首次生成与每个监视器的首次采样。
    pub fn start(&mut self, sim: &mut Simulator) {
        for i in 0..self.sources.len() {
            let src = &self.sources[i];
            let (init_delay, inter_arrival) = (src.init_delay, src.inter_arrival);
            let gap = SimTime::from_secs_f64(inter_arrival.sample(&mut self.rng));
            sim.schedule_in(init_delay.saturating_add(gap), GeneratePacket { source: SourceId(i) });
        }
        for i in 0..self.monitors.len() {
            let gap = SimTime::from_secs_f64(self.monitors[i].sample.sample(&mut self.rng));
            sim.schedule_in(gap, SampleServer { monitor: MonitorId(i) });
        }
        debug!(
            sources = self.sources.len(),
            servers = self.servers.len(),
            monitors = self.monitors.len(),
            "🚦 网络已启动"
        );
    }

    fn record(&mut self, now: SimTime, pkt_id: Option<u64>, kind: TraceEventKind) {
        if let Some(trace) = self.trace.as_mut() {
            trace.push(TraceEvent {
                t_ns: now.0,
                pkt_id,
                kind,
            });
        }
    }

    /// 源生成一个 packet 并交给下游，然后调度下一次生成。
    #[tracing::instrument(skip(self, sim), fields(source = src.0))]
    pub(crate) fn on_generate(&mut self, src: SourceId, sim: &mut Simulator) {
        let now = sim.now();
        let (size, inter_arrival, destination) = {
            let s = &self.sources[src.0];
            (s.size, s.inter_arrival, s.destination)
        };
        let size_bytes = Packet::size_from_sample(size.sample(&mut self.rng));
        let id = self.next_pkt_id;
        self.next_pkt_id = self.next_pkt_id.wrapping_add(1);
        let pkt = Packet::new(id, src, size_bytes, now);
        trace!(pkt_id = id, size_bytes, "📦 生成 packet");
        self.record(
            now,
            Some(id),
            TraceEventKind::Generate {
                source: src.0,
                size_bytes,
            },
        );

        if let Some(dst) = destination {
            self.put(dst, pkt, sim);
        }
        self.sources[src.0].packet_count += 1;

        let gap = SimTime::from_secs_f64(inter_arrival.sample(&mut self.rng));
        sim.schedule_in(gap, GeneratePacket { source: src });
    }

    /// packet 到达服务器：入缓冲区（可能溢出丢弃），空闲时立即开始服务。
    pub fn put(&mut self, id: ServerId, pkt: Packet, sim: &mut Simulator) {
        let now = sim.now();
        let pkt_id = pkt.id;
        let server = &mut self.servers[id.0];
        server.packet_count += 1;
        let kind = match server.buffer.enqueue(pkt) {
            Ok(()) => TraceEventKind::Enqueue {
                server: id.0,
                q_bytes: server.buffer.bytes(),
                q_len: server.buffer.len(),
            },
            Err(dropped) => {
                server.overflow_drops += 1;
                debug!(
                    pkt_id = dropped.id,
                    server = %server.name,
                    q_bytes = server.buffer.bytes(),
                    "🗑️  缓冲区溢出，丢弃 packet"
                );
                TraceEventKind::Overflow {
                    server: id.0,
                    q_bytes: server.buffer.bytes(),
                }
            }
        };
        self.record(now, Some(pkt_id), kind);
        self.start_next(id, sim);
    }

    /// 服务台空闲且缓冲区非空时，取出下一个 packet 开始发送。
    fn start_next(&mut self, id: ServerId, sim: &mut Simulator) {
        let server = &mut self.servers[id.0];
        if server.state != ServerState::Idle {
            return;
        }
        if let Some(pkt) = server.buffer.dequeue() {
            self.begin_tx(id, pkt, sim);
        }
    }

    fn begin_tx(&mut self, id: ServerId, mut pkt: Packet, sim: &mut Simulator) {
        let now = sim.now();
        pkt.attempts += 1;
        let pkt_id = pkt.id;
        let attempt = pkt.attempts;
        let tx = SimTime::from_secs_f64(self.servers[id.0].service_secs(pkt.size_bytes));
        let end = now.saturating_add(tx);
        {
            let server = &mut self.servers[id.0];
            server.state = ServerState::Transmitting;
            server.in_service = Some(pkt);
        }
        self.record(
            now,
            Some(pkt_id),
            TraceEventKind::TxStart {
                server: id.0,
                attempt,
                end_ns: end.0,
            },
        );

        if self.channel.add_sender(id) {
            let senders = self.channel.senders().to_vec();
            for s in &senders {
                self.servers[s.0].collision = true;
            }
            debug!(senders = ?senders, "💥 信道冲突");
            self.record(
                now,
                None,
                TraceEventKind::Collision {
                    senders: senders.iter().map(|s| s.0).collect(),
                },
            );
        }
        sim.schedule(end, TxEnd { server: id });
    }

    /// 发送结束：无冲突则交付并服务下一个；有冲突则退避后重发同一 packet。
    #[tracing::instrument(skip(self, sim), fields(server = id.0))]
    pub(crate) fn on_tx_end(&mut self, id: ServerId, sim: &mut Simulator) {
        let now = sim.now();
        self.channel.remove_sender(id);
        let server = &mut self.servers[id.0];
        let Some(mut pkt) = server.in_service.take() else {
            warn!(server = %server.name, "发送结束时服务台上没有 packet");
            server.state = ServerState::Idle;
            return;
        };
        pkt.output_at = now;

        if !server.collision {
            server.sent += 1;
            server.state = ServerState::Idle;
            let destination = server.destination;
            let pkt_id = pkt.id;
            trace!(pkt_id, latency_s = pkt.latency_secs(), "✅ 发送成功");
            self.record(now, Some(pkt_id), TraceEventKind::TxEnd { server: id.0 });
            self.channel.record_success(pkt.clone());
            match destination {
                Some(to) => {
                    self.record(now, Some(pkt_id), TraceEventKind::Forward { from: id.0, to: to.0 });
                    self.put(to, pkt, sim);
                }
                None => self.servers[id.0].delivered.push(pkt),
            }
            self.start_next(id, sim);
        } else {
            server.collision_drops += 1;
            server.collision = false;
            server.state = ServerState::Backoff;
            let delay = SimTime::from_secs_f64(server.backoff.sample(&mut self.rng));
            let resume = now.saturating_add(delay);
            let pkt_id = pkt.id;
            server.in_service = Some(pkt);
            debug!(pkt_id, resume = ?resume, "⏳ 冲突作废，随机退避");
            self.record(
                now,
                Some(pkt_id),
                TraceEventKind::Backoff {
                    server: id.0,
                    resume_ns: resume.0,
                },
            );
            sim.schedule(resume, BackoffEnd { server: id });
        }
    }

    /// 退避结束，重发手里持有的 packet。
    pub(crate) fn on_backoff_end(&mut self, id: ServerId, sim: &mut Simulator) {
        let server = &mut self.servers[id.0];
        server.state = ServerState::Idle;
        match server.in_service.take() {
            Some(pkt) => self.begin_tx(id, pkt, sim),
            None => self.start_next(id, sim),
        }
    }

    /// 监视器采样并调度下一次采样。
    pub(crate) fn on_sample(&mut self, id: MonitorId, sim: &mut Simulator) {
        let now = sim.now();
        let (server_id, sample, count_bytes) = {
            let m = &self.monitors[id.0];
            (m.server, m.sample, m.count_bytes)
        };
        let server = &self.servers[server_id.0];
        let value = if count_bytes {
            server.buffer.bytes()
        } else {
            server.in_system()
        };
        let m = &mut self.monitors[id.0];
        m.sizes.push(value);
        m.series.push(now.as_secs_f64(), value as f64);
        self.record(
            now,
            None,
            TraceEventKind::Sample {
                server: server_id.0,
                value,
            },
        );

        let gap = SimTime::from_secs_f64(sample.sample(&mut self.rng));
        sim.schedule_in(gap, SampleServer { monitor: id });
    }

    /// 各服务器的统计快照
    pub fn server_stats(&self) -> Vec<ServerStats> {
        self.servers.iter().map(QueuedServer::stats).collect()
    }

    /// 所有服务器合计的冲突丢弃率
    pub fn total_drop_ratio(&self) -> f64 {
        total_drop_ratio(&self.server_stats())
    }

    /// 经信道成功发送的 packet 的平均时延（秒）
    pub fn mean_latency_secs(&self) -> Option<f64> {
        self.channel.mean_latency_secs()
    }

    /// 各监视器最后一次采样值之和（尚未采样的记 0）
    pub fn pending_packets(&self) -> u64 {
        self.monitors.iter().filter_map(QueuedServerMonitor::last).sum()
    }
}
