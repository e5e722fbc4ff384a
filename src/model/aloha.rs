//! 纯 ALOHA 实验
//!
//! N 个源各自接一个排队服务器，所有服务器共享同一条信道。冲突后的退避时延取
//! `uniform(0, d)`；对每个 `d` 重复运行若干次，统计平均时延、待发送 packet 数与冲突丢弃率。

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ModelError, ScenarioError, check_duration, check_event_budget, check_rate};
use crate::net::{Channel, NetWorld, Network, ServerStats};
use crate::rng::{Dist, SimRng};
use crate::sim::{SimTime, Simulator};
use crate::stats::{ConfidenceInterval, Z_99, mean};
use crate::trace::{TraceEvent, TraceLogger};

/// 64 kbit/s 链路
pub const DEFAULT_LINK_BYTES_PER_SEC: f64 = 64_000.0 / 8.0;
pub const DEFAULT_MEAN_SIZE_BYTES: f64 = 400.0;
pub const DEFAULT_ARRIVAL_RATE: f64 = 7.5;

fn default_schema_version() -> u32 {
    1
}
fn default_sources() -> usize {
    2
}
fn default_link_bytes_per_sec() -> f64 {
    DEFAULT_LINK_BYTES_PER_SEC
}
fn default_size() -> Dist {
    Dist::exponential(1.0 / DEFAULT_MEAN_SIZE_BYTES)
}
fn default_inter_arrival() -> Dist {
    Dist::exponential(DEFAULT_ARRIVAL_RATE)
}
fn default_collision() -> bool {
    true
}
fn default_backoff_max_s() -> Vec<f64> {
    (0..10).map(|i| f64::from(i) * 10.0).collect()
}
fn default_sim_time_s() -> f64 {
    100.0
}
fn default_replications() -> usize {
    10
}
fn default_sample() -> Dist {
    Dist::constant(1.0)
}
fn default_seed() -> u64 {
    42
}

/// 实验场景（scenario.json）。所有字段都有默认值，`{}` 即原始实验设置。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlohaScenario {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    #[serde(default = "default_sources")]
    pub sources: usize,
    /// 服务速率（bytes/s），即信道速率
    #[serde(default = "default_link_bytes_per_sec")]
    pub link_bytes_per_sec: f64,
    #[serde(default = "default_size")]
    pub size: Dist,
    #[serde(default = "default_inter_arrival")]
    pub inter_arrival: Dist,
    /// 每个服务器的缓冲区容量；None 表示不限
    #[serde(default)]
    pub buffer_max_bytes: Option<u64>,
    #[serde(default = "default_collision")]
    pub collision: bool,
    /// 要扫描的最大退避时延 d（秒）
    #[serde(default = "default_backoff_max_s")]
    pub backoff_max_s: Vec<f64>,
    #[serde(default = "default_sim_time_s")]
    pub sim_time_s: f64,
    #[serde(default = "default_replications")]
    pub replications: usize,
    /// 监视器采样间隔（秒）
    #[serde(default = "default_sample")]
    pub sample: Dist,
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for AlohaScenario {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            sources: default_sources(),
            link_bytes_per_sec: default_link_bytes_per_sec(),
            size: default_size(),
            inter_arrival: default_inter_arrival(),
            buffer_max_bytes: None,
            collision: default_collision(),
            backoff_max_s: default_backoff_max_s(),
            sim_time_s: default_sim_time_s(),
            replications: default_replications(),
            sample: default_sample(),
            seed: default_seed(),
        }
    }
}

fn dist_field(field: &'static str, d: &Dist) -> Result<(), ScenarioError> {
    d.validate()
        .map_err(|source| ScenarioError::Dist { field, source })
}

/// 仿真时钟的分辨率（秒）
const MIN_GAP_S: f64 = 1e-9;

/// 作为事件间隔的分布：均值不足一个时钟刻度时仿真时钟无法前进。
fn gap_field(field: &'static str, d: &Dist) -> Result<(), ScenarioError> {
    dist_field(field, d)?;
    let mean = d.mean();
    if mean < MIN_GAP_S {
        return Err(ScenarioError::ZeroGap { field, mean });
    }
    Ok(())
}

impl AlohaScenario {
    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.schema_version != 1 {
            return Err(ScenarioError::UnsupportedSchema(self.schema_version));
        }
        if self.sources == 0 {
            return Err(ScenarioError::NoSources);
        }
        if self.backoff_max_s.is_empty() {
            return Err(ScenarioError::NoBackoffValues);
        }
        if self.replications == 0 {
            return Err(ModelError::NoReplications.into());
        }
        check_rate("link_bytes_per_sec", self.link_bytes_per_sec)?;
        check_duration("sim_time_s", self.sim_time_s)?;
        dist_field("size", &self.size)?;
        gap_field("inter_arrival", &self.inter_arrival)?;
        gap_field("sample", &self.sample)?;
        let per_source = 1.0 / self.inter_arrival.mean() + 1.0 / self.sample.mean();
        check_event_budget(per_source * self.sources as f64, self.sim_time_s)?;
        for d in &self.backoff_max_s {
            dist_field("backoff_max_s", &Dist::uniform(0.0, *d))?;
        }
        Ok(())
    }

    /// 按场景搭建网络：源 i -> 服务器 i，每个服务器一个监视器。
    pub fn build(&self, backoff_max: f64, rng: SimRng) -> Network {
        let mut net = Network::new(Channel::new("Channel", self.collision), rng);
        for i in 0..self.sources {
            let src = net.add_source(format!("Source {}", i + 1), self.inter_arrival, self.size);
            let server = net.add_server(
                format!("Router{}", i + 1),
                self.buffer_max_bytes,
                self.link_bytes_per_sec,
                Dist::uniform(0.0, backoff_max),
            );
            net.attach_source(src, server);
            net.add_monitor(server, self.sample, false);
        }
        net
    }
}

/// 单次重复的结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplicationResult {
    pub backoff_max_s: f64,
    pub mean_latency_s: Option<f64>,
    pub pending_packets: u64,
    pub total_drop_ratio: f64,
    pub servers: Vec<ServerStats>,
    pub successes: usize,
    pub collisions: u64,
}

impl ReplicationResult {
    pub fn from_network(backoff_max_s: f64, net: &Network) -> Self {
        Self {
            backoff_max_s,
            mean_latency_s: net.mean_latency_secs(),
            pending_packets: net.pending_packets(),
            total_drop_ratio: net.total_drop_ratio(),
            servers: net.server_stats(),
            successes: net.channel().successes().len(),
            collisions: net.channel().collisions(),
        }
    }
}

/// 运行一次重复。`trace` 为 true 时返回事件轨迹。
#[tracing::instrument(skip(scenario, rng, trace), fields(d = backoff_max))]
pub fn run_replication(
    scenario: &AlohaScenario,
    backoff_max: f64,
    rng: SimRng,
    trace: bool,
) -> (ReplicationResult, Option<Vec<TraceEvent>>) {
    let mut net = scenario.build(backoff_max, rng);
    if trace {
        net.trace = Some(TraceLogger::default());
    }
    let mut world = NetWorld::new(net);
    let mut sim = Simulator::default();
    world.net.start(&mut sim);
    let until = SimTime::from_secs_f64(scenario.sim_time_s);
    sim.run_until(SimTime(until.0.saturating_sub(1)), &mut world);

    let result = ReplicationResult::from_network(backoff_max, &world.net);
    debug!(
        events = sim.executed(),
        successes = result.successes,
        collisions = result.collisions,
        drop_ratio = result.total_drop_ratio,
        "重复实验完成"
    );
    (result, world.net.trace.take().map(|t| t.events))
}

/// 一个 d 值上的汇总
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepPoint {
    pub backoff_max_s: f64,
    /// 有成功 packet 的重复上的平均时延；全部没有时为 None
    pub mean_latency_s: Option<f64>,
    pub mean_pending_packets: f64,
    pub mean_total_drop_ratio: f64,
    /// 每个服务器在各次重复上的丢弃率
    pub server_drop_ratios: Vec<Vec<f64>>,
    pub replications: Vec<ReplicationResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerDropSummary {
    pub name: String,
    pub ci_99: ConfidenceInterval,
}

/// 跨 d 值的总体统计
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepSummary {
    /// 各 d 平均时延的均值及 3σ 区间（分母为每点的重复次数）
    pub latency_ci_99: Option<ConfidenceInterval>,
    /// 最后一个 d 上每个服务器的丢弃率
    pub server_drop_ratio_ci_99: Vec<ServerDropSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepReport {
    pub scenario: AlohaScenario,
    pub points: Vec<SweepPoint>,
    pub summary: SweepSummary,
    #[serde(skip)]
    pub trace: Option<Vec<TraceEvent>>,
}

impl SweepReport {
    /// 绘图用的三条曲线：(d, latency)、(d, pending)、(d, drop ratio)
    pub fn latency_series(&self) -> Vec<(f64, Option<f64>)> {
        self.points
            .iter()
            .map(|p| (p.backoff_max_s, p.mean_latency_s))
            .collect()
    }

    pub fn pending_series(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .map(|p| (p.backoff_max_s, p.mean_pending_packets))
            .collect()
    }

    pub fn drop_ratio_series(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .map(|p| (p.backoff_max_s, p.mean_total_drop_ratio))
            .collect()
    }
}

pub(crate) fn summarize_point(backoff_max_s: f64, replications: Vec<ReplicationResult>, n_servers: usize) -> SweepPoint {
    let latencies: Vec<f64> = replications.iter().filter_map(|r| r.mean_latency_s).collect();
    let pending: Vec<f64> = replications.iter().map(|r| r.pending_packets as f64).collect();
    let drops: Vec<f64> = replications.iter().map(|r| r.total_drop_ratio).collect();
    let server_drop_ratios: Vec<Vec<f64>> = (0..n_servers)
        .map(|i| {
            replications
                .iter()
                .filter_map(|r| r.servers.get(i).map(ServerStats::drop_ratio))
                .collect()
        })
        .collect();
    SweepPoint {
        backoff_max_s,
        mean_latency_s: mean(&latencies),
        mean_pending_packets: mean(&pending).unwrap_or(0.0),
        mean_total_drop_ratio: mean(&drops).unwrap_or(0.0),
        server_drop_ratios,
        replications,
    }
}

/// 对每个 d 运行 `replications` 次。`trace` 为 true 时记录第一个 d 的第一次重复。
#[tracing::instrument(skip(scenario), fields(points = scenario.backoff_max_s.len(), reps = scenario.replications))]
pub fn run_sweep(scenario: &AlohaScenario, trace: bool) -> Result<SweepReport, ScenarioError> {
    scenario.validate()?;
    let mut root = SimRng::new(scenario.seed);
    let mut captured = None;
    let mut points = Vec::with_capacity(scenario.backoff_max_s.len());

    for (di, &d) in scenario.backoff_max_s.iter().enumerate() {
        let mut reps = Vec::with_capacity(scenario.replications);
        for r in 0..scenario.replications {
            let stream = (di * scenario.replications + r) as u64;
            let want_trace = trace && di == 0 && r == 0;
            let (result, events) = run_replication(scenario, d, root.child(stream), want_trace);
            if want_trace {
                captured = events;
            }
            reps.push(result);
        }
        let point = summarize_point(d, reps, scenario.sources);
        info!(
            d,
            latency_s = ?point.mean_latency_s,
            pending = point.mean_pending_packets,
            drop_ratio = point.mean_total_drop_ratio,
            "📈 d 值完成"
        );
        points.push(point);
    }

    let per_point_latency: Vec<f64> = points.iter().filter_map(|p| p.mean_latency_s).collect();
    let latency_ci_99 =
        ConfidenceInterval::from_samples(&per_point_latency, Z_99, scenario.replications);
    let server_drop_ratio_ci_99 = points
        .last()
        .map(|last| {
            last.server_drop_ratios
                .iter()
                .enumerate()
                .filter_map(|(i, ratios)| {
                    ConfidenceInterval::from_samples(ratios, Z_99, scenario.replications).map(
                        |ci_99| ServerDropSummary {
                            name: format!("Router{}", i + 1),
                            ci_99,
                        },
                    )
                })
                .collect()
        })
        .unwrap_or_default();

    Ok(SweepReport {
        scenario: scenario.clone(),
        points,
        summary: SweepSummary {
            latency_ci_99,
            server_drop_ratio_ci_99,
        },
        trace: captured,
    })
}
