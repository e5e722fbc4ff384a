//! 纯 ALOHA 实验
//!
//! 扫描最大退避时延 d，输出平均时延、待发送 packet 数与冲突丢弃率。

use clap::Parser;
use qsim_rs::SimError;
use qsim_rs::model::aloha::{AlohaScenario, SweepReport, run_sweep};
use qsim_rs::report::{format_ci, read_to_string, round_to, write_json};
use std::path::PathBuf;
use tracing::info;

const ROUND_DIGITS: i32 = 3;

#[derive(Debug, Parser)]
#[command(name = "aloha_sweep", version, about = "纯 ALOHA 共享信道：扫描退避时延 d")]
struct Args {
    /// scenario.json；缺省使用内置场景
    #[arg(long)]
    scenario: Option<PathBuf>,
    /// 覆盖每个 d 的重复次数
    #[arg(long)]
    replications: Option<usize>,
    /// 覆盖每次重复的时长（秒）
    #[arg(long)]
    sim_time_s: Option<f64>,
    #[arg(long)]
    seed: Option<u64>,
    /// 覆盖源（及服务器）个数
    #[arg(long)]
    sources: Option<usize>,
    /// 覆盖缓冲区容量（bytes）
    #[arg(long)]
    buffer_bytes: Option<u64>,
    /// 覆盖要扫描的 d 值，逗号分隔
    #[arg(long, value_delimiter = ',')]
    backoff_max_s: Option<Vec<f64>>,
    /// 关闭冲突检测（信道退化为普通共享介质）
    #[arg(long)]
    no_collision: bool,
    /// 结果输出（JSON）
    #[arg(long)]
    out_json: Option<PathBuf>,
    /// 第一个 d 的第一次重复的事件轨迹（JSON）
    #[arg(long)]
    trace_json: Option<PathBuf>,
}

fn load_scenario(args: &Args) -> Result<AlohaScenario, SimError> {
    let mut scenario = match &args.scenario {
        Some(path) => serde_json::from_str(&read_to_string(path)?)?,
        None => AlohaScenario::default(),
    };
    if let Some(n) = args.replications {
        scenario.replications = n;
    }
    if let Some(t) = args.sim_time_s {
        scenario.sim_time_s = t;
    }
    if let Some(seed) = args.seed {
        scenario.seed = seed;
    }
    if let Some(n) = args.sources {
        scenario.sources = n;
    }
    if let Some(bytes) = args.buffer_bytes {
        scenario.buffer_max_bytes = Some(bytes);
    }
    if let Some(ds) = &args.backoff_max_s {
        scenario.backoff_max_s = ds.clone();
    }
    if args.no_collision {
        scenario.collision = false;
    }
    Ok(scenario)
}

fn print_report(report: &SweepReport) {
    for p in &report.points {
        let latency = p
            .mean_latency_s
            .map_or_else(|| "n/a".to_string(), |l| round_to(l, ROUND_DIGITS).to_string());
        println!(
            "d={} latency={} pending={} drop_ratio={}",
            p.backoff_max_s,
            latency,
            round_to(p.mean_pending_packets, ROUND_DIGITS),
            round_to(p.mean_total_drop_ratio, ROUND_DIGITS)
        );
    }
    if let Some(ci) = &report.summary.latency_ci_99 {
        println!("Mean latency: {}", round_to(ci.mean, ROUND_DIGITS));
        println!("{}", format_ci("99%", ci, ROUND_DIGITS));
    }
    for s in &report.summary.server_drop_ratio_ci_99 {
        println!(
            "Packet drop ratio for {}: {}",
            s.name,
            round_to(s.ci_99.mean, ROUND_DIGITS)
        );
        println!("{}", format_ci("99%", &s.ci_99, ROUND_DIGITS));
    }
}

fn main() -> Result<(), SimError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();
    let scenario = load_scenario(&args)?;
    info!(
        sources = scenario.sources,
        points = scenario.backoff_max_s.len(),
        replications = scenario.replications,
        "🚀 开始 ALOHA 扫描"
    );

    let report = run_sweep(&scenario, args.trace_json.is_some())?;
    print_report(&report);

    if let Some(path) = &args.out_json {
        write_json(path, &report)?;
    }
    if let Some(path) = &args.trace_json {
        write_json(path, report.trace.as_deref().unwrap_or_default())?;
    }
    Ok(())
}
