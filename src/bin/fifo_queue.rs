//! FIFO 队列仿真
//!
//! M/M/1 队列：打印每一步的系统内人数，可选把轨迹写成 JSON。

use clap::Parser;
use qsim_rs::SimError;
use qsim_rs::model::mm1::run_fifo;
use qsim_rs::report::{round_to, write_json};
use qsim_rs::rng::SimRng;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "fifo_queue", version, about = "M/M/1 FIFO 队列仿真（下一事件时间推进）")]
struct Args {
    /// 到达率 lambda（每秒）
    #[arg(long, default_value_t = 1.0)]
    lambda: f64,
    /// 服务率 mu（每秒）
    #[arg(long, default_value_t = 1.0)]
    mu: f64,
    /// 仿真时长（秒）
    #[arg(long, default_value_t = 100.0)]
    sim_time: f64,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// 轨迹输出（JSON）
    #[arg(long)]
    out_json: Option<PathBuf>,
    /// 不逐行打印系统内人数
    #[arg(long)]
    quiet: bool,
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
    let mut rng = SimRng::new(args.seed);
    let trace = run_fifo(args.lambda, args.mu, args.sim_time, &mut rng)?;

    if !args.quiet {
        for n in &trace.num_in_system {
            println!("Number of customers in queue: {n}");
        }
    }
    println!(
        "done: steps={}, arrivals={}, departures={}, time_avg_in_system={}",
        trace.num_in_system.len(),
        trace.arrivals,
        trace.departures,
        round_to(trace.time_average_in_system, 3)
    );
    if let Some(expected) = trace.theoretical_mean_in_system {
        println!("M/M/1 expected in system: {}", round_to(expected, 3));
    }

    if let Some(path) = &args.out_json {
        write_json(path, &trace)?;
    }
    Ok(())
}
