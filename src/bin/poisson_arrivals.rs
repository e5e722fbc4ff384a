//! 泊松到达过程
//!
//! 重复运行到达进程，估计到达率及其 95% 置信区间。

use clap::Parser;
use qsim_rs::SimError;
use qsim_rs::model::arrivals::{ArrivalConfig, run_replications};
use qsim_rs::report::write_json;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "poisson_arrivals", version, about = "泊松到达过程：重复实验估计到达率")]
struct Args {
    /// 到达率（packets/s）
    #[arg(long, default_value_t = 15.0)]
    lambda: f64,
    /// 同时运行离开进程（packets/s）
    #[arg(long)]
    mu: Option<f64>,
    /// 每次重复的时长（秒）
    #[arg(long, default_value_t = 100.0)]
    duration: f64,
    #[arg(long, default_value_t = 100)]
    replications: usize,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    #[arg(long)]
    out_json: Option<PathBuf>,
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
    let cfg = ArrivalConfig {
        arrival_rate: args.lambda,
        depart_rate: args.mu,
        duration: args.duration,
        replications: args.replications,
        seed: args.seed,
    };
    let report = run_replications(&cfg)?;

    println!("Mean observed packet rate: {}", report.ci_95.mean);
    println!(
        "Confidence interval (95%): [{}, {}]",
        report.ci_95.low, report.ci_95.high
    );

    if let Some(path) = &args.out_json {
        write_json(path, &report)?;
    }
    Ok(())
}
