//! M/M/1 FIFO 队列
//!
//! 不使用事件队列：只有"下一次到达"和"下一次离开"两个候选时刻，每步跳到较早者。

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ModelError, check_duration, check_event_budget, check_rate};
use crate::rng::{Dist, SimRng};

#[derive(Debug, Clone)]
pub struct Mm1Sim {
    lambda: Dist,
    mu: Dist,
    clock: f64,
    num_in_system: u64,
    t_arrival: f64,
    t_depart: f64,
    arrivals: u64,
    departures: u64,
    /// ∫ num_in_system dt
    area: f64,
}

impl Mm1Sim {
    /// `lambda` 为到达率，`mu` 为服务率（均为每秒）。
    pub fn new(lambda: f64, mu: f64, rng: &mut SimRng) -> Result<Self, ModelError> {
        let lambda = Dist::exponential(check_rate("lambda", lambda)?);
        let mu = Dist::exponential(check_rate("mu", mu)?);
        let t_arrival = lambda.sample(rng);
        Ok(Self {
            lambda,
            mu,
            clock: 0.0,
            num_in_system: 0,
            t_arrival,
            t_depart: f64::INFINITY,
            arrivals: 0,
            departures: 0,
            area: 0.0,
        })
    }

    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn num_in_system(&self) -> u64 {
        self.num_in_system
    }

    pub fn next_arrival(&self) -> f64 {
        self.t_arrival
    }

    /// 系统为空时为正无穷
    pub fn next_departure(&self) -> f64 {
        self.t_depart
    }

    pub fn arrivals(&self) -> u64 {
        self.arrivals
    }

    pub fn departures(&self) -> u64 {
        self.departures
    }

    /// 推进到下一个事件。同时刻时到达优先。
    ///
    /// 若新抽到的正间隔加到时钟上后被舍入掉，时钟将永远停在原地，返回
    /// `ModelError::ClockStalled`。
    pub fn advance_time(&mut self, rng: &mut SimRng) -> Result<(), ModelError> {
        let t_event = self.t_arrival.min(self.t_depart);
        self.area += self.num_in_system as f64 * (t_event - self.clock);
        self.clock = t_event;
        if t_event == self.t_arrival {
            self.handle_arrival(rng)
        } else {
            self.handle_depart(rng)
        }
    }

    fn next_after(&self, gap: f64) -> Result<f64, ModelError> {
        let t = self.clock + gap;
        if gap > 0.0 && t <= self.clock {
            return Err(ModelError::ClockStalled { clock: self.clock });
        }
        Ok(t)
    }

    fn handle_arrival(&mut self, rng: &mut SimRng) -> Result<(), ModelError> {
        self.arrivals += 1;
        self.num_in_system += 1;
        if self.num_in_system == 1 {
            self.t_depart = self.next_after(self.mu.sample(rng))?;
        }
        self.t_arrival = self.next_after(self.lambda.sample(rng))?;
        Ok(())
    }

    fn handle_depart(&mut self, rng: &mut SimRng) -> Result<(), ModelError> {
        self.departures += 1;
        self.num_in_system = self.num_in_system.saturating_sub(1);
        self.t_depart = if self.num_in_system > 0 {
            self.next_after(self.mu.sample(rng))?
        } else {
            f64::INFINITY
        };
        Ok(())
    }

    /// 按时间加权的平均系统内人数，窗口为 `[0, clock]`
    pub fn time_average_in_system(&self) -> f64 {
        if self.clock > 0.0 {
            self.area / self.clock
        } else {
            0.0
        }
    }
}

/// 理论值 `rho / (1 - rho)`；`rho >= 1` 时队列不稳定，返回 None。
pub fn theoretical_mean_in_system(lambda: f64, mu: f64) -> Option<f64> {
    let rho = lambda / mu;
    (rho.is_finite() && rho < 1.0).then(|| rho / (1.0 - rho))
}

/// 一次 FIFO 仿真的结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mm1Trace {
    pub lambda: f64,
    pub mu: f64,
    pub sim_time: f64,
    /// 每一步之前的系统内人数，首项为 0
    pub num_in_system: Vec<u64>,
    /// 与 `num_in_system` 对应的时钟
    pub clock: Vec<f64>,
    pub arrivals: u64,
    pub departures: u64,
    /// `[0, sim_time]` 上按时间加权的平均系统内人数
    pub time_average_in_system: f64,
    pub theoretical_mean_in_system: Option<f64>,
}

/// 运行直到时钟越过 `sim_time`。
#[tracing::instrument(skip(rng))]
pub fn run_fifo(lambda: f64, mu: f64, sim_time: f64, rng: &mut SimRng) -> Result<Mm1Trace, ModelError> {
    check_duration("sim_time", sim_time)?;
    let mut sim = Mm1Sim::new(lambda, mu, rng)?;
    check_event_budget(lambda + mu, sim_time)?;
    let mut num_in_system = vec![0];
    let mut clock = vec![0.0];
    // 最后一步会越过 sim_time，只累计窗口内的部分
    let mut area = 0.0;
    while sim.clock() < sim_time {
        debug!(clock = sim.clock(), n = sim.num_in_system(), "Number of customers in queue");
        num_in_system.push(sim.num_in_system());
        clock.push(sim.clock());
        let (t0, n0) = (sim.clock(), sim.num_in_system());
        sim.advance_time(rng)?;
        area += n0 as f64 * (sim.clock().min(sim_time) - t0);
    }
    info!(
        steps = num_in_system.len(),
        arrivals = sim.arrivals(),
        departures = sim.departures(),
        "✅ FIFO 仿真完成"
    );
    Ok(Mm1Trace {
        lambda,
        mu,
        sim_time,
        num_in_system,
        clock,
        arrivals: sim.arrivals(),
        departures: sim.departures(),
        time_average_in_system: area / sim_time,
        theoretical_mean_in_system: theoretical_mean_in_system(lambda, mu),
    })
}
