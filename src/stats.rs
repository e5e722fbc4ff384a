//! 样本统计
//!
//! 重复实验结果的均值、总体标准差与正态近似置信区间。

use serde::{Deserialize, Serialize};

/// 95% 置信区间使用的分位数
pub const Z_95: f64 = 1.96;
/// "99%" 置信区间使用的系数（取 3σ）
pub const Z_99: f64 = 3.0;

pub fn mean(samples: &[f64]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    Some(samples.iter().sum::<f64>() / samples.len() as f64)
}

/// 总体标准差（除以 n）。空样本返回 None。
pub fn std_dev(samples: &[f64]) -> Option<f64> {
    let m = mean(samples)?;
    let var = samples.iter().map(|x| (x - m) * (x - m)).sum::<f64>() / samples.len() as f64;
    Some(var.sqrt())
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub mean: f64,
    pub half_width: f64,
    pub low: f64,
    pub high: f64,
}

impl ConfidenceInterval {
    /// `half_width = z * std_dev(samples) / sqrt(n)`。
    ///
    /// `n` 与样本个数分开传入：按 `d` 汇总时分母取的是每个点的重复次数。
    pub fn from_samples(samples: &[f64], z: f64, n: usize) -> Option<Self> {
        let mean = mean(samples)?;
        let sd = std_dev(samples)?;
        let half_width = if n == 0 { 0.0 } else { z * sd / (n as f64).sqrt() };
        Some(Self::around(mean, half_width))
    }

    pub fn around(mean: f64, half_width: f64) -> Self {
        Self {
            mean,
            half_width,
            low: mean - half_width,
            high: mean + half_width,
        }
    }

    pub fn contains(&self, x: f64) -> bool {
        self.low <= x && x <= self.high
    }
}

/// 可直接绘图的时间序列
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    pub t_s: Vec<f64>,
    pub value: Vec<f64>,
}

impl TimeSeries {
    pub fn push(&mut self, t_s: f64, value: f64) {
        self.t_s.push(t_s);
        self.value.push(value);
    }

    pub fn len(&self) -> usize {
        self.value.len()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn last(&self) -> Option<f64> {
        self.value.last().copied()
    }
}
