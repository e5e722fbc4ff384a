//! 可配置的随机分布（到达间隔、包长、退避时延、采样间隔）。

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::SimRng;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DistError {
    #[error("distribution parameter `{name}` must be finite, got {value}")]
    NotFinite { name: &'static str, value: f64 },
    #[error("distribution parameter `{name}` must be non-negative, got {value}")]
    Negative { name: &'static str, value: f64 },
    #[error("exponential rate must be positive, got {0}")]
    NonPositiveRate(f64),
    #[error("uniform bounds are inverted: low={low} > high={high}")]
    InvertedBounds { low: f64, high: f64 },
}

/// 一维分布。JSON 形如 `{ "kind": "exponential", "rate": 7.5 }`。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Dist {
    Constant { value: f64 },
    /// 负指数分布，均值 `1 / rate`
    Exponential { rate: f64 },
    Uniform { low: f64, high: f64 },
}

fn check(name: &'static str, value: f64) -> Result<(), DistError> {
    if !value.is_finite() {
        return Err(DistError::NotFinite { name, value });
    }
    if value < 0.0 {
        return Err(DistError::Negative { name, value });
    }
    Ok(())
}

impl Dist {
    pub fn constant(value: f64) -> Self {
        Dist::Constant { value }
    }

    pub fn exponential(rate: f64) -> Self {
        Dist::Exponential { rate }
    }

    pub fn uniform(low: f64, high: f64) -> Self {
        Dist::Uniform { low, high }
    }

    pub fn validate(&self) -> Result<(), DistError> {
        match *self {
            Dist::Constant { value } => check("value", value),
            Dist::Exponential { rate } => {
                check("rate", rate)?;
                if rate == 0.0 {
                    return Err(DistError::NonPositiveRate(rate));
                }
                Ok(())
            }
            Dist::Uniform { low, high } => {
                check("low", low)?;
                check("high", high)?;
                if high < low {
                    return Err(DistError::InvertedBounds { low, high });
                }
                Ok(())
            }
        }
    }

    /// 抽取一个样本。
    pub fn sample(&self, rng: &mut SimRng) -> f64 {
        match *self {
            Dist::Constant { value } => value,
            Dist::Exponential { rate } => -rng.uniform01().ln() / rate,
            Dist::Uniform { low, high } => rng.gen_range(low, high),
        }
    }

    pub fn mean(&self) -> f64 {
        match *self {
            Dist::Constant { value } => value,
            Dist::Exponential { rate } => 1.0 / rate,
            Dist::Uniform { low, high } => (low + high) / 2.0,
        }
    }
}
