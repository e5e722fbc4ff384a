//! 错误类型

use thiserror::Error;

use crate::rng::DistError;

/// 模型参数错误
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("{name} must be a positive finite rate, got {value}")]
    InvalidRate { name: &'static str, value: f64 },
    #[error("{name} must be a positive finite duration, got {value}")]
    InvalidDuration { name: &'static str, value: f64 },
    #[error("at least one replication is required")]
    NoReplications,
    #[error("about {expected:.0} events expected, more than the limit of {limit}")]
    TooManyEvents { expected: f64, limit: u64 },
    #[error("clock stuck at {clock} s: the next event gap is below its resolution")]
    ClockStalled { clock: f64 },
}

/// 场景配置错误
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScenarioError {
    #[error("unsupported scenario schema_version {0} (expected 1)")]
    UnsupportedSchema(u32),
    #[error("scenario needs at least one source")]
    NoSources,
    #[error("scenario needs at least one backoff_max_s value")]
    NoBackoffValues,
    #[error("invalid distribution for `{field}`: {source}")]
    Dist {
        field: &'static str,
        #[source]
        source: DistError,
    },
    #[error("`{field}` must have a mean gap of at least 1 ns, got {mean} s")]
    ZeroGap { field: &'static str, mean: f64 },
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// 命令行程序使用的顶层错误
#[derive(Debug, Error)]
pub enum SimError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Scenario(#[from] ScenarioError),
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error(transparent)]
    Dist(#[from] DistError),
}

pub(crate) fn check_rate(name: &'static str, value: f64) -> Result<f64, ModelError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ModelError::InvalidRate { name, value })
    }
}

pub(crate) fn check_duration(name: &'static str, value: f64) -> Result<f64, ModelError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ModelError::InvalidDuration { name, value })
    }
}

/// 单次运行允许的期望事件数上限
pub const MAX_EXPECTED_EVENTS: u64 = 10_000_000;

/// 事件总率乘以时长即期望事件数；超过上限的运行会耗尽内存或停不下来。
pub(crate) fn check_event_budget(total_rate: f64, duration: f64) -> Result<(), ModelError> {
    let expected = total_rate * duration;
    if expected > MAX_EXPECTED_EVENTS as f64 {
        return Err(ModelError::TooManyEvents {
            expected,
            limit: MAX_EXPECTED_EVENTS,
        });
    }
    Ok(())
}
