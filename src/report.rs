//! 结果输出
//!
//! 结果以 JSON 写盘供外部绘图；终端只打印摘要行。

use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::error::SimError;
use crate::stats::ConfidenceInterval;

/// 以带缩进的 JSON 写入文件
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), SimError> {
    let raw = serde_json::to_string_pretty(value)?;
    fs::write(path, raw).map_err(|source| SimError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// 读取文本文件
pub fn read_to_string(path: &Path) -> Result<String, SimError> {
    fs::read_to_string(path).map_err(|source| SimError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// 四舍五入到 `digits` 位小数
pub fn round_to(x: f64, digits: i32) -> f64 {
    let scale = 10f64.powi(digits);
    (x * scale).round() / scale
}

/// `Confidence interval (99%): [low, high]`
pub fn format_ci(label: &str, ci: &ConfidenceInterval, digits: i32) -> String {
    format!(
        "Confidence interval ({label}): [{}, {}]",
        round_to(ci.low, digits),
        round_to(ci.high, digits)
    )
}
