//! 随机数与分布
//!
//! 每次重复实验使用独立、可复现的随机流：根种子通过 `SimRng::child` 派生子流。

mod dist;

pub use dist::{Dist, DistError};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64 位黄金分割常数，用于打散相邻种子。
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// 仿真级随机数发生器。
#[derive(Debug, Clone)]
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// 派生子随机流：同一父流、同一 offset 序列总是得到相同的子流。
    pub fn child(&mut self, offset: u64) -> SimRng {
        let seed = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// (0, 1] 上的均匀样本，可安全地取对数。
    pub fn uniform01(&mut self) -> f64 {
        1.0 - self.0.r#gen::<f64>()
    }

    pub fn gen_range(&mut self, low: f64, high: f64) -> f64 {
        if high <= low {
            return low;
        }
        self.0.gen_range(low..high)
    }

    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }
}
