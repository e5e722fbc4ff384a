//! 实验模型
//!
//! - `mm1`：单服务台 FIFO 队列（下一事件时间推进）
//! - `arrivals`：泊松到达过程的重复实验
//! - `aloha`：多源共享纯 ALOHA 信道，扫描最大退避时延

pub mod aloha;
pub mod arrivals;
pub mod mm1;
