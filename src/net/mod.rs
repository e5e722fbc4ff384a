//! 网络模拟模块
//!
//! 数据包源、带缓冲区的服务器、共享信道（纯 ALOHA 冲突）与监视器。

// 子模块声明
mod backoff_end;
mod channel;
mod generate_packet;
mod id;
mod monitor;
mod net_world;
mod network;
mod packet;
mod sample_server;
mod server;
mod source;
mod stats;
mod tx_end;

// 重新导出公共接口
pub use backoff_end::BackoffEnd;
pub use channel::Channel;
pub use generate_packet::GeneratePacket;
pub use id::{MonitorId, ServerId, SourceId};
pub use monitor::QueuedServerMonitor;
pub use net_world::NetWorld;
pub use network::Network;
pub use packet::Packet;
pub use sample_server::SampleServer;
pub use server::{QueuedServer, ServerState};
pub use source::Source;
pub use stats::{ServerStats, total_drop_ratio};
pub use tx_end::TxEnd;
