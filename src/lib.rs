pub mod error;
pub mod model;
pub mod net;
pub mod queue;
pub mod report;
pub mod rng;
pub mod sim;
pub mod stats;
pub mod trace;

pub use error::{ModelError, ScenarioError, SimError};

#[cfg(test)]
mod test;
