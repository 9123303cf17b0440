//! Computer opponent.

pub mod random;

pub use random::{AgentConfig, RandomAgent};
