//! State structures for the AMM program

pub mod amm;
pub mod config;
pub mod twap_oracle;

pub use amm::*;
pub use config::*;
pub use twap_oracle::*;
