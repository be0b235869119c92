//! Instruction handlers for the AMM program
//!
//! - `initialize_config` / `update_config` - global fee and admin
//! - `create_amm` - open a pool for a base/quote pair (permissionless)
//! - `add_liquidity` / `remove_liquidity` - LP entry and exit
//! - `swap` - buy base with quote, or sell base for quote
//! - `crank_that_twap` / `get_twap` - keep and read the oracle

pub mod add_liquidity;
pub mod add_or_remove_liquidity;
pub mod crank_that_twap;
pub mod create_amm;
pub mod get_twap;
pub mod initialize_config;
pub mod remove_liquidity;
pub mod swap;
pub mod update_config;

pub use add_or_remove_liquidity::*;
pub use crank_that_twap::*;
pub use create_amm::*;
pub use get_twap::*;
pub use initialize_config::*;
pub use swap::*;
pub use update_config::*;
