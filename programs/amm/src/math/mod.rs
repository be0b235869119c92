//! # Pool Math
//!
//! Pure numeric code shared by the instruction handlers and by off-chain
//! callers that want to simulate a trade before sending it:
//!
//! - `constant_product` prices swaps and liquidity changes on `x * y = k`
//! - `price_math` moves between human numbers and scaled on-chain integers

pub mod constant_product;
pub mod price_math;

pub use constant_product::*;
pub use price_math::*;
