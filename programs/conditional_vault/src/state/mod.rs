//! State structures for the conditional vault program

pub mod conditional_vault;
pub mod question;

pub use conditional_vault::*;
pub use question::*;
