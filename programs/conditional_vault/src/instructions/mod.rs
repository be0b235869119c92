//! Instruction handlers for the conditional vault program
//!
//! - `initialize_question` / `resolve_question` - question lifecycle
//! - `initialize_conditional_vault` - escrow + one mint per outcome
//! - `split_tokens` / `merge_tokens` / `redeem_tokens` - move between the
//!   underlying and the conditional tokens
//! - `add_metadata_to_conditional_tokens` - display metadata for one outcome

pub mod add_metadata_to_conditional_tokens;
pub mod initialize_conditional_vault;
pub mod initialize_question;
pub mod interact_with_vault;
pub mod merge_tokens;
pub mod redeem_tokens;
pub mod resolve_question;
pub mod split_tokens;

pub use add_metadata_to_conditional_tokens::*;
pub use initialize_conditional_vault::*;
pub use initialize_question::*;
pub use interact_with_vault::*;
pub use resolve_question::*;
