//! Events emitted by the AMM program
//!
//! Every state-changing instruction emits one event carrying the pool's
//! post-state, so an indexer can rebuild reserves and the oracle without
//! reading accounts.

use anchor_lang::prelude::*;

use crate::state::{Amm, SwapType};

/// Header shared by every pool event
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct CommonFields {
    pub slot: u64,
    pub unix_timestamp: i64,
    pub amm: Pubkey,
    pub seq_num: u64,
    pub post_base_reserves: u64,
    pub post_quote_reserves: u64,
    pub oracle_last_price: u128,
    pub oracle_last_observation: u128,
    pub oracle_aggregator: u128,
}

impl CommonFields {
    pub fn new(clock: &Clock, amm_key: Pubkey, amm: &Amm) -> Self {
        Self {
            slot: clock.slot,
            unix_timestamp: clock.unix_timestamp,
            amm: amm_key,
            seq_num: amm.seq_num,
            post_base_reserves: amm.base_amount,
            post_quote_reserves: amm.quote_amount,
            oracle_last_price: amm.oracle.last_price,
            oracle_last_observation: amm.oracle.last_observation,
            oracle_aggregator: amm.oracle.aggregator,
        }
    }
}

#[event]
pub struct ConfigInitializedEvent {
    pub admin: Pubkey,
    pub swap_fee_per_mille: u16,
}

#[event]
pub struct ConfigUpdatedEvent {
    pub admin: Pubkey,
    pub swap_fee_per_mille: u16,
}

#[event]
pub struct CreateAmmEvent {
    pub common: CommonFields,
    pub user: Pubkey,
    pub lp_mint: Pubkey,
    pub base_mint: Pubkey,
    pub quote_mint: Pubkey,
    pub swap_fee_per_mille: u16,
    pub twap_initial_observation: u128,
    pub twap_max_observation_change_per_update: u128,
}

#[event]
pub struct SwapEvent {
    pub common: CommonFields,
    pub user: Pubkey,
    pub swap_type: SwapType,
    pub input_amount: u64,
    pub output_amount: u64,
}

#[event]
pub struct AddLiquidityEvent {
    pub common: CommonFields,
    pub user: Pubkey,
    pub quote_amount: u64,
    pub base_amount: u64,
    pub lp_tokens_minted: u64,
}

#[event]
pub struct RemoveLiquidityEvent {
    pub common: CommonFields,
    pub user: Pubkey,
    pub lp_tokens_burned: u64,
    pub base_amount: u64,
    pub quote_amount: u64,
}

#[event]
pub struct CrankThatTwapEvent {
    pub common: CommonFields,
    /// Whether this crank moved the aggregator (false within the same slot)
    pub observed: bool,
}
