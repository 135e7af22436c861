use anchor_lang::prelude::*;

#[event]
pub struct Claimed {
    pub owner: Pubkey,
    pub amount: u64,
    pub reward_per_unit: u128,
    pub ts: i64,
}

#[event]
pub struct CollateralUpdated {
    pub owner: Pubkey,
    pub usd_delta: u64,
    pub increase: bool,
    pub new_value: u64,
    pub price: u128,
    pub ts: i64,
}

#[event]
pub struct EligibilityChanged {
    pub owner: Pubkey,
    pub eligible: bool,
    pub collateral_value: u64,
    pub ts: i64,
}

#[event]
pub struct RewardNotified {
    pub amount: u64,
    pub duration: i64,
    pub reward_rate: u64,
    pub period_finish: i64,
}

#[event]
pub struct OracleFallbackActivated {
    pub day_index: u64,
    pub price: u128,
    pub ts: i64,
}

#[event]
pub struct EmergencyWithdrawal {
    pub owner: Pubkey,
    pub forfeited: u64,
    pub remaining: u64,
    pub ts: i64,
}

#[event]
pub struct PausedSet {
    pub paused: bool,
}

#[event]
pub struct StakeParamsSet {
    pub min_stake_duration: i64,
    pub penalty_bps: u16,
}

#[event]
pub struct OracleConfigSet {
    pub staleness_threshold: i64,
    pub deviation_threshold_bps: u16,
    pub use_secondary: bool,
}

#[event]
pub struct OracleAdaptersSet {
    pub primary_adapter: Pubkey,
    pub secondary_adapter: Pubkey,
}

#[event]
pub struct ManualPriceSet {
    pub price: u128,
    pub ts: i64,
    pub active: bool,
}

#[event]
pub struct FundsRecovered {
    pub amount: u64,
    pub recipient: Pubkey,
}
