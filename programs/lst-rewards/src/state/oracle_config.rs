use anchor_lang::prelude::*;

/// Oracle parameters, mutated only by governance and read by every
/// price resolution
/// PDA: ["oracle_config"]
#[account]
#[derive(Default)]
pub struct OracleConfig {
    /// Governance authority (mirrors the ledger authority)
    pub authority: Pubkey,

    /// Primary oracle adapter account (healthy flag + usd value)
    pub primary_adapter: Pubkey,

    /// Secondary oracle adapter account (active flag + price)
    pub secondary_adapter: Pubkey,

    /// Whether the secondary adapter participates in the fallback chain
    pub use_secondary: bool,

    /// Maximum age of the manual price before it is disregarded
    pub staleness_threshold: i64,

    /// Maximum relative change vs the prior cached price, in basis points
    pub deviation_threshold_bps: u16,

    /// Governance-supplied price override (scaled by REWARD_PRECISION)
    pub manual_price: u128,

    /// When the manual price was last set
    pub manual_price_timestamp: i64,

    /// Whether the manual override is in effect
    pub manual_price_active: bool,

    /// PDA bump seed
    pub bump: u8,
}

impl OracleConfig {
    /// Account size for allocation
    pub const SIZE: usize = 8 + // discriminator
        32 + // authority
        32 + // primary_adapter
        32 + // secondary_adapter
        1 +  // use_secondary
        8 +  // staleness_threshold
        2 +  // deviation_threshold_bps
        16 + // manual_price (u128)
        8 +  // manual_price_timestamp
        1 +  // manual_price_active
        1 +  // bump
        32;  // padding for future fields

    /// A manual price counts only while active and fresh.
    pub fn manual_price_usable(&self, now: i64) -> bool {
        self.manual_price_active
            && now.saturating_sub(self.manual_price_timestamp) <= self.staleness_threshold
    }
}
