use anchor_lang::prelude::*;

/// One cached price per UTC day (day_index = unix_timestamp / 86_400)
/// PDA: ["daily_price", day_index.to_le_bytes()]
///
/// Once `is_set`, the day's price is never overwritten. One account is
/// created per day indefinitely; rent prices the growth and no eviction
/// is performed.
#[account]
#[derive(Default)]
pub struct DailyPrice {
    /// Day bucket this price belongs to
    pub day_index: u64,

    /// Validated price for the day (scaled by REWARD_PRECISION)
    pub price: u128,

    /// Whether a price has been committed for this day
    pub is_set: bool,

    /// PDA bump seed
    pub bump: u8,
}

impl DailyPrice {
    /// Account size for allocation
    pub const SIZE: usize = 8 + // discriminator
        8 +  // day_index
        16 + // price (u128)
        1 +  // is_set
        1 +  // bump
        16;  // padding for future fields
}
