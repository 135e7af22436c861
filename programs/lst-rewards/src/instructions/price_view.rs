use anchor_lang::prelude::*;

use crate::constants::{DAILY_PRICE_SEED, ORACLE_CONFIG_SEED, SECONDS_PER_DAY};
use crate::error::LedgerError;
use crate::oracle;
use crate::state::{DailyPrice, OracleConfig};

/// Read-only price query
///
/// Returns today's cached price when set, else yesterday's, else performs
/// an uncached fetch through the fallback chain. Nothing is written and no
/// deviation validation runs on this path: only the mutating path protects
/// the cache, so a view can surface a figure the cache would have refused.
///
#[derive(Accounts)]
#[instruction(day_index: u64)]
pub struct CurrentPriceView<'info> {
    #[account(
        seeds = [ORACLE_CONFIG_SEED],
        bump = oracle_config.bump
    )]
    pub oracle_config: Account<'info, OracleConfig>,

    #[account(
        seeds = [DAILY_PRICE_SEED, &day_index.to_le_bytes()],
        bump = today_price.bump
    )]
    pub today_price: Option<Account<'info, DailyPrice>>,

    #[account(
        seeds = [DAILY_PRICE_SEED, &day_index.saturating_sub(1).to_le_bytes()],
        bump = yesterday_price.bump
    )]
    pub yesterday_price: Option<Account<'info, DailyPrice>>,

    /// CHECK: parsed defensively; any unreadable state means "no value"
    pub primary_oracle: Option<UncheckedAccount<'info>>,

    /// CHECK: parsed defensively; any unreadable state means "no value"
    pub secondary_oracle: Option<UncheckedAccount<'info>>,
}

pub fn handler_current_price_view(ctx: Context<CurrentPriceView>, day_index: u64) -> Result<u128> {
    let now = Clock::get()?.unix_timestamp;
    require!(
        day_index == (now / SECONDS_PER_DAY) as u64,
        LedgerError::WrongDayIndex
    );

    if let Some(today) = &ctx.accounts.today_price {
        if today.is_set {
            return Ok(today.price);
        }
    }

    if let Some(yesterday) = &ctx.accounts.yesterday_price {
        if yesterday.is_set {
            return Ok(yesterday.price);
        }
    }

    let readings = oracle::gather_readings(
        &ctx.accounts.oracle_config,
        ctx.accounts.primary_oracle.as_deref(),
        ctx.accounts.secondary_oracle.as_deref(),
    );
    let (price, _) = oracle::resolve(&ctx.accounts.oracle_config, now, &readings)?;

    Ok(price)
}
