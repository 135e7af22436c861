use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::{BPS_DENOMINATOR, ORACLE_CONFIG_SEED, REWARD_LEDGER_SEED, REWARD_VAULT_SEED};
use crate::error::LedgerError;
use crate::events::{
    FundsRecovered, ManualPriceSet, OracleAdaptersSet, OracleConfigSet, PausedSet, StakeParamsSet,
};
use crate::state::{OracleConfig, RewardLedger};

// =============================================================================
// Pause / Unpause
// =============================================================================

#[derive(Accounts)]
pub struct SetPaused<'info> {
    #[account(
        constraint = authority.key() == reward_ledger.authority @ LedgerError::Unauthorized
    )]
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [REWARD_LEDGER_SEED],
        bump = reward_ledger.bump
    )]
    pub reward_ledger: Account<'info, RewardLedger>,
}

pub fn set_paused(ctx: Context<SetPaused>, paused: bool) -> Result<()> {
    ctx.accounts.reward_ledger.paused = paused;

    emit!(PausedSet { paused });
    msg!(
        "Reward ledger {}",
        if paused { "PAUSED" } else { "RESUMED" }
    );

    Ok(())
}

// =============================================================================
// Stake Parameters
// =============================================================================

#[derive(Accounts)]
pub struct SetStakeParams<'info> {
    #[account(
        constraint = authority.key() == reward_ledger.authority @ LedgerError::Unauthorized
    )]
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [REWARD_LEDGER_SEED],
        bump = reward_ledger.bump
    )]
    pub reward_ledger: Account<'info, RewardLedger>,
}

pub fn set_stake_params(
    ctx: Context<SetStakeParams>,
    min_stake_duration: i64,
    penalty_bps: u16,
) -> Result<()> {
    require!(min_stake_duration >= 0, LedgerError::InvalidDuration);
    require!(
        penalty_bps as u64 <= BPS_DENOMINATOR,
        LedgerError::PenaltyTooHigh
    );

    let ledger = &mut ctx.accounts.reward_ledger;
    ledger.min_stake_duration = min_stake_duration;
    ledger.penalty_bps = penalty_bps;

    emit!(StakeParamsSet {
        min_stake_duration,
        penalty_bps,
    });
    msg!(
        "Stake params set: min_stake_duration={} penalty_bps={}",
        min_stake_duration,
        penalty_bps
    );

    Ok(())
}

// =============================================================================
// Oracle Configuration
// =============================================================================

#[derive(Accounts)]
pub struct SetOracleConfig<'info> {
    #[account(
        constraint = authority.key() == oracle_config.authority @ LedgerError::Unauthorized
    )]
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [ORACLE_CONFIG_SEED],
        bump = oracle_config.bump
    )]
    pub oracle_config: Account<'info, OracleConfig>,
}

pub fn set_oracle_config(
    ctx: Context<SetOracleConfig>,
    staleness_threshold: i64,
    deviation_threshold_bps: u16,
    use_secondary: bool,
) -> Result<()> {
    require!(staleness_threshold >= 0, LedgerError::InvalidDuration);
    require!(
        deviation_threshold_bps as u64 <= BPS_DENOMINATOR,
        LedgerError::ThresholdTooHigh
    );

    let config = &mut ctx.accounts.oracle_config;
    config.staleness_threshold = staleness_threshold;
    config.deviation_threshold_bps = deviation_threshold_bps;
    config.use_secondary = use_secondary;

    emit!(OracleConfigSet {
        staleness_threshold,
        deviation_threshold_bps,
        use_secondary,
    });
    msg!(
        "Oracle config set: staleness={} deviation_bps={} use_secondary={}",
        staleness_threshold,
        deviation_threshold_bps,
        use_secondary
    );

    Ok(())
}

pub fn set_oracle_adapters(
    ctx: Context<SetOracleConfig>,
    primary_adapter: Pubkey,
    secondary_adapter: Pubkey,
) -> Result<()> {
    let config = &mut ctx.accounts.oracle_config;
    config.primary_adapter = primary_adapter;
    config.secondary_adapter = secondary_adapter;

    emit!(OracleAdaptersSet {
        primary_adapter,
        secondary_adapter,
    });
    msg!(
        "Oracle adapters set: primary={} secondary={}",
        primary_adapter,
        secondary_adapter
    );

    Ok(())
}

// =============================================================================
// Manual Price Override
// =============================================================================

pub fn set_manual_price(ctx: Context<SetOracleConfig>, price: u128) -> Result<()> {
    require!(price > 0, LedgerError::InvalidAmount);

    let now = Clock::get()?.unix_timestamp;

    let config = &mut ctx.accounts.oracle_config;
    config.manual_price = price;
    config.manual_price_timestamp = now;
    config.manual_price_active = true;

    emit!(ManualPriceSet {
        price,
        ts: now,
        active: true,
    });
    msg!("Manual price set: {} at {}", price, now);

    Ok(())
}

pub fn clear_manual_price(ctx: Context<SetOracleConfig>) -> Result<()> {
    let config = &mut ctx.accounts.oracle_config;
    config.manual_price = 0;
    config.manual_price_timestamp = 0;
    config.manual_price_active = false;

    emit!(ManualPriceSet {
        price: 0,
        ts: Clock::get()?.unix_timestamp,
        active: false,
    });
    msg!("Manual price cleared");

    Ok(())
}

// =============================================================================
// Emergency Fund Recovery (paused only)
// =============================================================================

#[derive(Accounts)]
pub struct RecoverFunds<'info> {
    #[account(
        constraint = authority.key() == reward_ledger.authority @ LedgerError::Unauthorized
    )]
    pub authority: Signer<'info>,

    #[account(
        seeds = [REWARD_LEDGER_SEED],
        bump = reward_ledger.bump,
        constraint = reward_ledger.paused @ LedgerError::NotPaused
    )]
    pub reward_ledger: Account<'info, RewardLedger>,

    #[account(
        mut,
        seeds = [REWARD_VAULT_SEED],
        bump = reward_ledger.reward_vault_bump,
        constraint = reward_vault.key() == reward_ledger.reward_vault @ LedgerError::InvalidTokenAccountOwner
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    /// Authority's token account receiving the recovered funds
    #[account(
        mut,
        token::mint = reward_ledger.reward_mint,
        token::authority = authority
    )]
    pub recipient: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn recover_funds(ctx: Context<RecoverFunds>, amount: u64) -> Result<()> {
    require!(amount > 0, LedgerError::InvalidAmount);
    require!(
        ctx.accounts.reward_vault.amount >= amount,
        LedgerError::InsufficientRewardBalance
    );

    let ledger_bump = ctx.accounts.reward_ledger.bump;
    let seeds: &[&[u8]] = &[REWARD_LEDGER_SEED, &[ledger_bump]];
    let signer_seeds = &[seeds];

    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.reward_vault.to_account_info(),
                to: ctx.accounts.recipient.to_account_info(),
                authority: ctx.accounts.reward_ledger.to_account_info(),
            },
            signer_seeds,
        ),
        amount,
    )?;

    emit!(FundsRecovered {
        amount,
        recipient: ctx.accounts.recipient.key(),
    });
    msg!("Recovered {} reward units while paused", amount);

    Ok(())
}
