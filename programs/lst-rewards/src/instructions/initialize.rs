use anchor_lang::prelude::*;
use anchor_lang::solana_program::program_option::COption;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{BPS_DENOMINATOR, ORACLE_CONFIG_SEED, REWARD_LEDGER_SEED, REWARD_VAULT_SEED};
use crate::error::LedgerError;
use crate::state::{OracleConfig, RewardLedger};

/// Initialize the reward ledger and oracle configuration
///
/// # Accounts
/// * `authority` - Governance authority (signer, payer)
/// * `reward_ledger` - Ledger PDA to create
/// * `oracle_config` - Oracle config PDA to create
/// * `reward_mint` - Reward token mint; its mint authority must be the
///   ledger PDA for claims to succeed
/// * `reward_vault` - Token account backing notified reward amounts
///
#[derive(Accounts)]
pub struct Initialize<'info> {
    /// Governance authority for the ledger
    #[account(mut)]
    pub authority: Signer<'info>,

    /// Reward ledger PDA
    #[account(
        init,
        payer = authority,
        space = RewardLedger::SIZE,
        seeds = [REWARD_LEDGER_SEED],
        bump
    )]
    pub reward_ledger: Account<'info, RewardLedger>,

    /// Oracle configuration PDA
    #[account(
        init,
        payer = authority,
        space = OracleConfig::SIZE,
        seeds = [ORACLE_CONFIG_SEED],
        bump
    )]
    pub oracle_config: Account<'info, OracleConfig>,

    /// Reward token mint; the ledger PDA must already hold mint authority
    /// or every later claim CPI would fail
    #[account(
        constraint = reward_mint.mint_authority == COption::Some(reward_ledger.key()) @ LedgerError::InvalidRewardMint
    )]
    pub reward_mint: Account<'info, Mint>,

    /// Vault whose balance must cover notified reward amounts
    #[account(
        init,
        payer = authority,
        seeds = [REWARD_VAULT_SEED],
        bump,
        token::mint = reward_mint,
        token::authority = reward_ledger
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

#[allow(clippy::too_many_arguments)]
pub fn handler_initialize(
    ctx: Context<Initialize>,
    reward_manager: Pubkey,
    vault: Pubkey,
    min_stake_duration: i64,
    penalty_bps: u16,
    primary_adapter: Pubkey,
    secondary_adapter: Pubkey,
    use_secondary: bool,
    staleness_threshold: i64,
    deviation_threshold_bps: u16,
) -> Result<()> {
    require!(
        penalty_bps as u64 <= BPS_DENOMINATOR,
        LedgerError::PenaltyTooHigh
    );
    require!(
        deviation_threshold_bps as u64 <= BPS_DENOMINATOR,
        LedgerError::ThresholdTooHigh
    );
    require!(min_stake_duration >= 0, LedgerError::InvalidDuration);
    require!(staleness_threshold >= 0, LedgerError::InvalidDuration);

    let ledger = &mut ctx.accounts.reward_ledger;

    ledger.authority = ctx.accounts.authority.key();
    ledger.reward_manager = reward_manager;
    ledger.vault = vault;
    ledger.reward_mint = ctx.accounts.reward_mint.key();
    ledger.reward_vault = ctx.accounts.reward_vault.key();

    ledger.reward_rate = 0;
    ledger.rewards_duration = 0;
    ledger.period_finish = 0;
    ledger.last_update_time = Clock::get()?.unix_timestamp;
    ledger.reward_per_unit_stored = 0;
    ledger.total_eligible_collateral = 0;

    ledger.min_stake_duration = min_stake_duration;
    ledger.penalty_bps = penalty_bps;
    ledger.paused = false;

    ledger.bump = ctx.bumps.reward_ledger;
    ledger.reward_vault_bump = ctx.bumps.reward_vault;

    let config = &mut ctx.accounts.oracle_config;

    config.authority = ctx.accounts.authority.key();
    config.primary_adapter = primary_adapter;
    config.secondary_adapter = secondary_adapter;
    config.use_secondary = use_secondary;
    config.staleness_threshold = staleness_threshold;
    config.deviation_threshold_bps = deviation_threshold_bps;
    config.manual_price = 0;
    config.manual_price_timestamp = 0;
    config.manual_price_active = false;
    config.bump = ctx.bumps.oracle_config;

    msg!(
        "Reward ledger initialized: reward_mint={}, vault={}, reward_manager={}",
        ledger.reward_mint,
        ledger.vault,
        ledger.reward_manager
    );

    Ok(())
}
