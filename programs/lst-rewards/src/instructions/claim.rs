use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, MintTo, Token, TokenAccount};

use crate::constants::{REWARD_LEDGER_SEED, USER_POSITION_SEED};
use crate::error::LedgerError;
use crate::events::Claimed;
use crate::state::{RewardLedger, UserPosition};

/// Claim accrued rewards
///
/// # Flow
/// 1. Checkpoint the position against the settled global index
/// 2. Zero the accrued balance, then mint it to the owner
///
/// A zero balance is a silent no-op: no mint, no event.
///
#[derive(Accounts)]
pub struct Claim<'info> {
    /// Position owner claiming rewards
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [REWARD_LEDGER_SEED],
        bump = reward_ledger.bump,
        constraint = !reward_ledger.paused @ LedgerError::Paused
    )]
    pub reward_ledger: Account<'info, RewardLedger>,

    #[account(
        mut,
        seeds = [USER_POSITION_SEED, owner.key().as_ref()],
        bump = position.bump,
        constraint = position.owner == owner.key() @ LedgerError::InvalidAuthority
    )]
    pub position: Account<'info, UserPosition>,

    /// Reward token mint; the ledger PDA is its mint authority
    #[account(
        mut,
        constraint = reward_mint.key() == reward_ledger.reward_mint @ LedgerError::InvalidRewardMint
    )]
    pub reward_mint: Account<'info, Mint>,

    /// Owner's reward token account
    #[account(
        mut,
        token::mint = reward_mint,
        token::authority = owner
    )]
    pub owner_reward_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler_claim(ctx: Context<Claim>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    let ledger = &mut ctx.accounts.reward_ledger;
    let position = &mut ctx.accounts.position;

    ledger.settle_index(now)?;
    position.settle(ledger.reward_per_unit_stored)?;

    let amount = position.accrued_rewards;
    if amount == 0 {
        return Ok(());
    }

    // Zero before the CPI
    position.accrued_rewards = 0;

    let ledger_bump = ledger.bump;
    let index = ledger.reward_per_unit_stored;

    let seeds: &[&[u8]] = &[REWARD_LEDGER_SEED, &[ledger_bump]];
    let signer_seeds = &[seeds];

    token::mint_to(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            MintTo {
                mint: ctx.accounts.reward_mint.to_account_info(),
                to: ctx.accounts.owner_reward_account.to_account_info(),
                authority: ctx.accounts.reward_ledger.to_account_info(),
            },
            signer_seeds,
        ),
        amount,
    )?;

    emit!(Claimed {
        owner: ctx.accounts.owner.key(),
        amount,
        reward_per_unit: index,
        ts: now,
    });

    msg!("Claimed {} reward units for {}", amount, ctx.accounts.owner.key());

    Ok(())
}
