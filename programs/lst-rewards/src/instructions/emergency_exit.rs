use anchor_lang::prelude::*;

use crate::constants::{REWARD_LEDGER_SEED, USER_POSITION_SEED};
use crate::error::LedgerError;
use crate::events::EmergencyWithdrawal;
use crate::state::{RewardLedger, UserPosition};

/// Emergency exit penalty (vault only)
///
/// Checkpoints the position, then forfeits the penalty share of the
/// accrued balance permanently. The forfeited portion is not minted to
/// anyone; it is simply never paid.
///
#[derive(Accounts)]
pub struct EmergencyExit<'info> {
    #[account(
        constraint = vault_authority.key() == reward_ledger.vault @ LedgerError::Unauthorized
    )]
    pub vault_authority: Signer<'info>,

    /// CHECK: position owner; only its key is used, for PDA derivation
    pub owner: UncheckedAccount<'info>,

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
}

pub fn handler_emergency_exit(ctx: Context<EmergencyExit>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    let ledger = &mut ctx.accounts.reward_ledger;
    let position = &mut ctx.accounts.position;

    ledger.settle_index(now)?;
    position.settle(ledger.reward_per_unit_stored)?;

    let forfeited = position.apply_penalty(ledger.penalty_bps)?;

    emit!(EmergencyWithdrawal {
        owner: position.owner,
        forfeited,
        remaining: position.accrued_rewards,
        ts: now,
    });

    msg!(
        "Emergency exit for {}: forfeited={} remaining={}",
        position.owner,
        forfeited,
        position.accrued_rewards
    );

    Ok(())
}
