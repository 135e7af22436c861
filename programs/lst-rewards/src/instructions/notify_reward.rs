use anchor_lang::prelude::*;
use anchor_spl::token::TokenAccount;

use crate::constants::REWARD_LEDGER_SEED;
use crate::error::LedgerError;
use crate::events::RewardNotified;
use crate::state::RewardLedger;

/// Start or top up a reward distribution period (reward manager only)
///
/// Before `period_finish` the undistributed remainder of the running
/// period rolls into the new rate. The reward vault must already hold the
/// notified amount; a rate that cannot be backed is refused.
///
#[derive(Accounts)]
pub struct NotifyRewardAmount<'info> {
    #[account(
        constraint = reward_manager.key() == reward_ledger.reward_manager @ LedgerError::Unauthorized
    )]
    pub reward_manager: Signer<'info>,

    #[account(
        mut,
        seeds = [REWARD_LEDGER_SEED],
        bump = reward_ledger.bump,
        constraint = !reward_ledger.paused @ LedgerError::Paused
    )]
    pub reward_ledger: Account<'info, RewardLedger>,

    #[account(
        constraint = reward_vault.key() == reward_ledger.reward_vault @ LedgerError::InvalidTokenAccountOwner
    )]
    pub reward_vault: Account<'info, TokenAccount>,
}

pub fn handler_notify_reward_amount(
    ctx: Context<NotifyRewardAmount>,
    amount: u64,
    duration: i64,
) -> Result<()> {
    // A zero amount is a pure rollover: the running period's remainder is
    // re-spread over the new duration. ZeroRewardRate rejects the
    // degenerate case where nothing is left to distribute.
    require!(duration > 0, LedgerError::InvalidDuration);
    require!(
        ctx.accounts.reward_vault.amount >= amount,
        LedgerError::InsufficientRewardBalance
    );

    let now = Clock::get()?.unix_timestamp;
    let ledger = &mut ctx.accounts.reward_ledger;

    // Settle the index at the old rate before the schedule changes
    ledger.settle_index(now)?;
    ledger.notify(now, amount, duration)?;

    emit!(RewardNotified {
        amount,
        duration,
        reward_rate: ledger.reward_rate,
        period_finish: ledger.period_finish,
    });

    msg!(
        "Reward notified: amount={} duration={} rate={} period_finish={}",
        amount,
        duration,
        ledger.reward_rate,
        ledger.period_finish
    );

    Ok(())
}
