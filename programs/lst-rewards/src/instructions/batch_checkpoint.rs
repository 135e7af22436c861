use anchor_lang::prelude::*;

use crate::constants::{MAX_BATCH_SIZE, REWARD_LEDGER_SEED};
use crate::error::LedgerError;
use crate::state::{RewardLedger, UserPosition};

/// Checkpoint a bounded batch of positions
///
/// Each account in `remaining_accounts` is a UserPosition PDA. The whole
/// call is rejected when the list exceeds MAX_BATCH_SIZE; the bound keeps
/// the instruction within compute limits and is not a correctness
/// mechanism.
///
#[derive(Accounts)]
pub struct BatchCheckpoint<'info> {
    pub caller: Signer<'info>,

    #[account(
        mut,
        seeds = [REWARD_LEDGER_SEED],
        bump = reward_ledger.bump,
        constraint = !reward_ledger.paused @ LedgerError::Paused
    )]
    pub reward_ledger: Account<'info, RewardLedger>,
}

pub fn handler_batch_checkpoint<'info>(
    ctx: Context<'_, '_, 'info, 'info, BatchCheckpoint<'info>>,
) -> Result<()> {
    require!(
        ctx.remaining_accounts.len() <= MAX_BATCH_SIZE,
        LedgerError::BatchTooLarge
    );

    let now = Clock::get()?.unix_timestamp;
    let ledger = &mut ctx.accounts.reward_ledger;

    // One global settlement covers every position in the batch
    ledger.settle_index(now)?;
    let index = ledger.reward_per_unit_stored;

    let mut settled = 0usize;
    for info in ctx.remaining_accounts.iter() {
        require!(info.is_writable, LedgerError::AccountNotWritable);

        let mut position: Account<UserPosition> = Account::try_from(info)?;
        position.settle(index)?;
        position.exit(&crate::ID)?;

        settled += 1;
    }

    msg!("Batch checkpoint: {} positions settled at index {}", settled, index);

    Ok(())
}
