use anchor_lang::prelude::*;

use crate::constants::{
    DAILY_PRICE_SEED, ORACLE_CONFIG_SEED, REWARD_LEDGER_SEED, REWARD_PRECISION, SECONDS_PER_DAY,
    USER_POSITION_SEED,
};
use crate::error::LedgerError;
use crate::events::{CollateralUpdated, EligibilityChanged, OracleFallbackActivated};
use crate::oracle::{self, PriceSource};
use crate::state::{DailyPrice, OracleConfig, RewardLedger, UserPosition};

/// Vault-reported stake delta
///
/// # Flow
/// 1. Checkpoint the position against the pre-change aggregate
/// 2. Resolve today's price (cached per day, deviation-guarded against the
///    ledger's record of the last committed day)
/// 3. Convert the delta to USD and update the position value
/// 4. Recompute eligibility and keep the eligible aggregate in sync
///
/// A zero delta is a valid report: it changes nothing but re-evaluates the
/// deposit-age gate, which is how a matured position becomes eligible
/// between stake movements.
///
#[derive(Accounts)]
#[instruction(day_index: u64)]
pub struct OnStakeChange<'info> {
    /// The vault collaborator; sole authorized reporter of stake deltas
    #[account(mut)]
    pub vault_authority: Signer<'info>,

    /// CHECK: position owner; only its key is used, for PDA derivation
    pub owner: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [REWARD_LEDGER_SEED],
        bump = reward_ledger.bump,
        constraint = vault_authority.key() == reward_ledger.vault @ LedgerError::Unauthorized,
        constraint = !reward_ledger.paused @ LedgerError::Paused
    )]
    pub reward_ledger: Account<'info, RewardLedger>,

    #[account(
        seeds = [ORACLE_CONFIG_SEED],
        bump = oracle_config.bump
    )]
    pub oracle_config: Account<'info, OracleConfig>,

    /// User's position (created on first report)
    #[account(
        init_if_needed,
        payer = vault_authority,
        space = UserPosition::SIZE,
        seeds = [USER_POSITION_SEED, owner.key().as_ref()],
        bump
    )]
    pub position: Account<'info, UserPosition>,

    /// Today's price bucket (created on the first report of the day)
    #[account(
        init_if_needed,
        payer = vault_authority,
        space = DailyPrice::SIZE,
        seeds = [DAILY_PRICE_SEED, &day_index.to_le_bytes()],
        bump
    )]
    pub today_price: Account<'info, DailyPrice>,

    /// CHECK: parsed defensively; any unreadable state means "no value"
    pub primary_oracle: Option<UncheckedAccount<'info>>,

    /// CHECK: parsed defensively; any unreadable state means "no value"
    pub secondary_oracle: Option<UncheckedAccount<'info>>,

    pub system_program: Program<'info, System>,
}

pub fn handler_on_stake_change(
    ctx: Context<OnStakeChange>,
    day_index: u64,
    delta_units: u64,
    increase: bool,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    require!(
        day_index == (now / SECONDS_PER_DAY) as u64,
        LedgerError::WrongDayIndex
    );

    let ledger = &mut ctx.accounts.reward_ledger;
    let position = &mut ctx.accounts.position;

    if position.owner == Pubkey::default() {
        position.owner = ctx.accounts.owner.key();
        position.bump = ctx.bumps.position;
    }

    // Checkpoint against the pre-change aggregate
    ledger.settle_index(now)?;
    position.settle(ledger.reward_per_unit_stored)?;

    // Resolve today's price; the daily cache makes this idempotent per day
    let today = &mut ctx.accounts.today_price;
    let price = if today.is_set {
        today.price
    } else {
        let readings = oracle::gather_readings(
            &ctx.accounts.oracle_config,
            ctx.accounts.primary_oracle.as_deref(),
            ctx.accounts.secondary_oracle.as_deref(),
        );
        let (price, source) = oracle::resolve(&ctx.accounts.oracle_config, now, &readings)?;

        // Guard the cache against a manipulated spike relative to the last
        // committed day. The prior price lives on the ledger, so the check
        // cannot be skipped by omitting accounts; a rejected fetch leaves
        // the bucket unset.
        require!(
            oracle::validate_against_prior_day(
                price,
                ledger.last_price,
                ledger.last_price_day,
                day_index,
                ctx.accounts.oracle_config.deviation_threshold_bps
            ),
            LedgerError::PriceDeviationExceeded
        );

        today.day_index = day_index;
        today.price = price;
        today.is_set = true;
        today.bump = ctx.bumps.today_price;

        ledger.last_price = price;
        ledger.last_price_day = day_index;

        if source == PriceSource::Secondary {
            emit!(OracleFallbackActivated {
                day_index,
                price,
                ts: now,
            });
        }

        price
    };

    let usd_delta = u64::try_from(
        (delta_units as u128)
            .checked_mul(price)
            .ok_or(LedgerError::MathOverflow)?
            .checked_div(REWARD_PRECISION)
            .ok_or(LedgerError::DivisionByZero)?,
    )
    .map_err(|_| LedgerError::MathOverflow)?;

    // Only a strictly positive delta is an increase; a zero delta takes
    // the decrease branch and just re-evaluates eligibility
    let increase = increase && delta_units > 0;

    let change = position.apply_stake_delta(now, usd_delta, increase, ledger.min_stake_duration)?;

    ledger.apply_collateral_transition(
        change.old_value,
        change.new_value,
        change.was_eligible,
        change.now_eligible,
        usd_delta,
        increase,
    )?;

    emit!(CollateralUpdated {
        owner: position.owner,
        usd_delta,
        increase,
        new_value: change.new_value,
        price,
        ts: now,
    });

    if change.was_eligible != change.now_eligible {
        emit!(EligibilityChanged {
            owner: position.owner,
            eligible: change.now_eligible,
            collateral_value: change.new_value,
            ts: now,
        });
    }

    msg!(
        "Stake change for {}: usd_delta={} increase={} value={} eligible={} total_eligible={}",
        position.owner,
        usd_delta,
        increase,
        change.new_value,
        change.now_eligible,
        ledger.total_eligible_collateral
    );

    Ok(())
}
