use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod oracle;
pub mod state;

use instructions::*;

// Program ID - will be updated after first deploy
declare_id!("LstR111111111111111111111111111111111111111");

#[program]
pub mod lst_rewards {
    use super::*;

    /// Initialize the reward ledger, oracle config and reward vault
    ///
    /// # Arguments
    /// * `reward_manager` - Only caller of notify_reward_amount
    /// * `vault` - Only caller of on_stake_change / emergency_exit
    /// * `min_stake_duration` - Deposit age before a position accrues
    /// * `penalty_bps` - Emergency-exit forfeiture (max 10000)
    /// * Oracle adapters, staleness and deviation thresholds
    ///
    #[allow(clippy::too_many_arguments)]
    pub fn initialize(
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
        instructions::initialize::handler_initialize(
            ctx,
            reward_manager,
            vault,
            min_stake_duration,
            penalty_bps,
            primary_adapter,
            secondary_adapter,
            use_secondary,
            staleness_threshold,
            deviation_threshold_bps,
        )
    }

    /// Vault-reported stake delta: checkpoint, price, collateral value and
    /// eligibility update in one atomic step
    ///
    /// # Arguments
    /// * `day_index` - Current unix day (timestamp / 86400), seeds the
    ///   daily price bucket
    /// * `delta_units` - Magnitude of the stake change
    /// * `increase` - Direction of the change
    ///
    pub fn on_stake_change(
        ctx: Context<OnStakeChange>,
        day_index: u64,
        delta_units: u64,
        increase: bool,
    ) -> Result<()> {
        instructions::on_stake_change::handler_on_stake_change(ctx, day_index, delta_units, increase)
    }

    /// Claim accrued rewards; mints the reward token to the owner
    pub fn claim(ctx: Context<Claim>) -> Result<()> {
        instructions::claim::handler_claim(ctx)
    }

    /// Start or top up a distribution period (reward manager only)
    pub fn notify_reward_amount(
        ctx: Context<NotifyRewardAmount>,
        amount: u64,
        duration: i64,
    ) -> Result<()> {
        instructions::notify_reward::handler_notify_reward_amount(ctx, amount, duration)
    }

    /// Checkpoint up to MAX_BATCH_SIZE positions passed as remaining accounts
    pub fn batch_checkpoint<'info>(
        ctx: Context<'_, '_, 'info, 'info, BatchCheckpoint<'info>>,
    ) -> Result<()> {
        instructions::batch_checkpoint::handler_batch_checkpoint(ctx)
    }

    /// Apply the emergency-exit penalty to a position (vault only)
    pub fn emergency_exit(ctx: Context<EmergencyExit>) -> Result<()> {
        instructions::emergency_exit::handler_emergency_exit(ctx)
    }

    /// Pause or unpause the ledger (authority only)
    pub fn set_paused(ctx: Context<SetPaused>, paused: bool) -> Result<()> {
        instructions::admin::set_paused(ctx, paused)
    }

    /// Update eligibility window and exit penalty (authority only)
    pub fn set_stake_params(
        ctx: Context<SetStakeParams>,
        min_stake_duration: i64,
        penalty_bps: u16,
    ) -> Result<()> {
        instructions::admin::set_stake_params(ctx, min_stake_duration, penalty_bps)
    }

    /// Update staleness/deviation thresholds and the secondary toggle
    /// (authority only)
    pub fn set_oracle_config(
        ctx: Context<SetOracleConfig>,
        staleness_threshold: i64,
        deviation_threshold_bps: u16,
        use_secondary: bool,
    ) -> Result<()> {
        instructions::admin::set_oracle_config(
            ctx,
            staleness_threshold,
            deviation_threshold_bps,
            use_secondary,
        )
    }

    /// Update the oracle adapter addresses (authority only)
    pub fn set_oracle_adapters(
        ctx: Context<SetOracleConfig>,
        primary_adapter: Pubkey,
        secondary_adapter: Pubkey,
    ) -> Result<()> {
        instructions::admin::set_oracle_adapters(ctx, primary_adapter, secondary_adapter)
    }

    /// Activate the manual price override (authority only)
    pub fn set_manual_price(ctx: Context<SetOracleConfig>, price: u128) -> Result<()> {
        instructions::admin::set_manual_price(ctx, price)
    }

    /// Deactivate the manual price override (authority only)
    pub fn clear_manual_price(ctx: Context<SetOracleConfig>) -> Result<()> {
        instructions::admin::clear_manual_price(ctx)
    }

    /// Recover reward tokens while paused (authority only)
    pub fn recover_funds(ctx: Context<RecoverFunds>, amount: u64) -> Result<()> {
        instructions::admin::recover_funds(ctx, amount)
    }

    /// Read-only price query: cached today, else cached yesterday, else an
    /// uncached fetch. Never writes, never deviation-validates.
    pub fn current_price_view(ctx: Context<CurrentPriceView>, day_index: u64) -> Result<u128> {
        instructions::price_view::handler_current_price_view(ctx, day_index)
    }
}
