use anchor_lang::prelude::*;

use crate::constants::REWARD_PRECISION;
use crate::error::LedgerError;

/// Global reward ledger state
/// PDA: ["reward_ledger"]
#[account]
#[derive(Default)]
pub struct RewardLedger {
    /// Governance authority: pause/unpause, parameter changes, fund recovery
    pub authority: Pubkey,

    /// Only caller allowed to notify new reward amounts
    pub reward_manager: Pubkey,

    /// The vault collaborator: only caller of stake-change reports and
    /// emergency exits. Its deltas are trusted without verification.
    pub vault: Pubkey,

    /// Reward token mint; the ledger PDA is its mint authority
    pub reward_mint: Pubkey,

    /// Token account backing notified reward amounts
    /// PDA: ["reward_vault"]
    pub reward_vault: Pubkey,

    /// Reward units emitted per second across all eligible collateral
    pub reward_rate: u64,

    /// Length of the current distribution period in seconds
    pub rewards_duration: i64,

    /// Timestamp at which the current distribution period ends
    pub period_finish: i64,

    /// Timestamp of the last global index settlement
    pub last_update_time: i64,

    /// Accumulated rewards per unit of eligible collateral
    /// (scaled by REWARD_PRECISION). Never decreases.
    pub reward_per_unit_stored: u128,

    /// Sum of collateral_value over all currently eligible positions
    pub total_eligible_collateral: u64,

    /// Last price committed to the daily cache (scaled by REWARD_PRECISION).
    /// The deviation gate reads this instead of trusting callers to supply
    /// the prior day's bucket.
    pub last_price: u128,

    /// Day bucket `last_price` was committed for
    pub last_price_day: u64,

    /// Minimum deposit age before a position accrues rewards
    pub min_stake_duration: i64,

    /// Emergency-exit forfeiture in basis points
    pub penalty_bps: u16,

    /// Emergency pause flag
    pub paused: bool,

    /// PDA bump seed
    pub bump: u8,

    /// Reward vault bump seed
    pub reward_vault_bump: u8,
}

impl RewardLedger {
    /// Account size for allocation
    pub const SIZE: usize = 8 + // discriminator
        32 + // authority
        32 + // reward_manager
        32 + // vault
        32 + // reward_mint
        32 + // reward_vault
        8 +  // reward_rate
        8 +  // rewards_duration
        8 +  // period_finish
        8 +  // last_update_time
        16 + // reward_per_unit_stored (u128)
        8 +  // total_eligible_collateral
        16 + // last_price (u128)
        8 +  // last_price_day
        8 +  // min_stake_duration
        2 +  // penalty_bps
        1 +  // paused
        1 +  // bump
        1 +  // reward_vault_bump
        40;  // padding for future fields

    /// The reward schedule stops accruing at period_finish.
    pub fn last_time_reward_applicable(&self, now: i64) -> i64 {
        now.min(self.period_finish)
    }

    /// Advance the global reward-per-unit index up to `now`.
    ///
    /// Formula: index += elapsed * reward_rate * PRECISION / total_eligible.
    /// The increment is skipped entirely while the eligible aggregate is
    /// zero; no rewards are orphaned onto a nonexistent denominator.
    pub fn settle_index(&mut self, now: i64) -> Result<()> {
        let applicable = self.last_time_reward_applicable(now);

        if self.total_eligible_collateral > 0 {
            let elapsed = applicable.saturating_sub(self.last_update_time);
            if elapsed > 0 {
                let increment = (elapsed as u128)
                    .checked_mul(self.reward_rate as u128)
                    .ok_or(LedgerError::MathOverflow)?
                    .checked_mul(REWARD_PRECISION)
                    .ok_or(LedgerError::MathOverflow)?
                    .checked_div(self.total_eligible_collateral as u128)
                    .ok_or(LedgerError::DivisionByZero)?;

                self.reward_per_unit_stored = self
                    .reward_per_unit_stored
                    .checked_add(increment)
                    .ok_or(LedgerError::MathOverflow)?;
            }
        }

        self.last_update_time = applicable;
        Ok(())
    }

    /// Start or extend a distribution period.
    ///
    /// Before `period_finish` the undistributed remainder of the current
    /// period rolls into the new rate. The caller must have settled the
    /// index first and must verify the reward vault covers `amount`.
    pub fn notify(&mut self, now: i64, amount: u64, duration: i64) -> Result<()> {
        require!(duration > 0, LedgerError::InvalidDuration);

        let rate = if now >= self.period_finish {
            (amount as u128)
                .checked_div(duration as u128)
                .ok_or(LedgerError::DivisionByZero)?
        } else {
            let remaining = (self.period_finish - now) as u128;
            let leftover = remaining
                .checked_mul(self.reward_rate as u128)
                .ok_or(LedgerError::MathOverflow)?;
            (amount as u128)
                .checked_add(leftover)
                .ok_or(LedgerError::MathOverflow)?
                .checked_div(duration as u128)
                .ok_or(LedgerError::DivisionByZero)?
        };

        require!(rate > 0, LedgerError::ZeroRewardRate);

        self.reward_rate = u64::try_from(rate).map_err(|_| LedgerError::MathOverflow)?;
        self.rewards_duration = duration;
        self.last_update_time = now;
        self.period_finish = now
            .checked_add(duration)
            .ok_or(LedgerError::MathOverflow)?;

        Ok(())
    }

    /// Keep the eligible aggregate in sync with one position's update.
    ///
    /// Eligibility flips move the whole position value in or out; an update
    /// that stays eligible applies only the delta. Subtractions are floored
    /// at zero: a clamp against rounding, not expected to bind under
    /// correct call ordering.
    pub fn apply_collateral_transition(
        &mut self,
        old_value: u64,
        new_value: u64,
        was_eligible: bool,
        now_eligible: bool,
        usd_delta: u64,
        increase: bool,
    ) -> Result<()> {
        match (was_eligible, now_eligible) {
            (false, true) => {
                self.total_eligible_collateral = self
                    .total_eligible_collateral
                    .checked_add(new_value)
                    .ok_or(LedgerError::MathOverflow)?;
            }
            (true, false) => {
                self.total_eligible_collateral =
                    self.total_eligible_collateral.saturating_sub(old_value);
            }
            (true, true) => {
                if increase {
                    self.total_eligible_collateral = self
                        .total_eligible_collateral
                        .checked_add(usd_delta)
                        .ok_or(LedgerError::MathOverflow)?;
                } else {
                    self.total_eligible_collateral =
                        self.total_eligible_collateral.saturating_sub(usd_delta);
                }
            }
            (false, false) => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: i64 = 86_400;

    fn ledger(rate: u64, finish: i64, last_update: i64, total: u64) -> RewardLedger {
        RewardLedger {
            reward_rate: rate,
            rewards_duration: 7 * DAY,
            period_finish: finish,
            last_update_time: last_update,
            total_eligible_collateral: total,
            ..Default::default()
        }
    }

    #[test]
    fn index_advances_by_elapsed_rate_over_total() {
        let mut l = ledger(10, 1_000_000, 0, 1_000);
        l.settle_index(100).unwrap();
        // 100s * 10/s * 1e18 / 1000 = 1e18
        assert_eq!(l.reward_per_unit_stored, REWARD_PRECISION);
        assert_eq!(l.last_update_time, 100);
    }

    #[test]
    fn index_frozen_while_aggregate_is_zero() {
        let mut l = ledger(10, 1_000_000, 0, 0);
        l.settle_index(500).unwrap();
        assert_eq!(l.reward_per_unit_stored, 0);
        // the clock still moves so rewards for the empty window are dropped
        assert_eq!(l.last_update_time, 500);
    }

    #[test]
    fn index_never_decreases() {
        let mut l = ledger(7, 1_000_000, 0, 333);
        let mut prev = 0u128;
        for now in [10, 250, 251, 90_000, 2_000_000] {
            l.settle_index(now).unwrap();
            assert!(l.reward_per_unit_stored >= prev);
            prev = l.reward_per_unit_stored;
        }
    }

    #[test]
    fn index_stops_at_period_finish() {
        let mut l = ledger(10, 1_000, 0, 1_000);
        l.settle_index(5_000).unwrap();
        let at_finish = l.reward_per_unit_stored;
        l.settle_index(10_000).unwrap();
        assert_eq!(l.reward_per_unit_stored, at_finish);
        assert_eq!(l.last_update_time, 1_000);
    }

    #[test]
    fn notify_fresh_period_sets_rate() {
        let mut l = ledger(0, 0, 0, 0);
        let amount = 604_800_000u64; // 1000 units/s over 7 days
        l.notify(1_000, amount, 7 * DAY).unwrap();
        assert_eq!(l.reward_rate, 1_000);
        assert_eq!(l.period_finish, 1_000 + 7 * DAY);
        assert_eq!(l.last_update_time, 1_000);
    }

    #[test]
    fn notify_rolls_over_undistributed_remainder() {
        // rate R, 2 days left of the old period
        let rate = 5u64;
        let now = 100_000i64;
        let mut l = ledger(rate, now + 2 * DAY, now, 1_000);
        let extra = 1_000_000u64;
        l.notify(now, extra, 7 * DAY).unwrap();
        let expected = (extra as u128 + (2 * DAY as u128) * rate as u128) / (7 * DAY) as u128;
        assert_eq!(l.reward_rate as u128, expected);
        assert_eq!(l.period_finish, now + 7 * DAY);
    }

    #[test]
    fn notify_zero_amount_rolls_over_running_period() {
        // 3 days left at rate 4: a zero-amount notify re-spreads the
        // remainder over a fresh 2-day period
        let rate = 4u64;
        let now = 50_000i64;
        let mut l = ledger(rate, now + 3 * DAY, now, 1_000);
        l.notify(now, 0, 2 * DAY).unwrap();
        assert_eq!(l.reward_rate as u128, (3 * DAY as u128 * 4) / (2 * DAY) as u128);
        assert_eq!(l.period_finish, now + 2 * DAY);
    }

    #[test]
    fn notify_zero_amount_after_period_end_is_rejected() {
        // nothing left to roll over -> integer rate of 0
        let mut l = ledger(4, 1_000, 0, 1_000);
        assert!(l.notify(2_000, 0, 2 * DAY).is_err());
    }

    #[test]
    fn notify_rejects_zero_duration_and_zero_rate() {
        let mut l = ledger(0, 0, 0, 0);
        assert!(l.notify(0, 1_000, 0).is_err());
        // amount too small for the duration -> integer rate of 0
        assert!(l.notify(0, 10, 7 * DAY).is_err());
    }

    #[test]
    fn transition_table_keeps_aggregate_in_sync() {
        let mut l = ledger(0, 0, 0, 0);

        // ineligible -> eligible moves the whole new value in
        l.apply_collateral_transition(0, 400, false, true, 400, true)
            .unwrap();
        assert_eq!(l.total_eligible_collateral, 400);

        // eligible increase applies only the delta
        l.apply_collateral_transition(400, 500, true, true, 100, true)
            .unwrap();
        assert_eq!(l.total_eligible_collateral, 500);

        // eligible partial withdrawal applies only the delta
        l.apply_collateral_transition(500, 300, true, true, 200, false)
            .unwrap();
        assert_eq!(l.total_eligible_collateral, 300);

        // eligible -> ineligible removes the pre-change value
        l.apply_collateral_transition(300, 0, true, false, 300, false)
            .unwrap();
        assert_eq!(l.total_eligible_collateral, 0);

        // ineligible -> ineligible leaves the aggregate alone
        l.apply_collateral_transition(0, 50, false, false, 50, true)
            .unwrap();
        assert_eq!(l.total_eligible_collateral, 0);
    }

    #[test]
    fn accrued_rewards_sum_to_distributed_amount() {
        use crate::state::UserPosition;

        // two eligible positions sharing the aggregate 600 + 400
        let mut l = ledger(10, 1_000_000, 0, 1_000);
        let mut a = UserPosition {
            collateral_value: 600,
            eligible: true,
            ..Default::default()
        };
        let mut b = UserPosition {
            collateral_value: 400,
            eligible: true,
            ..Default::default()
        };

        l.settle_index(100).unwrap();
        let earned_a = a.settle(l.reward_per_unit_stored).unwrap();
        let earned_b = b.settle(l.reward_per_unit_stored).unwrap();

        // 100s at 10/s distributes 1000 units, pro rata
        assert_eq!(earned_a, 600);
        assert_eq!(earned_b, 400);
        assert_eq!(earned_a + earned_b, 1_000);
    }

    #[test]
    fn transition_subtraction_floors_at_zero() {
        let mut l = ledger(0, 0, 0, 10);
        l.apply_collateral_transition(25, 0, true, false, 25, false)
            .unwrap();
        assert_eq!(l.total_eligible_collateral, 0);
    }
}
