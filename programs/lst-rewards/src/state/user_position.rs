use anchor_lang::prelude::*;

use crate::constants::{BPS_DENOMINATOR, REWARD_PRECISION};
use crate::error::LedgerError;

/// Per-user reward position, created lazily on first stake report
/// PDA: ["user_position", owner]
#[account]
#[derive(Default)]
pub struct UserPosition {
    /// Wallet this position belongs to
    pub owner: Pubkey,

    /// USD-equivalent value of the staked collateral at last update
    pub collateral_value: u64,

    /// Timestamp of the first deposit of the current position.
    /// Zero while no active position; resets on full withdrawal, so the
    /// deposit age must re-accrue before eligibility returns.
    pub deposit_timestamp: i64,

    /// Whether this position currently counts toward the eligible aggregate
    pub eligible: bool,

    /// Snapshot of reward_per_unit_stored at the last checkpoint
    pub reward_per_unit_paid: u128,

    /// Claimable reward balance
    pub accrued_rewards: u64,

    /// PDA bump seed
    pub bump: u8,
}

/// Result of applying a stake delta to a position, used by the caller to
/// keep the eligible aggregate in sync.
#[derive(Clone, Copy, Debug)]
pub struct StakeChange {
    pub old_value: u64,
    pub new_value: u64,
    pub was_eligible: bool,
    pub now_eligible: bool,
}

impl UserPosition {
    /// Account size for allocation
    pub const SIZE: usize = 8 + // discriminator
        32 + // owner
        8 +  // collateral_value
        8 +  // deposit_timestamp
        1 +  // eligible
        16 + // reward_per_unit_paid (u128)
        8 +  // accrued_rewards
        1 +  // bump
        32;  // padding for future fields

    /// Rewards accrued since the last checkpoint at the given global index.
    pub fn earned_since(&self, index: u128) -> Result<u64> {
        let index_delta = index
            .checked_sub(self.reward_per_unit_paid)
            .ok_or(LedgerError::MathUnderflow)?;

        let earned = (self.collateral_value as u128)
            .checked_mul(index_delta)
            .ok_or(LedgerError::MathOverflow)?
            .checked_div(REWARD_PRECISION)
            .ok_or(LedgerError::DivisionByZero)?;

        u64::try_from(earned).map_err(|_| error!(LedgerError::MathOverflow))
    }

    /// Checkpoint this position against the settled global index.
    ///
    /// Ineligible positions do not accrue: their claimable balance stays
    /// frozen. The index snapshot is always synced so a later eligibility
    /// flip never grants retroactive rewards.
    pub fn settle(&mut self, index: u128) -> Result<u64> {
        let mut newly_accrued = 0u64;

        if self.eligible {
            newly_accrued = self.earned_since(index)?;
            self.accrued_rewards = self
                .accrued_rewards
                .checked_add(newly_accrued)
                .ok_or(LedgerError::MathOverflow)?;
        }

        self.reward_per_unit_paid = index;
        Ok(newly_accrued)
    }

    /// Deposit-age and positive-balance eligibility gate.
    pub fn meets_eligibility(
        deposit_timestamp: i64,
        collateral_value: u64,
        now: i64,
        min_stake_duration: i64,
    ) -> bool {
        deposit_timestamp > 0
            && now >= deposit_timestamp.saturating_add(min_stake_duration)
            && collateral_value > 0
    }

    /// Apply a USD-valued stake delta and recompute eligibility.
    ///
    /// Only a strictly positive delta counts as an increase; a zero delta
    /// takes the decrease branch, leaving the value unchanged while still
    /// re-evaluating the deposit-age gate. That zero-delta report is how
    /// the vault flips a matured position eligible without moving stake.
    /// A decrease floors at zero, and a fully withdrawn position must
    /// re-accrue its deposit age from scratch.
    pub fn apply_stake_delta(
        &mut self,
        now: i64,
        usd_delta: u64,
        increase: bool,
        min_stake_duration: i64,
    ) -> Result<StakeChange> {
        let old_value = self.collateral_value;
        let was_eligible = self.eligible;

        let new_value = if increase {
            if self.deposit_timestamp == 0 {
                self.deposit_timestamp = now;
            }
            old_value
                .checked_add(usd_delta)
                .ok_or(LedgerError::MathOverflow)?
        } else {
            old_value.saturating_sub(usd_delta)
        };
        self.collateral_value = new_value;

        let now_eligible =
            Self::meets_eligibility(self.deposit_timestamp, new_value, now, min_stake_duration);
        self.eligible = now_eligible;

        if new_value == 0 {
            self.deposit_timestamp = 0;
        }

        Ok(StakeChange {
            old_value,
            new_value,
            was_eligible,
            now_eligible,
        })
    }

    /// Forfeit the penalty share of the accrued balance. The forfeited
    /// portion is not paid to anyone.
    pub fn apply_penalty(&mut self, penalty_bps: u16) -> Result<u64> {
        let forfeited = (self.accrued_rewards as u128)
            .checked_mul(penalty_bps as u128)
            .ok_or(LedgerError::MathOverflow)?
            .checked_div(BPS_DENOMINATOR as u128)
            .ok_or(LedgerError::DivisionByZero)? as u64;

        self.accrued_rewards = self
            .accrued_rewards
            .checked_sub(forfeited)
            .ok_or(LedgerError::MathUnderflow)?;

        Ok(forfeited)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(value: u64, eligible: bool, paid: u128, accrued: u64) -> UserPosition {
        UserPosition {
            collateral_value: value,
            eligible,
            reward_per_unit_paid: paid,
            accrued_rewards: accrued,
            ..Default::default()
        }
    }

    #[test]
    fn eligible_position_accrues_proportionally() {
        let mut p = position(1_000, true, 0, 0);
        let newly = p.settle(REWARD_PRECISION).unwrap();
        // 1000 * 1e18 / 1e18 = 1000
        assert_eq!(newly, 1_000);
        assert_eq!(p.accrued_rewards, 1_000);
        assert_eq!(p.reward_per_unit_paid, REWARD_PRECISION);
    }

    #[test]
    fn ineligible_position_is_frozen_but_index_syncs() {
        let mut p = position(1_000, false, 0, 77);
        let newly = p.settle(REWARD_PRECISION).unwrap();
        assert_eq!(newly, 0);
        assert_eq!(p.accrued_rewards, 77);
        // no retroactive accrual when eligibility returns later
        assert_eq!(p.reward_per_unit_paid, REWARD_PRECISION);
    }

    #[test]
    fn second_settle_without_accrual_yields_zero() {
        let mut p = position(500, true, 0, 0);
        p.settle(3 * REWARD_PRECISION).unwrap();
        let first = p.accrued_rewards;
        let second = p.settle(3 * REWARD_PRECISION).unwrap();
        assert_eq!(second, 0);
        assert_eq!(p.accrued_rewards, first);
    }

    #[test]
    fn eligibility_gate_requires_age_and_balance() {
        let min = 7 * 86_400i64;
        // no active deposit
        assert!(!UserPosition::meets_eligibility(0, 100, 1_000_000, min));
        // too young
        assert!(!UserPosition::meets_eligibility(1_000, 100, 1_000 + min - 1, min));
        // zero balance
        assert!(!UserPosition::meets_eligibility(1_000, 0, 1_000 + min, min));
        // aged and funded
        assert!(UserPosition::meets_eligibility(1_000, 100, 1_000 + min, min));
    }

    #[test]
    fn zero_delta_report_activates_matured_position() {
        let min = 86_400i64;
        let mut p = position(500, false, 0, 0);
        p.deposit_timestamp = 1_000;

        // deposit age has matured; the vault pokes with a zero delta
        let change = p.apply_stake_delta(1_000 + min, 0, false, min).unwrap();

        assert!(!change.was_eligible);
        assert!(change.now_eligible);
        assert_eq!(change.old_value, 500);
        assert_eq!(change.new_value, 500);
        assert!(p.eligible);
    }

    #[test]
    fn first_increase_stamps_deposit_timestamp() {
        let min = 86_400i64;
        let mut p = position(0, false, 0, 0);

        let change = p.apply_stake_delta(5_000, 300, true, min).unwrap();
        assert_eq!(p.deposit_timestamp, 5_000);
        assert_eq!(change.new_value, 300);
        // too young to be eligible yet
        assert!(!change.now_eligible);
    }

    #[test]
    fn full_withdrawal_resets_deposit_age() {
        let min = 86_400i64;
        let mut p = position(200, true, 0, 0);
        p.deposit_timestamp = 1_000;

        let change = p.apply_stake_delta(1_000 + min, 200, false, min).unwrap();
        assert_eq!(change.new_value, 0);
        assert!(!change.now_eligible);
        assert_eq!(p.deposit_timestamp, 0);

        // a later deposit starts a fresh age
        let change = p.apply_stake_delta(1_000 + 2 * min, 100, true, min).unwrap();
        assert_eq!(p.deposit_timestamp, 1_000 + 2 * min);
        assert!(!change.now_eligible);
    }

    #[test]
    fn decrease_floors_value_at_zero() {
        let mut p = position(50, true, 0, 0);
        p.deposit_timestamp = 10;

        let change = p.apply_stake_delta(1_000_000, 80, false, 0).unwrap();
        assert_eq!(change.new_value, 0);
        assert!(!change.now_eligible);
    }

    #[test]
    fn penalty_forfeits_bps_share() {
        let mut p = position(0, false, 0, 1_000);
        let forfeited = p.apply_penalty(1_000).unwrap();
        assert_eq!(forfeited, 100);
        assert_eq!(p.accrued_rewards, 900);
    }

    #[test]
    fn full_penalty_forfeits_everything() {
        let mut p = position(0, false, 0, 321);
        let forfeited = p.apply_penalty(10_000).unwrap();
        assert_eq!(forfeited, 321);
        assert_eq!(p.accrued_rewards, 0);
    }
}
