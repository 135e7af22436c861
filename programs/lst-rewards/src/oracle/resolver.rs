use anchor_lang::prelude::*;

use crate::constants::BPS_DENOMINATOR;
use crate::error::LedgerError;
use crate::state::OracleConfig;

/// Which tier of the fallback chain produced the price.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PriceSource {
    Manual,
    Primary,
    Secondary,
}

/// Failure-isolated adapter readings gathered by the handler. A reading is
/// `None` when the adapter account was absent, unreadable, unhealthy, or
/// reported zero.
#[derive(Clone, Copy, Debug, Default)]
pub struct OracleReadings {
    pub primary: Option<u128>,
    pub secondary: Option<u128>,
}

/// Resolve a price through the fallback chain, first success wins:
/// fresh manual override, then the primary oracle, then (if enabled) the
/// secondary oracle. No default or zero price is ever substituted.
pub fn resolve(
    config: &OracleConfig,
    now: i64,
    readings: &OracleReadings,
) -> Result<(u128, PriceSource)> {
    if config.manual_price_usable(now) && config.manual_price > 0 {
        return Ok((config.manual_price, PriceSource::Manual));
    }

    if let Some(price) = readings.primary {
        return Ok((price, PriceSource::Primary));
    }

    if config.use_secondary {
        if let Some(price) = readings.secondary {
            return Ok((price, PriceSource::Secondary));
        }
    }

    err!(LedgerError::AllOraclesDown)
}

/// Unconditional deviation gate for the mutating price path. Compares a
/// freshly fetched price against the ledger's record of the last committed
/// day; the check applies exactly when that record is yesterday's bucket,
/// so it cannot be bypassed by leaving accounts out of the transaction.
pub fn validate_against_prior_day(
    price: u128,
    last_price: u128,
    last_price_day: u64,
    day_index: u64,
    threshold_bps: u16,
) -> bool {
    if last_price_day.checked_add(1) != Some(day_index) || last_price == 0 {
        return true;
    }
    within_deviation(price, last_price, threshold_bps)
}

/// Deviation gate for the mutating price path:
/// `|new - prior| * 10_000 / prior <= threshold_bps`.
/// A zero prior accepts anything (nothing to compare against).
pub fn within_deviation(new_price: u128, prior: u128, threshold_bps: u16) -> bool {
    if prior == 0 {
        return true;
    }
    let diff = new_price.abs_diff(prior);
    // saturating_mul: a diff large enough to saturate is over any threshold
    let deviation_bps = diff.saturating_mul(BPS_DENOMINATOR as u128) / prior;
    deviation_bps <= threshold_bps as u128
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(
        manual: Option<(u128, i64)>,
        staleness: i64,
        use_secondary: bool,
    ) -> OracleConfig {
        let (manual_price, manual_price_timestamp) = manual.unwrap_or((0, 0));
        OracleConfig {
            manual_price,
            manual_price_timestamp,
            manual_price_active: manual.is_some(),
            staleness_threshold: staleness,
            use_secondary,
            ..Default::default()
        }
    }

    #[test]
    fn fresh_manual_price_wins_over_healthy_primary() {
        let cfg = config(Some((42, 1_000)), 3_600, true);
        let readings = OracleReadings {
            primary: Some(100),
            secondary: Some(95),
        };
        let (price, source) = resolve(&cfg, 1_500, &readings).unwrap();
        assert_eq!(price, 42);
        assert_eq!(source, PriceSource::Manual);
    }

    #[test]
    fn stale_manual_price_falls_through_to_primary() {
        let cfg = config(Some((42, 1_000)), 3_600, true);
        let readings = OracleReadings {
            primary: Some(100),
            secondary: Some(95),
        };
        let (price, source) = resolve(&cfg, 1_000 + 3_601, &readings).unwrap();
        assert_eq!(price, 100);
        assert_eq!(source, PriceSource::Primary);
    }

    #[test]
    fn unhealthy_primary_falls_through_to_secondary() {
        let cfg = config(None, 3_600, true);
        let readings = OracleReadings {
            primary: None,
            secondary: Some(95),
        };
        let (price, source) = resolve(&cfg, 10_000, &readings).unwrap();
        assert_eq!(price, 95);
        assert_eq!(source, PriceSource::Secondary);
    }

    #[test]
    fn secondary_ignored_when_disabled() {
        let cfg = config(None, 3_600, false);
        let readings = OracleReadings {
            primary: None,
            secondary: Some(95),
        };
        let err = resolve(&cfg, 10_000, &readings).unwrap_err();
        assert_eq!(err, LedgerError::AllOraclesDown.into());
    }

    #[test]
    fn all_sources_down_fails_closed() {
        let cfg = config(None, 3_600, true);
        let err = resolve(&cfg, 10_000, &OracleReadings::default()).unwrap_err();
        assert_eq!(err, LedgerError::AllOraclesDown.into());
    }

    #[test]
    fn deviation_within_threshold_accepted() {
        // prior 100, threshold 10%: 108 is an 8% move
        assert!(within_deviation(108, 100, 1_000));
    }

    #[test]
    fn deviation_over_threshold_rejected() {
        // prior 100, threshold 10%: 115 is a 15% move
        assert!(!within_deviation(115, 100, 1_000));
    }

    #[test]
    fn deviation_checked_in_both_directions() {
        assert!(within_deviation(92, 100, 1_000));
        assert!(!within_deviation(85, 100, 1_000));
    }

    #[test]
    fn zero_prior_accepts_any_price() {
        assert!(within_deviation(1_000_000, 0, 1));
    }

    #[test]
    fn prior_day_gate_rejects_spike_without_caller_cooperation() {
        // yesterday committed 100, threshold 10%: 115 must fail no matter
        // which accounts the transaction carries
        assert!(!validate_against_prior_day(115, 100, 41, 42, 1_000));
        assert!(validate_against_prior_day(108, 100, 41, 42, 1_000));
    }

    #[test]
    fn prior_day_gate_skips_when_yesterday_uncommitted() {
        // last commit was two days ago: yesterday's bucket is unset
        assert!(validate_against_prior_day(115, 100, 40, 42, 1_000));
        // no commit ever recorded
        assert!(validate_against_prior_day(115, 0, 0, 42, 1_000));
    }
}
