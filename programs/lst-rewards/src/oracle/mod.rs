pub mod adapters;
pub mod resolver;

pub use resolver::{
    resolve, validate_against_prior_day, within_deviation, OracleReadings, PriceSource,
};

use anchor_lang::prelude::*;

use crate::state::OracleConfig;

/// Gather failure-isolated readings from the adapter accounts the caller
/// supplied. An account whose key does not match the configured adapter is
/// ignored rather than trusted, which leaves that tier "unavailable".
pub fn gather_readings<'info>(
    config: &OracleConfig,
    primary: Option<&AccountInfo<'info>>,
    secondary: Option<&AccountInfo<'info>>,
) -> OracleReadings {
    OracleReadings {
        primary: primary
            .filter(|info| *info.key == config.primary_adapter)
            .and_then(adapters::read_primary),
        secondary: secondary
            .filter(|info| *info.key == config.secondary_adapter)
            .and_then(adapters::read_secondary),
    }
}
