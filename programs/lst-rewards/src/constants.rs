// =============================================================================
// LST Rewards Constants
// =============================================================================

// PDA Seeds
pub const REWARD_LEDGER_SEED: &[u8] = b"reward_ledger";
pub const REWARD_VAULT_SEED: &[u8] = b"reward_vault";
pub const USER_POSITION_SEED: &[u8] = b"user_position";
pub const ORACLE_CONFIG_SEED: &[u8] = b"oracle_config";
pub const DAILY_PRICE_SEED: &[u8] = b"daily_price";

// Fixed-point scale for the reward-per-unit index and for oracle prices
// (USD per staked unit). u128 keeps the intermediate products in range.
pub const REWARD_PRECISION: u128 = 1_000_000_000_000_000_000; // 10^18

// Basis-point denominator for penalties and deviation thresholds.
pub const BPS_DENOMINATOR: u64 = 10_000;

// Seconds per price-cache bucket.
pub const SECONDS_PER_DAY: i64 = 86_400;

// Upper bound on positions checkpointed in one batch call. A resource
// guard, not a correctness mechanism.
pub const MAX_BATCH_SIZE: usize = 50;
