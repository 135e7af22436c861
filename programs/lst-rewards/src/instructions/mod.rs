// =============================================================================
// Instructions Module - LST Rewards
// =============================================================================

pub mod admin;
pub mod batch_checkpoint;
pub mod claim;
pub mod emergency_exit;
pub mod initialize;
pub mod notify_reward;
pub mod on_stake_change;
pub mod price_view;

pub use admin::*;
pub use batch_checkpoint::*;
pub use claim::*;
pub use emergency_exit::*;
pub use initialize::*;
pub use notify_reward::*;
pub use on_stake_change::*;
pub use price_view::*;
