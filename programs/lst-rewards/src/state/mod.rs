pub mod daily_price;
pub mod oracle_config;
pub mod reward_ledger;
pub mod user_position;

pub use daily_price::*;
pub use oracle_config::*;
pub use reward_ledger::*;
pub use user_position::*;
