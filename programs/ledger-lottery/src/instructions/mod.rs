mod admin;
mod buy_ticket;
mod choose_winner;
mod commit_winner;
mod payout_winner;
mod queries;
mod start_lottery;

pub use admin::*;
pub use buy_ticket::*;
pub use choose_winner::*;
pub use commit_winner::*;
pub use payout_winner::*;
pub use queries::*;
pub use start_lottery::*;
