#![allow(unexpected_cfgs)]

pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod machine;
pub mod payout;
pub mod random;
pub mod state;

use anchor_lang::prelude::*;

pub use instructions::*;
pub use machine::{BuyTicketArgs, StartLotteryArgs};
pub use state::{LotteryPhase, RoundView};

declare_id!("9wnGd3HB1rEhgKGd97SevtXbdvZKDbB5skwhMWdUGQGK");

#[program]
pub mod ledger_lottery {
    use super::*;

    pub fn initialize(ctx: Context<Initialize>, operator: Pubkey) -> Result<()> {
        process_initialize(ctx, operator)
    }

    pub fn new_operator(ctx: Context<NewOperator>, operator: Pubkey) -> Result<()> {
        process_new_operator(ctx, operator)
    }

    pub fn start_lottery(ctx: Context<StartLottery>, args: StartLotteryArgs) -> Result<()> {
        process_start_lottery(ctx, args)
    }

    pub fn buy_ticket(ctx: Context<BuyTicket>, args: BuyTicketArgs) -> Result<()> {
        process_buy_ticket(ctx, args)
    }

    pub fn commit_randomness(ctx: Context<CommitRandomness>) -> Result<()> {
        process_commit_randomness(ctx)
    }

    pub fn get_winning_ticket(ctx: Context<GetWinningTicket>) -> Result<()> {
        process_get_winning_ticket(ctx)
    }

    pub fn payout_winner(ctx: Context<PayoutWinner>) -> Result<()> {
        process_payout_winner(ctx)
    }

    pub fn get_lottery(ctx: Context<ReadRound>, id: u64) -> Result<Option<RoundView>> {
        process_get_lottery(ctx, id)
    }

    pub fn get_player_tickets(ctx: Context<ReadPlayers>, id: u64, player: Pubkey) -> Result<u32> {
        process_get_player_tickets(ctx, id, player)
    }

    pub fn get_lottery_id(ctx: Context<ReadLottery>) -> Result<u64> {
        process_get_lottery_id(ctx)
    }

    pub fn get_lottery_status(ctx: Context<ReadLottery>) -> Result<LotteryPhase> {
        process_get_lottery_status(ctx)
    }

    pub fn check_rollover_status(ctx: Context<ReadLottery>) -> Result<bool> {
        process_check_rollover_status(ctx)
    }

    pub fn get_lottery_operator(ctx: Context<ReadLottery>) -> Result<Pubkey> {
        process_get_lottery_operator(ctx)
    }

    pub fn get_ticket_price(ctx: Context<ReadLottery>) -> Result<u128> {
        process_get_ticket_price(ctx)
    }
}
