use anchor_lang::prelude::*;
use anchor_lang::system_program;

use crate::{
    constants::*,
    events::*,
    machine::{self, BuyTicketArgs, CallEnvelope, RoundLedgers},
    state::*,
};

/// Accounts required to buy tickets in the current round.
#[derive(Accounts)]
pub struct BuyTicket<'info> {
    /// The account paying for the tickets; it owns every ticket bought.
    #[account(mut)]
    pub buyer: Signer<'info>,

    /// Lottery state; receives the payment.
    #[account(
        mut,
        seeds = [LOTTERY_SEED],
        bump = lottery.bump
    )]
    pub lottery: Box<Account<'info, LotteryState>>,

    #[account(
        mut,
        seeds = [ROUND_SEED, lottery.lottery_id.to_le_bytes().as_ref()],
        bump = round.bump
    )]
    pub round: Box<Account<'info, Round>>,

    #[account(
        mut,
        seeds = [TICKETS_SEED, lottery.lottery_id.to_le_bytes().as_ref()],
        bump = tickets.bump
    )]
    pub tickets: Box<Account<'info, TicketLedger>>,

    #[account(
        mut,
        seeds = [PLAYERS_SEED, lottery.lottery_id.to_le_bytes().as_ref()],
        bump = players.bump
    )]
    pub players: Box<Account<'info, PlayerLedger>>,

    /// System program interface
    pub system_program: Program<'info, System>,
}

/// Buys `args.count` tickets for the caller.
///
/// Steps performed:
/// 1. Check the round is open and the payment covers exactly the tickets.
/// 2. Record the tickets and the buyer in the round's ledgers.
/// 3. Transfer the payment from the buyer to the lottery.
///
/// # Arguments
/// * `ctx` - Context containing BuyTicket accounts
/// * `args` - Number of tickets and the lamports attached for them
pub fn process_buy_ticket(ctx: Context<BuyTicket>, args: BuyTicketArgs) -> Result<()> {
    let env = CallEnvelope {
        caller: ctx.accounts.buyer.key(),
        now: Clock::get()?.unix_timestamp,
    };

    let accounts = &mut *ctx.accounts;
    let purchase = machine::buy_ticket(
        &accounts.lottery,
        RoundLedgers {
            round: &mut accounts.round,
            tickets: &mut accounts.tickets,
            players: &mut accounts.players,
        },
        &env,
        args,
    )?;

    system_program::transfer(
        CpiContext::new(
            accounts.system_program.to_account_info(),
            system_program::Transfer {
                from: accounts.buyer.to_account_info(),
                to: accounts.lottery.to_account_info(),
            },
        ),
        args.payment,
    )?;

    emit!(TicketsPurchased {
        round_id: accounts.round.id,
        buyer: env.caller,
        first_ticket: purchase.first_ticket,
        count: purchase.count,
        payment: args.payment,
    });

    Ok(())
}
