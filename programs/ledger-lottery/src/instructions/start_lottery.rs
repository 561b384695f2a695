use anchor_lang::prelude::*;

use crate::{
    constants::*,
    events::*,
    machine::{self, CallEnvelope, RoundLedgers, StartLotteryArgs},
    state::*,
};

/// Accounts required to start a round.
///
/// The round and its ledgers live at the id the lottery will open next: a new
/// id after a completed round, the same id again after a voided draw. They are
/// created the first time that id is used.
#[derive(Accounts)]
pub struct StartLottery<'info> {
    /// The operator, paying for any round accounts created.
    #[account(mut)]
    pub operator: Signer<'info>,

    #[account(
        mut,
        seeds = [LOTTERY_SEED],
        bump = lottery.bump
    )]
    pub lottery: Box<Account<'info, LotteryState>>,

    #[account(
        init_if_needed,
        payer = operator,
        space = DISCRIMINATOR_SIZE + Round::INIT_SPACE,
        seeds = [ROUND_SEED, lottery.next_round_id().to_le_bytes().as_ref()],
        bump
    )]
    pub round: Box<Account<'info, Round>>,

    #[account(
        init_if_needed,
        payer = operator,
        space = DISCRIMINATOR_SIZE + TicketLedger::INIT_SPACE,
        seeds = [TICKETS_SEED, lottery.next_round_id().to_le_bytes().as_ref()],
        bump
    )]
    pub tickets: Box<Account<'info, TicketLedger>>,

    #[account(
        init_if_needed,
        payer = operator,
        space = DISCRIMINATOR_SIZE + PlayerLedger::INIT_SPACE,
        seeds = [PLAYERS_SEED, lottery.next_round_id().to_le_bytes().as_ref()],
        bump
    )]
    pub players: Box<Account<'info, PlayerLedger>>,

    /// System program to create accounts.
    pub system_program: Program<'info, System>,
}

/// Opens the sale window for `args.duration_minutes` at `args.ticket_price`.
///
/// # Arguments
/// * `ctx` - Context holding the StartLottery accounts
/// * `args` - Ticket price in lamports and sale window length in minutes
pub fn process_start_lottery(ctx: Context<StartLottery>, args: StartLotteryArgs) -> Result<()> {
    let env = CallEnvelope {
        caller: ctx.accounts.operator.key(),
        now: Clock::get()?.unix_timestamp,
    };

    let accounts = &mut *ctx.accounts;
    let started = machine::start_lottery(
        &mut accounts.lottery,
        RoundLedgers {
            round: &mut accounts.round,
            tickets: &mut accounts.tickets,
            players: &mut accounts.players,
        },
        &env,
        args,
    )?;

    accounts.round.bump = ctx.bumps.round;
    accounts.tickets.bump = ctx.bumps.tickets;
    accounts.players.bump = ctx.bumps.players;

    msg!("Sales close at {}", accounts.round.end_time);
    emit!(LotteryStarted {
        round_id: started.round_id,
        restarted: started.restarted,
        ticket_price: accounts.round.ticket_price,
        start_time: accounts.round.start_time,
        end_time: accounts.round.end_time,
    });

    Ok(())
}
