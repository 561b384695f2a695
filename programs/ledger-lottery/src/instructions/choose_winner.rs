use anchor_lang::prelude::*;

use crate::{
    constants::*,
    events::*,
    machine::{self, CallEnvelope, DrawOutcome},
    random::SwitchboardRandomness,
    state::*,
};

/// Accounts required to draw the winning ticket.
///
/// The randomness account is only read when the round has enough tickets and
/// players for a draw; a voided round ignores it.
#[derive(Accounts)]
pub struct GetWinningTicket<'info> {
    pub operator: Signer<'info>,

    /// The main lottery state account.
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
        seeds = [TICKETS_SEED, lottery.lottery_id.to_le_bytes().as_ref()],
        bump = tickets.bump
    )]
    pub tickets: Box<Account<'info, TicketLedger>>,

    /// The randomness oracle account providing verifiable randomness.
    /// CHECK: Must match the committed account; validated when the draw reads it.
    pub randomness_account_data: UncheckedAccount<'info>,
}

pub fn process_get_winning_ticket(ctx: Context<GetWinningTicket>) -> Result<()> {
    let clock = Clock::get()?;
    let env = CallEnvelope {
        caller: ctx.accounts.operator.key(),
        now: clock.unix_timestamp,
    };

    let randomness_info = ctx.accounts.randomness_account_data.to_account_info();
    let accounts = &mut *ctx.accounts;
    let mut rng = SwitchboardRandomness {
        account: &randomness_info,
        committed: accounts.lottery.randomness_account,
        slot: clock.slot,
    };

    let outcome = machine::get_winning_ticket(
        &mut accounts.lottery,
        &mut accounts.round,
        &accounts.tickets,
        &env,
        &mut rng,
    )?;

    match outcome {
        DrawOutcome::Voided => emit!(RoundVoided {
            round_id: accounts.round.id,
            tickets_sold: accounts.round.tickets_sold,
            players_count: accounts.round.players_count,
        }),
        DrawOutcome::Won { index, winner } => emit!(WinnerDrawn {
            round_id: accounts.round.id,
            winning_ticket_index: index,
            winner,
        }),
    }

    Ok(())
}
