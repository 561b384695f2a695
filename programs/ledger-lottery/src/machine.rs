//! The lottery phase machine.
//!
//! Every operation takes the singleton `LotteryState` and the accounts of the
//! round it touches explicitly, plus the `CallEnvelope` the runtime attributed
//! to the call. Operations check everything before writing anything, so an
//! `Err` leaves every account as it was.

use anchor_lang::prelude::*;

use crate::{
    error::LotteryError,
    payout::{PayoutSplit, TransferIntent},
    random::{is_fresh_commitment, RandomSource},
    state::*,
};

/// Caller identity and ledger time of the current call.
#[derive(Clone, Copy, Debug)]
pub struct CallEnvelope {
    pub caller: Pubkey,
    pub now: i64,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct StartLotteryArgs {
    pub ticket_price: u128,
    pub duration_minutes: u32,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuyTicketArgs {
    pub count: u32,
    /// Lamports the buyer attaches; must equal `ticket_price * count`.
    pub payment: u64,
}

/// A round together with its two ledgers.
pub struct RoundLedgers<'a> {
    pub round: &'a mut Round,
    pub tickets: &'a mut TicketLedger,
    pub players: &'a mut PlayerLedger,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Started {
    pub round_id: u64,
    pub restarted: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Purchase {
    pub first_ticket: u32,
    pub count: u32,
    pub new_player: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawOutcome {
    /// Too few tickets or players; the round waits for a restart.
    Voided,
    Won { index: u32, winner: Pubkey },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PayoutPlan {
    pub split: PayoutSplit,
    pub intents: Vec<TransferIntent>,
}

pub fn initialize(
    state: &mut LotteryState,
    env: &CallEnvelope,
    program_authority: Option<Pubkey>,
    operator: Pubkey,
) -> Result<()> {
    require_self(&env.caller, program_authority)?;
    require!(
        state.phase == LotteryPhase::Inactive,
        LotteryError::AlreadyInitialized
    );

    state.operator = operator;
    state.phase = LotteryPhase::Idle;

    msg!("Lottery initialized, operator {}", operator);
    Ok(())
}

pub fn start_lottery(
    state: &mut LotteryState,
    ledgers: RoundLedgers,
    env: &CallEnvelope,
    args: StartLotteryArgs,
) -> Result<Started> {
    state.require_operator(&env.caller)?;
    state.require_phase(LotteryPhase::Idle)?;

    let RoundLedgers {
        round,
        tickets,
        players,
    } = ledgers;
    let restarted = state.rollover;

    let round_id = if restarted {
        require!(round.id == state.lottery_id, LotteryError::UnexpectedAccount);
        round.restart(args.ticket_price, env.now, args.duration_minutes)?;
        state.lottery_id
    } else {
        let round_id = state
            .lottery_id
            .checked_add(1)
            .ok_or(LotteryError::ArithmeticOverflow)?;
        round.open(round_id, args.ticket_price, env.now, args.duration_minutes)?;
        tickets.round_id = round_id;
        players.round_id = round_id;
        round_id
    };

    state.ticket_price = Some(args.ticket_price);
    state.lottery_id = round_id;
    state.rollover = false;
    state.randomness_account = Pubkey::default();
    state.phase = LotteryPhase::Active;

    if restarted {
        msg!("Lottery {} restarted", round_id);
    } else {
        msg!("Lottery {} started", round_id);
    }
    Ok(Started {
        round_id,
        restarted,
    })
}

pub fn buy_ticket(
    state: &LotteryState,
    ledgers: RoundLedgers,
    env: &CallEnvelope,
    args: BuyTicketArgs,
) -> Result<Purchase> {
    state.require_phase(LotteryPhase::Active)?;

    let RoundLedgers {
        round,
        tickets,
        players,
    } = ledgers;
    let buyer = env.caller;

    require!(!round.has_ended(env.now), LotteryError::LotteryEnded);
    require!(args.count > 0, LotteryError::InvalidTicketCount);

    // a cost beyond u128 can never match a u64 payment
    let cost = args.payment as u128;
    require!(
        round.cost_of(args.count) == Some(cost),
        LotteryError::PaymentMismatch
    );

    require!(
        tickets.len() == round.tickets_sold,
        LotteryError::InvariantViolation
    );
    require!(
        tickets.has_room_for(&buyer) && players.has_room_for(&buyer),
        LotteryError::LedgerFull
    );

    let tickets_sold = round
        .tickets_sold
        .checked_add(args.count)
        .ok_or(LotteryError::ArithmeticOverflow)?;
    let pot_amount = round
        .pot_amount
        .checked_add(cost)
        .ok_or(LotteryError::ArithmeticOverflow)?;
    let new_player = players.tickets_of(&buyer) == 0;
    let players_count = if new_player {
        round
            .players_count
            .checked_add(1)
            .ok_or(LotteryError::ArithmeticOverflow)?
    } else {
        round.players_count
    };

    let first_ticket = tickets.append(buyer, args.count)?;
    players.credit(buyer, args.count)?;

    round.tickets_sold = tickets_sold;
    round.players_count = players_count;
    round.pot_amount = pot_amount;

    msg!(
        "{} bought {} tickets starting at #{}",
        buyer,
        args.count,
        first_ticket
    );
    Ok(Purchase {
        first_ticket,
        count: args.count,
        new_player,
    })
}

/// Records the Switchboard randomness account the next draw will read. Only
/// one account can be committed per start.
pub fn commit_randomness(
    state: &mut LotteryState,
    env: &CallEnvelope,
    randomness_account: Pubkey,
    seed_slot: u64,
    current_slot: u64,
) -> Result<()> {
    state.require_operator(&env.caller)?;
    state.require_phase(LotteryPhase::Active)?;
    require_keys_eq!(
        state.randomness_account,
        Pubkey::default(),
        LotteryError::RandomnessAlreadyCommitted
    );
    require!(
        is_fresh_commitment(seed_slot, current_slot),
        LotteryError::RandomnessAlreadyRevealed
    );

    state.randomness_account = randomness_account;

    msg!("Committed randomness account {}", randomness_account);
    Ok(())
}

pub fn get_winning_ticket<R: RandomSource>(
    state: &mut LotteryState,
    round: &mut Round,
    tickets: &TicketLedger,
    env: &CallEnvelope,
    rng: &mut R,
) -> Result<DrawOutcome> {
    state.require_operator(&env.caller)?;
    state.require_phase(LotteryPhase::Active)?;
    require!(round.is_drawable(env.now), LotteryError::TooEarly);

    if !round.meets_draw_threshold() {
        state.rollover = true;
        state.phase = LotteryPhase::Idle;

        msg!(
            "Not enough players for lottery {} ({} tickets, {} players), restart required",
            round.id,
            round.tickets_sold,
            round.players_count
        );
        return Ok(DrawOutcome::Voided);
    }

    let roll = rng.next_u64()?;
    let index = (roll % round.tickets_sold as u64) as u32;
    let winner = tickets
        .owner_of(index)
        .ok_or(LotteryError::InvariantViolation)?;

    msg!("Roll: {}", roll);
    msg!("Ticket num: {}", round.tickets_sold);
    msg!("Winner: ticket #{} held by {}", index, winner);

    round.winning_ticket_index = index;
    round.winner = Some(winner);
    state.phase = LotteryPhase::Payout;

    Ok(DrawOutcome::Won { index, winner })
}

pub fn payout_winner(
    state: &mut LotteryState,
    round: &Round,
    env: &CallEnvelope,
) -> Result<PayoutPlan> {
    state.require_operator(&env.caller)?;
    state.require_phase(LotteryPhase::Payout)?;
    let winner = round.winner.ok_or(LotteryError::InvariantViolation)?;

    let split = PayoutSplit::from_pot(round.pot_amount);
    let intents = vec![
        TransferIntent {
            recipient: winner,
            amount: split.winner_share,
        },
        TransferIntent {
            recipient: state.operator,
            amount: split.operator_share,
        },
    ];

    state.phase = LotteryPhase::Idle;

    msg!(
        "Lottery {} paid out: {} to winner, {} to operator, {} retained",
        round.id,
        split.winner_share,
        split.operator_share,
        split.retained
    );
    Ok(PayoutPlan { split, intents })
}

/// Replaces the operator and returns the previous one.
pub fn new_operator(
    state: &mut LotteryState,
    env: &CallEnvelope,
    program_authority: Option<Pubkey>,
    operator: Pubkey,
) -> Result<Pubkey> {
    require_self(&env.caller, program_authority)?;
    state.require_phase(LotteryPhase::Idle)?;

    let previous = std::mem::replace(&mut state.operator, operator);

    msg!("New operator assigned: {}", operator);
    Ok(previous)
}
