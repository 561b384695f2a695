use anchor_lang::prelude::*;

use crate::{constants::*, error::LotteryError};

/// One lottery cycle with its own sale window and draw.
///
/// Ticket ownership lives in the round's `TicketLedger` and `PlayerLedger`
/// accounts; this account only carries the totals.
#[account]
#[derive(Debug, Default, InitSpace)]
pub struct Round {
    pub id: u64,

    /// Set once a draw succeeds.
    pub winner: Option<Pubkey>,

    pub tickets_sold: u32,

    /// Number of distinct buyers.
    pub players_count: u32,

    /// Index into the ticket ledger chosen by the draw. Meaningless until
    /// `winner` is set.
    pub winning_ticket_index: u32,

    /// Sum of every payment recorded for this round, in lamports.
    pub pot_amount: u128,

    /// Price of one ticket, captured when the round was started.
    pub ticket_price: u128,

    /// Unix timestamp the sale window opened.
    pub start_time: i64,

    /// Unix timestamp the sale window closes.
    pub end_time: i64,

    /// The bump seed used for deriving the PDA address of this account.
    pub bump: u8,
}

/// Public projection of a round, returned by `get_lottery`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct RoundView {
    pub id: u64,
    pub winner: Option<Pubkey>,
    pub tickets_sold: u32,
    pub players_count: u32,
    pub winning_ticket_index: u32,
    pub pot_amount: u128,
    pub ticket_price: u128,
    pub start_time: i64,
    pub end_time: i64,
}

impl Round {
    pub fn address(id: u64) -> Pubkey {
        Pubkey::find_program_address(&[ROUND_SEED, &id.to_le_bytes()], &crate::ID).0
    }

    /// Turns a blank account into round `id`, open from `now` for
    /// `duration_minutes`.
    pub fn open(&mut self, id: u64, ticket_price: u128, now: i64, duration_minutes: u32) -> Result<()> {
        let end_time = sale_window_end(now, duration_minutes)?;
        *self = Round {
            id,
            ticket_price,
            start_time: now,
            end_time,
            bump: self.bump,
            ..Default::default()
        };
        Ok(())
    }

    /// Reopens a voided round. Ledgers, totals and pot are left as they are.
    pub fn restart(&mut self, ticket_price: u128, now: i64, duration_minutes: u32) -> Result<()> {
        self.end_time = sale_window_end(now, duration_minutes)?;
        self.start_time = now;
        self.ticket_price = ticket_price;
        Ok(())
    }

    pub fn has_ended(&self, now: i64) -> bool {
        now > self.end_time
    }

    pub fn is_drawable(&self, now: i64) -> bool {
        now >= self.end_time
    }

    /// Whether enough tickets and players exist for a draw to count.
    pub fn meets_draw_threshold(&self) -> bool {
        self.tickets_sold >= MIN_TICKETS_FOR_DRAW && self.players_count >= MIN_PLAYERS_FOR_DRAW
    }

    /// Price of `count` tickets, or `None` when it exceeds `u128`.
    pub fn cost_of(&self, count: u32) -> Option<u128> {
        self.ticket_price.checked_mul(count as u128)
    }

    pub fn view(&self) -> RoundView {
        RoundView {
            id: self.id,
            winner: self.winner,
            tickets_sold: self.tickets_sold,
            players_count: self.players_count,
            winning_ticket_index: self.winning_ticket_index,
            pot_amount: self.pot_amount,
            ticket_price: self.ticket_price,
            start_time: self.start_time,
            end_time: self.end_time,
        }
    }
}

fn sale_window_end(now: i64, duration_minutes: u32) -> Result<i64> {
    (duration_minutes as i64)
        .checked_mul(SECONDS_PER_MINUTE)
        .and_then(|secs| now.checked_add(secs))
        .ok_or_else(|| error!(LotteryError::ArithmeticOverflow))
}
