use anchor_lang::prelude::*;

/// PDA Seeds
#[constant]
pub const LOTTERY_SEED: &[u8] = b"lottery";
#[constant]
pub const ROUND_SEED: &[u8] = b"round";
#[constant]
pub const TICKETS_SEED: &[u8] = b"tickets";
#[constant]
pub const PLAYERS_SEED: &[u8] = b"players";

/// Anchor account discriminator length.
pub const DISCRIMINATOR_SIZE: usize = 8;

/// Ticket price used until the operator sets one (1 SOL).
#[constant]
pub const DEFAULT_TICKET_PRICE: u128 = 1_000_000_000;

/// A draw needs at least this many tickets, otherwise the round rolls over.
#[constant]
pub const MIN_TICKETS_FOR_DRAW: u32 = 5;

/// A draw needs at least this many distinct players, otherwise the round rolls over.
#[constant]
pub const MIN_PLAYERS_FOR_DRAW: u32 = 2;

pub const SECONDS_PER_MINUTE: i64 = 60;

/// Purchases recorded per round. Each purchase is one run in the ticket ledger,
/// so the account stays under the 10 KiB CPI allocation limit.
pub const MAX_TICKET_RUNS: usize = 200;

/// Distinct players recorded per round.
pub const MAX_PLAYERS: usize = 200;
