use anchor_lang::prelude::*;

use crate::{constants::*, error::LotteryError};

/// Consecutive tickets `first_index .. first_index + count` owned by one buyer.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub struct TicketRun {
    pub first_index: u32,
    pub count: u32,
    pub owner: Pubkey,
}

impl TicketRun {
    fn end(&self) -> u32 {
        self.first_index + self.count
    }
}

/// Ticket index -> owner for one round. Append-only; indices are sequential
/// from `0`, and a purchase never splits across runs.
#[account]
#[derive(Debug, Default, InitSpace)]
pub struct TicketLedger {
    pub round_id: u64,

    #[max_len(MAX_TICKET_RUNS)]
    pub runs: Vec<TicketRun>,

    pub bump: u8,
}

impl TicketLedger {
    pub fn address(round_id: u64) -> Pubkey {
        Pubkey::find_program_address(&[TICKETS_SEED, &round_id.to_le_bytes()], &crate::ID).0
    }

    /// Number of tickets recorded.
    pub fn len(&self) -> u32 {
        self.runs.last().map_or(0, TicketRun::end)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn owner_of(&self, index: u32) -> Option<Pubkey> {
        let pos = self.runs.partition_point(|run| run.end() <= index);
        self.runs
            .get(pos)
            .filter(|run| run.first_index <= index)
            .map(|run| run.owner)
    }

    /// Whether `owner` can append without needing a new run slot.
    pub fn has_room_for(&self, owner: &Pubkey) -> bool {
        self.runs.last().is_some_and(|run| run.owner == *owner) || self.runs.len() < MAX_TICKET_RUNS
    }

    /// Records `count` new tickets for `owner` and returns the first new index.
    pub fn append(&mut self, owner: Pubkey, count: u32) -> Result<u32> {
        let first_index = self.len();
        let end = first_index
            .checked_add(count)
            .ok_or(LotteryError::ArithmeticOverflow)?;

        match self.runs.last_mut() {
            Some(run) if run.owner == owner => run.count = end - run.first_index,
            _ => {
                require!(self.runs.len() < MAX_TICKET_RUNS, LotteryError::LedgerFull);
                self.runs.push(TicketRun {
                    first_index,
                    count,
                    owner,
                });
            }
        }

        Ok(first_index)
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub struct PlayerEntry {
    pub player: Pubkey,
    pub tickets: u32,
}

/// Player -> ticket count for one round.
#[account]
#[derive(Debug, Default, InitSpace)]
pub struct PlayerLedger {
    pub round_id: u64,

    #[max_len(MAX_PLAYERS)]
    pub entries: Vec<PlayerEntry>,

    pub bump: u8,
}

impl PlayerLedger {
    pub fn address(round_id: u64) -> Pubkey {
        Pubkey::find_program_address(&[PLAYERS_SEED, &round_id.to_le_bytes()], &crate::ID).0
    }

    pub fn tickets_of(&self, player: &Pubkey) -> u32 {
        self.entries
            .iter()
            .find(|entry| entry.player == *player)
            .map_or(0, |entry| entry.tickets)
    }

    pub fn total_tickets(&self) -> u64 {
        self.entries.iter().map(|entry| entry.tickets as u64).sum()
    }

    pub fn has_room_for(&self, player: &Pubkey) -> bool {
        self.tickets_of(player) > 0 || self.entries.len() < MAX_PLAYERS
    }

    /// Adds `count` tickets to `player`. Returns `true` on the player's first purchase.
    pub fn credit(&mut self, player: Pubkey, count: u32) -> Result<bool> {
        if let Some(entry) = self.entries.iter_mut().find(|entry| entry.player == player) {
            entry.tickets = entry
                .tickets
                .checked_add(count)
                .ok_or(LotteryError::ArithmeticOverflow)?;
            return Ok(false);
        }

        require!(self.entries.len() < MAX_PLAYERS, LotteryError::LedgerFull);
        self.entries.push(PlayerEntry {
            player,
            tickets: count,
        });
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticket_indices_are_sequential() {
        let (bob, carol) = (Pubkey::new_unique(), Pubkey::new_unique());
        let mut ledger = TicketLedger::default();

        assert_eq!(ledger.append(bob, 3).unwrap(), 0);
        assert_eq!(ledger.append(carol, 2).unwrap(), 3);
        assert_eq!(ledger.len(), 5);

        let owners: Vec<_> = (0..5).map(|i| ledger.owner_of(i).unwrap()).collect();
        assert_eq!(owners, vec![bob, bob, bob, carol, carol]);
        assert_eq!(ledger.owner_of(5), None);
    }

    #[test]
    fn test_same_buyer_extends_last_run() {
        let (bob, carol) = (Pubkey::new_unique(), Pubkey::new_unique());
        let mut ledger = TicketLedger::default();

        ledger.append(bob, 1).unwrap();
        ledger.append(bob, 4).unwrap();
        assert_eq!(ledger.runs.len(), 1);
        assert_eq!(ledger.len(), 5);

        ledger.append(carol, 1).unwrap();
        ledger.append(bob, 1).unwrap();
        assert_eq!(ledger.runs.len(), 3);
        assert_eq!(ledger.owner_of(6), Some(bob));
        assert_eq!(ledger.owner_of(5), Some(carol));
    }

    #[test]
    fn test_empty_ledger_has_no_owners() {
        let ledger = TicketLedger::default();
        assert!(ledger.is_empty());
        assert_eq!(ledger.owner_of(0), None);
    }

    #[test]
    fn test_ticket_ledger_capacity() {
        let mut ledger = TicketLedger::default();
        for _ in 0..MAX_TICKET_RUNS {
            ledger.append(Pubkey::new_unique(), 1).unwrap();
        }

        let last = ledger.runs.last().unwrap().owner;
        assert!(ledger.has_room_for(&last));
        assert!(!ledger.has_room_for(&Pubkey::new_unique()));
        assert_eq!(
            ledger.append(Pubkey::new_unique(), 1).unwrap_err(),
            Error::from(LotteryError::LedgerFull)
        );
        // the current last buyer can still top up
        ledger.append(last, 2).unwrap();
        assert_eq!(ledger.len(), MAX_TICKET_RUNS as u32 + 2);
    }

    #[test]
    fn test_player_credit() {
        let (bob, carol) = (Pubkey::new_unique(), Pubkey::new_unique());
        let mut ledger = PlayerLedger::default();

        assert!(ledger.credit(bob, 3).unwrap());
        assert!(!ledger.credit(bob, 2).unwrap());
        assert!(ledger.credit(carol, 1).unwrap());

        assert_eq!(ledger.tickets_of(&bob), 5);
        assert_eq!(ledger.tickets_of(&carol), 1);
        assert_eq!(ledger.tickets_of(&Pubkey::new_unique()), 0);
        assert_eq!(ledger.total_tickets(), 6);
    }

    #[test]
    fn test_player_ledger_capacity() {
        let mut ledger = PlayerLedger::default();
        for _ in 0..MAX_PLAYERS {
            ledger.credit(Pubkey::new_unique(), 1).unwrap();
        }
        let known = ledger.entries[0].player;

        assert!(ledger.has_room_for(&known));
        assert!(!ledger.has_room_for(&Pubkey::new_unique()));
        assert!(!ledger.credit(known, 1).unwrap());
        assert_eq!(
            ledger.credit(Pubkey::new_unique(), 1).unwrap_err(),
            Error::from(LotteryError::LedgerFull)
        );
    }

    #[test]
    fn test_accounts_fit_a_single_allocation() {
        let limit = 10 * 1024;
        assert!(DISCRIMINATOR_SIZE + TicketLedger::INIT_SPACE <= limit);
        assert!(DISCRIMINATOR_SIZE + PlayerLedger::INIT_SPACE <= limit);
    }
}
