//! Read-only instructions. Each returns its answer through return data, so
//! clients call them via simulation. Accounts that do not exist yet read as
//! their defaults.

use anchor_lang::prelude::*;

use crate::state::*;

#[derive(Accounts)]
pub struct ReadLottery<'info> {
    /// CHECK: Must be the lottery PDA; may not be initialized yet.
    pub lottery: UncheckedAccount<'info>,
}

#[derive(Accounts)]
pub struct ReadRound<'info> {
    /// CHECK: Must be the round PDA for the requested id; may not exist.
    pub round: UncheckedAccount<'info>,
}

#[derive(Accounts)]
pub struct ReadPlayers<'info> {
    /// CHECK: Must be the player ledger PDA for the requested id; may not exist.
    pub players: UncheckedAccount<'info>,
}

/// The lottery state, or a fresh `Inactive` one before `initialize`.
pub fn read_state(info: &AccountInfo) -> Result<LotteryState> {
    Ok(load_optional(info, &LotteryState::address())?.unwrap_or_default())
}

pub fn read_round(info: &AccountInfo, id: u64) -> Result<Option<RoundView>> {
    let round: Option<Round> = load_optional(info, &Round::address(id))?;
    Ok(round.map(|round| round.view()))
}

pub fn read_player_tickets(info: &AccountInfo, id: u64, player: &Pubkey) -> Result<u32> {
    let ledger: Option<PlayerLedger> = load_optional(info, &PlayerLedger::address(id))?;
    Ok(ledger.map_or(0, |ledger| ledger.tickets_of(player)))
}

pub fn process_get_lottery(ctx: Context<ReadRound>, id: u64) -> Result<Option<RoundView>> {
    read_round(&ctx.accounts.round, id)
}

pub fn process_get_player_tickets(
    ctx: Context<ReadPlayers>,
    id: u64,
    player: Pubkey,
) -> Result<u32> {
    read_player_tickets(&ctx.accounts.players, id, &player)
}

pub fn process_get_lottery_id(ctx: Context<ReadLottery>) -> Result<u64> {
    Ok(read_state(&ctx.accounts.lottery)?.lottery_id)
}

pub fn process_get_lottery_status(ctx: Context<ReadLottery>) -> Result<LotteryPhase> {
    Ok(read_state(&ctx.accounts.lottery)?.phase)
}

pub fn process_check_rollover_status(ctx: Context<ReadLottery>) -> Result<bool> {
    Ok(read_state(&ctx.accounts.lottery)?.rollover)
}

pub fn process_get_lottery_operator(ctx: Context<ReadLottery>) -> Result<Pubkey> {
    Ok(read_state(&ctx.accounts.lottery)?.operator)
}

pub fn process_get_ticket_price(ctx: Context<ReadLottery>) -> Result<u128> {
    Ok(read_state(&ctx.accounts.lottery)?.effective_ticket_price())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{constants::DEFAULT_TICKET_PRICE, error::LotteryError};

    #[test]
    fn test_state_defaults_before_initialize() {
        let key = LotteryState::address();
        let mut lamports = 0;
        let mut data: [u8; 0] = [];
        let system = anchor_lang::system_program::ID;
        let info = AccountInfo::new(&key, false, false, &mut lamports, &mut data, &system, false, 0);

        let state = read_state(&info).unwrap();
        assert_eq!(state.phase, LotteryPhase::Inactive);
        assert_eq!(state.lottery_id, 0);
        assert!(!state.rollover);
        assert_eq!(state.operator, Pubkey::default());
        assert_eq!(state.effective_ticket_price(), DEFAULT_TICKET_PRICE);
    }

    #[test]
    fn test_state_is_read_back() {
        let key = LotteryState::address();
        let operator = Pubkey::new_unique();
        let stored = LotteryState {
            operator,
            phase: LotteryPhase::Active,
            lottery_id: 3,
            ticket_price: Some(250),
            ..Default::default()
        };
        let mut data: Vec<u8> = Vec::new();
        stored.try_serialize(&mut data).unwrap();
        let mut lamports = 1;
        let owner = crate::ID;
        let info = AccountInfo::new(&key, false, false, &mut lamports, &mut data, &owner, false, 0);

        let state = read_state(&info).unwrap();
        assert_eq!(state.operator, operator);
        assert_eq!(state.phase, LotteryPhase::Active);
        assert_eq!(state.lottery_id, 3);
        assert_eq!(state.effective_ticket_price(), 250);
    }

    #[test]
    fn test_unknown_round_is_none() {
        let key = Round::address(9);
        let mut lamports = 0;
        let mut data: [u8; 0] = [];
        let system = anchor_lang::system_program::ID;
        let info = AccountInfo::new(&key, false, false, &mut lamports, &mut data, &system, false, 0);

        assert_eq!(read_round(&info, 9).unwrap(), None);
        assert_eq!(
            read_round(&info, 8).unwrap_err(),
            Error::from(LotteryError::UnexpectedAccount)
        );
    }

    #[test]
    fn test_player_tickets_default_to_zero() {
        let (bob, carol) = (Pubkey::new_unique(), Pubkey::new_unique());
        let key = PlayerLedger::address(1);
        let mut ledger = PlayerLedger {
            round_id: 1,
            ..Default::default()
        };
        ledger.credit(bob, 3).unwrap();
        let mut data: Vec<u8> = Vec::new();
        ledger.try_serialize(&mut data).unwrap();
        let mut lamports = 1;
        let owner = crate::ID;
        let info = AccountInfo::new(&key, false, false, &mut lamports, &mut data, &owner, false, 0);

        assert_eq!(read_player_tickets(&info, 1, &bob).unwrap(), 3);
        assert_eq!(read_player_tickets(&info, 1, &carol).unwrap(), 0);

        let missing_key = PlayerLedger::address(2);
        let mut missing_lamports = 0;
        let mut missing_data: [u8; 0] = [];
        let system = anchor_lang::system_program::ID;
        let missing = AccountInfo::new(
            &missing_key,
            false,
            false,
            &mut missing_lamports,
            &mut missing_data,
            &system,
            false,
            0,
        );
        assert_eq!(read_player_tickets(&missing, 2, &bob).unwrap(), 0);
    }
}
