use anchor_lang::prelude::*;

use crate::{constants::*, error::LotteryError};

/// Global phase of the lottery.
///
/// `Inactive` until `init`; afterwards the lottery cycles
/// `Idle -> Active -> Payout -> Idle`, or `Active -> Idle` when a draw is voided.
#[derive(
    AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace,
)]
pub enum LotteryPhase {
    #[default]
    Inactive,
    Idle,
    Active,
    Payout,
}

#[account]
#[derive(Debug, Default, InitSpace)]
pub struct LotteryState {
    /// The bump seed used for deriving the PDA address of this account.
    pub bump: u8,

    /// The account allowed to start rounds, draw and pay out.
    /// `Pubkey::default()` until the lottery is initialized.
    pub operator: Pubkey,

    /// Which operations are currently legal.
    pub phase: LotteryPhase,

    /// Id of the latest round. `0` is reserved for "no round yet".
    pub lottery_id: u64,

    /// Ticket price set by the operator, captured by the next round started.
    /// Falls back to `DEFAULT_TICKET_PRICE` while unset.
    pub ticket_price: Option<u128>,

    /// Set when a draw was voided; the next start reuses `lottery_id`.
    pub rollover: bool,

    /// The Switchboard randomness account committed for the current round.
    pub randomness_account: Pubkey,
}

impl LotteryState {
    pub fn address() -> Pubkey {
        Pubkey::find_program_address(&[LOTTERY_SEED], &crate::ID).0
    }

    pub fn require_operator(&self, caller: &Pubkey) -> Result<()> {
        require_keys_eq!(*caller, self.operator, LotteryError::Unauthorized);
        Ok(())
    }

    pub fn require_phase(&self, phase: LotteryPhase) -> Result<()> {
        require!(self.phase == phase, LotteryError::InvalidPhase);
        Ok(())
    }

    pub fn effective_ticket_price(&self) -> u128 {
        self.ticket_price.unwrap_or(DEFAULT_TICKET_PRICE)
    }

    /// Id the next `start_lottery` will open: the current one again after a
    /// voided draw, otherwise the following one.
    pub fn next_round_id(&self) -> u64 {
        if self.rollover {
            self.lottery_id
        } else {
            self.lottery_id.saturating_add(1)
        }
    }
}

/// Gate for calls only the program itself may make.
///
/// A deployed program acts through its upgrade authority, so `program_authority`
/// is the authority recorded in the program's `ProgramData` account. Immutable
/// programs have none and reject every such call.
pub fn require_self(caller: &Pubkey, program_authority: Option<Pubkey>) -> Result<()> {
    require!(
        program_authority == Some(*caller),
        LotteryError::Unauthorized
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_state_is_inactive_with_default_price() {
        let state = LotteryState::default();
        assert_eq!(state.phase, LotteryPhase::Inactive);
        assert_eq!(state.lottery_id, 0);
        assert!(!state.rollover);
        assert_eq!(state.operator, Pubkey::default());
        assert_eq!(state.effective_ticket_price(), DEFAULT_TICKET_PRICE);
    }

    #[test]
    fn test_price_override_wins_over_default() {
        let state = LotteryState {
            ticket_price: Some(42),
            ..Default::default()
        };
        assert_eq!(state.effective_ticket_price(), 42);
    }

    #[test]
    fn test_next_round_id_reuses_id_on_rollover() {
        let mut state = LotteryState {
            lottery_id: 7,
            ..Default::default()
        };
        assert_eq!(state.next_round_id(), 8);

        state.rollover = true;
        assert_eq!(state.next_round_id(), 7);
    }

    #[test]
    fn test_operator_gate() {
        let operator = Pubkey::new_unique();
        let state = LotteryState {
            operator,
            ..Default::default()
        };

        assert!(state.require_operator(&operator).is_ok());
        assert_eq!(
            state.require_operator(&Pubkey::new_unique()).unwrap_err(),
            Error::from(LotteryError::Unauthorized)
        );
    }

    #[test]
    fn test_self_gate() {
        let authority = Pubkey::new_unique();

        assert!(require_self(&authority, Some(authority)).is_ok());
        assert_eq!(
            require_self(&Pubkey::new_unique(), Some(authority)).unwrap_err(),
            Error::from(LotteryError::Unauthorized)
        );
        // immutable program
        assert_eq!(
            require_self(&authority, None).unwrap_err(),
            Error::from(LotteryError::Unauthorized)
        );
    }

    #[test]
    fn test_phase_gate() {
        let state = LotteryState {
            phase: LotteryPhase::Idle,
            ..Default::default()
        };
        assert!(state.require_phase(LotteryPhase::Idle).is_ok());
        assert_eq!(
            state.require_phase(LotteryPhase::Active).unwrap_err(),
            Error::from(LotteryError::InvalidPhase)
        );
    }
}
