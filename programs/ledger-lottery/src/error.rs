use anchor_lang::prelude::*;

#[error_code]
pub enum LotteryError {
    // Access & phase
    #[msg("Caller is not allowed to perform this action")]
    Unauthorized,

    #[msg("Current lottery phase does not allow this action")]
    InvalidPhase,

    #[msg("Lottery has already been initialized")]
    AlreadyInitialized,

    // Ticket sales
    #[msg("Attached payment does not match ticket price times ticket count")]
    PaymentMismatch,

    #[msg("Lottery has already ended")]
    LotteryEnded,

    #[msg("Ticket count must be greater than zero")]
    InvalidTicketCount,

    #[msg("Round ledger has no room for another purchase or player")]
    LedgerFull,

    // Draw
    #[msg("Lottery has not ended yet")]
    TooEarly,

    #[msg("Randomness account does not match the committed one")]
    IncorrectRandomnessAccount,

    #[msg("Randomness has already been revealed")]
    RandomnessAlreadyRevealed,

    #[msg("A randomness account is already committed for this round")]
    RandomnessAlreadyCommitted,

    #[msg("Randomness is not revealed for the current slot")]
    RandomnessNotResolved,

    #[msg("Drawn ticket has no recorded owner")]
    InvariantViolation,

    // Payout & accounts
    #[msg("Recipient account does not match the payout")]
    RecipientMismatch,

    #[msg("Account is not at the expected lottery address")]
    UnexpectedAccount,

    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,
}
