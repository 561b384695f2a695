use anchor_lang::prelude::*;

#[event]
pub struct LotteryInitialized {
    pub operator: Pubkey,
}

#[event]
pub struct OperatorChanged {
    pub previous: Pubkey,
    pub operator: Pubkey,
}

#[event]
pub struct LotteryStarted {
    pub round_id: u64,
    pub restarted: bool,
    pub ticket_price: u128,
    pub start_time: i64,
    pub end_time: i64,
}

#[event]
pub struct TicketsPurchased {
    pub round_id: u64,
    pub buyer: Pubkey,
    pub first_ticket: u32,
    pub count: u32,
    pub payment: u64,
}

#[event]
pub struct RandomnessCommitted {
    pub round_id: u64,
    pub randomness_account: Pubkey,
}

#[event]
pub struct RoundVoided {
    pub round_id: u64,
    pub tickets_sold: u32,
    pub players_count: u32,
}

#[event]
pub struct WinnerDrawn {
    pub round_id: u64,
    pub winning_ticket_index: u32,
    pub winner: Pubkey,
}

#[event]
pub struct PayoutIssued {
    pub round_id: u64,
    pub recipient: Pubkey,
    pub amount: u64,
}

#[event]
pub struct TransferSkipped {
    pub round_id: u64,
    pub recipient: Pubkey,
    pub amount: u128,
}
