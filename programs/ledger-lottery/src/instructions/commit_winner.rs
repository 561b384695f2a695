use anchor_lang::prelude::*;
use switchboard_on_demand::accounts::RandomnessAccountData;

use crate::{
    constants::*,
    error::LotteryError,
    events::*,
    machine::{self, CallEnvelope},
    state::*,
};

/// Accounts required to commit a randomness account for the current round.
///
/// Ensures:
/// 1. Only the operator can commit the randomness.
/// 2. The randomness account was seeded in the previous slot, so its value
///    cannot have been revealed yet.
#[derive(Accounts)]
pub struct CommitRandomness<'info> {
    pub operator: Signer<'info>,

    #[account(
        mut,
        seeds = [LOTTERY_SEED],
        bump = lottery.bump
    )]
    pub lottery: Box<Account<'info, LotteryState>>,

    /// Randomness account from Switchboard.
    /// CHECK: The account's data is validated manually within the handler.
    pub randomness_account_data: UncheckedAccount<'info>,
}

pub fn process_commit_randomness(ctx: Context<CommitRandomness>) -> Result<()> {
    let clock = Clock::get()?;
    let env = CallEnvelope {
        caller: ctx.accounts.operator.key(),
        now: clock.unix_timestamp,
    };
    let randomness_account = ctx.accounts.randomness_account_data.key();

    let seed_slot = RandomnessAccountData::parse(ctx.accounts.randomness_account_data.data.borrow())
        .map_err(|_| error!(LotteryError::IncorrectRandomnessAccount))?
        .seed_slot;

    machine::commit_randomness(
        &mut ctx.accounts.lottery,
        &env,
        randomness_account,
        seed_slot,
        clock.slot,
    )?;

    emit!(RandomnessCommitted {
        round_id: ctx.accounts.lottery.lottery_id,
        randomness_account,
    });
    Ok(())
}
