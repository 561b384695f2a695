use anchor_lang::prelude::*;

use crate::{
    constants::*,
    machine::{self, CallEnvelope},
    payout::{execute_intents, verify_recipients},
    state::*,
};

/// Accounts required to pay out a drawn round.
///
/// Ensures:
/// 1. Only the operator can trigger the payout.
/// 2. The winner account supplied is the drawn winner.
/// 3. Lamports move out of the lottery account after the phase returns to idle.
#[derive(Accounts)]
pub struct PayoutWinner<'info> {
    /// The operator, receiving the operator share.
    #[account(mut)]
    pub operator: Signer<'info>,

    /// The main lottery state account, paying both shares.
    #[account(
        mut,
        seeds = [LOTTERY_SEED],
        bump = lottery.bump
    )]
    pub lottery: Box<Account<'info, LotteryState>>,

    #[account(
        seeds = [ROUND_SEED, lottery.lottery_id.to_le_bytes().as_ref()],
        bump = round.bump
    )]
    pub round: Box<Account<'info, Round>>,

    /// The drawn winner.
    /// CHECK: Only receives lamports; its key is matched against the round's winner.
    #[account(mut)]
    pub winner: UncheckedAccount<'info>,
}

/// Splits the pot of the drawn round between the winner and the operator.
///
/// Steps:
/// 1. Move the lottery back to idle and compute both shares.
/// 2. Check the supplied accounts are the recipients of those shares.
/// 3. Transfer each share the lottery account can cover above its rent reserve.
///
/// # Arguments
/// * `ctx` - Context containing `PayoutWinner` accounts
pub fn process_payout_winner(ctx: Context<PayoutWinner>) -> Result<()> {
    let env = CallEnvelope {
        caller: ctx.accounts.operator.key(),
        now: Clock::get()?.unix_timestamp,
    };

    let plan = machine::payout_winner(&mut ctx.accounts.lottery, &ctx.accounts.round, &env)?;

    let vault = ctx.accounts.lottery.to_account_info();
    let winner = ctx.accounts.winner.to_account_info();
    let operator = ctx.accounts.operator.to_account_info();
    let recipients = [&winner, &operator];
    verify_recipients(&plan.intents, &recipients)?;

    let rent_floor = Rent::get()?.minimum_balance(vault.data_len());
    execute_intents(
        ctx.accounts.round.id,
        &vault,
        &recipients,
        &plan.intents,
        rent_floor,
    )?;

    Ok(())
}
