use anchor_lang::prelude::*;

use crate::{
    constants::*,
    error::LotteryError,
    events::*,
    machine::{self, CallEnvelope},
    program::LedgerLottery,
    state::*,
};

/// Accounts required to initialize the lottery.
/// Only the program's upgrade authority may call this; it creates the
/// singleton state account on first use.
#[derive(Accounts)]
pub struct Initialize<'info> {
    /// The program's upgrade authority, paying for the state account.
    #[account(mut)]
    pub authority: Signer<'info>,

    /// The singleton lottery state, also the vault holding every round's pot.
    #[account(
        init_if_needed,
        payer = authority,
        space = DISCRIMINATOR_SIZE + LotteryState::INIT_SPACE,
        seeds = [LOTTERY_SEED],
        bump
    )]
    pub lottery: Box<Account<'info, LotteryState>>,

    #[account(
        constraint = program.programdata_address()? == Some(program_data.key())
            @ LotteryError::UnexpectedAccount
    )]
    pub program: Program<'info, LedgerLottery>,

    /// Holds the upgrade authority checked against `authority`.
    pub program_data: Account<'info, ProgramData>,

    /// System program to create accounts.
    pub system_program: Program<'info, System>,
}

/// Accounts required to replace the operator.
#[derive(Accounts)]
pub struct NewOperator<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [LOTTERY_SEED],
        bump = lottery.bump
    )]
    pub lottery: Box<Account<'info, LotteryState>>,

    #[account(
        constraint = program.programdata_address()? == Some(program_data.key())
            @ LotteryError::UnexpectedAccount
    )]
    pub program: Program<'info, LedgerLottery>,

    pub program_data: Account<'info, ProgramData>,
}

/// Moves the lottery out of `Inactive` and hands control to `operator`.
///
/// # Arguments
/// * `ctx` - Context holding the Initialize accounts
/// * `operator` - Account allowed to start rounds, draw and pay out
pub fn process_initialize(ctx: Context<Initialize>, operator: Pubkey) -> Result<()> {
    let env = CallEnvelope {
        caller: ctx.accounts.authority.key(),
        now: Clock::get()?.unix_timestamp,
    };
    let program_authority = ctx.accounts.program_data.upgrade_authority_address;

    machine::initialize(&mut ctx.accounts.lottery, &env, program_authority, operator)?;
    ctx.accounts.lottery.bump = ctx.bumps.lottery;

    emit!(LotteryInitialized { operator });
    Ok(())
}

/// Replaces the operator. Only allowed between rounds.
pub fn process_new_operator(ctx: Context<NewOperator>, operator: Pubkey) -> Result<()> {
    let env = CallEnvelope {
        caller: ctx.accounts.authority.key(),
        now: Clock::get()?.unix_timestamp,
    };
    let program_authority = ctx.accounts.program_data.upgrade_authority_address;

    let previous =
        machine::new_operator(&mut ctx.accounts.lottery, &env, program_authority, operator)?;

    emit!(OperatorChanged { previous, operator });
    Ok(())
}
