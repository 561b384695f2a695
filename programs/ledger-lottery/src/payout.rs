use anchor_lang::prelude::*;

use crate::{error::LotteryError, events::*};

/// How a round's pot is divided. Whatever is not paid out stays in the vault.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PayoutSplit {
    pub winner_share: u128,
    pub operator_share: u128,
    pub retained: u128,
}

impl PayoutSplit {
    /// Half to the winner, a quarter to the operator; the rest (a quarter
    /// plus up to three units of rounding) is retained.
    pub fn from_pot(pot: u128) -> Self {
        let winner_share = pot / 2;
        let operator_share = winner_share / 2;
        Self {
            winner_share,
            operator_share,
            retained: pot - winner_share - operator_share,
        }
    }
}

/// A requested transfer out of the lottery vault. Recording an intent is all a
/// payout promises; execution happens after the state transition and its
/// outcome never reaches the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransferIntent {
    pub recipient: Pubkey,
    pub amount: u128,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransferOutcome {
    Sent(u64),
    Skipped,
}

/// Every intent must name one of the writable accounts handed to the instruction.
pub fn verify_recipients(intents: &[TransferIntent], recipients: &[&AccountInfo]) -> Result<()> {
    for intent in intents {
        let supplied = recipients
            .iter()
            .any(|info| *info.key == intent.recipient && info.is_writable);
        require!(supplied, LotteryError::RecipientMismatch);
    }
    Ok(())
}

/// Moves lamports from `vault` for each intent, keeping at least `rent_floor`
/// lamports in the vault. An intent that cannot be honoured is logged and
/// skipped; the others still go through.
pub fn execute_intents(
    round_id: u64,
    vault: &AccountInfo,
    recipients: &[&AccountInfo],
    intents: &[TransferIntent],
    rent_floor: u64,
) -> Result<Vec<TransferOutcome>> {
    let mut outcomes = Vec::with_capacity(intents.len());

    for intent in intents {
        let recipient = recipients
            .iter()
            .find(|info| *info.key == intent.recipient)
            .ok_or(LotteryError::RecipientMismatch)?;

        let outcome = match transferable(vault, recipient, intent.amount, rent_floor) {
            Some(amount) => {
                **vault.try_borrow_mut_lamports()? -= amount;
                **recipient.try_borrow_mut_lamports()? += amount;

                msg!("Paid {} lamports to {}", amount, intent.recipient);
                emit!(PayoutIssued {
                    round_id,
                    recipient: intent.recipient,
                    amount,
                });
                TransferOutcome::Sent(amount)
            }
            None => {
                msg!(
                    "Skipped transfer of {} to {}: vault cannot cover it",
                    intent.amount,
                    intent.recipient
                );
                emit!(TransferSkipped {
                    round_id,
                    recipient: intent.recipient,
                    amount: intent.amount,
                });
                TransferOutcome::Skipped
            }
        };
        outcomes.push(outcome);
    }

    Ok(outcomes)
}

fn transferable(vault: &AccountInfo, recipient: &AccountInfo, amount: u128, rent_floor: u64) -> Option<u64> {
    let amount = u64::try_from(amount).ok()?;
    let spendable = vault.lamports().checked_sub(rent_floor)?;
    if amount > spendable {
        return None;
    }
    recipient.lamports().checked_add(amount)?;
    Some(amount)
}
