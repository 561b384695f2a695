use anchor_lang::prelude::*;
use switchboard_on_demand::accounts::RandomnessAccountData;

use crate::error::LotteryError;

/// Entropy consumed by the draw. It is only asked for a value once the draw
/// is known to happen, so a voided round never needs revealed randomness.
pub trait RandomSource {
    fn next_u64(&mut self) -> Result<u64>;
}

/// Randomness revealed by a Switchboard On-Demand account that the operator
/// committed before the sale window closed.
pub struct SwitchboardRandomness<'a, 'info> {
    pub account: &'a AccountInfo<'info>,
    pub committed: Pubkey,
    pub slot: u64,
}

impl RandomSource for SwitchboardRandomness<'_, '_> {
    fn next_u64(&mut self) -> Result<u64> {
        require_keys_eq!(
            *self.account.key,
            self.committed,
            LotteryError::IncorrectRandomnessAccount
        );

        let randomness_data = RandomnessAccountData::parse(self.account.data.borrow())
            .map_err(|_| error!(LotteryError::RandomnessNotResolved))?;
        require!(
            randomness_data.reveal_slot == self.slot,
            LotteryError::RandomnessNotResolved
        );

        Ok(roll_from_bytes(&randomness_data.value))
    }
}

/// First eight revealed bytes, little endian.
pub fn roll_from_bytes(value: &[u8; 32]) -> u64 {
    let mut roll = [0u8; 8];
    roll.copy_from_slice(&value[..8]);
    u64::from_le_bytes(roll)
}

/// Whether a randomness account seeded at `seed_slot` can still be committed
/// at `current_slot`: it must have been seeded in the slot right before.
pub fn is_fresh_commitment(seed_slot: u64, current_slot: u64) -> bool {
    current_slot.checked_sub(1) == Some(seed_slot)
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::collections::VecDeque;

    /// Replays a fixed list of rolls.
    pub struct FixedRolls(pub VecDeque<u64>);

    impl FixedRolls {
        pub fn new(rolls: &[u64]) -> Self {
            Self(rolls.iter().copied().collect())
        }
    }

    impl RandomSource for FixedRolls {
        fn next_u64(&mut self) -> Result<u64> {
            self.0
                .pop_front()
                .ok_or_else(|| error!(LotteryError::RandomnessNotResolved))
        }
    }
}
