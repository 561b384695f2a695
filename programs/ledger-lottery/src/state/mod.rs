pub mod ledger;
pub mod lottery;
pub mod round;

pub use ledger::*;
pub use lottery::*;
pub use round::*;

use anchor_lang::prelude::*;

use crate::error::LotteryError;

/// Reads a program account that may not have been created yet.
///
/// The account must sit at `expected`; an empty account reads as `None`.
pub fn load_optional<T: AccountDeserialize>(
    info: &AccountInfo,
    expected: &Pubkey,
) -> Result<Option<T>> {
    require_keys_eq!(*info.key, *expected, LotteryError::UnexpectedAccount);
    if info.data_is_empty() {
        return Ok(None);
    }
    require_keys_eq!(*info.owner, crate::ID, LotteryError::UnexpectedAccount);

    let data = info.try_borrow_data()?;
    T::try_deserialize(&mut &data[..]).map(Some)
}
