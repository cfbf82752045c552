//! Growing program accounts that are not covered by a `realloc` constraint:
//! vaults passed through `remaining_accounts`, and vaults that may have
//! just been created by `init_if_needed`.

use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Transfer};

/// Resizes `account` to at least `space` bytes, topping its rent up from
/// `payer`. Never shrinks.
pub fn grow_account<'info>(
    account: &AccountInfo<'info>,
    payer: &AccountInfo<'info>,
    system_program: &AccountInfo<'info>,
    space: usize,
) -> Result<()> {
    if space <= account.data_len() {
        return Ok(());
    }

    let rent_due = Rent::get()?
        .minimum_balance(space)
        .saturating_sub(account.lamports());
    if rent_due > 0 {
        system_program::transfer(
            CpiContext::new(
                system_program.clone(),
                Transfer {
                    from: payer.clone(),
                    to: account.clone(),
                },
            ),
            rent_due,
        )?;
    }

    #[allow(deprecated)]
    account.realloc(space, false)?;
    Ok(())
}
