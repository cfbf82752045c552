use anchor_lang::prelude::*;

use crate::constants::DISPENSER_SEED;
use crate::events::SecretCodeSet;
use crate::state::DispenserVault;

#[derive(Accounts)]
pub struct SetSecretCode<'info> {
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [DISPENSER_SEED, dispenser_vault.owner.as_ref()],
        bump = dispenser_vault.bump,
    )]
    pub dispenser_vault: Account<'info, DispenserVault>,
}

/// Configure the code that gates ticket minting. Only its hash is stored;
/// setting it again rotates the code.
pub fn set_secret_code(ctx: Context<SetSecretCode>, secret_code: String) -> Result<()> {
    let dispenser_vault = &mut ctx.accounts.dispenser_vault;
    dispenser_vault.set_secret_code(&ctx.accounts.owner.key(), &secret_code)?;

    emit!(SecretCodeSet {
        dispenser_id: dispenser_vault.id,
    });

    Ok(())
}
