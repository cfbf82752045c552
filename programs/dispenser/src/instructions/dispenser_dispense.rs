use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::DispenserError;
use crate::events::DispenserDispensed;
use crate::state::{AdminAuthority, DispenserVault, Registry};

#[derive(Accounts)]
#[instruction(organizer: Pubkey)]
pub struct DispenseDispenser<'info> {
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [ADMIN_SEED],
        bump = admin_authority.bump,
    )]
    pub admin_authority: Account<'info, AdminAuthority>,

    #[account(
        mut,
        seeds = [REGISTRY_SEED],
        bump = registry.bump,
    )]
    pub registry: Account<'info, Registry>,

    #[account(
        mut,
        seeds = [DISPENSER_SEED, organizer.as_ref()],
        bump = dispenser_vault.bump,
    )]
    pub dispenser_vault: Account<'info, DispenserVault>,

    #[account(
        mut,
        seeds = [ESCROW_SEED, dispenser_vault.key().as_ref()],
        bump = dispenser_vault.escrow_bump,
    )]
    pub escrow: SystemAccount<'info>,

    #[account(
        mut,
        address = admin_authority.treasury @ DispenserError::InvalidTreasury,
    )]
    pub treasury: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}

/// Approve `organizer`'s pending dispenser and activate it.
///
/// The activation grant minted by the admin authority is handed straight to
/// the vault, so it is consumed in the same instruction. The escrowed fee is
/// released to the treasury.
pub fn dispense_dispenser(ctx: Context<DispenseDispenser>, organizer: Pubkey) -> Result<()> {
    let admin = ctx.accounts.admin.key();
    let dispenser_vault_key = ctx.accounts.dispenser_vault.key();
    let dispenser_vault = &mut ctx.accounts.dispenser_vault;
    let dispenser_id = dispenser_vault.id;

    let grant = ctx
        .accounts
        .admin_authority
        .approve_and_mint(&admin, dispenser_id, organizer)?;
    dispenser_vault.activate(grant, Clock::get()?.unix_timestamp)?;
    ctx.accounts.registry.activate(dispenser_id)?;

    let escrow_balance = ctx.accounts.escrow.lamports();
    if escrow_balance > 0 {
        let escrow_seeds: &[&[u8]] = &[
            ESCROW_SEED,
            dispenser_vault_key.as_ref(),
            &[dispenser_vault.escrow_bump],
        ];

        anchor_lang::system_program::transfer(
            CpiContext::new_with_signer(
                ctx.accounts.system_program.to_account_info(),
                anchor_lang::system_program::Transfer {
                    from: ctx.accounts.escrow.to_account_info(),
                    to: ctx.accounts.treasury.to_account_info(),
                },
                &[escrow_seeds],
            ),
            escrow_balance,
        )?;
    }

    msg!("Dispenser {} dispensed to {}", dispenser_id, organizer);

    emit!(DispenserDispensed {
        dispenser_vault: dispenser_vault_key,
        dispenser_id,
        owner: organizer,
        admin,
        released_escrow: escrow_balance,
    });

    Ok(())
}
