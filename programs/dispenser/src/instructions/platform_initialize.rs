use anchor_lang::prelude::*;

use crate::constants::*;
use crate::state::{AdminAuthority, Registry};

#[derive(Accounts)]
pub struct Initialize<'info> {
    /// Becomes the platform admin
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        init,
        payer = admin,
        space = 8 + AdminAuthority::INIT_SPACE,
        seeds = [ADMIN_SEED],
        bump
    )]
    pub admin_authority: Account<'info, AdminAuthority>,

    #[account(
        init,
        payer = admin,
        space = Registry::space(0),
        seeds = [REGISTRY_SEED],
        bump
    )]
    pub registry: Account<'info, Registry>,

    pub system_program: Program<'info, System>,
}

/// One-time setup of the admin authority and the domain registry.
pub fn initialize(ctx: Context<Initialize>, treasury: Pubkey) -> Result<()> {
    let authority = &mut ctx.accounts.admin_authority;
    authority.admin = ctx.accounts.admin.key();
    authority.treasury = treasury;
    authority.next_dispenser_id = 1;
    authority.next_user_id = 1;
    authority.pending = Vec::new();
    authority.bump = ctx.bumps.admin_authority;

    let registry = &mut ctx.accounts.registry;
    registry.domains = Vec::new();
    registry.bump = ctx.bumps.registry;

    msg!("Platform initialized, admin {}", authority.admin);

    Ok(())
}
