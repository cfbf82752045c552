use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::DispenserError;
use crate::events::Crowdfunded;
use crate::payment::{pay_split, split, FeePolicy};
use crate::realloc::grow_account;
use crate::state::{AdminAuthority, DispenserVault, TicketVault};

#[derive(Accounts)]
pub struct Crowdfund<'info> {
    #[account(mut)]
    pub backer: Signer<'info>,

    #[account(
        mut,
        seeds = [ADMIN_SEED],
        bump = admin_authority.bump,
    )]
    pub admin_authority: Account<'info, AdminAuthority>,

    #[account(
        init_if_needed,
        payer = backer,
        space = TicketVault::space(0, 0, 1),
        seeds = [TICKET_VAULT_SEED, backer.key().as_ref()],
        bump
    )]
    pub ticket_vault: Account<'info, TicketVault>,

    #[account(
        seeds = [DISPENSER_SEED, dispenser_vault.owner.as_ref()],
        bump = dispenser_vault.bump,
    )]
    pub dispenser_vault: Account<'info, DispenserVault>,

    #[account(
        mut,
        address = dispenser_vault.owner @ DispenserError::InvalidPayoutTarget,
    )]
    pub organizer: SystemAccount<'info>,

    #[account(
        mut,
        address = admin_authority.treasury @ DispenserError::InvalidTreasury,
    )]
    pub treasury: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}

/// Fund an organizer directly. No ticket is issued.
///
/// The first contribution opens the backer's TicketVault in crowdfunding
/// mode; later ones reuse it and accumulate. Backing a new dispenser grows
/// the vault at the backer's expense.
pub fn crowdfunding(ctx: Context<Crowdfund>, dispenser_id: u32, fund: u64) -> Result<()> {
    ctx.accounts.dispenser_vault.require_serving(dispenser_id)?;
    require!(fund > 0, DispenserError::InvalidPrice);
    let shares = split(fund, FeePolicy::CROWDFUNDING)?;

    let backer = ctx.accounts.backer.key();
    let now = Clock::get()?.unix_timestamp;
    let ticket_vault = &mut ctx.accounts.ticket_vault;
    if !ticket_vault.is_open() {
        let user_id = ctx.accounts.admin_authority.allocate_user_id()?;
        ticket_vault.open(backer, user_id, true, now, ctx.bumps.ticket_vault);
    }
    ticket_vault.crowdfund(&backer, dispenser_id, fund, now)?;
    let space = ticket_vault.required_space();
    grow_account(
        &ctx.accounts.ticket_vault.to_account_info(),
        &ctx.accounts.backer.to_account_info(),
        &ctx.accounts.system_program.to_account_info(),
        space,
    )?;

    pay_split(
        &ctx.accounts.backer,
        &ctx.accounts.organizer,
        &ctx.accounts.treasury,
        &ctx.accounts.system_program,
        shares,
    )?;

    msg!("Crowdfunded dispenser {} with {} lamports", dispenser_id, fund);

    emit!(Crowdfunded {
        dispenser_id,
        backer,
        organizer_share: shares.organizer_share,
        fee_share: shares.fee_share,
    });

    Ok(())
}
