use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::DispenserError;
use crate::events::TicketRequestReviewed;
use crate::state::{AdminAuthority, DispenserVault, TicketVault};

#[derive(Accounts)]
pub struct ReviewTicketRequest<'info> {
    /// Dispenser owner or platform admin
    pub reviewer: Signer<'info>,

    #[account(
        seeds = [ADMIN_SEED],
        bump = admin_authority.bump,
    )]
    pub admin_authority: Account<'info, AdminAuthority>,

    #[account(
        mut,
        seeds = [DISPENSER_SEED, dispenser_vault.owner.as_ref()],
        bump = dispenser_vault.bump,
    )]
    pub dispenser_vault: Account<'info, DispenserVault>,

    #[account(
        mut,
        seeds = [TICKET_VAULT_SEED, ticket_vault.owner.as_ref()],
        bump = ticket_vault.bump,
    )]
    pub ticket_vault: Account<'info, TicketVault>,
}

/// Approve or deny a user's pending ticket request. The decision is
/// written to both vaults.
pub fn review_ticket_request(
    ctx: Context<ReviewTicketRequest>,
    user_id: u32,
    approve: bool,
) -> Result<()> {
    let reviewer = ctx.accounts.reviewer.key();
    let ticket_vault = &mut ctx.accounts.ticket_vault;
    require!(
        ticket_vault.user_id == user_id,
        DispenserError::RecipientMismatch
    );

    let dispenser_vault = &mut ctx.accounts.dispenser_vault;
    let status = dispenser_vault.review_request(
        &reviewer,
        &ctx.accounts.admin_authority.admin,
        user_id,
        approve,
    )?;
    ticket_vault.set_request_status(dispenser_vault.id, status)?;

    msg!(
        "Request of user {} for dispenser {} reviewed: {:?}",
        user_id,
        dispenser_vault.id,
        status
    );

    emit!(TicketRequestReviewed {
        dispenser_id: dispenser_vault.id,
        user_id,
        reviewer,
        status,
    });

    Ok(())
}
