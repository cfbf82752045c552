use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::DispenserError;
use crate::events::TicketRequested;
use crate::state::{AdminAuthority, DispenserVault, TicketVault};

#[derive(Accounts)]
pub struct RequestTicket<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        mut,
        seeds = [ADMIN_SEED],
        bump = admin_authority.bump,
    )]
    pub admin_authority: Account<'info, AdminAuthority>,

    #[account(
        init_if_needed,
        payer = user,
        space = TicketVault::space(1, 0, 0),
        seeds = [TICKET_VAULT_SEED, user.key().as_ref()],
        bump
    )]
    pub ticket_vault: Account<'info, TicketVault>,

    /// A new vault is always a new requester
    #[account(
        mut,
        seeds = [DISPENSER_SEED, dispenser_vault.owner.as_ref()],
        bump = dispenser_vault.bump,
        realloc = DispenserVault::space(dispenser_vault.requesters.len() + 1),
        realloc::payer = user,
        realloc::zero = false,
    )]
    pub dispenser_vault: Account<'info, DispenserVault>,

    pub system_program: Program<'info, System>,
}

/// Open the user's TicketVault and file a first ticket request.
///
/// A user has exactly one TicketVault; later requests, for this or any
/// other dispenser, go through `request_more_ticket`.
pub fn request_ticket(ctx: Context<RequestTicket>, dispenser_id: u32) -> Result<()> {
    let user = ctx.accounts.user.key();
    let ticket_vault = &mut ctx.accounts.ticket_vault;
    require!(!ticket_vault.is_open(), DispenserError::AlreadyExists);

    let now = Clock::get()?.unix_timestamp;
    let user_id = ctx.accounts.admin_authority.allocate_user_id()?;
    ticket_vault.open(user, user_id, false, now, ctx.bumps.ticket_vault);

    record_request(
        ticket_vault,
        &mut ctx.accounts.dispenser_vault,
        &user,
        dispenser_id,
        now,
    )
}

/// Files the request in both vaults.
pub(crate) fn record_request(
    ticket_vault: &mut TicketVault,
    dispenser_vault: &mut DispenserVault,
    user: &Pubkey,
    dispenser_id: u32,
    now: i64,
) -> Result<()> {
    dispenser_vault.require_serving(dispenser_id)?;
    let request = ticket_vault.request_ticket(user, dispenser_id, now)?;
    dispenser_vault.register_requester(request);

    msg!("User {} requested tickets from dispenser {}", request.user_id, dispenser_id);

    emit!(TicketRequested {
        dispenser_id,
        user_id: request.user_id,
        requester: *user,
    });

    Ok(())
}
