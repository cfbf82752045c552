use anchor_lang::prelude::*;

use crate::constants::*;
use crate::instructions::ticket_request::record_request;
use crate::state::{DispenserVault, TicketVault};

#[derive(Accounts)]
#[instruction(dispenser_id: u32)]
pub struct RequestMoreTicket<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        mut,
        seeds = [TICKET_VAULT_SEED, ticket_vault.owner.as_ref()],
        bump = ticket_vault.bump,
        realloc = ticket_vault.space_with_request(dispenser_id),
        realloc::payer = user,
        realloc::zero = false,
    )]
    pub ticket_vault: Account<'info, TicketVault>,

    #[account(
        mut,
        seeds = [DISPENSER_SEED, dispenser_vault.owner.as_ref()],
        bump = dispenser_vault.bump,
        realloc = dispenser_vault.space_with_requester(ticket_vault.user_id),
        realloc::payer = user,
        realloc::zero = false,
    )]
    pub dispenser_vault: Account<'info, DispenserVault>,

    pub system_program: Program<'info, System>,
}

/// Request tickets with an existing TicketVault. Repeating the request
/// renews it as pending; there is no limit on renewals.
pub fn request_more_ticket(ctx: Context<RequestMoreTicket>, dispenser_id: u32) -> Result<()> {
    record_request(
        &mut ctx.accounts.ticket_vault,
        &mut ctx.accounts.dispenser_vault,
        &ctx.accounts.user.key(),
        dispenser_id,
        Clock::get()?.unix_timestamp,
    )
}
