use anchor_lang::prelude::*;

use crate::constants::DISPENSER_SEED;
use crate::events::TicketInfoUpdated;
use crate::state::{DispenserVault, TicketDetails};

#[derive(Accounts)]
pub struct UpdateTicketInfo<'info> {
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [DISPENSER_SEED, dispenser_vault.owner.as_ref()],
        bump = dispenser_vault.bump,
    )]
    pub dispenser_vault: Account<'info, DispenserVault>,
}

/// Update the ticket info at `index`. The payout target is kept.
pub fn update_ticket_info(
    ctx: Context<UpdateTicketInfo>,
    index: u32,
    ticket_type: u8,
    name: String,
    location: String,
    schedule: String,
    price: u64,
) -> Result<()> {
    let dispenser_vault = &mut ctx.accounts.dispenser_vault;
    dispenser_vault.update_ticket_info(
        &ctx.accounts.owner.key(),
        index,
        TicketDetails {
            ticket_type,
            name,
            location,
            schedule,
            price,
        },
    )?;

    emit!(TicketInfoUpdated {
        dispenser_id: dispenser_vault.id,
        index,
        price,
    });

    Ok(())
}
