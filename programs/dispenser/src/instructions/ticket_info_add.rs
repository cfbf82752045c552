use anchor_lang::prelude::*;

use crate::constants::DISPENSER_SEED;
use crate::events::TicketInfoAdded;
use crate::state::{DispenserVault, TicketDetails};

#[derive(Accounts)]
pub struct AddTicketInfo<'info> {
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [DISPENSER_SEED, dispenser_vault.owner.as_ref()],
        bump = dispenser_vault.bump,
    )]
    pub dispenser_vault: Account<'info, DispenserVault>,
}

pub fn add_ticket_info(
    ctx: Context<AddTicketInfo>,
    ticket_type: u8,
    name: String,
    location: String,
    schedule: String,
    price: u64,
    payout_target: Pubkey,
) -> Result<()> {
    let dispenser_vault = &mut ctx.accounts.dispenser_vault;
    let index = dispenser_vault.add_ticket_info(
        &ctx.accounts.owner.key(),
        TicketDetails {
            ticket_type,
            name,
            location,
            schedule,
            price,
        },
        payout_target,
    )?;

    msg!("Ticket info {} registered at {} lamports", index, price);

    emit!(TicketInfoAdded {
        dispenser_id: dispenser_vault.id,
        index,
        price,
    });

    Ok(())
}
