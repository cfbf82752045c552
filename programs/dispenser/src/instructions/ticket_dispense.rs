use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::DispenserError;
use crate::events::TicketDispensed;
use crate::realloc::grow_account;
use crate::state::{DispenserVault, TicketVault};

#[derive(Accounts)]
pub struct DispenseTicket<'info> {
    /// Funds the room each delivered ticket takes in its TicketVault
    #[account(mut)]
    pub organizer: Signer<'info>,

    #[account(
        mut,
        seeds = [DISPENSER_SEED, dispenser_vault.owner.as_ref()],
        bump = dispenser_vault.bump,
    )]
    pub dispenser_vault: Account<'info, DispenserVault>,

    pub system_program: Program<'info, System>,
    // remaining_accounts: one writable TicketVault per entry of `user_ids`,
    // in the same order
}

/// Mint one ticket for each listed user and deliver it to their TicketVault.
///
/// The batch is all-or-nothing: a user without an approved request, a
/// wrong secret code or a mismatched vault aborts the whole instruction.
pub fn dispense_ticket<'info>(
    ctx: Context<'_, '_, 'info, 'info, DispenseTicket<'info>>,
    user_ids: Vec<u32>,
    secret_code: String,
) -> Result<()> {
    let organizer = ctx.accounts.organizer.key();
    let payer = ctx.accounts.organizer.to_account_info();
    let system_program = ctx.accounts.system_program.to_account_info();
    let dispenser_vault = &mut ctx.accounts.dispenser_vault;
    dispenser_vault.require_owner(&organizer)?;
    require!(
        dispenser_vault.is_active(),
        DispenserError::DispenserNotActive
    );
    require!(
        ctx.remaining_accounts.len() == user_ids.len(),
        DispenserError::RecipientMismatch
    );

    for (user_id, vault_info) in user_ids.iter().zip(ctx.remaining_accounts.iter()) {
        require!(vault_info.is_writable, DispenserError::RecipientMismatch);
        let mut ticket_vault: Account<'info, TicketVault> = Account::try_from(vault_info)?;
        require!(
            ticket_vault.user_id == *user_id,
            DispenserError::RecipientMismatch
        );
        let expected = Pubkey::create_program_address(
            &[
                TICKET_VAULT_SEED,
                ticket_vault.owner.as_ref(),
                &[ticket_vault.bump],
            ],
            &crate::ID,
        )
        .map_err(|_| error!(DispenserError::RecipientMismatch))?;
        require_keys_eq!(
            expected,
            vault_info.key(),
            DispenserError::RecipientMismatch
        );

        let token = dispenser_vault
            .mint_ticket(&secret_code, *user_id)?
            .ok_or(DispenserError::UnknownRequest)?;
        let token_id = token.token_id();
        ticket_vault.deposit(token)?;
        grow_account(
            vault_info,
            &payer,
            &system_program,
            ticket_vault.required_space(),
        )?;
        ticket_vault.exit(&crate::ID)?;

        emit!(TicketDispensed {
            dispenser_id: dispenser_vault.id,
            user_id: *user_id,
            token_id,
        });
    }

    msg!(
        "Dispensed {} tickets, latest token {}",
        user_ids.len(),
        dispenser_vault.latest_token_id
    );

    Ok(())
}
