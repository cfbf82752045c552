#![allow(unexpected_cfgs)]

use anchor_lang::prelude::*;
use light_sdk::{
    account::LightAccount,
    address::v2::derive_address,
    cpi::{v2::CpiAccounts, CpiSigner, InvokeLightSystemProgram, LightCpiInstruction},
    derive_light_cpi_signer,
    instruction::{PackedAddressTreeInfo, ValidityProof},
};

use crate::constants::*;
use crate::errors::DispenserError;
use crate::events::TicketUsed;
use crate::payment::{pay_split, split, FeePolicy};
use crate::state::{AdminAuthority, DispenserVault, RedemptionNullifier, TicketVault};

pub const LIGHT_CPI_SIGNER: CpiSigner =
    derive_light_cpi_signer!("GCWxrQAa3DuNtxtX7yCBTDto8cqgXFUoTHyMrCzrP1uv");

#[derive(Accounts)]
pub struct UseTicket<'info> {
    #[account(mut)]
    pub holder: Signer<'info>,

    #[account(
        mut,
        seeds = [TICKET_VAULT_SEED, ticket_vault.owner.as_ref()],
        bump = ticket_vault.bump,
    )]
    pub ticket_vault: Account<'info, TicketVault>,

    #[account(
        seeds = [DISPENSER_SEED, dispenser_vault.owner.as_ref()],
        bump = dispenser_vault.bump,
    )]
    pub dispenser_vault: Account<'info, DispenserVault>,

    #[account(
        seeds = [ADMIN_SEED],
        bump = admin_authority.bump,
    )]
    pub admin_authority: Account<'info, AdminAuthority>,

    /// Payout target of the ticket info matching `price`
    #[account(mut)]
    pub payout: SystemAccount<'info>,

    #[account(
        mut,
        address = admin_authority.treasury @ DispenserError::InvalidTreasury,
    )]
    pub treasury: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}

/// Redeem a held ticket.
///
/// # Operations
/// 1. Check the token is held, unused, and `price` is a registered price
/// 2. Pay 97.5% to the payout target and 2.5% to the treasury
/// 3. CREATE the redemption nullifier for (dispenser, token)
/// 4. Mark the token used
#[allow(clippy::too_many_arguments)]
pub fn use_ticket<'info>(
    ctx: Context<'_, '_, '_, 'info, UseTicket<'info>>,
    dispenser_id: u32,
    token_id: u64,
    price: u64,
    proof: ValidityProof,
    address_tree_info: PackedAddressTreeInfo,
    output_state_tree_index: u8,
) -> Result<()> {
    let holder = ctx.accounts.holder.key();
    let dispenser_vault = &ctx.accounts.dispenser_vault;
    require!(
        dispenser_vault.id == dispenser_id,
        DispenserError::UnknownDispenser
    );
    ctx.accounts
        .ticket_vault
        .require_redeemable(&holder, dispenser_id, token_id)?;

    let ticket = dispenser_vault
        .ticket_for_price(price)
        .ok_or(DispenserError::AmountMismatch)?;
    require_keys_eq!(
        ctx.accounts.payout.key(),
        ticket.payout_target,
        DispenserError::InvalidPayoutTarget
    );

    let shares = split(price, FeePolicy::REDEMPTION)?;
    pay_split(
        &ctx.accounts.holder,
        &ctx.accounts.payout,
        &ctx.accounts.treasury,
        &ctx.accounts.system_program,
        shares,
    )?;

    let now = Clock::get()?.unix_timestamp;

    // --- Redemption nullifier ---
    let light_cpi_accounts = CpiAccounts::new(
        ctx.accounts.holder.as_ref(),
        ctx.remaining_accounts,
        LIGHT_CPI_SIGNER,
    );

    let address_tree_pubkey = address_tree_info
        .get_tree_pubkey(&light_cpi_accounts)
        .map_err(|_| DispenserError::InvalidAddressTree)?;

    #[cfg(not(feature = "test-mode"))]
    if address_tree_pubkey.to_bytes() != light_sdk_types::ADDRESS_TREE_V2 {
        msg!("Invalid address tree: must use Address Tree V2");
        return Err(ProgramError::InvalidAccountData.into());
    }

    let (nullifier_address, nullifier_seed) = derive_address(
        &[
            REDEMPTION_SEED,
            &dispenser_id.to_le_bytes(),
            &token_id.to_le_bytes(),
        ],
        &address_tree_pubkey,
        &crate::ID,
    );

    let mut nullifier = LightAccount::<RedemptionNullifier>::new_init(
        &crate::ID,
        Some(nullifier_address),
        output_state_tree_index,
    );
    nullifier.dispenser_id = dispenser_id;
    nullifier.token_id = token_id;
    nullifier.redeemed_at = now;

    use light_sdk::cpi::v2::LightSystemProgramCpi;

    let nullifier_params =
        address_tree_info.into_new_address_params_assigned_packed(nullifier_seed, Some(0));

    LightSystemProgramCpi::new_cpi(LIGHT_CPI_SIGNER, proof)
        .with_light_account(nullifier)?
        .with_new_addresses(&[nullifier_params])
        .invoke(light_cpi_accounts)?;

    ctx.accounts
        .ticket_vault
        .mark_used(dispenser_id, token_id, now)?;

    msg!("Ticket {} of dispenser {} used", token_id, dispenser_id);

    emit!(TicketUsed {
        dispenser_id,
        token_id,
        holder,
        organizer_share: shares.organizer_share,
        fee_share: shares.fee_share,
        used_at: now,
    });

    Ok(())
}
