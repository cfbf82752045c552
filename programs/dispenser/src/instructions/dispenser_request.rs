use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::DispenserError;
use crate::events::DispenserRequested;
use crate::state::{
    validate_dispenser_request, AdminAuthority, DispenserRequest, DispenserStatus, DispenserVault,
    Registry,
};

#[derive(Accounts)]
pub struct RequestDispenser<'info> {
    #[account(mut)]
    pub requester: Signer<'info>,

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
        realloc = Registry::space(registry.domains.len() + 1),
        realloc::payer = requester,
        realloc::zero = false,
    )]
    pub registry: Account<'info, Registry>,

    #[account(
        init_if_needed,
        payer = requester,
        space = DispenserVault::space(0),
        seeds = [DISPENSER_SEED, requester.key().as_ref()],
        bump
    )]
    pub dispenser_vault: Account<'info, DispenserVault>,

    /// Holds the activation fee until the admin approves
    #[account(
        mut,
        seeds = [ESCROW_SEED, dispenser_vault.key().as_ref()],
        bump,
    )]
    pub escrow: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}

/// Request a dispenser for `domain`.
///
/// # Operations
/// 1. Validate domain, description and payment
/// 2. Reserve the domain and allocate a dispenser id
/// 3. Open the DispenserVault in pending state
/// 4. Move `paid` lamports into escrow
/// 5. Queue the request for the admin
pub fn request_dispenser(
    ctx: Context<RequestDispenser>,
    domain: String,
    description: String,
    paid: u64,
) -> Result<()> {
    validate_dispenser_request(&domain, &description)?;
    require!(
        paid >= DISPENSER_ACTIVATION_FEE,
        DispenserError::InsufficientFunds
    );
    require!(
        !ctx.accounts.dispenser_vault.is_open(),
        DispenserError::AlreadyExists
    );
    require!(
        ctx.accounts.requester.lamports() >= paid,
        DispenserError::InsufficientFunds
    );

    let requester = ctx.accounts.requester.key();
    let now = Clock::get()?.unix_timestamp;

    let authority = &mut ctx.accounts.admin_authority;
    let dispenser_id = authority.allocate_dispenser_id()?;
    ctx.accounts
        .registry
        .register_domain(&domain, dispenser_id, requester)?;
    authority.enqueue_request(DispenserRequest {
        dispenser_id,
        requester,
        domain: domain.clone(),
        description: description.clone(),
        escrow: paid,
        status: DispenserStatus::Pending,
        requested_at: now,
    })?;

    let dispenser_vault = &mut ctx.accounts.dispenser_vault;
    dispenser_vault.open(
        dispenser_id,
        requester,
        domain.clone(),
        description,
        now,
        ctx.bumps.dispenser_vault,
        ctx.bumps.escrow,
    );

    anchor_lang::system_program::transfer(
        CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            anchor_lang::system_program::Transfer {
                from: ctx.accounts.requester.to_account_info(),
                to: ctx.accounts.escrow.to_account_info(),
            },
        ),
        paid,
    )?;

    msg!("Dispenser {} requested for domain {}", dispenser_id, domain);

    emit!(DispenserRequested {
        dispenser_vault: ctx.accounts.dispenser_vault.key(),
        dispenser_id,
        requester,
        domain,
        escrow: paid,
    });

    Ok(())
}
