use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod payment;
pub mod realloc;
pub mod state;
pub mod view;

#[cfg(test)]
mod test_utils;

use instructions::*;
use light_sdk::instruction::{PackedAddressTreeInfo, ValidityProof};

declare_id!("GCWxrQAa3DuNtxtX7yCBTDto8cqgXFUoTHyMrCzrP1uv");

#[program]
pub mod dispenser {
    use super::*;

    pub fn initialize(ctx: Context<Initialize>, treasury: Pubkey) -> Result<()> {
        instructions::initialize(ctx, treasury)
    }

    pub fn request_dispenser(
        ctx: Context<RequestDispenser>,
        domain: String,
        description: String,
        paid: u64,
    ) -> Result<()> {
        instructions::request_dispenser(ctx, domain, description, paid)
    }

    pub fn dispense_dispenser(ctx: Context<DispenseDispenser>, organizer: Pubkey) -> Result<()> {
        instructions::dispense_dispenser(ctx, organizer)
    }

    pub fn set_secret_code(ctx: Context<SetSecretCode>, secret_code: String) -> Result<()> {
        instructions::set_secret_code(ctx, secret_code)
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
        instructions::add_ticket_info(ctx, ticket_type, name, location, schedule, price, payout_target)
    }

    pub fn update_ticket_info(
        ctx: Context<UpdateTicketInfo>,
        index: u32,
        ticket_type: u8,
        name: String,
        location: String,
        schedule: String,
        price: u64,
    ) -> Result<()> {
        instructions::update_ticket_info(ctx, index, ticket_type, name, location, schedule, price)
    }

    pub fn request_ticket(ctx: Context<RequestTicket>, dispenser_id: u32) -> Result<()> {
        instructions::request_ticket(ctx, dispenser_id)
    }

    pub fn request_more_ticket(ctx: Context<RequestMoreTicket>, dispenser_id: u32) -> Result<()> {
        instructions::request_more_ticket(ctx, dispenser_id)
    }

    pub fn review_ticket_request(
        ctx: Context<ReviewTicketRequest>,
        user_id: u32,
        approve: bool,
    ) -> Result<()> {
        instructions::review_ticket_request(ctx, user_id, approve)
    }

    pub fn dispense_ticket<'info>(
        ctx: Context<'_, '_, 'info, 'info, DispenseTicket<'info>>,
        user_ids: Vec<u32>,
        secret_code: String,
    ) -> Result<()> {
        instructions::dispense_ticket(ctx, user_ids, secret_code)
    }

    pub fn use_ticket<'info>(
        ctx: Context<'_, '_, '_, 'info, UseTicket<'info>>,
        dispenser_id: u32,
        token_id: u64,
        price: u64,
        proof: ValidityProof,
        address_tree_info: PackedAddressTreeInfo,
        output_state_tree_index: u8,
    ) -> Result<()> {
        instructions::use_ticket(
            ctx,
            dispenser_id,
            token_id,
            price,
            proof,
            address_tree_info,
            output_state_tree_index,
        )
    }

    pub fn crowdfunding(ctx: Context<Crowdfund>, dispenser_id: u32, fund: u64) -> Result<()> {
        instructions::crowdfunding(ctx, dispenser_id, fund)
    }
}
