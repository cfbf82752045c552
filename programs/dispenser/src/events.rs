use anchor_lang::prelude::*;

use crate::state::RequestStatus;

#[event]
pub struct DispenserRequested {
    pub dispenser_vault: Pubkey,
    pub dispenser_id: u32,
    pub requester: Pubkey,
    pub domain: String,
    pub escrow: u64,
}

#[event]
pub struct DispenserDispensed {
    pub dispenser_vault: Pubkey,
    pub dispenser_id: u32,
    pub owner: Pubkey,
    pub admin: Pubkey,
    pub released_escrow: u64,
}

#[event]
pub struct SecretCodeSet {
    pub dispenser_id: u32,
}

#[event]
pub struct TicketInfoAdded {
    pub dispenser_id: u32,
    pub index: u32,
    pub price: u64,
}

#[event]
pub struct TicketInfoUpdated {
    pub dispenser_id: u32,
    pub index: u32,
    pub price: u64,
}

#[event]
pub struct TicketRequested {
    pub dispenser_id: u32,
    pub user_id: u32,
    pub requester: Pubkey,
}

#[event]
pub struct TicketRequestReviewed {
    pub dispenser_id: u32,
    pub user_id: u32,
    pub reviewer: Pubkey,
    pub status: RequestStatus,
}

#[event]
pub struct TicketDispensed {
    pub dispenser_id: u32,
    pub user_id: u32,
    pub token_id: u64,
}

#[event]
pub struct TicketUsed {
    pub dispenser_id: u32,
    pub token_id: u64,
    pub holder: Pubkey,
    pub organizer_share: u64,
    pub fee_share: u64,
    pub used_at: i64,
}

#[event]
pub struct Crowdfunded {
    pub dispenser_id: u32,
    pub backer: Pubkey,
    pub organizer_share: u64,
    pub fee_share: u64,
}
