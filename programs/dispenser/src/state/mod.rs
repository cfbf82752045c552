//! State account definitions

pub mod admin_authority;
pub mod dispenser_vault;
pub mod grant;
pub mod redemption;
pub mod registry;
pub mod ticket_token;
pub mod ticket_vault;

pub use admin_authority::*;
pub use dispenser_vault::*;
pub use grant::*;
pub use redemption::*;
pub use registry::*;
pub use ticket_token::*;
pub use ticket_vault::*;

use anchor_lang::prelude::*;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, InitSpace)]
pub enum RequestStatus {
    Pending,
    Approved,
    Denied,
}

/// A user's request for tickets from one dispenser. Both the user's
/// TicketVault and the dispenser's DispenserVault keep a copy.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, InitSpace)]
pub struct TicketRequest {
    pub dispenser_id: u32,
    pub user_id: u32,
    pub status: RequestStatus,
    pub requested_at: i64,
}
