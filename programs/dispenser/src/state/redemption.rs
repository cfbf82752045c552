//! Nullifier for redeemed tickets

use anchor_lang::prelude::*;
use light_sdk::LightDiscriminator;

/// Compressed marker created when a ticket is used.
///
/// Its address is derived from the dispenser id and token id, so a second
/// redemption of the same token cannot create it again.
#[derive(Debug, Clone, Default, AnchorSerialize, AnchorDeserialize, LightDiscriminator)]
pub struct RedemptionNullifier {
    pub dispenser_id: u32,
    pub token_id: u64,
    pub redeemed_at: i64,
}
