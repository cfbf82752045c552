use anchor_lang::prelude::*;

/// One-time permission for a single dispenser to become active.
///
/// Only `AdminAuthority::approve_and_mint` creates one, and
/// `DispenserVault::activate` consumes it by value.
#[derive(Debug, PartialEq, Eq)]
pub struct ActivationGrant {
    dispenser_id: u32,
    recipient: Pubkey,
}

impl ActivationGrant {
    pub(crate) fn new(dispenser_id: u32, recipient: Pubkey) -> Self {
        Self {
            dispenser_id,
            recipient,
        }
    }

    pub fn dispenser_id(&self) -> u32 {
        self.dispenser_id
    }

    pub fn recipient(&self) -> Pubkey {
        self.recipient
    }
}
