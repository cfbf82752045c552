use anchor_lang::prelude::*;

use crate::constants::MAX_PENDING_REQUESTS;
use crate::errors::DispenserError;
use crate::state::ActivationGrant;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, InitSpace)]
pub enum DispenserStatus {
    Pending,
    Approved,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, PartialEq, Eq, Debug, InitSpace)]
pub struct DispenserRequest {
    pub dispenser_id: u32,
    pub requester: Pubkey,
    #[max_len(32)]
    pub domain: String,
    #[max_len(128)]
    pub description: String,
    /// Lamports moved into escrow with the request
    pub escrow: u64,
    pub status: DispenserStatus,
    pub requested_at: i64,
}

/// Platform singleton: the admin credential, the fee treasury, id counters
/// and the queue of dispenser requests awaiting approval.
#[account]
#[derive(InitSpace)]
pub struct AdminAuthority {
    pub admin: Pubkey,
    pub treasury: Pubkey,
    pub next_dispenser_id: u32,
    pub next_user_id: u32,
    #[max_len(16)]
    pub pending: Vec<DispenserRequest>,
    pub bump: u8,
}

impl AdminAuthority {
    pub fn is_admin(&self, key: &Pubkey) -> bool {
        self.admin == *key
    }

    pub fn require_admin(&self, caller: &Pubkey) -> Result<()> {
        require!(self.is_admin(caller), DispenserError::Unauthorized);
        Ok(())
    }

    pub fn allocate_dispenser_id(&mut self) -> Result<u32> {
        let id = self.next_dispenser_id;
        self.next_dispenser_id = id
            .checked_add(1)
            .ok_or(DispenserError::ArithmeticOverflow)?;
        Ok(id)
    }

    /// User ids are handed out once per TicketVault and never reused.
    pub fn allocate_user_id(&mut self) -> Result<u32> {
        let id = self.next_user_id;
        self.next_user_id = id
            .checked_add(1)
            .ok_or(DispenserError::ArithmeticOverflow)?;
        Ok(id)
    }

    pub fn enqueue_request(&mut self, request: DispenserRequest) -> Result<()> {
        require!(
            self.pending.len() < MAX_PENDING_REQUESTS,
            DispenserError::CapacityExceeded
        );
        self.pending.push(request);
        Ok(())
    }

    pub fn list_pending_requesters(&self) -> &[DispenserRequest] {
        &self.pending
    }

    /// Approves the pending request of `address` for `dispenser_id` and
    /// mints the grant that activates it.
    pub fn approve_and_mint(
        &mut self,
        caller: &Pubkey,
        dispenser_id: u32,
        address: Pubkey,
    ) -> Result<ActivationGrant> {
        self.require_admin(caller)?;

        let position = self
            .pending
            .iter()
            .position(|r| r.dispenser_id == dispenser_id && r.requester == address)
            .ok_or(DispenserError::UnknownRequest)?;
        self.pending.remove(position);

        Ok(ActivationGrant::new(dispenser_id, address))
    }
}
