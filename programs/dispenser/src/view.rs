//! Read-only queries over fetched account state.
//!
//! Clients load the relevant accounts (admin authority, registry, vaults)
//! and answer questions from the snapshot; nothing here mutates state.

use std::collections::BTreeMap;

use anchor_lang::prelude::*;

use crate::state::{
    AdminAuthority, DispenserRequest, DispenserVault, Registry, TicketInfo, TicketRequest,
    TicketVault,
};

/// Catalogue entry for one ticket offering of an active dispenser.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TicketSummary {
    pub dispenser_id: u32,
    pub domain: String,
    pub info: TicketInfo,
}

pub struct LedgerSnapshot<'a> {
    pub authority: &'a AdminAuthority,
    pub registry: &'a Registry,
    pub dispensers: &'a [DispenserVault],
    pub ticket_vaults: &'a [TicketVault],
}

impl<'a> LedgerSnapshot<'a> {
    fn dispenser_of(&self, owner: &Pubkey) -> Option<&'a DispenserVault> {
        self.dispensers.iter().find(|d| d.owner == *owner)
    }

    fn dispenser_by_id(&self, dispenser_id: u32) -> Option<&'a DispenserVault> {
        self.dispensers.iter().find(|d| d.id == dispenser_id)
    }

    fn ticket_vault_of(&self, owner: &Pubkey) -> Option<&'a TicketVault> {
        self.ticket_vaults.iter().find(|t| t.owner == *owner)
    }

    pub fn is_admin(&self, address: &Pubkey) -> bool {
        self.authority.is_admin(address)
    }

    pub fn has_dispenser_vault(&self, address: &Pubkey) -> bool {
        self.dispenser_of(address).is_some()
    }

    /// Pending dispenser requests, as seen by the admin at `address`.
    pub fn requested_dispensers(&self, address: &Pubkey) -> Result<&'a [DispenserRequest]> {
        self.authority.require_admin(address)?;
        Ok(self.authority.list_pending_requesters())
    }

    pub fn dispenser_domains(&self) -> Vec<String> {
        self.registry.list_domains()
    }

    /// Whether `address` owns an activated dispenser.
    pub fn has_dispenser(&self, address: &Pubkey) -> bool {
        self.dispenser_of(address).is_some_and(|d| d.is_active())
    }

    /// Dispenser id and domain registered to `address`.
    pub fn dispenser_info(&self, address: &Pubkey) -> Option<(u32, String)> {
        self.registry
            .entry_for_owner(address)
            .map(|e| (e.dispenser_id, e.domain.clone()))
    }

    /// Every ticket offering of every active dispenser, in registry order.
    /// Dispensers missing from the snapshot are skipped.
    pub fn tickets(&self) -> Vec<TicketSummary> {
        self.registry
            .active_entries()
            .filter_map(|entry| self.dispenser_by_id(entry.dispenser_id))
            .flat_map(|d| {
                d.tickets.iter().map(move |info| TicketSummary {
                    dispenser_id: d.id,
                    domain: d.domain.clone(),
                    info: info.clone(),
                })
            })
            .collect()
    }

    /// The user's own copy of their request to `dispenser_id`.
    pub fn ticket_request_status(&self, address: &Pubkey, dispenser_id: u32) -> Option<TicketRequest> {
        self.ticket_vault_of(address)?
            .request_for(dispenser_id)
            .copied()
    }

    /// The dispenser's copy of `user_id`'s request, looked up by organizer.
    pub fn requester_status(&self, organizer: &Pubkey, user_id: u32) -> Option<TicketRequest> {
        self.dispenser_of(organizer)?
            .request_status(user_id)
            .copied()
    }

    /// Token ids of `dispenser_id` delivered to `user_id`. Tokens live in
    /// the holder's TicketVault, so the user's vault must be in the snapshot.
    pub fn minted_tokens(&self, dispenser_id: u32, user_id: u32) -> Vec<u64> {
        self.ticket_vaults
            .iter()
            .filter(|t| t.user_id == user_id)
            .flat_map(|t| t.token_ids(dispenser_id))
            .collect()
    }

    pub fn latest_minted_token_id(&self, address: &Pubkey) -> Option<u64> {
        self.dispenser_of(address)?.latest_minted_token_id()
    }

    pub fn ticket_requesters(&self, address: &Pubkey) -> Option<&'a [TicketRequest]> {
        self.dispenser_of(address).map(|d| d.ticket_requesters())
    }

    pub fn has_ticket_resource(&self, address: &Pubkey) -> bool {
        self.ticket_vault_of(address).is_some()
    }

    pub fn ticket_used_time(&self, address: &Pubkey, dispenser_id: u32) -> Option<Vec<(u64, Option<i64>)>> {
        self.ticket_vault_of(address)
            .map(|t| t.used_time(dispenser_id))
    }

    pub fn ticket_code(&self, address: &Pubkey, dispenser_id: u32) -> Option<Vec<(u64, String)>> {
        self.ticket_vault_of(address).map(|t| t.codes(dispenser_id))
    }

    /// Snapshot of a dispenser's requesters; `None` if the dispenser is unknown.
    pub fn inspect_ticket_requesters(&self, dispenser_id: u32) -> Option<Vec<TicketRequest>> {
        self.dispenser_by_id(dispenser_id)
            .map(|d| d.ticket_requesters().to_vec())
    }

    /// Admin-only batch form of `inspect_ticket_requesters`.
    pub fn examine_ticket_requesters(
        &self,
        admin: &Pubkey,
        ids: &[u32],
    ) -> Result<BTreeMap<u32, Option<Vec<TicketRequest>>>> {
        self.authority.require_admin(admin)?;
        Ok(ids
            .iter()
            .map(|id| (*id, self.inspect_ticket_requesters(*id)))
            .collect())
    }
}
