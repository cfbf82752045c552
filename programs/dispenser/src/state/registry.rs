use anchor_lang::prelude::*;

use crate::errors::DispenserError;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, PartialEq, Eq, Debug, InitSpace)]
pub struct DomainEntry {
    #[max_len(32)]
    pub domain: String,
    pub dispenser_id: u32,
    pub owner: Pubkey,
    pub active: bool,
}

/// Global domain index. A domain is reserved when its dispenser is
/// requested and becomes active on approval.
#[account]
#[derive(InitSpace)]
pub struct Registry {
    /// Grown by one entry per dispenser request, see `Registry::space`
    #[max_len(0)]
    pub domains: Vec<DomainEntry>,
    pub bump: u8,
}

impl Registry {
    /// Account size, discriminator included, holding `domains` entries.
    pub fn space(domains: usize) -> usize {
        8 + Registry::INIT_SPACE + domains * DomainEntry::INIT_SPACE
    }

    pub fn contains(&self, domain: &str) -> bool {
        self.domains.iter().any(|e| e.domain == domain)
    }

    pub fn register_domain(&mut self, domain: &str, dispenser_id: u32, owner: Pubkey) -> Result<()> {
        require!(!self.contains(domain), DispenserError::DuplicateDomain);

        self.domains.push(DomainEntry {
            domain: domain.to_string(),
            dispenser_id,
            owner,
            active: false,
        });
        Ok(())
    }

    pub fn activate(&mut self, dispenser_id: u32) -> Result<()> {
        let entry = self
            .domains
            .iter_mut()
            .find(|e| e.dispenser_id == dispenser_id)
            .ok_or(DispenserError::UnknownDispenser)?;
        entry.active = true;
        Ok(())
    }

    pub fn list_domains(&self) -> Vec<String> {
        self.domains.iter().map(|e| e.domain.clone()).collect()
    }

    pub fn entry_for_owner(&self, owner: &Pubkey) -> Option<&DomainEntry> {
        self.domains.iter().find(|e| e.owner == *owner)
    }

    pub fn active_entries(&self) -> impl Iterator<Item = &DomainEntry> {
        self.domains.iter().filter(|e| e.active)
    }
}
