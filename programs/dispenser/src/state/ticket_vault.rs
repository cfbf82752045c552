use anchor_lang::prelude::*;

use crate::errors::DispenserError;
use crate::state::{RequestStatus, TicketRequest, TicketToken};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, PartialEq, Eq, Debug, InitSpace)]
pub struct HeldTicket {
    pub dispenser_id: u32,
    pub token_id: u64,
    /// Set once, when the ticket is used
    pub used_at: Option<i64>,
    /// Secret code the dispenser minted this ticket with
    #[max_len(32)]
    pub code: String,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, InitSpace)]
pub struct Contribution {
    pub dispenser_id: u32,
    pub total: u64,
    pub count: u32,
    pub last_funded_at: i64,
}

/// Per-user container for ticket requests, held tickets and crowdfunding
/// contributions. One per user, shared by every dispenser.
///
/// The lists are unbounded; the account is reallocated as they grow, see
/// `TicketVault::space`.
#[account]
#[derive(InitSpace)]
pub struct TicketVault {
    pub user_id: u32,
    pub owner: Pubkey,
    pub crowdfunding: bool,
    #[max_len(0)]
    pub requests: Vec<TicketRequest>,
    #[max_len(0)]
    pub holdings: Vec<HeldTicket>,
    #[max_len(0)]
    pub contributions: Vec<Contribution>,
    pub created_at: i64,
    pub bump: u8,
}

impl TicketVault {
    /// Account size, discriminator included, for the given list lengths.
    pub fn space(requests: usize, holdings: usize, contributions: usize) -> usize {
        8 + TicketVault::INIT_SPACE
            + requests * TicketRequest::INIT_SPACE
            + holdings * HeldTicket::INIT_SPACE
            + contributions * Contribution::INIT_SPACE
    }

    /// Size needed for the current contents.
    pub fn required_space(&self) -> usize {
        Self::space(
            self.requests.len(),
            self.holdings.len(),
            self.contributions.len(),
        )
    }

    /// Size needed once a request for `dispenser_id` is on file.
    pub fn space_with_request(&self, dispenser_id: u32) -> usize {
        let known = self.request_for(dispenser_id).is_some();
        Self::space(
            self.requests.len() + usize::from(!known),
            self.holdings.len(),
            self.contributions.len(),
        )
    }

    pub fn is_open(&self) -> bool {
        self.owner != Pubkey::default()
    }

    pub fn open(&mut self, owner: Pubkey, user_id: u32, crowdfunding: bool, now: i64, bump: u8) {
        self.user_id = user_id;
        self.owner = owner;
        self.crowdfunding = crowdfunding;
        self.requests = Vec::new();
        self.holdings = Vec::new();
        self.contributions = Vec::new();
        self.created_at = now;
        self.bump = bump;
    }

    pub fn require_owner(&self, caller: &Pubkey) -> Result<()> {
        require_keys_eq!(self.owner, *caller, DispenserError::Unauthorized);
        Ok(())
    }

    /// Files a pending request for `dispenser_id`. Asking again renews the
    /// request: status goes back to pending and the timestamp moves.
    pub fn request_ticket(
        &mut self,
        caller: &Pubkey,
        dispenser_id: u32,
        now: i64,
    ) -> Result<TicketRequest> {
        self.require_owner(caller)?;

        let request = TicketRequest {
            dispenser_id,
            user_id: self.user_id,
            status: RequestStatus::Pending,
            requested_at: now,
        };

        if let Some(existing) = self
            .requests
            .iter_mut()
            .find(|r| r.dispenser_id == dispenser_id)
        {
            *existing = request;
            return Ok(request);
        }

        self.requests.push(request);
        Ok(request)
    }

    pub fn set_request_status(&mut self, dispenser_id: u32, status: RequestStatus) -> Result<()> {
        let request = self
            .requests
            .iter_mut()
            .find(|r| r.dispenser_id == dispenser_id)
            .ok_or(DispenserError::UnknownRequest)?;
        request.status = status;
        Ok(())
    }

    pub fn request_for(&self, dispenser_id: u32) -> Option<&TicketRequest> {
        self.requests.iter().find(|r| r.dispenser_id == dispenser_id)
    }

    pub fn deposit(&mut self, token: TicketToken) -> Result<()> {
        require!(
            token.user_id() == self.user_id,
            DispenserError::RecipientMismatch
        );
        require!(
            self.held(token.dispenser_id(), token.token_id()).is_none(),
            DispenserError::DuplicateToken
        );

        let dispenser_id = token.dispenser_id();
        let token_id = token.token_id();
        self.holdings.push(HeldTicket {
            dispenser_id,
            token_id,
            used_at: None,
            code: token.into_code(),
        });
        Ok(())
    }

    fn held(&self, dispenser_id: u32, token_id: u64) -> Option<&HeldTicket> {
        self.holdings
            .iter()
            .find(|h| h.dispenser_id == dispenser_id && h.token_id == token_id)
    }

    /// Checks everything `mark_used` needs before any payment is made.
    pub fn require_redeemable(&self, caller: &Pubkey, dispenser_id: u32, token_id: u64) -> Result<()> {
        self.require_owner(caller)?;
        let held = self
            .held(dispenser_id, token_id)
            .ok_or(DispenserError::UnknownToken)?;
        require!(held.used_at.is_none(), DispenserError::AlreadyUsed);
        Ok(())
    }

    /// Write-once transition to used.
    pub fn mark_used(&mut self, dispenser_id: u32, token_id: u64, now: i64) -> Result<()> {
        let held = self
            .holdings
            .iter_mut()
            .find(|h| h.dispenser_id == dispenser_id && h.token_id == token_id)
            .ok_or(DispenserError::UnknownToken)?;
        require!(held.used_at.is_none(), DispenserError::AlreadyUsed);
        held.used_at = Some(now);
        Ok(())
    }

    /// Records a crowdfunding contribution. Contributions to the same
    /// dispenser accumulate without limit.
    pub fn crowdfund(&mut self, caller: &Pubkey, dispenser_id: u32, amount: u64, now: i64) -> Result<()> {
        self.require_owner(caller)?;
        require!(self.crowdfunding, DispenserError::NotCrowdfundingVault);

        if let Some(c) = self
            .contributions
            .iter_mut()
            .find(|c| c.dispenser_id == dispenser_id)
        {
            c.total = c
                .total
                .checked_add(amount)
                .ok_or(DispenserError::ArithmeticOverflow)?;
            c.count = c
                .count
                .checked_add(1)
                .ok_or(DispenserError::ArithmeticOverflow)?;
            c.last_funded_at = now;
            return Ok(());
        }

        self.contributions.push(Contribution {
            dispenser_id,
            total: amount,
            count: 1,
            last_funded_at: now,
        });
        Ok(())
    }

    pub fn token_ids(&self, dispenser_id: u32) -> Vec<u64> {
        self.holdings
            .iter()
            .filter(|h| h.dispenser_id == dispenser_id)
            .map(|h| h.token_id)
            .collect()
    }

    pub fn used_time(&self, dispenser_id: u32) -> Vec<(u64, Option<i64>)> {
        self.holdings
            .iter()
            .filter(|h| h.dispenser_id == dispenser_id)
            .map(|h| (h.token_id, h.used_at))
            .collect()
    }

    pub fn codes(&self, dispenser_id: u32) -> Vec<(u64, String)> {
        self.holdings
            .iter()
            .filter(|h| h.dispenser_id == dispenser_id)
            .map(|h| (h.token_id, h.code.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_error;

    fn vault(owner: Pubkey, crowdfunding: bool) -> TicketVault {
        let mut v = TicketVault {
            user_id: 0,
            owner: Pubkey::default(),
            crowdfunding: false,
            requests: Vec::new(),
            holdings: Vec::new(),
            contributions: Vec::new(),
            created_at: 0,
            bump: 0,
        };
        assert!(!v.is_open());
        v.open(owner, 7, crowdfunding, 100, 253);
        v
    }

    #[test]
    fn repeated_requests_renew_the_entry() {
        let owner = Pubkey::new_unique();
        let mut v = vault(owner, false);

        let first = v.request_ticket(&owner, 3, 100).unwrap();
        assert_eq!(first.user_id, 7);
        v.set_request_status(3, RequestStatus::Approved).unwrap();

        let renewed = v.request_ticket(&owner, 3, 200).unwrap();
        assert_eq!(renewed.status, RequestStatus::Pending);
        assert_eq!(v.requests.len(), 1);
        assert_eq!(v.request_for(3).map(|r| r.requested_at), Some(200));
    }

    #[test]
    fn requests_are_owner_only() {
        let mut v = vault(Pubkey::new_unique(), false);
        assert_error(
            v.request_ticket(&Pubkey::new_unique(), 3, 0),
            DispenserError::Unauthorized,
        );
        assert_error(
            v.set_request_status(3, RequestStatus::Approved),
            DispenserError::UnknownRequest,
        );
    }

    #[test]
    fn deposit_rejects_duplicates_and_strangers() {
        let mut v = vault(Pubkey::new_unique(), false);
        v.deposit(TicketToken::new(1, 3, 7, "code".into())).unwrap();

        assert_error(
            v.deposit(TicketToken::new(1, 3, 7, "code".into())),
            DispenserError::DuplicateToken,
        );
        assert_error(
            v.deposit(TicketToken::new(2, 3, 8, "code".into())),
            DispenserError::RecipientMismatch,
        );
        // same token id from another dispenser is a different ticket
        v.deposit(TicketToken::new(1, 4, 7, "other".into())).unwrap();
        assert_eq!(v.holdings.len(), 2);
    }

    #[test]
    fn usage_is_write_once() {
        let owner = Pubkey::new_unique();
        let mut v = vault(owner, false);
        v.deposit(TicketToken::new(1, 3, 7, "code".into())).unwrap();

        v.require_redeemable(&owner, 3, 1).unwrap();
        v.mark_used(3, 1, 500).unwrap();
        assert_eq!(v.used_time(3), vec![(1, Some(500))]);

        assert_error(
            v.require_redeemable(&owner, 3, 1),
            DispenserError::AlreadyUsed,
        );
        assert_error(v.mark_used(3, 1, 600), DispenserError::AlreadyUsed);
        assert_eq!(v.used_time(3), vec![(1, Some(500))]);
    }

    #[test]
    fn redeem_checks_owner_and_token() {
        let owner = Pubkey::new_unique();
        let mut v = vault(owner, false);
        v.deposit(TicketToken::new(1, 3, 7, "code".into())).unwrap();

        assert_error(
            v.require_redeemable(&Pubkey::new_unique(), 3, 1),
            DispenserError::Unauthorized,
        );
        assert_error(
            v.require_redeemable(&owner, 3, 2),
            DispenserError::UnknownToken,
        );
        assert_error(
            v.require_redeemable(&owner, 4, 1),
            DispenserError::UnknownToken,
        );
    }

    #[test]
    fn read_views_are_scoped_to_one_dispenser() {
        let mut v = vault(Pubkey::new_unique(), false);
        v.deposit(TicketToken::new(1, 3, 7, "spring".into())).unwrap();
        v.deposit(TicketToken::new(2, 3, 7, "spring".into())).unwrap();
        v.deposit(TicketToken::new(1, 9, 7, "autumn".into())).unwrap();

        assert_eq!(v.used_time(3), vec![(1, None), (2, None)]);
        assert_eq!(v.codes(9), vec![(1, "autumn".to_string())]);
        assert!(v.codes(5).is_empty());
    }

    #[test]
    fn crowdfunding_accumulates() {
        let owner = Pubkey::new_unique();
        let mut v = vault(owner, true);
        v.crowdfund(&owner, 3, 5_000, 10).unwrap();
        v.crowdfund(&owner, 3, 2_000, 20).unwrap();
        v.crowdfund(&owner, 4, 1_000, 30).unwrap();

        assert_eq!(v.contributions.len(), 2);
        assert_eq!(v.contributions[0].total, 7_000);
        assert_eq!(v.contributions[0].count, 2);
        assert_eq!(v.contributions[0].last_funded_at, 20);
    }

    #[test]
    fn lists_grow_past_a_hundred_entries() {
        let owner = Pubkey::new_unique();
        let mut v = vault(owner, false);
        assert_eq!(v.space_with_request(1), TicketVault::space(1, 0, 0));

        for dispenser_id in 1..=120u32 {
            v.request_ticket(&owner, dispenser_id, 0).unwrap();
        }
        assert_eq!(v.space_with_request(5), TicketVault::space(120, 0, 0));
        assert_eq!(v.space_with_request(121), TicketVault::space(121, 0, 0));

        for token_id in 1..=150u64 {
            v.deposit(TicketToken::new(token_id, 1, 7, "c".repeat(32)))
                .unwrap();
        }
        v.mark_used(1, 150, 9).unwrap();
        assert_eq!(v.token_ids(1).len(), 150);
        assert_eq!(v.token_ids(1)[149], 150);
        assert!(v.token_ids(2).is_empty());

        // unused tickets serialize without the timestamp
        let mut data = Vec::new();
        v.try_serialize(&mut data).unwrap();
        assert!(data.len() <= v.required_space());
    }

    #[test]
    fn contributions_to_many_dispensers_are_kept() {
        let owner = Pubkey::new_unique();
        let mut v = vault(owner, true);
        for dispenser_id in 1..=40u32 {
            v.crowdfund(&owner, dispenser_id, 1_000, 5).unwrap();
        }
        assert_eq!(v.contributions.len(), 40);
        assert_eq!(v.required_space(), TicketVault::space(0, 0, 40));

        let mut data = Vec::new();
        v.try_serialize(&mut data).unwrap();
        assert_eq!(data.len(), v.required_space());
    }

    #[test]
    fn crowdfunding_needs_crowdfunding_vault() {
        let owner = Pubkey::new_unique();
        let mut v = vault(owner, false);
        assert_error(
            v.crowdfund(&owner, 3, 5_000, 10),
            DispenserError::NotCrowdfundingVault,
        );
    }
}
