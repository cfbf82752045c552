use anchor_lang::prelude::*;
use light_hasher::{Hasher, Sha256};

use crate::constants::*;
use crate::errors::DispenserError;
use crate::state::{
    ActivationGrant, DispenserStatus, RequestStatus, TicketRequest, TicketToken,
};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, PartialEq, Eq, Debug, InitSpace)]
pub struct TicketInfo {
    /// Position in `DispenserVault::tickets`, fixed once assigned
    pub index: u32,
    pub ticket_type: u8,
    #[max_len(32)]
    pub name: String,
    #[max_len(64)]
    pub location: String,
    #[max_len(32)]
    pub schedule: String,
    /// Price in lamports
    pub price: u64,
    /// Receives the organizer share when a ticket at this price is used
    pub payout_target: Pubkey,
}

/// Editable part of a TicketInfo.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, PartialEq, Eq, Debug)]
pub struct TicketDetails {
    pub ticket_type: u8,
    pub name: String,
    pub location: String,
    pub schedule: String,
    pub price: u64,
}

impl TicketDetails {
    pub fn validate(&self) -> Result<()> {
        require!(!self.name.is_empty(), DispenserError::TicketNameEmpty);
        require!(
            self.name.len() <= MAX_TICKET_NAME_LEN,
            DispenserError::TicketNameTooLong
        );
        require!(
            self.location.len() <= MAX_LOCATION_LEN,
            DispenserError::LocationTooLong
        );
        require!(
            self.schedule.len() <= MAX_SCHEDULE_LEN,
            DispenserError::ScheduleTooLong
        );
        require!(self.price > 0, DispenserError::InvalidPrice);
        Ok(())
    }
}

#[account]
#[derive(InitSpace)]
pub struct DispenserVault {
    pub id: u32,
    pub owner: Pubkey,
    #[max_len(32)]
    pub domain: String,
    #[max_len(128)]
    pub description: String,
    pub status: DispenserStatus,
    #[max_len(8)]
    pub tickets: Vec<TicketInfo>,
    /// One entry per user who ever requested, grown by realloc
    #[max_len(0)]
    pub requesters: Vec<TicketRequest>,
    /// Token ids are allocated from here; minted tokens live in the
    /// holders' TicketVaults
    pub latest_token_id: u64,
    pub secret_code_hash: Option<[u8; 32]>,
    pub created_at: i64,
    pub activated_at: Option<i64>,
    pub bump: u8,
    pub escrow_bump: u8,
}

pub fn validate_dispenser_request(domain: &str, description: &str) -> Result<()> {
    require!(!domain.is_empty(), DispenserError::DomainEmpty);
    require!(
        domain.len() <= MAX_DOMAIN_LEN,
        DispenserError::DomainTooLong
    );
    require!(
        description.len() <= MAX_DESCRIPTION_LEN,
        DispenserError::DescriptionTooLong
    );
    Ok(())
}

fn digest(code: &str) -> Result<[u8; 32]> {
    Sha256::hash(code.as_bytes()).map_err(|_| error!(DispenserError::InvalidCode))
}

impl DispenserVault {
    /// Account size, discriminator included, with `requesters` entries.
    pub fn space(requesters: usize) -> usize {
        8 + DispenserVault::INIT_SPACE + requesters * TicketRequest::INIT_SPACE
    }

    /// Size needed once `user_id` has a request on file.
    pub fn space_with_requester(&self, user_id: u32) -> usize {
        let known = self.requesters.iter().any(|r| r.user_id == user_id);
        Self::space(self.requesters.len() + usize::from(!known))
    }

    /// A freshly allocated account deserializes with the default owner.
    pub fn is_open(&self) -> bool {
        self.owner != Pubkey::default()
    }

    #[allow(clippy::too_many_arguments)]
    pub fn open(
        &mut self,
        id: u32,
        owner: Pubkey,
        domain: String,
        description: String,
        now: i64,
        bump: u8,
        escrow_bump: u8,
    ) {
        self.id = id;
        self.owner = owner;
        self.domain = domain;
        self.description = description;
        self.status = DispenserStatus::Pending;
        self.tickets = Vec::new();
        self.requesters = Vec::new();
        self.latest_token_id = 0;
        self.secret_code_hash = None;
        self.created_at = now;
        self.activated_at = None;
        self.bump = bump;
        self.escrow_bump = escrow_bump;
    }

    pub fn is_active(&self) -> bool {
        self.status == DispenserStatus::Approved
    }

    pub fn require_owner(&self, caller: &Pubkey) -> Result<()> {
        require_keys_eq!(self.owner, *caller, DispenserError::Unauthorized);
        Ok(())
    }

    /// Fails unless this is the active dispenser `dispenser_id`.
    pub fn require_serving(&self, dispenser_id: u32) -> Result<()> {
        require!(
            self.id == dispenser_id && self.is_active(),
            DispenserError::UnknownDispenser
        );
        Ok(())
    }

    pub fn activate(&mut self, grant: ActivationGrant, now: i64) -> Result<()> {
        require!(!self.is_active(), DispenserError::InvalidGrant);
        require!(
            grant.dispenser_id() == self.id && grant.recipient() == self.owner,
            DispenserError::InvalidGrant
        );

        self.status = DispenserStatus::Approved;
        self.activated_at = Some(now);
        Ok(())
    }

    pub fn add_ticket_info(
        &mut self,
        caller: &Pubkey,
        details: TicketDetails,
        payout_target: Pubkey,
    ) -> Result<u32> {
        self.require_owner(caller)?;
        details.validate()?;
        require!(
            self.tickets.len() < MAX_TICKET_INFOS,
            DispenserError::CapacityExceeded
        );

        let index = self.tickets.len() as u32;
        self.tickets.push(TicketInfo {
            index,
            ticket_type: details.ticket_type,
            name: details.name,
            location: details.location,
            schedule: details.schedule,
            price: details.price,
            payout_target,
        });
        Ok(index)
    }

    pub fn update_ticket_info(
        &mut self,
        caller: &Pubkey,
        index: u32,
        details: TicketDetails,
    ) -> Result<()> {
        self.require_owner(caller)?;
        let info = self
            .tickets
            .get_mut(index as usize)
            .ok_or(DispenserError::UnknownIndex)?;
        details.validate()?;

        info.ticket_type = details.ticket_type;
        info.name = details.name;
        info.location = details.location;
        info.schedule = details.schedule;
        info.price = details.price;
        Ok(())
    }

    /// Records the latest request of a user, replacing any earlier one.
    pub fn register_requester(&mut self, request: TicketRequest) {
        match self
            .requesters
            .iter_mut()
            .find(|r| r.user_id == request.user_id)
        {
            Some(existing) => *existing = request,
            None => self.requesters.push(request),
        }
    }

    /// Approves or denies a user's request. The owner and the platform admin
    /// may both review.
    pub fn review_request(
        &mut self,
        caller: &Pubkey,
        admin: &Pubkey,
        user_id: u32,
        approve: bool,
    ) -> Result<RequestStatus> {
        require!(
            self.owner == *caller || admin == caller,
            DispenserError::Unauthorized
        );
        let request = self
            .requesters
            .iter_mut()
            .find(|r| r.user_id == user_id)
            .ok_or(DispenserError::UnknownRequest)?;

        request.status = if approve {
            RequestStatus::Approved
        } else {
            RequestStatus::Denied
        };
        Ok(request.status)
    }

    pub fn set_secret_code(&mut self, caller: &Pubkey, secret_code: &str) -> Result<()> {
        self.require_owner(caller)?;
        require!(
            secret_code.len() <= MAX_SECRET_CODE_LEN,
            DispenserError::SecretCodeTooLong
        );
        self.secret_code_hash = Some(digest(secret_code)?);
        Ok(())
    }

    /// Mints the next token for `user_id`.
    ///
    /// Returns `None` when the user holds no approved request. The token is
    /// not deposited anywhere; the caller moves it into a TicketVault.
    pub fn mint_ticket(&mut self, secret_code: &str, user_id: u32) -> Result<Option<TicketToken>> {
        let expected = self
            .secret_code_hash
            .ok_or(DispenserError::InvalidCode)?;
        require!(
            digest(secret_code)? == expected,
            DispenserError::InvalidCode
        );

        let approved = self
            .requesters
            .iter()
            .any(|r| r.user_id == user_id && r.status == RequestStatus::Approved);
        if !approved {
            return Ok(None);
        }

        let token_id = self
            .latest_token_id
            .checked_add(1)
            .ok_or(DispenserError::ArithmeticOverflow)?;

        self.latest_token_id = token_id;

        Ok(Some(TicketToken::new(
            token_id,
            self.id,
            user_id,
            secret_code.to_string(),
        )))
    }

    pub fn latest_minted_token_id(&self) -> Option<u64> {
        (self.latest_token_id > 0).then_some(self.latest_token_id)
    }

    pub fn ticket_requesters(&self) -> &[TicketRequest] {
        &self.requesters
    }

    pub fn request_status(&self, user_id: u32) -> Option<&TicketRequest> {
        self.requesters.iter().find(|r| r.user_id == user_id)
    }

    /// First registered ticket sold at exactly `price`.
    pub fn ticket_for_price(&self, price: u64) -> Option<&TicketInfo> {
        self.tickets.iter().find(|t| t.price == price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_error;

    fn vault(owner: Pubkey) -> DispenserVault {
        DispenserVault {
            id: 1,
            owner,
            domain: "alice-events".to_string(),
            description: "spring shows".to_string(),
            status: DispenserStatus::Pending,
            tickets: Vec::new(),
            requesters: Vec::new(),
            latest_token_id: 0,
            secret_code_hash: None,
            created_at: 0,
            activated_at: None,
            bump: 255,
            escrow_bump: 254,
        }
    }

    fn show(price: u64) -> TicketDetails {
        TicketDetails {
            ticket_type: 1,
            name: "Show".to_string(),
            location: "Main hall".to_string(),
            schedule: "2026-11-01 19:00".to_string(),
            price,
        }
    }

    fn request(user_id: u32, status: RequestStatus) -> TicketRequest {
        TicketRequest {
            dispenser_id: 1,
            user_id,
            status,
            requested_at: 10,
        }
    }

    fn minting_vault(owner: Pubkey) -> DispenserVault {
        let mut v = vault(owner);
        v.set_secret_code(&owner, "open-sesame").unwrap();
        v
    }

    #[test]
    fn activation_consumes_matching_grant_once() {
        let owner = Pubkey::new_unique();
        let mut v = vault(owner);

        assert_error(
            v.activate(ActivationGrant::new(2, owner), 5),
            DispenserError::InvalidGrant,
        );
        assert_error(
            v.activate(ActivationGrant::new(1, Pubkey::new_unique()), 5),
            DispenserError::InvalidGrant,
        );

        v.activate(ActivationGrant::new(1, owner), 5).unwrap();
        assert!(v.is_active());
        assert_eq!(v.activated_at, Some(5));

        assert_error(
            v.activate(ActivationGrant::new(1, owner), 6),
            DispenserError::InvalidGrant,
        );
    }

    #[test]
    fn ticket_info_indices_are_assigned_in_order() {
        let owner = Pubkey::new_unique();
        let mut v = vault(owner);
        assert_eq!(v.add_ticket_info(&owner, show(5), owner).unwrap(), 0);
        assert_eq!(v.add_ticket_info(&owner, show(8), owner).unwrap(), 1);
        assert_eq!(v.tickets[1].index, 1);
    }

    #[test]
    fn ticket_info_is_owner_only() {
        let owner = Pubkey::new_unique();
        let stranger = Pubkey::new_unique();
        let mut v = vault(owner);

        assert_error(
            v.add_ticket_info(&stranger, show(5), stranger),
            DispenserError::Unauthorized,
        );
        v.add_ticket_info(&owner, show(5), owner).unwrap();
        assert_error(
            v.update_ticket_info(&stranger, 0, show(1)),
            DispenserError::Unauthorized,
        );
    }

    #[test]
    fn update_unknown_index_leaves_entries_unchanged() {
        let owner = Pubkey::new_unique();
        let mut v = vault(owner);
        v.add_ticket_info(&owner, show(5), owner).unwrap();
        let before = v.tickets.clone();

        assert_error(
            v.update_ticket_info(&owner, 9, show(1)),
            DispenserError::UnknownIndex,
        );
        assert_eq!(v.tickets, before);

        let mut changed = show(7);
        changed.name = "Late show".to_string();
        v.update_ticket_info(&owner, 0, changed).unwrap();
        assert_eq!(v.tickets[0].index, 0);
        assert_eq!(v.tickets[0].name, "Late show");
        assert_eq!(v.tickets[0].price, 7);
        assert_eq!(v.tickets[0].payout_target, owner);
    }

    #[test]
    fn ticket_details_are_validated() {
        let owner = Pubkey::new_unique();
        let mut v = vault(owner);

        let mut d = show(5);
        d.name.clear();
        assert_error(
            v.add_ticket_info(&owner, d, owner),
            DispenserError::TicketNameEmpty,
        );
        assert_error(
            v.add_ticket_info(&owner, show(0), owner),
            DispenserError::InvalidPrice,
        );
        let mut d = show(5);
        d.location = "x".repeat(MAX_LOCATION_LEN + 1);
        assert_error(
            v.add_ticket_info(&owner, d, owner),
            DispenserError::LocationTooLong,
        );
        assert!(v.tickets.is_empty());
    }

    #[test]
    fn register_requester_keeps_latest_request() {
        let mut v = vault(Pubkey::new_unique());
        v.register_requester(request(4, RequestStatus::Approved));
        let mut renewed = request(4, RequestStatus::Pending);
        renewed.requested_at = 99;
        v.register_requester(renewed);

        assert_eq!(v.ticket_requesters().len(), 1);
        assert_eq!(v.request_status(4), Some(&renewed));
    }

    #[test]
    fn review_accepts_owner_or_admin() {
        let owner = Pubkey::new_unique();
        let admin = Pubkey::new_unique();
        let mut v = vault(owner);
        v.register_requester(request(4, RequestStatus::Pending));

        assert_error(
            v.review_request(&Pubkey::new_unique(), &admin, 4, true),
            DispenserError::Unauthorized,
        );
        assert_eq!(
            v.review_request(&admin, &admin, 4, false).unwrap(),
            RequestStatus::Denied
        );
        assert_eq!(
            v.review_request(&owner, &admin, 4, true).unwrap(),
            RequestStatus::Approved
        );
        assert_error(
            v.review_request(&owner, &admin, 5, true),
            DispenserError::UnknownRequest,
        );
    }

    #[test]
    fn mint_allocates_monotonic_ids_for_approved_users() {
        let owner = Pubkey::new_unique();
        let mut v = minting_vault(owner);
        v.register_requester(request(4, RequestStatus::Approved));
        v.register_requester(request(5, RequestStatus::Approved));
        assert_eq!(v.latest_minted_token_id(), None);

        let first = v.mint_ticket("open-sesame", 4).unwrap().unwrap();
        let second = v.mint_ticket("open-sesame", 5).unwrap().unwrap();
        assert_eq!(first.token_id(), 1);
        assert_eq!(first.dispenser_id(), 1);
        assert_eq!(first.user_id(), 4);
        assert_eq!(second.token_id(), 2);
        assert_eq!(v.latest_minted_token_id(), Some(2));
    }

    #[test]
    fn one_approval_keeps_minting_past_a_few_hundred_tokens() {
        let owner = Pubkey::new_unique();
        let mut v = minting_vault(owner);
        v.register_requester(request(4, RequestStatus::Approved));

        for expected in 1..=300u64 {
            let token = v.mint_ticket("open-sesame", 4).unwrap().unwrap();
            assert_eq!(token.token_id(), expected);
        }
        assert_eq!(v.latest_minted_token_id(), Some(300));
    }

    #[test]
    fn requesters_grow_with_the_account() {
        let owner = Pubkey::new_unique();
        let mut v = vault(owner);
        assert_eq!(v.space_with_requester(1), DispenserVault::space(1));

        for user_id in 1..=200u32 {
            v.register_requester(request(user_id, RequestStatus::Pending));
        }
        assert_eq!(v.ticket_requesters().len(), 200);
        // renewal reuses the existing slot
        assert_eq!(v.space_with_requester(7), DispenserVault::space(200));
        assert_eq!(v.space_with_requester(201), DispenserVault::space(201));

        v.domain = "d".repeat(MAX_DOMAIN_LEN);
        v.description = "d".repeat(MAX_DESCRIPTION_LEN);
        for _ in 0..MAX_TICKET_INFOS {
            let mut d = show(5);
            d.name = "n".repeat(MAX_TICKET_NAME_LEN);
            d.location = "l".repeat(MAX_LOCATION_LEN);
            d.schedule = "s".repeat(MAX_SCHEDULE_LEN);
            v.add_ticket_info(&owner, d, owner).unwrap();
        }
        v.set_secret_code(&owner, "open-sesame").unwrap();
        v.activated_at = Some(1);

        let mut data = Vec::new();
        v.try_serialize(&mut data).unwrap();
        assert_eq!(data.len(), DispenserVault::space(200));
    }

    #[test]
    fn mint_without_approval_returns_none() {
        let owner = Pubkey::new_unique();
        let mut v = minting_vault(owner);
        v.register_requester(request(4, RequestStatus::Pending));

        assert!(v.mint_ticket("open-sesame", 4).unwrap().is_none());
        assert!(v.mint_ticket("open-sesame", 8).unwrap().is_none());
        assert_eq!(v.latest_minted_token_id(), None);
    }

    #[test]
    fn mint_with_wrong_code_changes_nothing() {
        let owner = Pubkey::new_unique();
        let mut v = minting_vault(owner);
        v.register_requester(request(4, RequestStatus::Approved));
        let requesters = v.requesters.clone();

        assert_error(v.mint_ticket("guess", 4), DispenserError::InvalidCode);
        assert_eq!(v.latest_token_id, 0);
        assert_eq!(v.requesters, requesters);
    }

    #[test]
    fn mint_requires_configured_code() {
        let mut v = vault(Pubkey::new_unique());
        v.register_requester(request(4, RequestStatus::Approved));
        assert_error(v.mint_ticket("", 4), DispenserError::InvalidCode);
    }

    #[test]
    fn serving_requires_matching_active_dispenser() {
        let owner = Pubkey::new_unique();
        let mut v = vault(owner);
        assert_error(v.require_serving(1), DispenserError::UnknownDispenser);
        v.activate(ActivationGrant::new(1, owner), 0).unwrap();
        v.require_serving(1).unwrap();
        assert_error(v.require_serving(2), DispenserError::UnknownDispenser);
    }

    #[test]
    fn ticket_lookup_by_price() {
        let owner = Pubkey::new_unique();
        let payout = Pubkey::new_unique();
        let mut v = vault(owner);
        v.add_ticket_info(&owner, show(5), payout).unwrap();
        assert_eq!(v.ticket_for_price(5).map(|t| t.payout_target), Some(payout));
        assert!(v.ticket_for_price(6).is_none());
    }
}
