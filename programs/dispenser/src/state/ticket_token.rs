/// A minted redemption right, in flight between the dispenser that minted
/// it and the TicketVault it is deposited into.
///
/// Neither `Clone` nor `Copy`: `TicketVault::deposit` takes it by value, so a
/// token can land in at most one vault.
#[derive(Debug, PartialEq, Eq)]
pub struct TicketToken {
    token_id: u64,
    dispenser_id: u32,
    user_id: u32,
    code: String,
}

impl TicketToken {
    pub(crate) fn new(token_id: u64, dispenser_id: u32, user_id: u32, code: String) -> Self {
        Self {
            token_id,
            dispenser_id,
            user_id,
            code,
        }
    }

    pub fn token_id(&self) -> u64 {
        self.token_id
    }

    pub fn dispenser_id(&self) -> u32 {
        self.dispenser_id
    }

    pub fn user_id(&self) -> u32 {
        self.user_id
    }

    pub(crate) fn into_code(self) -> String {
        self.code
    }
}
