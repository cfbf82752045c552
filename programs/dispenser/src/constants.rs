pub const ADMIN_SEED: &[u8] = b"admin";
pub const REGISTRY_SEED: &[u8] = b"registry";
pub const DISPENSER_SEED: &[u8] = b"dispenser";
pub const ESCROW_SEED: &[u8] = b"escrow";
pub const TICKET_VAULT_SEED: &[u8] = b"ticket_vault";
pub const REDEMPTION_SEED: &[u8] = b"redemption";

pub const LAMPORTS_PER_UNIT: u64 = 1_000_000_000;

/// 0.1 units, charged when an organizer requests a dispenser.
pub const DISPENSER_ACTIVATION_FEE: u64 = LAMPORTS_PER_UNIT / 10;

/// 2.5% of the ticket price goes to the treasury on redemption.
pub const REDEMPTION_FEE_BPS: u64 = 250;
pub const BPS_DENOMINATOR: u64 = 10_000;

pub const CROWDFUNDING_FEE_THRESHOLD: u64 = 10 * LAMPORTS_PER_UNIT;
pub const CROWDFUNDING_FEE_HIGH: u64 = LAMPORTS_PER_UNIT;
pub const CROWDFUNDING_FEE_LOW: u64 = LAMPORTS_PER_UNIT / 10;

pub const MAX_DOMAIN_LEN: usize = 32;
pub const MAX_DESCRIPTION_LEN: usize = 128;
pub const MAX_TICKET_NAME_LEN: usize = 32;
pub const MAX_LOCATION_LEN: usize = 64;
pub const MAX_SCHEDULE_LEN: usize = 32;
pub const MAX_SECRET_CODE_LEN: usize = 32;

/// Pending entries leave the queue on approval, so this bounds only the backlog.
pub const MAX_PENDING_REQUESTS: usize = 16;
pub const MAX_TICKET_INFOS: usize = 8;
