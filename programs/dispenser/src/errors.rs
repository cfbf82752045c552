use anchor_lang::prelude::*;

#[error_code]
pub enum DispenserError {
    #[msg("Unauthorized: signer lacks the admin or owner credential")]
    Unauthorized,

    #[msg("Domain is already registered")]
    DuplicateDomain,

    #[msg("Signer already holds this vault")]
    AlreadyExists,

    #[msg("No pending dispenser request for this id and address")]
    UnknownRequest,

    #[msg("Dispenser does not exist")]
    UnknownDispenser,

    #[msg("Ticket info index is out of range")]
    UnknownIndex,

    #[msg("Token is not held by this vault")]
    UnknownToken,

    #[msg("Activation grant was already consumed or does not match")]
    InvalidGrant,

    #[msg("Secret code does not match")]
    InvalidCode,

    #[msg("Ticket has already been used")]
    AlreadyUsed,

    #[msg("Token is already held by this vault")]
    DuplicateToken,

    #[msg("Payment is below the required amount")]
    InsufficientFunds,

    #[msg("Price does not match any registered ticket")]
    AmountMismatch,

    #[msg("Domain cannot be empty")]
    DomainEmpty,

    #[msg("Domain exceeds maximum length")]
    DomainTooLong,

    #[msg("Description exceeds maximum length")]
    DescriptionTooLong,

    #[msg("Ticket name cannot be empty")]
    TicketNameEmpty,

    #[msg("Ticket name exceeds maximum length")]
    TicketNameTooLong,

    #[msg("Ticket location exceeds maximum length")]
    LocationTooLong,

    #[msg("Ticket schedule exceeds maximum length")]
    ScheduleTooLong,

    #[msg("Secret code exceeds maximum length")]
    SecretCodeTooLong,

    #[msg("Price must be greater than zero")]
    InvalidPrice,

    #[msg("Account capacity exceeded")]
    CapacityExceeded,

    #[msg("Dispenser is not active")]
    DispenserNotActive,

    #[msg("Ticket vault was not opened for crowdfunding")]
    NotCrowdfundingVault,

    #[msg("Payout account does not match the registered target")]
    InvalidPayoutTarget,

    #[msg("Treasury account does not match the platform treasury")]
    InvalidTreasury,

    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,

    #[msg("Ticket vault accounts do not match the listed users")]
    RecipientMismatch,

    #[msg("Invalid address tree")]
    InvalidAddressTree,
}
