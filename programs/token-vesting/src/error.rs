use anchor_lang::prelude::*;

/// Custom error codes for the grant vesting program.
#[error_code]
pub enum VestingError {
    #[msg("Unauthorized: admin signature required")]
    UnauthorizedAdmin,

    #[msg("Unauthorized: admin or issuer signature required")]
    UnauthorizedIssuer,

    #[msg("Unauthorized: grant beneficiary or admin signature required")]
    UnauthorizedBeneficiary,

    #[msg("Invalid public key")]
    InvalidPubkey,

    #[msg("Invalid configuration")]
    InvalidConfig,

    #[msg("Invalid grant argument (schedule, category or addressing)")]
    InvalidArgument,

    #[msg("Grant index not found")]
    GrantNotFound,

    #[msg("No grant matches the selector")]
    NoMatchingGrant,

    #[msg("Grant is already revoked")]
    AlreadyRevoked,

    #[msg("Requested amount exceeds the aggregate releasable amount")]
    InsufficientReleasable,

    #[msg("Grant book is full")]
    GrantBookFull,

    #[msg("Grant totals would exceed the supply cap")]
    SupplyCapExceeded,

    #[msg("Invalid token mint")]
    InvalidTokenMint,

    #[msg("Invalid token account")]
    InvalidTokenAccount,

    #[msg("Invalid associated token account for recipient")]
    InvalidRecipientAta,

    #[msg("Math overflow")]
    MathOverflow,
}
