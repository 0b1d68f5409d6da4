use anchor_lang::prelude::*;

/// Singleton program configuration PDA.
///
/// The config PDA doubles as the mint authority for release operations;
/// its bump is cached so release paths can sign without re-deriving.
#[account]
pub struct VestingConfig {
    /// Token mint this program issues grants from.
    pub mint: Pubkey,
    /// Admin authority (grant creation, revocation, bulk release).
    pub admin: Pubkey,
    /// Issuer authority (sale/backend signer allowed to add grants).
    pub issuer: Pubkey,
    /// Fixed supply available for grants; sum of grant totals never exceeds it.
    pub supply_cap: u64,
    /// Config PDA bump, cached for mint-authority signing.
    pub bump: u8,
}

impl VestingConfig {
    pub const SIZE: usize =
        32 + // mint
        32 + // admin
        32 + // issuer
        8 +  // supply_cap
        1;   // bump
}
