use anchor_lang::prelude::*;

use crate::error::VestingError;
use crate::state::{GrantBook, GrantSelector, VestingConfig};

/// Bulk revocation by address, role or participant category. Already
/// revoked members are skipped silently; only a selector with no matching
/// grant at all is an error.
pub fn revoke_batch(ctx: Context<RevokeBatch>, selector: GrantSelector) -> Result<()> {
    let config = &ctx.accounts.config;
    require_keys_eq!(
        ctx.accounts.admin.key(),
        config.admin,
        VestingError::UnauthorizedAdmin
    );
    if let GrantSelector::Participant(p) = selector {
        require!(p.is_assignable(), VestingError::InvalidArgument);
    }

    let book = &mut ctx.accounts.grant_book;
    let (matched, revoked) = book.revoke_matching(&selector);
    require!(matched > 0, VestingError::NoMatchingGrant);

    let now = Clock::get()?.unix_timestamp;
    emit!(GrantsRevokedBatch {
        admin: config.admin,
        selector,
        matched,
        revoked,
        ts: now,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct RevokeBatch<'info> {
    #[account(seeds = [b"config"], bump = config.bump)]
    pub config: Account<'info, VestingConfig>,

    #[account(
        mut,
        seeds = [b"grant_book", config.key().as_ref()],
        bump
    )]
    pub grant_book: Box<Account<'info, GrantBook>>,

    pub admin: Signer<'info>,
}

#[event]
pub struct GrantsRevokedBatch {
    pub admin: Pubkey,
    pub selector: GrantSelector,
    pub matched: u64,
    pub revoked: u64,
    pub ts: i64,
}
