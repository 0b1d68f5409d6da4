use anchor_lang::prelude::*;

use crate::error::VestingError;
use crate::state::{GrantBook, VestingConfig};

pub fn revoke_grant(ctx: Context<RevokeGrant>, index: u64) -> Result<()> {
    let config = &ctx.accounts.config;
    require_keys_eq!(
        ctx.accounts.admin.key(),
        config.admin,
        VestingError::UnauthorizedAdmin
    );

    let book = &mut ctx.accounts.grant_book;
    book.revoke(index)?;

    let now = Clock::get()?.unix_timestamp;
    let grant = book.grant(index)?;
    emit!(GrantRevoked {
        index,
        admin: config.admin,
        released_amount: grant.released_amount,
        ts: now,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct RevokeGrant<'info> {
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
pub struct GrantRevoked {
    pub index: u64,
    pub admin: Pubkey,
    /// Amount already paid out; revocation never claws it back.
    pub released_amount: u64,
    pub ts: i64,
}
