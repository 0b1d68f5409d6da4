use anchor_lang::prelude::*;

use crate::state::{GrantBook, Grantee, Participant, VestingConfig};
use crate::utils::math;

/// Read-only quote for a single grant by its stable index.
pub fn emit_grant_quote(ctx: Context<EmitGrantQuote>, index: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let grant = ctx.accounts.grant_book.grant(index)?;

    let vested = math::vested_amount(grant, now)?;
    let releasable = math::releasable_amount(grant, now)?;
    let (beneficiary, role) = match grant.grantee {
        Grantee::Address(w) => (Some(w), None),
        Grantee::Role(r) => (None, Some(r)),
    };

    emit!(GrantQuote {
        index,
        beneficiary,
        role,
        participant: grant.participant,
        total_amount: grant.total_amount,
        vested_amount: vested,
        released_amount: grant.released_amount,
        releasable,
        revoked: grant.revoked,
        ts: now,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct EmitGrantQuote<'info> {
    #[account(seeds = [b"config"], bump = config.bump)]
    pub config: Account<'info, VestingConfig>,

    #[account(
        seeds = [b"grant_book", config.key().as_ref()],
        bump
    )]
    pub grant_book: Box<Account<'info, GrantBook>>,
}

#[event]
pub struct GrantQuote {
    pub index: u64,
    pub beneficiary: Option<Pubkey>,
    pub role: Option<Pubkey>,
    pub participant: Participant,
    pub total_amount: u64,
    pub vested_amount: u64,
    pub released_amount: u64,
    pub releasable: u64,
    pub revoked: bool,
    pub ts: i64,
}
