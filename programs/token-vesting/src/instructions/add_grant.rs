use anchor_lang::prelude::*;

use crate::constants::MAX_GRANTS;
use crate::error::VestingError;
use crate::state::{GrantBook, GrantInput, Grantee, Participant, VestingConfig};

pub fn add_grant(ctx: Context<AddGrant>, input: GrantInput) -> Result<u64> {
    let config = &ctx.accounts.config;
    let authority = ctx.accounts.authority.key();
    require!(
        authority == config.admin || authority == config.issuer,
        VestingError::UnauthorizedIssuer
    );

    let book = &mut ctx.accounts.grant_book;
    let index = book.append(&input, config.supply_cap, MAX_GRANTS)?;

    let now = Clock::get()?.unix_timestamp;
    let (beneficiary, role) = match input.grantee {
        Grantee::Address(w) => (Some(w), None),
        Grantee::Role(r) => (None, Some(r)),
    };
    emit!(GrantAdded {
        index,
        authority,
        beneficiary,
        role,
        participant: input.participant,
        genesis_ts: input.genesis_ts,
        total_amount: input.total_amount,
        tge_amount: input.tge_amount,
        final_amount: input.final_amount,
        basis: input.basis,
        cliff: input.cliff,
        duration: input.duration,
        ts: now,
    });

    Ok(index)
}

#[derive(Accounts)]
pub struct AddGrant<'info> {
    #[account(seeds = [b"config"], bump = config.bump)]
    pub config: Account<'info, VestingConfig>,

    #[account(
        mut,
        seeds = [b"grant_book", config.key().as_ref()],
        bump
    )]
    pub grant_book: Box<Account<'info, GrantBook>>,

    pub authority: Signer<'info>,
}

#[event]
pub struct GrantAdded {
    pub index: u64,
    pub authority: Pubkey,
    pub beneficiary: Option<Pubkey>,
    pub role: Option<Pubkey>,
    pub participant: Participant,
    pub genesis_ts: i64,
    pub total_amount: u64,
    pub tge_amount: u64,
    pub final_amount: u64,
    pub basis: u64,
    pub cliff: u64,
    pub duration: u64,
    pub ts: i64,
}
