use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::error::VestingError;
use crate::state::{GrantBook, Grantee, VestingConfig};
use crate::utils::math;
use crate::utils::token::{expected_ata_address, mint_with_config_authority};

pub fn release_self(ctx: Context<ReleaseSelf>) -> Result<()> {
    let config_ai = ctx.accounts.config.to_account_info();
    let config = &ctx.accounts.config;
    let beneficiary = ctx.accounts.beneficiary.key();
    let now = Clock::get()?.unix_timestamp;

    // Plan first; credit and mint only after the aggregate is known.
    let mut due: Vec<(usize, u64)> = Vec::new();
    let mut total: u64 = 0;
    for (i, g) in ctx.accounts.grant_book.grants.iter().enumerate() {
        if g.grantee != Grantee::Address(beneficiary) {
            continue;
        }
        let releasable = math::releasable_amount(g, now)?;
        if releasable == 0 {
            continue;
        }
        total = total
            .checked_add(releasable)
            .ok_or(VestingError::MathOverflow)?;
        due.push((i, releasable));
    }
    // Nothing releasable anywhere: a successful no-op.
    if total == 0 {
        return Ok(());
    }

    require_keys_eq!(
        ctx.accounts.beneficiary_ata.key(),
        expected_ata_address(&beneficiary, &config.mint),
        VestingError::InvalidRecipientAta
    );
    require_keys_eq!(
        ctx.accounts.beneficiary_ata.mint,
        config.mint,
        VestingError::InvalidTokenMint
    );

    // One aggregate mint for all of the caller's grants.
    mint_with_config_authority(
        &ctx.accounts.token_program,
        &ctx.accounts.mint.to_account_info(),
        &ctx.accounts.beneficiary_ata.to_account_info(),
        &config_ai,
        config.bump,
        total,
    )?;

    for (i, amount) in due {
        let grant = &mut ctx.accounts.grant_book.grants[i];
        grant.released_amount = grant
            .released_amount
            .checked_add(amount)
            .ok_or(VestingError::MathOverflow)?;
        emit!(TokensReleasedBatchItem {
            index: i as u64,
            beneficiary,
            amount,
            released_total: grant.released_amount,
            ts: now,
        });
    }

    Ok(())
}

#[derive(Accounts)]
pub struct ReleaseSelf<'info> {
    #[account(seeds = [b"config"], bump = config.bump)]
    pub config: Account<'info, VestingConfig>,

    #[account(
        mut,
        seeds = [b"grant_book", config.key().as_ref()],
        bump
    )]
    pub grant_book: Box<Account<'info, GrantBook>>,

    #[account(mut, address = config.mint @ VestingError::InvalidTokenMint)]
    pub mint: Account<'info, Mint>,

    #[account(mut)]
    pub beneficiary_ata: Account<'info, TokenAccount>,

    pub beneficiary: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

/// Per-grant item emitted by the aggregate release paths.
#[event]
pub struct TokensReleasedBatchItem {
    pub index: u64,
    pub beneficiary: Pubkey,
    pub amount: u64,
    pub released_total: u64,
    pub ts: i64,
}
