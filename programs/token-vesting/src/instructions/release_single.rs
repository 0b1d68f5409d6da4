use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::error::VestingError;
use crate::state::{GrantBook, VestingConfig};
use crate::utils::math;
use crate::utils::token::{expected_ata_address, mint_with_config_authority};

pub fn release_single(ctx: Context<ReleaseSingle>, index: u64, recipient: Pubkey) -> Result<()> {
    let config_ai = ctx.accounts.config.to_account_info();
    let config = &ctx.accounts.config;

    let grant = *ctx.accounts.grant_book.grant(index)?;
    let beneficiary = grant.beneficiary().ok_or(VestingError::InvalidArgument)?;
    let authority = ctx.accounts.authority.key();
    require!(
        authority == beneficiary || authority == config.admin,
        VestingError::UnauthorizedBeneficiary
    );

    let now = Clock::get()?.unix_timestamp;
    let releasable = math::releasable_amount(&grant, now)?;
    // Nothing newly vested: a successful no-op, not an error.
    if releasable == 0 {
        return Ok(());
    }

    require_keys_eq!(
        ctx.accounts.recipient_ata.key(),
        expected_ata_address(&recipient, &config.mint),
        VestingError::InvalidRecipientAta
    );
    require_keys_eq!(
        ctx.accounts.recipient_ata.mint,
        config.mint,
        VestingError::InvalidTokenMint
    );
    require_keys_eq!(
        ctx.accounts.recipient_ata.owner,
        recipient,
        VestingError::InvalidTokenAccount
    );

    mint_with_config_authority(
        &ctx.accounts.token_program,
        &ctx.accounts.mint.to_account_info(),
        &ctx.accounts.recipient_ata.to_account_info(),
        &config_ai,
        config.bump,
        releasable,
    )?;

    let grant = ctx.accounts.grant_book.grant_mut(index)?;
    grant.released_amount = grant
        .released_amount
        .checked_add(releasable)
        .ok_or(VestingError::MathOverflow)?;

    emit!(TokensReleased {
        index,
        authority,
        beneficiary,
        recipient,
        amount: releasable,
        released_total: grant.released_amount,
        ts: now,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct ReleaseSingle<'info> {
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
    pub recipient_ata: Account<'info, TokenAccount>,

    pub authority: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

#[event]
pub struct TokensReleased {
    pub index: u64,
    pub authority: Pubkey,
    pub beneficiary: Pubkey,
    pub recipient: Pubkey,
    pub amount: u64,
    pub released_total: u64,
    pub ts: i64,
}
