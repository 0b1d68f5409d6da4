use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::error::VestingError;
use crate::state::{GrantBook, VestingConfig};
use crate::utils::token::{expected_ata_address, mint_with_config_authority};

/// Releases `amount` out of the caller's role grants to `recipient`.
///
/// The role is identified by the signing authority itself; the aggregate
/// releasable across the role's grants must cover `amount`. The drawdown
/// credits grants greedily in index order and stops at the grant whose
/// releasable covers the remainder without crediting it, while the mint
/// always pays the full `amount` (see `GrantBook::draw_down_role`).
pub fn release_role_amount(
    ctx: Context<ReleaseRoleAmount>,
    amount: u64,
    recipient: Pubkey,
) -> Result<()> {
    let config_ai = ctx.accounts.config.to_account_info();
    let config = &ctx.accounts.config;
    let role = ctx.accounts.role_authority.key();
    let now = Clock::get()?.unix_timestamp;

    if amount == 0 {
        return Ok(());
    }

    let book = &mut ctx.accounts.grant_book;
    require!(
        book.grants
            .iter()
            .any(|g| g.grantee == crate::state::Grantee::Role(role)),
        VestingError::NoMatchingGrant
    );
    let aggregate = book.role_releasable(&role, now)?;
    require!(aggregate >= amount, VestingError::InsufficientReleasable);

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

    book.draw_down_role(&role, amount, now)?;

    mint_with_config_authority(
        &ctx.accounts.token_program,
        &ctx.accounts.mint.to_account_info(),
        &ctx.accounts.recipient_ata.to_account_info(),
        &config_ai,
        config.bump,
        amount,
    )?;

    emit!(RoleTokensReleased {
        role,
        recipient,
        amount,
        aggregate_releasable: aggregate,
        ts: now,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct ReleaseRoleAmount<'info> {
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

    /// Holder of the role key the target grants are addressed to.
    pub role_authority: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

#[event]
pub struct RoleTokensReleased {
    pub role: Pubkey,
    pub recipient: Pubkey,
    pub amount: u64,
    pub aggregate_releasable: u64,
    pub ts: i64,
}
