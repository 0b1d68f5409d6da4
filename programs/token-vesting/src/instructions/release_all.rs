use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token};

use crate::error::VestingError;
use crate::state::{GrantBook, Grantee, Participant, VestingConfig};
use crate::utils::math;
use crate::utils::token::{expected_ata_address, mint_with_config_authority};

use super::release_self::TokensReleasedBatchItem;

pub fn release_all<'info>(ctx: Context<'_, '_, 'info, 'info, ReleaseBatch<'info>>) -> Result<()> {
    sweep(ctx, None)
}

/// Admin sweep over every non-revoked address grant, optionally filtered by
/// participant category. Role grants are excluded; they only pay out through
/// explicit role releases. Recipient ATAs are supplied as remaining
/// accounts and matched by derived address.
pub(crate) fn sweep<'info>(
    ctx: Context<'_, '_, 'info, 'info, ReleaseBatch<'info>>,
    participant: Option<Participant>,
) -> Result<()> {
    let config_ai = ctx.accounts.config.to_account_info();
    let config = &ctx.accounts.config;
    require_keys_eq!(
        ctx.accounts.admin.key(),
        config.admin,
        VestingError::UnauthorizedAdmin
    );
    if let Some(p) = participant {
        require!(p.is_assignable(), VestingError::InvalidArgument);
    }

    let now = Clock::get()?.unix_timestamp;

    let mut due: Vec<(usize, Pubkey, u64)> = Vec::new();
    for (i, g) in ctx.accounts.grant_book.grants.iter().enumerate() {
        let wallet = match g.grantee {
            Grantee::Address(w) => w,
            Grantee::Role(_) => continue,
        };
        if let Some(p) = participant {
            if g.participant != p {
                continue;
            }
        }
        let releasable = math::releasable_amount(g, now)?;
        if releasable == 0 {
            continue;
        }
        due.push((i, wallet, releasable));
    }

    for (i, wallet, amount) in due {
        let expected = expected_ata_address(&wallet, &config.mint);
        let ata = ctx
            .remaining_accounts
            .iter()
            .find(|ai| ai.key() == expected)
            .ok_or(VestingError::InvalidRecipientAta)?;

        mint_with_config_authority(
            &ctx.accounts.token_program,
            &ctx.accounts.mint.to_account_info(),
            ata,
            &config_ai,
            config.bump,
            amount,
        )?;

        let grant = &mut ctx.accounts.grant_book.grants[i];
        grant.released_amount = grant
            .released_amount
            .checked_add(amount)
            .ok_or(VestingError::MathOverflow)?;
        emit!(TokensReleasedBatchItem {
            index: i as u64,
            beneficiary: wallet,
            amount,
            released_total: grant.released_amount,
            ts: now,
        });
    }

    Ok(())
}

#[derive(Accounts)]
pub struct ReleaseBatch<'info> {
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

    pub admin: Signer<'info>,

    pub token_program: Program<'info, Token>,
}
