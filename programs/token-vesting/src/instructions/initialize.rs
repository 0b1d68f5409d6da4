use anchor_lang::prelude::*;
use anchor_spl::token::Mint;

use crate::constants::MAX_GRANTS;
use crate::error::VestingError;
use crate::state::{GrantBook, VestingConfig};

pub fn initialize(ctx: Context<Initialize>, issuer: Pubkey, supply_cap: u64) -> Result<()> {
    require!(supply_cap > 0, VestingError::InvalidConfig);
    require!(issuer != Pubkey::default(), VestingError::InvalidPubkey);
    require!(
        issuer != ctx.accounts.admin.key(),
        VestingError::InvalidConfig
    );
    require!(
        issuer != ctx.accounts.config.key(),
        VestingError::InvalidConfig
    );
    require!(issuer != crate::ID, VestingError::InvalidConfig);

    let config = &mut ctx.accounts.config;
    config.mint = ctx.accounts.mint.key();
    config.admin = ctx.accounts.admin.key();
    config.issuer = issuer;
    config.supply_cap = supply_cap;
    config.bump = ctx.bumps.config;

    let book = &mut ctx.accounts.grant_book;
    book.grants = Vec::with_capacity(MAX_GRANTS);

    emit!(VestingInitialized {
        mint: config.mint,
        decimals: ctx.accounts.mint.decimals,
        admin: config.admin,
        issuer: config.issuer,
        supply_cap: config.supply_cap,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(
        init,
        payer = admin,
        space = 8 + VestingConfig::SIZE,
        seeds = [b"config"],
        bump
    )]
    pub config: Account<'info, VestingConfig>,

    #[account(
        init,
        payer = admin,
        space = GrantBook::space(MAX_GRANTS),
        seeds = [b"grant_book", config.key().as_ref()],
        bump
    )]
    pub grant_book: Account<'info, GrantBook>,

    /// Mint whose authority must be (or be handed to) the config PDA
    /// before any release can succeed.
    pub mint: Account<'info, Mint>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[event]
pub struct VestingInitialized {
    pub mint: Pubkey,
    pub decimals: u8,
    pub admin: Pubkey,
    pub issuer: Pubkey,
    pub supply_cap: u64,
}
