use anchor_lang::prelude::*;

use crate::error::VestingError;
use crate::state::VestingConfig;

pub fn set_issuer(ctx: Context<SetIssuer>, new_issuer: Pubkey) -> Result<()> {
    require!(new_issuer != Pubkey::default(), VestingError::InvalidPubkey);

    let config_key = ctx.accounts.config.key();
    let config = &mut ctx.accounts.config;
    require_keys_eq!(
        ctx.accounts.admin.key(),
        config.admin,
        VestingError::UnauthorizedAdmin
    );
    require!(new_issuer != config.admin, VestingError::InvalidConfig);
    require!(new_issuer != config_key, VestingError::InvalidConfig);
    require!(new_issuer != crate::ID, VestingError::InvalidConfig);

    let old = config.issuer;
    config.issuer = new_issuer;

    emit!(IssuerSet {
        admin: config.admin,
        old_issuer: old,
        new_issuer,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct SetIssuer<'info> {
    #[account(mut, seeds = [b"config"], bump = config.bump)]
    pub config: Account<'info, VestingConfig>,

    pub admin: Signer<'info>,
}

#[event]
pub struct IssuerSet {
    pub admin: Pubkey,
    pub old_issuer: Pubkey,
    pub new_issuer: Pubkey,
}
