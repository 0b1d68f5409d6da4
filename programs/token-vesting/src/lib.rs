use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod instructions;
pub mod state;
pub mod utils;

use instructions::*;
use state::{GrantInput, GrantSelector, Participant, StatsFilter};

declare_id!("61EiRiRNSU4ZEhnn8JpC6L9VRHz7oKvD9YzSP6bNZNWp");

#[program]
pub mod token_vesting {
    use super::*;

    pub fn initialize(ctx: Context<Initialize>, issuer: Pubkey, supply_cap: u64) -> Result<()> {
        instructions::initialize::initialize(ctx, issuer, supply_cap)
    }

    pub fn set_issuer(ctx: Context<SetIssuer>, new_issuer: Pubkey) -> Result<()> {
        instructions::set_issuer::set_issuer(ctx, new_issuer)
    }

    pub fn add_grant(ctx: Context<AddGrant>, input: GrantInput) -> Result<u64> {
        instructions::add_grant::add_grant(ctx, input)
    }

    pub fn release_single(
        ctx: Context<ReleaseSingle>,
        index: u64,
        recipient: Pubkey,
    ) -> Result<()> {
        instructions::release_single::release_single(ctx, index, recipient)
    }

    pub fn release_self(ctx: Context<ReleaseSelf>) -> Result<()> {
        instructions::release_self::release_self(ctx)
    }

    pub fn release_all<'info>(
        ctx: Context<'_, '_, 'info, 'info, ReleaseBatch<'info>>,
    ) -> Result<()> {
        instructions::release_all::release_all(ctx)
    }

    pub fn release_by_participant<'info>(
        ctx: Context<'_, '_, 'info, 'info, ReleaseBatch<'info>>,
        participant: Participant,
    ) -> Result<()> {
        instructions::release_by_participant::release_by_participant(ctx, participant)
    }

    pub fn release_role_amount(
        ctx: Context<ReleaseRoleAmount>,
        amount: u64,
        recipient: Pubkey,
    ) -> Result<()> {
        instructions::release_role_amount::release_role_amount(ctx, amount, recipient)
    }

    pub fn revoke_grant(ctx: Context<RevokeGrant>, index: u64) -> Result<()> {
        instructions::revoke_grant::revoke_grant(ctx, index)
    }

    pub fn revoke_batch(ctx: Context<RevokeBatch>, selector: GrantSelector) -> Result<()> {
        instructions::revoke_batch::revoke_batch(ctx, selector)
    }

    pub fn emit_grant_quote(ctx: Context<EmitGrantQuote>, index: u64) -> Result<()> {
        instructions::emit_grant_quote::emit_grant_quote(ctx, index)
    }

    pub fn emit_vesting_stats(ctx: Context<EmitVestingStats>, filter: StatsFilter) -> Result<()> {
        instructions::emit_vesting_stats::emit_vesting_stats(ctx, filter)
    }
}
