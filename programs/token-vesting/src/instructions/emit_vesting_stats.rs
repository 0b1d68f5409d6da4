use anchor_lang::prelude::*;

use crate::state::{GrantBook, StatsFilter, VestingConfig, VestingStats};

/// Read-only aggregate over the grant book; an empty match is zeros, not
/// an error.
pub fn emit_vesting_stats(ctx: Context<EmitVestingStats>, filter: StatsFilter) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let stats = ctx.accounts.grant_book.stats(&filter, now)?;

    emit!(VestingStatsQuote {
        filter,
        stats,
        ts: now,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct EmitVestingStats<'info> {
    #[account(seeds = [b"config"], bump = config.bump)]
    pub config: Account<'info, VestingConfig>,

    #[account(
        seeds = [b"grant_book", config.key().as_ref()],
        bump
    )]
    pub grant_book: Box<Account<'info, GrantBook>>,
}

#[event]
pub struct VestingStatsQuote {
    pub filter: StatsFilter,
    pub stats: VestingStats,
    pub ts: i64,
}
