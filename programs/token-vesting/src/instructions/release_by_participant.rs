use anchor_lang::prelude::*;

use crate::state::Participant;

use super::release_all::{sweep, ReleaseBatch};

pub fn release_by_participant<'info>(
    ctx: Context<'_, '_, 'info, 'info, ReleaseBatch<'info>>,
    participant: Participant,
) -> Result<()> {
    sweep(ctx, Some(participant))
}
