//! Milestone-discretized vesting math.
//!
//! Vesting unlocks in discrete tranches rather than continuously: the TGE
//! amount at genesis, one linear tranche per elapsed `basis` period after
//! the cliff, and the full total at the final milestone. Floor division is
//! used throughout; the per-milestone rounding remainder stays locked until
//! the final milestone pays `total_amount` outright, so the schedule can
//! only ever under-release before completion.

use crate::error::VestingError;
use crate::state::Grant;

/// Amount vested by `now`, per the grant's schedule parameters.
pub fn vested_amount(grant: &Grant, now: i64) -> Result<u64, VestingError> {
    if now < grant.genesis_ts {
        return Ok(0);
    }
    // genesis_ts > 0 is a creation invariant, so both sides are positive.
    let elapsed = (now as u64) - (grant.genesis_ts as u64);
    if elapsed < grant.cliff {
        return Ok(grant.tge_amount);
    }
    let span = grant
        .cliff
        .checked_add(grant.duration)
        .ok_or(VestingError::MathOverflow)?;
    if elapsed >= span {
        return Ok(grant.total_amount);
    }

    // Past the cliff, inside the linear span; duration > 0 and basis > 0
    // hold here, so the milestone divisors are never zero.
    let milestones_elapsed = (elapsed - grant.cliff) / grant.basis + 1;
    let milestones_total = grant.duration.div_ceil(grant.basis) + 1;
    if milestones_elapsed >= milestones_total {
        return Ok(grant.total_amount);
    }

    let linear = grant
        .total_amount
        .checked_sub(grant.tge_amount)
        .and_then(|v| v.checked_sub(grant.final_amount))
        .ok_or(VestingError::MathOverflow)?;
    let per_milestone = linear / (milestones_total - 1);
    let vested = (per_milestone as u128)
        .checked_mul(milestones_elapsed as u128)
        .ok_or(VestingError::MathOverflow)?
        .checked_add(grant.tge_amount as u128)
        .ok_or(VestingError::MathOverflow)?;
    u64::try_from(vested).map_err(|_| VestingError::MathOverflow)
}

/// Vested amount not yet minted; zero forever once revoked.
pub fn releasable_amount(grant: &Grant, now: i64) -> Result<u64, VestingError> {
    if grant.revoked {
        return Ok(0);
    }
    let vested = vested_amount(grant, now)?;
    vested
        .checked_sub(grant.released_amount)
        .ok_or(VestingError::MathOverflow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SECONDS_PER_DAY;
    use crate::state::{Grantee, Participant};
    use anchor_lang::prelude::Pubkey;

    const GENESIS: i64 = 1_700_000_000;

    fn grant(cliff_days: u64) -> Grant {
        Grant {
            grantee: Grantee::Address(Pubkey::new_from_array([1; 32])),
            participant: Participant::Seeding,
            genesis_ts: GENESIS,
            total_amount: 1_000,
            tge_amount: 100,
            final_amount: 100,
            basis: 30 * SECONDS_PER_DAY,
            cliff: cliff_days * SECONDS_PER_DAY,
            duration: 360 * SECONDS_PER_DAY,
            released_amount: 0,
            revoked: false,
        }
    }

    fn at_days(days: u64) -> i64 {
        GENESIS + (days * SECONDS_PER_DAY) as i64
    }

    #[test]
    fn nothing_vests_before_genesis() {
        assert_eq!(vested_amount(&grant(0), GENESIS - 1).unwrap(), 0);
    }

    #[test]
    fn only_tge_before_cliff() {
        let g = grant(90);
        assert_eq!(vested_amount(&g, GENESIS).unwrap(), 100);
        assert_eq!(vested_amount(&g, at_days(89)).unwrap(), 100);
    }

    #[test]
    fn fully_vested_at_and_after_schedule_end() {
        let g = grant(0);
        assert_eq!(vested_amount(&g, at_days(360)).unwrap(), 1_000);
        assert_eq!(vested_amount(&g, at_days(10_000)).unwrap(), 1_000);

        let g = grant(90);
        assert!(vested_amount(&g, at_days(449)).unwrap() < 1_000);
        assert_eq!(vested_amount(&g, at_days(450)).unwrap(), 1_000);
    }

    #[test]
    fn milestone_interior_values() {
        // linear = 800 over 12 paying milestones: 66 per milestone (floor).
        let g = grant(0);
        // First milestone window: one tranche plus TGE.
        assert_eq!(vested_amount(&g, at_days(1)).unwrap(), 166);
        assert_eq!(vested_amount(&g, at_days(29)).unwrap(), 166);
        // Day 200 sits in the 7th milestone window.
        assert_eq!(vested_amount(&g, at_days(200)).unwrap(), 66 * 7 + 100);
        // Last interior window under-releases; the remainder waits for the end.
        assert_eq!(vested_amount(&g, at_days(359)).unwrap(), 66 * 12 + 100);
    }

    #[test]
    fn rounding_remainder_only_paid_at_final_milestone() {
        let g = grant(0);
        let before_end = vested_amount(&g, at_days(359)).unwrap();
        assert!(before_end < g.total_amount);
        assert_eq!(
            vested_amount(&g, at_days(360)).unwrap() - before_end,
            g.total_amount - before_end
        );
    }

    #[test]
    fn vested_amount_is_monotone_in_time() {
        let g = grant(30);
        let mut last = 0;
        for day in 0..430 {
            let v = vested_amount(&g, at_days(day)).unwrap();
            assert!(v >= last, "day {day}: {v} < {last}");
            assert!(v <= g.total_amount);
            last = v;
        }
        assert_eq!(last, g.total_amount);
    }

    #[test]
    fn releasable_subtracts_released_and_zeroes_on_revoke() {
        let mut g = grant(0);
        g.released_amount = 150;
        let now = at_days(200);
        let vested = vested_amount(&g, now).unwrap();
        assert_eq!(releasable_amount(&g, now).unwrap(), vested - 150);

        g.revoked = true;
        assert_eq!(releasable_amount(&g, now).unwrap(), 0);
        assert_eq!(releasable_amount(&g, at_days(10_000)).unwrap(), 0);
        assert_eq!(g.released_amount, 150);
    }

    #[test]
    fn basis_longer_than_duration_is_a_single_paying_milestone() {
        let mut g = grant(0);
        g.basis = 720 * SECONDS_PER_DAY;
        // milestones_total = ceil(360/720) + 1 = 2; one paying milestone
        // carries the whole linear amount.
        assert_eq!(vested_amount(&g, at_days(1)).unwrap(), 800 + 100);
        assert_eq!(vested_amount(&g, at_days(360)).unwrap(), 1_000);
    }
}
