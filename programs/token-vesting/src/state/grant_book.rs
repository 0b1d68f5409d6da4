use anchor_lang::prelude::*;
use core::result::Result;

use crate::error::VestingError;
use crate::utils::math;

/// Addressing mode of a grant: a concrete beneficiary wallet XOR a role
/// authority. The role key is the opaque capability that authorizes
/// role-scoped releases; holding its signature is holding the role.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Grantee {
    Address(Pubkey),
    Role(Pubkey),
}

/// Participant category tag. `Unknown` and `OutOfRange` are boundary
/// sentinels carried for wire compatibility; grants must use an interior
/// variant.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Participant {
    Unknown,
    Seeding,
    PrivateSale,
    PublicSale,
    Team,
    Advisor,
    DeFi,
    Treasury,
    OutOfRange,
}

impl Participant {
    /// True for the interior variants a grant may be tagged with.
    pub fn is_assignable(self) -> bool {
        !matches!(self, Participant::Unknown | Participant::OutOfRange)
    }
}

/// Instruction input for `add_grant`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct GrantInput {
    pub grantee: Grantee,
    pub participant: Participant,
    pub genesis_ts: i64,
    pub total_amount: u64,
    pub tge_amount: u64,
    pub final_amount: u64,
    pub basis: u64,
    pub cliff: u64,
    pub duration: u64,
}

/// A single vesting grant. Appended once, never removed; its position in
/// the grant book is its permanent index. Only `released_amount` and
/// `revoked` mutate after creation.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grant {
    pub grantee: Grantee,
    pub participant: Participant,
    /// Vesting clock origin (Unix seconds, UTC); always > 0.
    pub genesis_ts: i64,
    pub total_amount: u64,
    /// Unlocked at genesis, before the cliff elapses.
    pub tge_amount: u64,
    /// Reserved for the final milestone (absorbs rounding remainder).
    pub final_amount: u64,
    /// Milestone period length in seconds; always > 0.
    pub basis: u64,
    /// Delay after genesis before milestone vesting begins, in seconds.
    pub cliff: u64,
    /// Total milestone-release span after the cliff, in seconds.
    pub duration: u64,
    /// Cumulative amount minted for this grant; monotone non-decreasing.
    pub released_amount: u64,
    /// One-way flag; freezes releasable at 0 without clawing back.
    pub revoked: bool,
}

impl Grant {
    pub const SIZE: usize =
        33 + // grantee (tag + key)
        1 +  // participant
        8 +  // genesis_ts
        8 +  // total_amount
        8 +  // tge_amount
        8 +  // final_amount
        8 +  // basis
        8 +  // cliff
        8 +  // duration
        8 +  // released_amount
        1;   // revoked

    /// Validates schedule parameters and builds a fresh grant.
    pub fn try_new(input: &GrantInput) -> Result<Self, VestingError> {
        let key = match input.grantee {
            Grantee::Address(w) => w,
            Grantee::Role(r) => r,
        };
        if key == Pubkey::default() {
            return Err(VestingError::InvalidArgument);
        }
        if !input.participant.is_assignable() {
            return Err(VestingError::InvalidArgument);
        }
        if input.genesis_ts <= 0 || input.basis == 0 {
            return Err(VestingError::InvalidArgument);
        }
        let reserved = (input.tge_amount as u128) + (input.final_amount as u128);
        if reserved > input.total_amount as u128 {
            return Err(VestingError::InvalidArgument);
        }
        // The schedule end must stay representable as a timestamp.
        let span = input
            .cliff
            .checked_add(input.duration)
            .ok_or(VestingError::InvalidArgument)?;
        let span = i64::try_from(span).map_err(|_| VestingError::InvalidArgument)?;
        input
            .genesis_ts
            .checked_add(span)
            .ok_or(VestingError::InvalidArgument)?;

        Ok(Grant {
            grantee: input.grantee,
            participant: input.participant,
            genesis_ts: input.genesis_ts,
            total_amount: input.total_amount,
            tge_amount: input.tge_amount,
            final_amount: input.final_amount,
            basis: input.basis,
            cliff: input.cliff,
            duration: input.duration,
            released_amount: 0,
            revoked: false,
        })
    }

    /// Wallet for address grants, `None` for role grants.
    pub fn beneficiary(&self) -> Option<Pubkey> {
        match self.grantee {
            Grantee::Address(w) => Some(w),
            Grantee::Role(_) => None,
        }
    }
}

/// Selector for bulk revocation.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum GrantSelector {
    Address(Pubkey),
    Role(Pubkey),
    Participant(Participant),
}

impl GrantSelector {
    pub fn matches(&self, grant: &Grant) -> bool {
        match *self {
            GrantSelector::Address(w) => grant.grantee == Grantee::Address(w),
            GrantSelector::Role(r) => grant.grantee == Grantee::Role(r),
            GrantSelector::Participant(p) => grant.participant == p,
        }
    }
}

/// Filter for aggregate queries.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatsFilter {
    Global,
    Address(Pubkey),
    Role(Pubkey),
    Participant(Participant),
}

impl StatsFilter {
    pub fn matches(&self, grant: &Grant) -> bool {
        match *self {
            StatsFilter::Global => true,
            StatsFilter::Address(w) => grant.grantee == Grantee::Address(w),
            StatsFilter::Role(r) => grant.grantee == Grantee::Role(r),
            StatsFilter::Participant(p) => grant.participant == p,
        }
    }
}

/// Aggregate amounts over a filtered slice of the grant book.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VestingStats {
    pub grants: u64,
    pub total_amount: u64,
    pub released_amount: u64,
    pub releasable_amount: u64,
}

/// PDA holding every grant. Append-only; a grant's vector position is its
/// stable external handle. Address/role/category lookups are linear scans,
/// so no grant data is ever stored twice.
#[account]
pub struct GrantBook {
    pub grants: Vec<Grant>,
}

impl GrantBook {
    /// Space for discriminator + vec header + fixed capacity.
    pub const fn space(max_grants: usize) -> usize {
        8 + 4 + max_grants * Grant::SIZE
    }

    pub fn grant(&self, index: u64) -> Result<&Grant, VestingError> {
        self.grants
            .get(index as usize)
            .ok_or(VestingError::GrantNotFound)
    }

    pub fn grant_mut(&mut self, index: u64) -> Result<&mut Grant, VestingError> {
        self.grants
            .get_mut(index as usize)
            .ok_or(VestingError::GrantNotFound)
    }

    /// Sum of every grant's `total_amount`, widened against overflow.
    pub fn granted_total(&self) -> Result<u128, VestingError> {
        let mut sum: u128 = 0;
        for g in &self.grants {
            sum = sum
                .checked_add(g.total_amount as u128)
                .ok_or(VestingError::MathOverflow)?;
        }
        Ok(sum)
    }

    /// Appends a validated grant, enforcing capacity and the supply cap.
    /// Returns the new grant's permanent index.
    pub fn append(
        &mut self,
        input: &GrantInput,
        supply_cap: u64,
        max_grants: usize,
    ) -> Result<u64, VestingError> {
        let grant = Grant::try_new(input)?;
        if self.grants.len() >= max_grants {
            return Err(VestingError::GrantBookFull);
        }
        let sum = self
            .granted_total()?
            .checked_add(grant.total_amount as u128)
            .ok_or(VestingError::MathOverflow)?;
        if sum > supply_cap as u128 {
            return Err(VestingError::SupplyCapExceeded);
        }
        self.grants.push(grant);
        Ok((self.grants.len() - 1) as u64)
    }

    /// Aggregate releasable amount across a role's grants.
    pub fn role_releasable(&self, role: &Pubkey, now: i64) -> Result<u64, VestingError> {
        let mut sum: u64 = 0;
        for g in &self.grants {
            if g.grantee != Grantee::Role(*role) {
                continue;
            }
            sum = sum
                .checked_add(math::releasable_amount(g, now)?)
                .ok_or(VestingError::MathOverflow)?;
        }
        Ok(sum)
    }

    /// Greedy index-order drawdown of `amount` against a role's grants.
    ///
    /// Credits each grant's `released_amount` in full until one grant's
    /// releasable covers the remainder; that covering grant is left
    /// uncredited and iteration stops. Callers mint the full requested
    /// amount regardless, so per-grant released totals can lag the amount
    /// actually minted through this path.
    pub fn draw_down_role(
        &mut self,
        role: &Pubkey,
        amount: u64,
        now: i64,
    ) -> Result<(), VestingError> {
        let mut remaining = amount;
        for g in self.grants.iter_mut() {
            if remaining == 0 {
                break;
            }
            if g.grantee != Grantee::Role(*role) {
                continue;
            }
            let releasable = math::releasable_amount(g, now)?;
            if releasable == 0 {
                continue;
            }
            if releasable < remaining {
                g.released_amount = g
                    .released_amount
                    .checked_add(releasable)
                    .ok_or(VestingError::MathOverflow)?;
                remaining -= releasable;
            } else {
                break;
            }
        }
        Ok(())
    }

    /// Strict single-grant revocation; errors if already revoked.
    pub fn revoke(&mut self, index: u64) -> Result<(), VestingError> {
        let grant = self.grant_mut(index)?;
        if grant.revoked {
            return Err(VestingError::AlreadyRevoked);
        }
        grant.revoked = true;
        Ok(())
    }

    /// Bulk revocation; already-revoked members are skipped, not errors.
    /// Returns (matched, newly revoked).
    pub fn revoke_matching(&mut self, selector: &GrantSelector) -> (u64, u64) {
        let mut matched: u64 = 0;
        let mut revoked: u64 = 0;
        for g in self.grants.iter_mut() {
            if !selector.matches(g) {
                continue;
            }
            matched += 1;
            if !g.revoked {
                g.revoked = true;
                revoked += 1;
            }
        }
        (matched, revoked)
    }

    /// Pure fold over the book; empty matches yield zeros.
    pub fn stats(&self, filter: &StatsFilter, now: i64) -> Result<VestingStats, VestingError> {
        let mut s = VestingStats::default();
        for g in &self.grants {
            if !filter.matches(g) {
                continue;
            }
            s.grants += 1;
            s.total_amount = s
                .total_amount
                .checked_add(g.total_amount)
                .ok_or(VestingError::MathOverflow)?;
            s.released_amount = s
                .released_amount
                .checked_add(g.released_amount)
                .ok_or(VestingError::MathOverflow)?;
            s.releasable_amount = s
                .releasable_amount
                .checked_add(math::releasable_amount(g, now)?)
                .ok_or(VestingError::MathOverflow)?;
        }
        Ok(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SECONDS_PER_DAY;

    const GENESIS: i64 = 1_700_000_000;

    fn input(grantee: Grantee) -> GrantInput {
        GrantInput {
            grantee,
            participant: Participant::Seeding,
            genesis_ts: GENESIS,
            total_amount: 1_000,
            tge_amount: 100,
            final_amount: 100,
            basis: 30 * SECONDS_PER_DAY,
            cliff: 0,
            duration: 360 * SECONDS_PER_DAY,
        }
    }

    fn wallet(n: u8) -> Pubkey {
        Pubkey::new_from_array([n; 32])
    }

    fn book_with(inputs: &[GrantInput]) -> GrantBook {
        let mut book = GrantBook { grants: Vec::new() };
        for i in inputs {
            book.append(i, u64::MAX, 64).unwrap();
        }
        book
    }

    fn after_days(days: u64) -> i64 {
        GENESIS + (days * SECONDS_PER_DAY) as i64
    }

    #[test]
    fn rejects_invalid_schedules() {
        let base = input(Grantee::Address(wallet(1)));

        let mut bad = base;
        bad.genesis_ts = 0;
        assert!(matches!(Grant::try_new(&bad), Err(VestingError::InvalidArgument)));

        let mut bad = base;
        bad.basis = 0;
        assert!(matches!(Grant::try_new(&bad), Err(VestingError::InvalidArgument)));

        let mut bad = base;
        bad.tge_amount = 600;
        bad.final_amount = 500;
        assert!(matches!(Grant::try_new(&bad), Err(VestingError::InvalidArgument)));

        let mut bad = base;
        bad.cliff = u64::MAX;
        bad.duration = 1;
        assert!(matches!(Grant::try_new(&bad), Err(VestingError::InvalidArgument)));

        let mut bad = base;
        bad.participant = Participant::Unknown;
        assert!(matches!(Grant::try_new(&bad), Err(VestingError::InvalidArgument)));
        bad.participant = Participant::OutOfRange;
        assert!(matches!(Grant::try_new(&bad), Err(VestingError::InvalidArgument)));

        let mut bad = base;
        bad.grantee = Grantee::Address(Pubkey::default());
        assert!(matches!(Grant::try_new(&bad), Err(VestingError::InvalidArgument)));
    }

    #[test]
    fn append_assigns_stable_indexes_and_enforces_cap() {
        let mut book = GrantBook { grants: Vec::new() };
        let a = input(Grantee::Address(wallet(1)));
        let b = input(Grantee::Role(wallet(2)));
        assert_eq!(book.append(&a, 10_000, 64).unwrap(), 0);
        assert_eq!(book.append(&b, 10_000, 64).unwrap(), 1);

        // Third grant of 1_000 would push the sum past a 2_500 cap.
        let c = input(Grantee::Address(wallet(3)));
        assert!(matches!(
            book.append(&c, 2_500, 64),
            Err(VestingError::SupplyCapExceeded)
        ));

        assert!(matches!(book.append(&c, 10_000, 2), Err(VestingError::GrantBookFull)));
    }

    #[test]
    fn revocation_freezes_releasable_without_clawback() {
        let mut book = book_with(&[input(Grantee::Address(wallet(1)))]);
        book.grants[0].released_amount = 300;

        book.revoke(0).unwrap();
        let g = book.grant(0).unwrap();
        assert_eq!(math::releasable_amount(g, after_days(400)).unwrap(), 0);
        assert_eq!(g.released_amount, 300);

        // Strict mode: second revoke fails.
        assert!(matches!(book.revoke(0), Err(VestingError::AlreadyRevoked)));
        assert!(matches!(book.revoke(7), Err(VestingError::GrantNotFound)));
    }

    #[test]
    fn bulk_revoke_skips_already_revoked() {
        let role = wallet(9);
        let mut book = book_with(&[
            input(Grantee::Role(role)),
            input(Grantee::Role(role)),
            input(Grantee::Address(wallet(1))),
        ]);
        book.revoke(0).unwrap();

        let (matched, revoked) = book.revoke_matching(&GrantSelector::Role(role));
        assert_eq!((matched, revoked), (2, 1));
        assert!(book.grants[0].revoked && book.grants[1].revoked);
        assert!(!book.grants[2].revoked);

        let (matched, _) = book.revoke_matching(&GrantSelector::Role(wallet(42)));
        assert_eq!(matched, 0);
    }

    #[test]
    fn role_aggregate_equals_per_grant_sum() {
        let role = wallet(9);
        let mut book = book_with(&[
            input(Grantee::Role(role)),
            input(Grantee::Role(role)),
            input(Grantee::Address(wallet(1))),
        ]);
        book.grants[1].released_amount = 50;

        let now = after_days(200);
        let by_hand: u64 = book
            .grants
            .iter()
            .filter(|g| g.grantee == Grantee::Role(role))
            .map(|g| math::releasable_amount(g, now).unwrap())
            .sum();
        assert_eq!(book.role_releasable(&role, now).unwrap(), by_hand);

        let stats = book.stats(&StatsFilter::Role(role), now).unwrap();
        assert_eq!(stats.releasable_amount, by_hand);
        assert_eq!(stats.grants, 2);
    }

    #[test]
    fn role_drawdown_leaves_covering_grant_uncredited() {
        let role = wallet(9);
        let mut book = book_with(&[
            input(Grantee::Role(role)),
            input(Grantee::Role(role)),
            input(Grantee::Role(role)),
        ]);
        // Fully vested: each grant's releasable is 1_000.
        let now = after_days(400);
        assert_eq!(book.role_releasable(&role, now).unwrap(), 3_000);

        book.draw_down_role(&role, 2_500, now).unwrap();
        // First two grants consumed in full; the covering third grant is
        // left uncredited even though the caller mints the full 2_500.
        assert_eq!(book.grants[0].released_amount, 1_000);
        assert_eq!(book.grants[1].released_amount, 1_000);
        assert_eq!(book.grants[2].released_amount, 0);

        let credited: u64 = book.grants.iter().map(|g| g.released_amount).sum();
        assert!(credited < 2_500);
    }

    #[test]
    fn drawdown_exact_cover_credits_nothing() {
        let role = wallet(9);
        let mut book = book_with(&[input(Grantee::Role(role))]);
        let now = after_days(400);

        // A single grant whose releasable exactly covers the request is the
        // covering grant from the first iteration: no credit at all.
        book.draw_down_role(&role, 1_000, now).unwrap();
        assert_eq!(book.grants[0].released_amount, 0);
    }

    #[test]
    fn release_credit_is_idempotent() {
        let mut book = book_with(&[input(Grantee::Address(wallet(1)))]);
        let now = after_days(200);

        let first = math::releasable_amount(book.grant(0).unwrap(), now).unwrap();
        assert!(first > 0);
        book.grants[0].released_amount += first;

        let second = math::releasable_amount(book.grant(0).unwrap(), now).unwrap();
        assert_eq!(second, 0);
    }

    #[test]
    fn stats_tolerate_empty_book_and_filter() {
        let book = GrantBook { grants: Vec::new() };
        let s = book.stats(&StatsFilter::Global, after_days(1)).unwrap();
        assert_eq!(s, VestingStats::default());

        let book = book_with(&[input(Grantee::Address(wallet(1)))]);
        let s = book
            .stats(&StatsFilter::Participant(Participant::Team), after_days(1))
            .unwrap();
        assert_eq!(s.grants, 0);
        assert_eq!(s.releasable_amount, 0);
    }

    #[test]
    fn stats_by_address_and_participant() {
        let mut seed = input(Grantee::Address(wallet(1)));
        seed.participant = Participant::Seeding;
        let mut team = input(Grantee::Address(wallet(2)));
        team.participant = Participant::Team;
        let book = book_with(&[seed, team]);

        let now = after_days(400);
        let s = book.stats(&StatsFilter::Address(wallet(1)), now).unwrap();
        assert_eq!((s.grants, s.total_amount, s.releasable_amount), (1, 1_000, 1_000));

        let s = book
            .stats(&StatsFilter::Participant(Participant::Team), now)
            .unwrap();
        assert_eq!(s.grants, 1);

        let s = book.stats(&StatsFilter::Global, now).unwrap();
        assert_eq!(s.total_amount, 2_000);
    }
}
