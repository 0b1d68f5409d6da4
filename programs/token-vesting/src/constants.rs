//! Program-wide constants.

/// Max grants stored on-chain in the grant book PDA.
///
/// Bounded by the 10 KiB CPI account-allocation limit at initialization;
/// 64 grants fit with headroom.
pub const MAX_GRANTS: usize = 64;

/// Seconds per day (UTC).
pub const SECONDS_PER_DAY: u64 = 86_400;
