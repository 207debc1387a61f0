// A simple module to define the time types used in the project
//
// Chain time is always the timestamp of the block being applied.
// Nothing in the ledger core reads the wall clock: every node must reach
// the same state from the same blocks.

// Seconds timestamps used to determine it using its type
pub type TimestampSeconds = u64;

// Durations expressed in seconds (claim periods, vesting windows)
pub type DurationSeconds = u64;

pub const SECONDS_PER_DAY: DurationSeconds = 86_400;

// Number of started days covered by a duration, used by per-day fees
#[inline]
pub const fn days_rounded_up(seconds: DurationSeconds) -> u64 {
    seconds.div_ceil(SECONDS_PER_DAY)
}
