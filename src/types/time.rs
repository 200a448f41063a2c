//! 24-hour clock arithmetic for checkpoint and elapsed times
//!
//! Elapsed times are carried as [`NaiveTime`] values measured from midnight,
//! so that a stage completed in 4h32m is represented as `04:32:00`. Both
//! subtraction and summation wrap around the 24-hour clock.

use chrono::{NaiveTime, TimeDelta};

/// Zero elapsed time.
pub const MIDNIGHT: NaiveTime = NaiveTime::MIN;

/// Time elapsed between `start` and `checkpoint`, wrapping past midnight.
pub fn elapsed_between(start: NaiveTime, checkpoint: NaiveTime) -> NaiveTime {
    checkpoint.overflowing_sub_signed(since_midnight(start)).0
}

/// Add an elapsed time onto a running total, wrapping past midnight.
pub fn accumulate(total: NaiveTime, elapsed: NaiveTime) -> NaiveTime {
    total.overflowing_add_signed(since_midnight(elapsed)).0
}

/// Duration between midnight and `time`.
pub fn since_midnight(time: NaiveTime) -> TimeDelta {
    time.signed_duration_since(MIDNIGHT)
}
