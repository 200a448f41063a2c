//! Fixed competition rules

use chrono::TimeDelta;

/// Riders finishing strictly closer than this to the rider ahead share a time.
pub const BUNCHING_GAP: TimeDelta = TimeDelta::seconds(1);

/// Shortest stage that can be added to a race, in kilometres.
pub const MIN_STAGE_LENGTH: f64 = 5.0;

/// Longest accepted race, stage or team name, in characters.
pub const MAX_NAME_LENGTH: usize = 30;

/// Earliest accepted rider year of birth.
pub const MIN_YEAR_OF_BIRTH: i32 = 1900;

/// Characters that may never appear in a race, stage or team name.
pub const FORBIDDEN_NAME_CHARS: &[char] = &['\t', '\u{8}', '\n', '\r', '\u{c}', '\'', '"', '\\'];
