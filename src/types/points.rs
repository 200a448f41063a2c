//! Position-dependent points tables
//!
//! Index 0 is the points awarded to the first-ranked rider. Riders ranked
//! beyond the end of a table receive nothing from it.

/// Intermediate sprint points.
pub const SPRINT: &[u32] = &[20, 17, 15, 13, 11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1];

/// Fourth category climb.
pub const CLIMB_C4: &[u32] = &[1];
/// Third category climb.
pub const CLIMB_C3: &[u32] = &[2, 1];
/// Second category climb.
pub const CLIMB_C2: &[u32] = &[5, 3, 2, 1];
/// First category climb.
pub const CLIMB_C1: &[u32] = &[10, 8, 6, 4, 2, 1];
/// Hors catégorie climb.
pub const CLIMB_HC: &[u32] = &[20, 15, 12, 10, 8, 6, 4, 2];

/// Stage finish points for flat stages.
pub const FLAT_STAGE: &[u32] = &[50, 30, 20, 18, 16, 14, 12, 10, 8, 7, 6, 5, 4, 3, 2];
/// Stage finish points for medium mountain stages.
pub const MEDIUM_MOUNTAIN_STAGE: &[u32] = &[30, 25, 22, 19, 17, 15, 13, 11, 9, 7, 6, 5, 4, 3, 2];
/// Stage finish points for high mountain stages and time trials.
pub const OTHER_STAGE: &[u32] = &[20, 17, 15, 13, 11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_are_non_increasing() {
        for table in [
            SPRINT,
            CLIMB_C4,
            CLIMB_C3,
            CLIMB_C2,
            CLIMB_C1,
            CLIMB_HC,
            FLAT_STAGE,
            MEDIUM_MOUNTAIN_STAGE,
            OTHER_STAGE,
        ] {
            assert!(!table.is_empty());
            assert!(table.windows(2).all(|pair| pair[0] >= pair[1]), "{:?}", table);
        }
    }

    #[test]
    fn table_lengths() {
        assert_eq!(SPRINT.len(), 15);
        assert_eq!(CLIMB_HC.len(), 8);
        assert_eq!(FLAT_STAGE.len(), 15);
        assert_eq!(MEDIUM_MOUNTAIN_STAGE.len(), 15);
    }
}
