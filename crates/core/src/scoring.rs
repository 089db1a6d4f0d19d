//! Scoring module - line clears, T-spins, drops and levels
//!
//! Points for a lock are `multiplier x level`, where the multiplier comes from
//! the T-spin table when the lock was classified as a T-spin and from the
//! classic line table otherwise. The two tables are never added together.
//! There is no distinction between full and mini T-spins.

use crate::types::{
    HARD_DROP_POINTS, LINES_PER_LEVEL, LINE_SCORES, SOFT_DROP_POINTS, TSPIN_SCORES,
};

/// Points for a lock clearing `lines` rows at `level` (levels start at 1)
pub fn line_clear_points(lines: usize, tspin: bool, level: u32) -> u32 {
    let multiplier = if tspin {
        TSPIN_SCORES.get(lines).copied().unwrap_or(0)
    } else {
        LINE_SCORES.get(lines).copied().unwrap_or(0)
    };
    multiplier.saturating_mul(level)
}

/// Calculate drop score
/// soft drop: +1 per cell
/// hard drop: +2 per cell
pub fn drop_points(cells: u32, is_hard_drop: bool) -> u32 {
    if is_hard_drop {
        cells * HARD_DROP_POINTS
    } else {
        cells * SOFT_DROP_POINTS
    }
}

/// Level for a running line total: one level per ten lines, starting at 1
pub fn level_for_lines(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_line_scores() {
        assert_eq!(line_clear_points(0, false, 1), 0);
        assert_eq!(line_clear_points(1, false, 1), 40);
        assert_eq!(line_clear_points(2, false, 1), 100);
        assert_eq!(line_clear_points(3, false, 1), 300);
        assert_eq!(line_clear_points(4, false, 1), 1200);

        assert_eq!(line_clear_points(1, false, 5), 40 * 5);
        assert_eq!(line_clear_points(4, false, 5), 1200 * 5);
    }

    #[test]
    fn test_tspin_scores() {
        assert_eq!(line_clear_points(0, true, 1), 400);
        assert_eq!(line_clear_points(1, true, 1), 800);
        assert_eq!(line_clear_points(2, true, 1), 1200);
        assert_eq!(line_clear_points(3, true, 1), 1600);
        assert_eq!(line_clear_points(4, true, 1), 0);

        assert_eq!(line_clear_points(1, true, 3), 800 * 3);
    }

    #[test]
    fn test_tetris_and_tspin_double_are_distinct_branches() {
        // Same value, reached through different tables
        assert_eq!(line_clear_points(4, false, 2), 2400);
        assert_eq!(line_clear_points(2, true, 2), 2400);
        assert_ne!(line_clear_points(2, false, 2), line_clear_points(2, true, 2));
        assert_ne!(line_clear_points(4, false, 2), line_clear_points(4, true, 2));
    }

    #[test]
    fn test_drop_scores() {
        assert_eq!(drop_points(10, false), 10);
        assert_eq!(drop_points(10, true), 20);
        assert_eq!(drop_points(0, true), 0);
    }

    #[test]
    fn test_level_calculation() {
        assert_eq!(level_for_lines(0), 1);
        assert_eq!(level_for_lines(9), 1);
        assert_eq!(level_for_lines(10), 2);
        assert_eq!(level_for_lines(29), 3);
        assert_eq!(level_for_lines(100), 11);
    }
}
