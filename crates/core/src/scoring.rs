//! Scoring module - line-clear points and slowdown thresholds
//!
//! A clear of `n` lines is worth `n × 50` plus a fixed bonus for 2, 3 or 4
//! lines (100 / 200 / 300). Counts outside 1..=4 earn base points only; no
//! bonus is extrapolated for them.

use crate::types::{LINE_BASE_POINTS, LINE_BONUS_POINTS};

/// Points awarded for clearing `lines` rows at once.
pub fn line_clear_points(lines: u32) -> u32 {
    let bonus = LINE_BONUS_POINTS
        .get(lines as usize)
        .copied()
        .unwrap_or(0);
    lines.saturating_mul(LINE_BASE_POINTS).saturating_add(bonus)
}

/// Whether going from `before` to `after` passed a multiple of `step`.
pub fn crossed_step(before: u32, after: u32, step: u32) -> bool {
    step > 0 && after / step > before / step
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_clear_table() {
        assert_eq!(line_clear_points(0), 0);
        assert_eq!(line_clear_points(1), 50);
        assert_eq!(line_clear_points(2), 200);
        assert_eq!(line_clear_points(3), 350);
        assert_eq!(line_clear_points(4), 500);
    }

    #[test]
    fn test_no_bonus_beyond_four() {
        assert_eq!(line_clear_points(5), 250);
    }

    #[test]
    fn test_crossed_step() {
        assert!(!crossed_step(0, 999, 1000));
        assert!(crossed_step(950, 1000, 1000));
        assert!(crossed_step(900, 2250, 1000));
        assert!(!crossed_step(1000, 1350, 1000));
        assert!(!crossed_step(0, 5000, 0));
    }
}
