//! Scoring module
//!
//! One flat rule: every cleared row is worth [`SCORE_PER_ROW`] points.

use crate::types::SCORE_PER_ROW;

/// Points for clearing `rows` rows in one merge
pub fn line_clear_score(rows: usize) -> u32 {
    u32::try_from(rows)
        .unwrap_or(u32::MAX)
        .saturating_mul(SCORE_PER_ROW)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_points_per_row() {
        assert_eq!(line_clear_score(0), 0);
        assert_eq!(line_clear_score(1), 10);
        assert_eq!(line_clear_score(2), 20);
        assert_eq!(line_clear_score(4), 40);
    }

    #[test]
    fn saturates_instead_of_wrapping() {
        assert_eq!(line_clear_score(usize::MAX), u32::MAX);
    }
}
