use super::{common_prefix_len, keep_longer, max_match_at, Match, MatchFinder};
use crate::format::MIN_MATCH_LENGTH;

/// Exhaustive window scan.
///
/// Compares every origin in `[position - window_size, position)` against the
/// lookahead. O(window * lookahead) per position; kept as the reference the
/// indexed finder is checked against.
pub struct BruteForceFinder {
    window_size: usize,
    lookahead_size: usize,
}

impl BruteForceFinder {
    pub fn new(window_size: usize, lookahead_size: usize) -> Self {
        Self { window_size, lookahead_size }
    }
}

impl MatchFinder for BruteForceFinder {
    fn find(&mut self, data: &[u8], position: usize) -> Option<Match> {
        let limit = max_match_at(data, position, self.lookahead_size);
        if limit < MIN_MATCH_LENGTH {
            return None;
        }

        let window_start = position.saturating_sub(self.window_size);
        let mut best = None;

        // Nearest origin first
        for origin in (window_start..position).rev() {
            let length = common_prefix_len(data, origin, position, limit);
            keep_longer(&mut best, position - origin, length);
            if length == limit {
                break;
            }
        }

        best
    }
}
