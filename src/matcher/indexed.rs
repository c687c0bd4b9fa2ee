// Prefix-indexed match search.
//
// Every position whose two-byte prefix is known is linked into a chain keyed by
// that prefix:
//   - `heads[key]` holds the most recent position with prefix `key`,
//   - `prev[pos]` holds the position before `pos` with the same prefix.
// Walking a chain therefore yields origins in increasing distance order, and
// the walk stops at the first origin beyond the window.
//
// The index keeps one link per input position and is never pruned; it lives
// only as long as a single compression run.

use super::{common_prefix_len, keep_longer, max_match_at, Match, MatchFinder};
use crate::format::MIN_MATCH_LENGTH;

/// Marker for "no position" in `heads` and `prev`.
const NIL: usize = usize::MAX;

/// Number of distinct two-byte prefixes
const PREFIX_KEYS: usize = 1 << 16;

#[inline]
fn prefix_key(data: &[u8], position: usize) -> usize {
    ((data[position] as usize) << 8) | data[position + 1] as usize
}

/// Append-only map from two-byte prefix to the positions where it occurred.
pub struct PrefixIndex {
    heads: Vec<usize>,
    prev: Vec<usize>,
}

impl PrefixIndex {
    pub fn new() -> Self {
        Self { heads: vec![NIL; PREFIX_KEYS], prev: Vec::new() }
    }

    pub fn with_capacity(positions: usize) -> Self {
        Self { heads: vec![NIL; PREFIX_KEYS], prev: Vec::with_capacity(positions) }
    }

    /// Record `position` under the prefix starting there.
    ///
    /// Positions must be inserted in increasing order. The final byte of the
    /// input has no two-byte prefix and is not recorded.
    pub fn insert(&mut self, data: &[u8], position: usize) {
        if position + MIN_MATCH_LENGTH > data.len() {
            return;
        }
        debug_assert!(self.prev.len() <= position, "positions must be inserted in order");
        if self.prev.len() <= position {
            self.prev.resize(position + 1, NIL);
        }

        let key = prefix_key(data, position);
        self.prev[position] = self.heads[key];
        self.heads[key] = position;
    }

    /// Positions sharing the prefix at `position`, most recent first.
    pub fn candidates<'a>(&'a self, data: &[u8], position: usize) -> Chain<'a> {
        let next = if position + MIN_MATCH_LENGTH <= data.len() {
            self.heads[prefix_key(data, position)]
        } else {
            NIL
        };
        Chain { prev: &self.prev, next }
    }

    /// Number of positions with a recorded link slot
    pub fn len(&self) -> usize {
        self.prev.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prev.is_empty()
    }
}

impl Default for PrefixIndex {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over one prefix chain
pub struct Chain<'a> {
    prev: &'a [usize],
    next: usize,
}

impl Iterator for Chain<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.next == NIL {
            return None;
        }
        let current = self.next;
        self.next = self.prev[current];
        Some(current)
    }
}

/// Match finder backed by a `PrefixIndex`.
///
/// Returns exactly what `BruteForceFinder` returns for the same configuration;
/// only origins sharing the two-byte prefix are ever compared.
pub struct IndexedFinder {
    window_size: usize,
    lookahead_size: usize,
    index: PrefixIndex,
    /// First position not yet recorded in the index
    indexed_until: usize,
}

impl IndexedFinder {
    pub fn new(window_size: usize, lookahead_size: usize) -> Self {
        Self { window_size, lookahead_size, index: PrefixIndex::new(), indexed_until: 0 }
    }

    pub fn with_capacity(window_size: usize, lookahead_size: usize, input_len: usize) -> Self {
        Self {
            window_size,
            lookahead_size,
            index: PrefixIndex::with_capacity(input_len),
            indexed_until: 0,
        }
    }

    /// Record every position in `indexed_until..end`
    fn index_until(&mut self, data: &[u8], end: usize) {
        while self.indexed_until < end {
            self.index.insert(data, self.indexed_until);
            self.indexed_until += 1;
        }
    }

    pub fn index(&self) -> &PrefixIndex {
        &self.index
    }
}

impl MatchFinder for IndexedFinder {
    fn find(&mut self, data: &[u8], position: usize) -> Option<Match> {
        // Searches only ever look backwards, so everything before `position`
        // must be visible and `position` itself must not be.
        self.index_until(data, position);

        let limit = max_match_at(data, position, self.lookahead_size);
        let mut best = None;

        if limit >= MIN_MATCH_LENGTH {
            for origin in self.index.candidates(data, position) {
                let distance = position - origin;
                if distance > self.window_size {
                    break;
                }
                let length = common_prefix_len(data, origin, position, limit);
                keep_longer(&mut best, distance, length);
                if length == limit {
                    break;
                }
            }
        }

        self.index_until(data, position + 1);
        best
    }

    fn advance(&mut self, data: &[u8], end: usize) {
        self.index_until(data, end);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::BruteForceFinder;

    #[test]
    fn test_index_chain_most_recent_first() {
        let data = b"ABxABxAB";
        let mut index = PrefixIndex::new();
        for pos in 0..data.len() {
            index.insert(data, pos);
        }
        let chain: Vec<usize> = index.candidates(data, 6).collect();
        assert_eq!(chain, vec![6, 3, 0]);
        // Last byte has no two-byte prefix
        assert_eq!(index.len(), 7);
    }

    #[test]
    fn test_candidates_past_end() {
        let data = b"AB";
        let index = PrefixIndex::default();
        assert_eq!(index.candidates(data, 1).count(), 0);
        assert!(index.is_empty());
    }

    #[test]
    fn test_run_overlaps_lookahead() {
        let data = b"AAAAAAAAAA";
        let mut finder = IndexedFinder::new(20, 15);
        assert_eq!(finder.find(data, 0), None);
        assert_eq!(finder.find(data, 1), Some(Match { distance: 1, length: 9 }));
    }

    #[test]
    fn test_advance_registers_skipped_positions() {
        let data = b"ABCDEFABCDEF";
        let mut finder = IndexedFinder::new(20, 15);
        assert_eq!(finder.find(data, 0), None);
        finder.advance(data, 6);
        assert_eq!(finder.index().len(), 6);
        assert_eq!(finder.find(data, 6), Some(Match { distance: 6, length: 6 }));
    }

    #[test]
    fn test_window_bound_stops_walk() {
        let data = b"XYZ----XYZ";
        let mut finder = IndexedFinder::new(6, 15);
        finder.advance(data, 7);
        assert_eq!(finder.find(data, 7), None);
    }

    #[test]
    fn test_agrees_with_brute_force() {
        let data = b"abracadabra abracadabra, alakazam abracadabra!! aaaaaaaaaaaaaaaaaaaa";
        for &(window, lookahead) in &[(4, 15), (20, 15), (64, 8), (4095, 15), (3, 2), (20, 40)] {
            let mut brute = BruteForceFinder::new(window, lookahead);
            let mut indexed = IndexedFinder::new(window, lookahead);
            for pos in 0..data.len() {
                assert_eq!(
                    brute.find(data, pos),
                    indexed.find(data, pos),
                    "window={} lookahead={} pos={}",
                    window,
                    lookahead,
                    pos
                );
            }
        }
    }
}
