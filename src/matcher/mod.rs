pub mod brute;
pub mod indexed;

pub use brute::BruteForceFinder;
pub use indexed::{IndexedFinder, PrefixIndex};

use crate::format::MIN_MATCH_LENGTH;

/// A back-reference candidate: `length` bytes starting `distance` bytes behind
/// the searched position
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Match {
    pub distance: usize,
    pub length: usize,
}

/// Trait for windowed longest-match search.
///
/// Implementations must agree on every result: the longest match within
/// `window_size` bytes back, at most `lookahead_size` long, with the smallest
/// distance winning ties. A match shorter than `MIN_MATCH_LENGTH` is `None`.
///
/// Callers walk the input strictly forward. `find` may be called at most once
/// per position, and positions covered by an emitted match are reported
/// through `advance` so stateful finders can index them.
pub trait MatchFinder {
    /// Find the best match for the bytes starting at `position`.
    fn find(&mut self, data: &[u8], position: usize) -> Option<Match>;

    /// Mark every position before `end` as consumed.
    fn advance(&mut self, _data: &[u8], _end: usize) {}
}

/// Longest run length the search may report at `position`
#[inline]
pub(crate) fn max_match_at(data: &[u8], position: usize, lookahead_size: usize) -> usize {
    lookahead_size.min(data.len().saturating_sub(position))
}

/// Count equal bytes between `data[candidate..]` and `data[position..]`, up to `limit`
///
/// The candidate run may extend into the bytes at and after `position`; the
/// decoder reproduces such overlaps byte by byte.
#[inline]
pub(crate) fn common_prefix_len(
    data: &[u8],
    candidate: usize,
    position: usize,
    limit: usize,
) -> usize {
    debug_assert!(candidate < position);
    data[candidate..]
        .iter()
        .zip(&data[position..position + limit])
        .take_while(|(a, b)| a == b)
        .count()
}

/// Keep the longer of `best` and a candidate `(distance, length)`
///
/// Candidates arrive in increasing distance order, so a strict comparison
/// leaves the nearest origin in place on ties.
#[inline]
pub(crate) fn keep_longer(best: &mut Option<Match>, distance: usize, length: usize) {
    if length < MIN_MATCH_LENGTH {
        return;
    }
    if best.map_or(true, |b| length > b.length) {
        *best = Some(Match { distance, length });
    }
}
