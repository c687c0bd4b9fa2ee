/// Width of the per-token flag (0 = literal, 1 = match)
pub const FLAG_BITS: u8 = 1;

/// Width of a literal byte field
pub const LITERAL_BITS: u8 = 8;

/// Width of a match distance field
pub const DISTANCE_BITS: u8 = 12;

/// Width of a match length field
pub const LENGTH_BITS: u8 = 4;

/// Largest distance the 12-bit field can carry
pub const MAX_DISTANCE: usize = (1 << DISTANCE_BITS) - 1; // 4095

/// Largest length the 4-bit field can carry
pub const MAX_MATCH_LENGTH: usize = (1 << LENGTH_BITS) - 1; // 15

/// Shortest match worth emitting; a 1-byte match costs more than a literal
pub const MIN_MATCH_LENGTH: usize = 2;

/// Encoded size of a literal token (flag + byte)
pub const LITERAL_TOKEN_BITS: usize = (FLAG_BITS + LITERAL_BITS) as usize; // 9

/// Encoded size of a match token (flag + distance + length)
pub const MATCH_TOKEN_BITS: usize = (FLAG_BITS + DISTANCE_BITS + LENGTH_BITS) as usize; // 17

/// Default search window
pub const DEFAULT_WINDOW_SIZE: usize = 20;

/// Default lookahead (maximum match length considered)
pub const DEFAULT_LOOKAHEAD_SIZE: usize = 15;
