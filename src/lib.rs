pub mod bits;
pub mod codec;
pub mod error;
pub mod format;
pub mod matcher;

pub use codec::{DecodeReport, DecodeWarning, Decoder, Encoder};
pub use error::{Error, Result};
pub use format::Token;
pub use matcher::{BruteForceFinder, IndexedFinder, Match, MatchFinder};

use format::{DEFAULT_LOOKAHEAD_SIZE, DEFAULT_WINDOW_SIZE, MAX_DISTANCE, MIN_MATCH_LENGTH};
use std::fmt;
use std::str::FromStr;

/// Match search strategy
///
/// Both strategies select identical matches; they differ only in speed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MatchStrategy {
    /// Scan every origin in the window
    BruteForce,
    /// Walk only origins sharing the two-byte prefix
    #[default]
    Indexed,
}

impl FromStr for MatchStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "brute" | "brute-force" | "bruteforce" => Ok(Self::BruteForce),
            "indexed" | "index" | "hash" => Ok(Self::Indexed),
            other => Err(format!("unknown match strategy '{other}' (expected brute or indexed)")),
        }
    }
}

impl fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BruteForce => f.write_str("brute"),
            Self::Indexed => f.write_str("indexed"),
        }
    }
}

/// Configuration for compression
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompressConfig {
    /// Maximum back-reference distance (1-4095)
    pub window_size: usize,
    /// Maximum match length searched for (at least 2; lengths above 15 are clamped on output)
    pub lookahead_size: usize,
    /// Match search strategy
    pub strategy: MatchStrategy,
}

impl CompressConfig {
    pub fn new(window_size: usize, lookahead_size: usize) -> Self {
        Self { window_size, lookahead_size, ..Default::default() }
    }

    pub fn with_strategy(mut self, strategy: MatchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Check the parameters against the token format's field widths
    pub fn validate(&self) -> Result<()> {
        if self.window_size == 0 || self.window_size > MAX_DISTANCE {
            return Err(Error::InvalidWindowSize { size: self.window_size, max: MAX_DISTANCE });
        }
        if self.lookahead_size < MIN_MATCH_LENGTH {
            return Err(Error::InvalidLookahead { size: self.lookahead_size, min: MIN_MATCH_LENGTH });
        }
        Ok(())
    }
}

impl Default for CompressConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            lookahead_size: DEFAULT_LOOKAHEAD_SIZE,
            strategy: MatchStrategy::Indexed,
        }
    }
}

/// Statistics from an encode or decode pass
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CodecStats {
    pub input_bytes: u64,
    pub output_bytes: u64,
    pub literals: u64,
    pub matches: u64,
    /// Uncompressed bytes covered by match tokens
    pub matched_bytes: u64,
}

impl CodecStats {
    fn record(&mut self, token: &Token) {
        match token {
            Token::Literal(_) => self.literals += 1,
            Token::Match { length, .. } => {
                self.matches += 1;
                self.matched_bytes += *length as u64;
            }
        }
    }
}

/// Result of a size-gated compression
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CompressOutcome {
    /// The packed stream is strictly smaller than the input
    Compressed(Vec<u8>),
    /// Packing did not shrink the input; callers should keep the original
    NotSmaller { original_len: usize, compressed: Vec<u8> },
}

impl CompressOutcome {
    pub fn is_compressed(&self) -> bool {
        matches!(self, Self::Compressed(_))
    }
}

/// Compress `data` with the given window and lookahead, using the indexed finder
pub fn compress(data: &[u8], window_size: usize, lookahead_size: usize) -> Result<Vec<u8>> {
    compress_with(data, &CompressConfig::new(window_size, lookahead_size))
}

/// Compress `data` with a full configuration
pub fn compress_with(data: &[u8], config: &CompressConfig) -> Result<Vec<u8>> {
    let (output, _stats) = Encoder::new(config.clone())?.encode(data)?;
    Ok(output)
}

/// Compress `data`, keeping the result only if it is strictly smaller
pub fn compress_gated(data: &[u8], config: &CompressConfig) -> Result<CompressOutcome> {
    let compressed = compress_with(data, config)?;
    if compressed.len() < data.len() {
        Ok(CompressOutcome::Compressed(compressed))
    } else {
        log::info!(
            "compression did not shrink input ({} -> {} bytes)",
            data.len(),
            compressed.len()
        );
        Ok(CompressOutcome::NotSmaller { original_len: data.len(), compressed })
    }
}

/// Decompress a packed token stream.
///
/// Truncation and zero-distance tokens are logged and tolerated; a
/// back-reference past the start of the output is an error.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    decompress_with_report(data).into_result()
}

/// Decompress a packed token stream, keeping partial output and every warning
pub fn decompress_with_report(data: &[u8]) -> DecodeReport {
    Decoder::new(data).decode()
}
