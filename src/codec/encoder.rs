use crate::bits::BitWriter;
use crate::error::Result;
use crate::format::{write_token, Token, MAX_MATCH_LENGTH};
use crate::matcher::{BruteForceFinder, IndexedFinder, MatchFinder};
use crate::{CodecStats, CompressConfig, MatchStrategy};
use log::{debug, trace};

/// Greedy single-pass LZ77 encoder
///
/// At each position the configured `MatchFinder` is consulted once. A match
/// is clamped to the 4-bit length field and consumed whole; otherwise one
/// literal is emitted. There is no lookahead or backtracking.
pub struct Encoder {
    config: CompressConfig,
}

impl Encoder {
    /// Create an encoder, rejecting configurations the format cannot express
    pub fn new(config: CompressConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CompressConfig {
        &self.config
    }

    /// Build a fresh finder for one run; any index it builds dies with the run
    fn finder(&self, input_len: usize) -> Box<dyn MatchFinder> {
        let window = self.config.window_size;
        let lookahead = self.config.lookahead_size;
        match self.config.strategy {
            MatchStrategy::BruteForce => Box::new(BruteForceFinder::new(window, lookahead)),
            MatchStrategy::Indexed => {
                Box::new(IndexedFinder::with_capacity(window, lookahead, input_len))
            }
        }
    }

    /// Walk `data` once, handing each token to `emit` in stream order
    pub fn for_each_token<F>(&self, data: &[u8], mut emit: F) -> Result<()>
    where
        F: FnMut(Token) -> Result<()>,
    {
        let mut finder = self.finder(data.len());
        let mut position = 0;

        while position < data.len() {
            match finder.find(data, position) {
                Some(m) => {
                    let length = m.length.min(MAX_MATCH_LENGTH);
                    let token = Token::Match { distance: m.distance as u16, length: length as u8 };
                    trace!("pos {}: match dist={} len={}", position, m.distance, length);
                    emit(token)?;

                    position += length;
                    finder.advance(data, position);
                }
                None => {
                    trace!("pos {}: literal {:#04x}", position, data[position]);
                    emit(Token::Literal(data[position]))?;
                    position += 1;
                }
            }
        }

        Ok(())
    }

    /// Collect the token stream for `data` without packing it
    pub fn encode_tokens(&self, data: &[u8]) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        self.for_each_token(data, |token| {
            tokens.push(token);
            Ok(())
        })?;
        Ok(tokens)
    }

    /// Encode `data` into the packed, byte-aligned token stream
    pub fn encode(&self, data: &[u8]) -> Result<(Vec<u8>, CodecStats)> {
        let mut writer = BitWriter::with_capacity(data.len() / 2 + 1);
        let mut stats = CodecStats { input_bytes: data.len() as u64, ..Default::default() };

        self.for_each_token(data, |token| {
            stats.record(&token);
            write_token(&mut writer, &token)
        })?;

        let output = writer.finish();
        stats.output_bytes = output.len() as u64;

        debug!(
            "encoded {} bytes into {} bytes ({} literals, {} matches covering {} bytes, {:?})",
            stats.input_bytes,
            stats.output_bytes,
            stats.literals,
            stats.matches,
            stats.matched_bytes,
            self.config.strategy
        );

        Ok((output, stats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn encoder(window: usize, lookahead: usize) -> Encoder {
        Encoder::new(CompressConfig::new(window, lookahead)).unwrap()
    }

    #[test]
    fn test_empty_input() {
        let enc = encoder(20, 15);
        assert!(enc.encode_tokens(b"").unwrap().is_empty());
        let (bytes, stats) = enc.encode(b"").unwrap();
        assert!(bytes.is_empty());
        assert_eq!(stats.output_bytes, 0);
    }

    #[test]
    fn test_run_becomes_literal_plus_overlapping_match() {
        let tokens = encoder(10, 9).encode_tokens(b"AAAAAAAAAA").unwrap();
        assert_eq!(tokens, vec![Token::Literal(b'A'), Token::Match { distance: 1, length: 9 }]);
    }

    #[test]
    fn test_repeating_pattern() {
        let tokens = encoder(8, 15).encode_tokens(b"ABABABAB").unwrap();
        assert_eq!(
            tokens,
            vec![Token::Literal(b'A'), Token::Literal(b'B'), Token::Match { distance: 2, length: 6 }]
        );
    }

    #[test]
    fn test_length_clamped_to_field() {
        let data = vec![b'z'; 100];
        let tokens = encoder(4095, 64).encode_tokens(&data).unwrap();
        assert_eq!(tokens[0], Token::Literal(b'z'));
        for token in &tokens[1..] {
            match token {
                Token::Match { length, .. } => assert!(*length as usize <= MAX_MATCH_LENGTH),
                Token::Literal(_) => {}
            }
        }
        let total: usize = tokens.iter().map(|t| t.uncompressed_size()).sum();
        assert_eq!(total, 100);
    }

    #[test]
    fn test_strategies_emit_same_tokens() {
        let data = b"she sells sea shells by the sea shore; the shells she sells are sea shells";
        for &(window, lookahead) in &[(8, 4), (20, 15), (200, 15), (4095, 30)] {
            let brute = Encoder::new(
                CompressConfig::new(window, lookahead).with_strategy(MatchStrategy::BruteForce),
            )
            .unwrap();
            let indexed = Encoder::new(
                CompressConfig::new(window, lookahead).with_strategy(MatchStrategy::Indexed),
            )
            .unwrap();
            assert_eq!(brute.encode_tokens(data).unwrap(), indexed.encode_tokens(data).unwrap());
        }
    }

    #[test]
    fn test_stats_account_for_every_byte() {
        let data = b"abcabcabcabcXYZabc";
        let (bytes, stats) = encoder(20, 15).encode(data).unwrap();
        assert_eq!(stats.input_bytes, data.len() as u64);
        assert_eq!(stats.output_bytes, bytes.len() as u64);
        assert_eq!(stats.literals + stats.matched_bytes, data.len() as u64);
        assert!(stats.matches > 0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(matches!(
            Encoder::new(CompressConfig::new(0, 15)),
            Err(Error::InvalidWindowSize { .. })
        ));
        assert!(matches!(
            Encoder::new(CompressConfig::new(4096, 15)),
            Err(Error::InvalidWindowSize { .. })
        ));
        assert!(matches!(
            Encoder::new(CompressConfig::new(20, 1)),
            Err(Error::InvalidLookahead { .. })
        ));
    }
}
