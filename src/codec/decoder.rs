use crate::bits::BitReader;
use crate::error::{Error, Result};
use crate::format::{DISTANCE_BITS, LENGTH_BITS, LITERAL_BITS};
use crate::CodecStats;
use log::{debug, trace, warn};

/// Recoverable conditions met while decoding.
///
/// None of these stop the decoder from returning output: truncation ends the
/// decode early, a zero distance skips one token.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeWarning {
    #[error("Literal token at bit {bit_offset} truncated: {bits_remaining} of 8 bits present")]
    TruncatedLiteral { bit_offset: usize, bits_remaining: usize },

    #[error("Match token at bit {bit_offset} truncated: {bits_remaining} of 16 bits present")]
    TruncatedMatch { bit_offset: usize, bits_remaining: usize },

    #[error("Match token at bit {bit_offset} has distance 0 (length {length}), skipped")]
    ZeroDistance { bit_offset: usize, length: u8 },
}

/// Everything a decode pass produced, including partial output on failure
#[derive(Debug)]
pub struct DecodeReport {
    /// Bytes reconstructed before the decoder stopped
    pub data: Vec<u8>,
    /// Recoverable conditions, in stream order
    pub warnings: Vec<DecodeWarning>,
    /// Set when a back-reference pointed before the start of the output
    pub error: Option<Error>,
    pub stats: CodecStats,
}

impl DecodeReport {
    /// No warnings and no error
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty() && self.error.is_none()
    }

    /// Whether the stream ended in the middle of a token
    pub fn is_truncated(&self) -> bool {
        self.warnings.iter().any(|w| {
            matches!(w, DecodeWarning::TruncatedLiteral { .. } | DecodeWarning::TruncatedMatch { .. })
        })
    }

    /// The decoded bytes, unless the decode was aborted. Warnings are dropped.
    pub fn into_result(self) -> Result<Vec<u8>> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.data),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    ReadFlag,
    ReadLiteral,
    ReadMatch,
    Done,
}

/// Token stream decoder.
///
/// The output buffer doubles as the dictionary: a match copies from bytes
/// already appended, one byte at a time, so a distance shorter than the length
/// replays bytes the same copy has just written.
pub struct Decoder<'a> {
    bits: BitReader<'a>,
    output: Vec<u8>,
    warnings: Vec<DecodeWarning>,
    stats: CodecStats,
    /// Bit offset of the token being decoded
    token_start: usize,
}

impl<'a> Decoder<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            bits: BitReader::new(input),
            output: Vec::with_capacity(input.len() * 2),
            warnings: Vec::new(),
            stats: CodecStats { input_bytes: input.len() as u64, ..Default::default() },
            token_start: 0,
        }
    }

    /// Run the state machine until the stream ends or a token is unusable
    pub fn decode(mut self) -> DecodeReport {
        let mut state = State::ReadFlag;

        let error = loop {
            match self.step(state) {
                Ok(State::Done) => break None,
                Ok(next) => state = next,
                Err(e) => break Some(e),
            }
        };

        self.stats.output_bytes = self.output.len() as u64;
        debug!(
            "decoded {} bytes into {} bytes ({} literals, {} matches, {} warnings{})",
            self.stats.input_bytes,
            self.stats.output_bytes,
            self.stats.literals,
            self.stats.matches,
            self.warnings.len(),
            if error.is_some() { ", aborted" } else { "" }
        );

        DecodeReport { data: self.output, warnings: self.warnings, error, stats: self.stats }
    }

    fn step(&mut self, state: State) -> Result<State> {
        match state {
            State::ReadFlag => Ok(self.read_flag()),
            State::ReadLiteral => Ok(self.read_literal()),
            State::ReadMatch => self.read_match(),
            State::Done => Ok(State::Done),
        }
    }

    fn read_flag(&mut self) -> State {
        self.token_start = self.bits.position();

        // Zero padding after the last token is the normal end of stream
        if self.bits.at_padding() {
            return State::Done;
        }

        match self.bits.read_bit() {
            Ok(false) => State::ReadLiteral,
            Ok(true) => State::ReadMatch,
            Err(_) => State::Done,
        }
    }

    fn read_literal(&mut self) -> State {
        match self.bits.read_bits(LITERAL_BITS) {
            Ok(byte) => {
                trace!("bit {}: literal {:#04x}", self.token_start, byte);
                self.output.push(byte as u8);
                self.stats.literals += 1;
                State::ReadFlag
            }
            Err(_) => {
                self.report(DecodeWarning::TruncatedLiteral {
                    bit_offset: self.token_start,
                    bits_remaining: self.bits.remaining_bits(),
                });
                State::Done
            }
        }
    }

    fn read_match(&mut self) -> Result<State> {
        let needed = (DISTANCE_BITS + LENGTH_BITS) as usize;
        if self.bits.remaining_bits() < needed {
            self.report(DecodeWarning::TruncatedMatch {
                bit_offset: self.token_start,
                bits_remaining: self.bits.remaining_bits(),
            });
            return Ok(State::Done);
        }

        let distance = self.bits.read_bits(DISTANCE_BITS)? as usize;
        let length = self.bits.read_bits(LENGTH_BITS)? as usize;
        trace!("bit {}: match dist={} len={}", self.token_start, distance, length);

        if distance == 0 {
            self.report(DecodeWarning::ZeroDistance {
                bit_offset: self.token_start,
                length: length as u8,
            });
            return Ok(State::ReadFlag);
        }

        let available = self.output.len();
        if distance > available {
            warn!(
                "match token at bit {} reaches {} bytes back with only {} decoded; aborting",
                self.token_start, distance, available
            );
            return Err(Error::InvalidBackReference { distance: distance as u16, available });
        }

        // Byte-at-a-time so overlapping copies read what they just wrote
        let mut from = available - distance;
        for _ in 0..length {
            let byte = self.output[from];
            self.output.push(byte);
            from += 1;
        }

        self.stats.matches += 1;
        self.stats.matched_bytes += length as u64;
        Ok(State::ReadFlag)
    }

    fn report(&mut self, warning: DecodeWarning) {
        warn!("{}", warning);
        self.warnings.push(warning);
    }
}
