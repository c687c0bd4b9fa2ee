use super::constants::{
    DISTANCE_BITS, LENGTH_BITS, LITERAL_BITS, LITERAL_TOKEN_BITS, MATCH_TOKEN_BITS, MAX_DISTANCE,
    MAX_MATCH_LENGTH,
};
use crate::bits::BitWriter;
use crate::error::{Error, Result};

/// Represents a single token in the LZ77 stream
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token {
    /// A literal byte
    Literal(u8),
    /// A back-reference: copy `length` bytes from `distance` bytes back
    Match { distance: u16, length: u8 },
}

impl Token {
    /// Returns the uncompressed size this token represents
    pub fn uncompressed_size(&self) -> usize {
        match self {
            Token::Literal(_) => 1,
            Token::Match { length, .. } => *length as usize,
        }
    }

    /// Number of bits this token occupies in the packed stream
    pub fn bit_len(&self) -> usize {
        match self {
            Token::Literal(_) => LITERAL_TOKEN_BITS,
            Token::Match { .. } => MATCH_TOKEN_BITS,
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, Token::Match { .. })
    }
}

/// Pack a token into the bit stream
///
/// Layout: `0 | byte:8` for literals, `1 | distance:12 | length:4` for matches.
/// Fields that do not fit their width are rejected rather than truncated.
pub fn write_token(writer: &mut BitWriter, token: &Token) -> Result<()> {
    match *token {
        Token::Literal(byte) => {
            writer.write_bit(false);
            writer.write_bits(byte as u32, LITERAL_BITS);
        }
        Token::Match { distance, length } => {
            if distance as usize > MAX_DISTANCE {
                return Err(Error::FieldOverflow {
                    field: "distance",
                    value: distance as u32,
                    width: DISTANCE_BITS,
                });
            }
            if length as usize > MAX_MATCH_LENGTH {
                return Err(Error::FieldOverflow {
                    field: "length",
                    value: length as u32,
                    width: LENGTH_BITS,
                });
            }
            writer.write_bit(true);
            writer.write_bits(distance as u32, DISTANCE_BITS);
            writer.write_bits(length as u32, LENGTH_BITS);
        }
    }
    Ok(())
}
