use crate::error::{Error, Result};

/// Bit-level reader over an in-memory token stream
///
/// Bits are read MSB-first within each byte. The cursor is an absolute bit
/// index into the buffer, so every field read is a shift-and-mask over at most
/// a handful of bytes.
pub struct BitReader<'a> {
    data: &'a [u8],
    /// Absolute bit position of the next unread bit
    position: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Read a single bit, or `EndOfStream` once the buffer is exhausted
    #[inline]
    pub fn read_bit(&mut self) -> Result<bool> {
        if self.remaining_bits() == 0 {
            return Err(Error::EndOfStream);
        }
        let byte = self.data[self.position / 8];
        let bit = (byte >> (7 - (self.position % 8))) & 1;
        self.position += 1;
        Ok(bit != 0)
    }

    /// Read `n` bits (0-32) MSB-first
    ///
    /// Fails with `InsufficientBits` without consuming anything when fewer
    /// than `n` bits remain.
    pub fn read_bits(&mut self, n: u8) -> Result<u32> {
        debug_assert!(n <= 32, "Cannot read more than 32 bits at once");

        let available = self.remaining_bits();
        if (n as usize) > available {
            return Err(Error::InsufficientBits { requested: n, available });
        }

        let mut value = 0u32;
        let mut remaining = n;

        while remaining > 0 {
            let byte = self.data[self.position / 8];
            let offset = (self.position % 8) as u8;
            let in_byte = 8 - offset;
            let take = remaining.min(in_byte);

            let mask = ((1u16 << take) - 1) as u8;
            let chunk = (byte >> (in_byte - take)) & mask;
            value = (value << take) | chunk as u32;

            self.position += take as usize;
            remaining -= take;
        }

        Ok(value)
    }

    /// Bits left before the end of the buffer
    pub fn remaining_bits(&self) -> usize {
        self.data.len() * 8 - self.position
    }

    /// Absolute bit offset of the cursor (for diagnostics)
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining_bits() == 0
    }

    /// Whether everything left is zero fill inside the final byte
    pub fn at_padding(&self) -> bool {
        let remaining = self.remaining_bits();
        if remaining >= 8 {
            return false;
        }
        if remaining == 0 {
            return true;
        }
        let mask = ((1u16 << remaining) - 1) as u8;
        self.data[self.position / 8] & mask == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_bits() {
        // Binary: 11010011 10101010 = 0xD3 0xAA
        let data = [0xD3, 0xAA];
        let mut reader = BitReader::new(&data);

        assert_eq!(reader.read_bits(3).unwrap(), 0b110);
        assert_eq!(reader.read_bits(5).unwrap(), 0b10011);
        assert_eq!(reader.read_bits(8).unwrap(), 0xAA);
        assert!(reader.is_exhausted());
    }

    #[test]
    fn test_read_bit() {
        let data = [0b10110001];
        let mut reader = BitReader::new(&data);

        let bits: Vec<bool> = (0..8).map(|_| reader.read_bit().unwrap()).collect();
        assert_eq!(bits, [true, false, true, true, false, false, false, true]);
        assert!(matches!(reader.read_bit(), Err(Error::EndOfStream)));
    }

    #[test]
    fn test_cross_byte_boundary() {
        let data = [0b1101_0101, 0b1110_0000];
        let mut reader = BitReader::new(&data);

        assert!(reader.read_bit().unwrap());
        assert_eq!(reader.read_bits(12).unwrap(), 0xABC);
        assert_eq!(reader.remaining_bits(), 3);
    }

    #[test]
    fn test_insufficient_bits_does_not_consume() {
        let data = [0xFF];
        let mut reader = BitReader::new(&data);
        reader.read_bits(3).unwrap();

        match reader.read_bits(8) {
            Err(Error::InsufficientBits { requested, available }) => {
                assert_eq!(requested, 8);
                assert_eq!(available, 5);
            }
            other => panic!("expected InsufficientBits, got {:?}", other),
        }
        assert_eq!(reader.position(), 3);
        assert_eq!(reader.read_bits(5).unwrap(), 0b11111);
    }

    #[test]
    fn test_at_padding() {
        let data = [0xFF, 0b1010_0000];
        let mut reader = BitReader::new(&data);
        assert!(!reader.at_padding());

        reader.read_bits(10).unwrap();
        // 6 bits left, 1 of them set
        assert!(!reader.at_padding());

        reader.read_bits(1).unwrap();
        assert!(reader.at_padding());

        reader.read_bits(5).unwrap();
        assert!(reader.at_padding());
    }

    #[test]
    fn test_read_zero_bits() {
        let mut reader = BitReader::new(&[]);
        assert_eq!(reader.read_bits(0).unwrap(), 0);
        assert!(reader.is_exhausted());
    }
}
