/// Bit-level writer for the token stream
///
/// Writes bits MSB-first: the first bit written lands in the most significant
/// bit of the first output byte.
pub struct BitWriter {
    /// Accumulated output bytes
    output: Vec<u8>,
    /// Current byte being built
    current_byte: u8,
    /// Bits written to current byte (0-7)
    bits_in_byte: u8,
}

impl BitWriter {
    pub fn new() -> Self {
        Self { output: Vec::new(), current_byte: 0, bits_in_byte: 0 }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { output: Vec::with_capacity(capacity), current_byte: 0, bits_in_byte: 0 }
    }

    /// Write the low `n` bits (0-32) of `value`, most significant first
    pub fn write_bits(&mut self, value: u32, n: u8) {
        debug_assert!(n <= 32);
        debug_assert!(n == 32 || value >> n == 0, "value {value} wider than {n} bits");

        let mut remaining = n;

        while remaining > 0 {
            let space = 8 - self.bits_in_byte;
            let to_write = remaining.min(space);

            let mask = (1u32 << to_write) - 1;
            let chunk = ((value >> (remaining - to_write)) & mask) as u8;
            self.current_byte |= chunk << (space - to_write);

            self.bits_in_byte += to_write;
            remaining -= to_write;

            if self.bits_in_byte == 8 {
                self.output.push(self.current_byte);
                self.current_byte = 0;
                self.bits_in_byte = 0;
            }
        }
    }

    /// Write a single bit
    #[inline]
    pub fn write_bit(&mut self, bit: bool) {
        self.write_bits(bit as u32, 1);
    }

    /// Pad to byte boundary with zero bits
    fn align_to_byte(&mut self) {
        if self.bits_in_byte > 0 {
            self.output.push(self.current_byte);
            self.current_byte = 0;
            self.bits_in_byte = 0;
        }
    }

    /// Pad once to the next byte boundary and return the output bytes
    pub fn finish(mut self) -> Vec<u8> {
        self.align_to_byte();
        self.output
    }

    /// Total bits written so far (excluding padding)
    pub fn bit_len(&self) -> usize {
        self.output.len() * 8 + self.bits_in_byte as usize
    }

    /// Get current output length in bytes (including partial byte)
    pub fn len(&self) -> usize {
        self.output.len() + if self.bits_in_byte > 0 { 1 } else { 0 }
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.output.is_empty() && self.bits_in_byte == 0
    }
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}
