//! Bit-level packing for the encoder and the bit window used by the decoder.
//!
//! Both sides work MSB-first: the first code bit is the most significant bit
//! of the first byte.
//!
//! # Padding Rules
//! - `BitWriter`: pads the final partial byte with ones (the most significant
//!   bits of the end-of-stream code)
//! - `BitCursor`: accepts 1 to 7 trailing one-bits in the final byte as
//!   padding; anything else is left for the decoder to reject
//!
//! # Example
//! ```
//! use hpack_huffman_core::bitio::{BitCursor, BitWriter};
//!
//! let mut writer = BitWriter::new();
//! writer.write_bits(0b101, 3);
//! writer.write_bits(0b00, 2);
//! // Total: 10100 -> padded to 10100111
//! let bytes = writer.finish();
//! assert_eq!(bytes, vec![0b1010_0111]);
//!
//! let mut cursor = BitCursor::new(&bytes);
//! cursor.advance(5);
//! assert!(cursor.at_padding());
//! ```

use crate::table::{Code, MAX_CODE_LENGTH};

/// Writes codes MSB-first into a byte buffer.
///
/// # Invariants
/// - `bit_count` is always < 8 between calls
/// - `bit_buffer` holds the `bit_count` pending bits in its low bits
#[derive(Debug, Clone, Default)]
pub struct BitWriter {
    /// Completed bytes
    bytes: Vec<u8>,
    /// Pending bits, right-aligned
    bit_buffer: u64,
    /// Number of pending bits (0-7)
    bit_count: u8,
}

impl BitWriter {
    /// Create a new BitWriter with empty output.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a BitWriter that appends to an existing buffer.
    pub fn with_buffer(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            bit_buffer: 0,
            bit_count: 0,
        }
    }

    /// Write the low `count` bits of `value`, most significant first.
    ///
    /// # Panics
    /// Panics if `count` exceeds 32.
    pub fn write_bits(&mut self, value: u32, count: u8) {
        assert!(count <= 32, "cannot write {count} bits at once");
        if count == 0 {
            return;
        }

        let value = u64::from(value) & ((1u64 << count) - 1);
        self.bit_buffer = (self.bit_buffer << count) | value;
        self.bit_count += count;

        while self.bit_count >= 8 {
            self.bit_count -= 8;
            self.bytes.push((self.bit_buffer >> self.bit_count) as u8);
        }
        self.bit_buffer &= (1u64 << self.bit_count) - 1;
    }

    /// Write a left-justified Huffman code.
    pub fn write_code(&mut self, code: Code) {
        self.write_bits(code.bits(), code.length);
    }

    /// Finish writing and return the output bytes.
    ///
    /// A partial final byte is completed with one-bits.
    pub fn finish(mut self) -> Vec<u8> {
        if self.bit_count > 0 {
            let pad = 8 - self.bit_count;
            let byte = (self.bit_buffer << pad) | ((1u64 << pad) - 1);
            self.bytes.push(byte as u8);
        }
        self.bytes
    }

    /// Return the total number of bits written (including partial byte).
    pub fn bit_len(&self) -> usize {
        self.bytes.len() * 8 + usize::from(self.bit_count)
    }
}

/// Decoder position within a source slice: a byte index plus the number of
/// leading bits of that byte already consumed.
///
/// # Invariants
/// - `bit_offset` is always < 8
/// - once `pos >= data.len()` the cursor is exhausted
#[derive(Debug, Clone)]
pub struct BitCursor<'a> {
    /// Source data
    data: &'a [u8],
    /// Index of the first byte that is not fully consumed
    pos: usize,
    /// Leading bits of `data[pos]` already consumed (0-7)
    bit_offset: u8,
}

impl<'a> BitCursor<'a> {
    /// Create a cursor at the first bit of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            bit_offset: 0,
        }
    }

    /// Up to 32 unconsumed bits, left-justified.
    ///
    /// Reads at most five bytes starting at the cursor, so a full 30-bit code
    /// is visible at any bit offset. Bits past the end of the data are zero.
    pub fn window(&self) -> u32 {
        let ahead = &self.data[self.pos.min(self.data.len())..];
        let mut word = [0u8; 8];
        let n = ahead.len().min(5);
        word[..n].copy_from_slice(&ahead[..n]);
        ((u64::from_be_bytes(word) << self.bit_offset) >> 32) as u32
    }

    /// Number of high bits of [`window`](Self::window) that come from real
    /// input, capped at the longest code length.
    ///
    /// The cap keeps trailing zeros of a short input from being read as part
    /// of a long code.
    pub fn valid_bits(&self) -> u32 {
        let remaining = self.remaining_bits();
        remaining.min(usize::from(MAX_CODE_LENGTH)) as u32
    }

    /// Unconsumed bits left in the data.
    pub fn remaining_bits(&self) -> usize {
        self.data
            .len()
            .saturating_sub(self.pos)
            .saturating_mul(8)
            .saturating_sub(usize::from(self.bit_offset))
    }

    /// Consume `bits` bits, moving to later bytes as boundaries are crossed.
    pub fn advance(&mut self, bits: u8) {
        let total = usize::from(self.bit_offset) + usize::from(bits);
        self.pos += total / 8;
        self.bit_offset = (total % 8) as u8;
    }

    /// True if the cursor is inside the final byte of the data.
    pub fn at_last_byte(&self) -> bool {
        self.pos + 1 == self.data.len()
    }

    /// True if everything left is valid end-of-input padding: the cursor is
    /// part way into the final byte and the rest of that byte is all ones.
    ///
    /// A whole byte of ones is not padding; padding is at most 7 bits.
    pub fn at_padding(&self) -> bool {
        if !self.at_last_byte() || self.bit_offset == 0 {
            return false;
        }
        let remaining = 8 - self.bit_offset;
        let ones = 0xffu8 >> self.bit_offset;
        debug_assert_eq!(ones.count_ones(), u32::from(remaining));
        self.data[self.pos] & ones == ones
    }

    /// True once every byte has been consumed.
    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Bits consumed so far.
    pub fn position(&self) -> usize {
        self.pos * 8 + usize::from(self.bit_offset)
    }

    /// Index of the byte under the cursor.
    pub fn byte_position(&self) -> usize {
        self.pos
    }
}
