//! Huffman decoding by canonical row scan.
//!
//! [`decode_symbol`] resolves one code from a 32-bit window using the sorted
//! rows of the [`DecodingTable`]; [`decode`] drives it across a byte buffer,
//! carrying a byte index and a bit offset between symbols.
//!
//! # Buffer loop
//!
//! Each iteration:
//! 1. Assembles a window from up to four bytes at the cursor
//! 2. Caps the valid bit count at 30 so trailing zeros never complete a code
//! 3. Stops cleanly if only all-ones padding is left in the final byte
//! 4. Decodes one symbol; no match or end-of-stream aborts the whole buffer
//! 5. Writes the byte, failing if the destination is full
//! 6. Advances the cursor by the code length

use tracing::debug;

use crate::bitio::BitCursor;
use crate::error::{DecodingError, Error, Result};
use crate::table::{decoding_table, DecodingTable, EOS};

/// A symbol resolved from a bit window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoded {
    /// Symbol value, 0..=256
    pub symbol: u16,
    /// Bits consumed by the code
    pub bits: u8,
}

impl DecodingTable {
    /// Decode at most one symbol from the high bits of `window`.
    ///
    /// Only the top `valid_bits` bits of `window` are trusted; rows with
    /// longer codes are never tried. Returns `None` if no code matches within
    /// `valid_bits`. The end-of-stream symbol is returned like any other and
    /// is for the caller to reject.
    pub fn decode_symbol(&self, window: u32, valid_bits: u32) -> Option<Decoded> {
        for row in self.rows() {
            let length = u32::from(row.code_length());
            if length > valid_bits {
                break;
            }

            let value = (window & row.mask()) >> (32 - length);
            if value < row.code_max() {
                let symbols = row.symbols();
                let index = symbols.len().checked_sub((row.code_max() - value) as usize)?;
                return Some(Decoded {
                    symbol: symbols[index],
                    bits: row.code_length(),
                });
            }
        }
        None
    }

    /// Decode `src` into `dst` using this table. See [`decode`].
    pub fn decode(&self, src: &[u8], dst: &mut [u8]) -> Result<usize> {
        // A range that is nothing but one all-ones byte holds no symbols.
        if matches!(src, [0xff]) {
            return Ok(0);
        }

        let mut cursor = BitCursor::new(src);
        let mut written = 0;

        while !cursor.is_empty() {
            if cursor.at_padding() {
                break;
            }

            let position = cursor.position();
            let decoded = match self.decode_symbol(cursor.window(), cursor.valid_bits()) {
                Some(decoded) if decoded.symbol == EOS => {
                    return Err(reject(DecodingError::EndOfStream { position }));
                }
                Some(decoded) => decoded,
                None if cursor.at_last_byte() => {
                    return Err(reject(DecodingError::InvalidPadding { position }));
                }
                None => return Err(reject(DecodingError::InvalidCode { position })),
            };

            let Some(slot) = dst.get_mut(written) else {
                debug!(capacity = dst.len(), position, "huffman destination full");
                return Err(Error::DestinationTooSmall {
                    capacity: dst.len(),
                });
            };
            *slot = decoded.symbol as u8;
            written += 1;

            cursor.advance(decoded.bits);
        }

        Ok(written)
    }
}

fn reject(err: DecodingError) -> Error {
    debug!(position = err.position(), "rejected huffman input: {err}");
    err.into()
}

/// Decode at most one symbol from the high bits of `window` with the HPACK
/// table.
///
/// `valid_bits` is the number of high bits that come from real input (at most
/// 30 is meaningful). Returns `None` when nothing matches.
pub fn decode_symbol(window: u32, valid_bits: u32) -> Option<Decoded> {
    decoding_table().decode_symbol(window, valid_bits)
}

/// Decode the Huffman-coded `src` into `dst`, returning the number of bytes
/// written.
///
/// Up to 7 trailing one-bits in the final byte are accepted as padding.
///
/// # Errors
/// - `DecodingError::InvalidCode` if the bits at some position match no code
/// - `DecodingError::EndOfStream` if the end-of-stream code appears
/// - `DecodingError::InvalidPadding` if the final byte ends in anything other
///   than 1 to 7 one-bits
/// - `Error::DestinationTooSmall` if `dst` cannot hold the output
pub fn decode(src: &[u8], dst: &mut [u8]) -> Result<usize> {
    decoding_table().decode(src, dst)
}

/// Decode `count` bytes of `src` starting at `offset` into `dst`.
///
/// # Panics
/// Panics if `offset..offset + count` is not within `src`.
pub fn decode_range(src: &[u8], offset: usize, count: usize, dst: &mut [u8]) -> Result<usize> {
    let end = offset
        .checked_add(count)
        .filter(|&end| end <= src.len());
    let Some(end) = end else {
        panic!(
            "range {offset}+{count} is outside a {}-byte source",
            src.len()
        );
    };
    decode(&src[offset..end], dst)
}

/// Upper bound on the decoded length of `encoded_len` Huffman-coded bytes.
pub fn max_decoded_len(encoded_len: usize) -> usize {
    encoded_len * 8 / usize::from(decoding_table().min_code_length())
}

/// Decode `src` into a freshly allocated buffer.
///
/// The buffer is sized with [`max_decoded_len`], so this never fails with
/// `Error::DestinationTooSmall`.
pub fn decode_to_vec(src: &[u8]) -> Result<Vec<u8>> {
    let mut out = vec![0u8; max_decoded_len(src.len())];
    let written = decode(src, &mut out)?;
    out.truncate(written);
    Ok(out)
}
