//! The HPACK code table and the canonical decoding table derived from it.
//!
//! The encoding table is the 257-entry static Huffman code of RFC 7541
//! Appendix B: one code per byte value plus the end-of-stream symbol at
//! index 256. Codes are stored left-justified in a 32-bit word.
//!
//! # Decoding table
//!
//! The decoder never walks a tree. Instead the codes are grouped by length
//! into rows sorted ascending, and each row records `code_max`, the
//! exclusive upper bound of the row's codes:
//!
//! ```text
//! code_max[0] = count[0]
//! code_max[i] = (code_max[i-1] << (len[i] - len[i-1])) + count[i]
//! ```
//!
//! A `len`-bit prefix `v` of the input is a complete code exactly when
//! `v < code_max` for the first row (in ascending order) where that holds,
//! and it maps to `symbols[symbols.len() - (code_max - v)]`.

use std::sync::OnceLock;

use tracing::trace;

use crate::error::{Result, TableError};

/// Number of symbols in the alphabet (256 bytes plus end-of-stream).
pub const ALPHABET_SIZE: usize = 257;

/// The end-of-stream symbol. Never valid in decoded output.
pub const EOS: u16 = 256;

/// Longest code length the decoder accepts.
pub const MAX_CODE_LENGTH: u8 = 30;

/// A Huffman code: the top `length` bits of `value`, lower bits zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code {
    /// Left-justified bit pattern
    pub value: u32,
    /// Number of significant bits
    pub length: u8,
}

impl Code {
    /// Create a code from a left-justified value and its bit length.
    pub const fn new(value: u32, length: u8) -> Self {
        Self { value, length }
    }

    /// The code right-aligned, i.e. as an integer of `length` bits.
    pub const fn bits(&self) -> u32 {
        match self.length {
            0 => 0,
            n => self.value >> (32 - n as u32),
        }
    }

    /// True if `self` is a bit-prefix of `other`.
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        self.length <= other.length && other.value & top_bits_mask(self.length) == self.value
    }
}

/// Mask selecting the top `length` bits of a 32-bit word.
pub(crate) const fn top_bits_mask(length: u8) -> u32 {
    match length {
        0 => 0,
        n => u32::MAX << (32 - n as u32),
    }
}

/// Static Huffman code (RFC 7541 Appendix B), indexed by symbol.
pub static ENCODING_TABLE: [Code; ALPHABET_SIZE] = [
    Code::new(0xffc0_0000, 13), // 0
    Code::new(0xffff_b000, 23), // 1
    Code::new(0xffff_fe20, 28), // 2
    Code::new(0xffff_fe30, 28), // 3
    Code::new(0xffff_fe40, 28), // 4
    Code::new(0xffff_fe50, 28), // 5
    Code::new(0xffff_fe60, 28), // 6
    Code::new(0xffff_fe70, 28), // 7
    Code::new(0xffff_fe80, 28), // 8
    Code::new(0xffff_ea00, 24), // 9
    Code::new(0xffff_fff0, 30), // 10
    Code::new(0xffff_fe90, 28), // 11
    Code::new(0xffff_fea0, 28), // 12
    Code::new(0xffff_fff4, 30), // 13
    Code::new(0xffff_feb0, 28), // 14
    Code::new(0xffff_fec0, 28), // 15
    Code::new(0xffff_fed0, 28), // 16
    Code::new(0xffff_fee0, 28), // 17
    Code::new(0xffff_fef0, 28), // 18
    Code::new(0xffff_ff00, 28), // 19
    Code::new(0xffff_ff10, 28), // 20
    Code::new(0xffff_ff20, 28), // 21
    Code::new(0xffff_fff8, 30), // 22
    Code::new(0xffff_ff30, 28), // 23
    Code::new(0xffff_ff40, 28), // 24
    Code::new(0xffff_ff50, 28), // 25
    Code::new(0xffff_ff60, 28), // 26
    Code::new(0xffff_ff70, 28), // 27
    Code::new(0xffff_ff80, 28), // 28
    Code::new(0xffff_ff90, 28), // 29
    Code::new(0xffff_ffa0, 28), // 30
    Code::new(0xffff_ffb0, 28), // 31
    Code::new(0x5000_0000, 6), // 32 ' '
    Code::new(0xfe00_0000, 10), // 33 '!'
    Code::new(0xfe40_0000, 10), // 34 '"'
    Code::new(0xffa0_0000, 12), // 35 '#'
    Code::new(0xffc8_0000, 13), // 36 '$'
    Code::new(0x5400_0000, 6), // 37 '%'
    Code::new(0xf800_0000, 8), // 38 '&'
    Code::new(0xff40_0000, 11), // 39 '\''
    Code::new(0xfe80_0000, 10), // 40 '('
    Code::new(0xfec0_0000, 10), // 41 ')'
    Code::new(0xf900_0000, 8), // 42 '*'
    Code::new(0xff60_0000, 11), // 43 '+'
    Code::new(0xfa00_0000, 8), // 44 ','
    Code::new(0x5800_0000, 6), // 45 '-'
    Code::new(0x5c00_0000, 6), // 46 '.'
    Code::new(0x6000_0000, 6), // 47 '/'
    Code::new(0x0000_0000, 5), // 48 '0'
    Code::new(0x0800_0000, 5), // 49 '1'
    Code::new(0x1000_0000, 5), // 50 '2'
    Code::new(0x6400_0000, 6), // 51 '3'
    Code::new(0x6800_0000, 6), // 52 '4'
    Code::new(0x6c00_0000, 6), // 53 '5'
    Code::new(0x7000_0000, 6), // 54 '6'
    Code::new(0x7400_0000, 6), // 55 '7'
    Code::new(0x7800_0000, 6), // 56 '8'
    Code::new(0x7c00_0000, 6), // 57 '9'
    Code::new(0xb800_0000, 7), // 58 ':'
    Code::new(0xfb00_0000, 8), // 59 ';'
    Code::new(0xfff8_0000, 15), // 60 '<'
    Code::new(0x8000_0000, 6), // 61 '='
    Code::new(0xffb0_0000, 12), // 62 '>'
    Code::new(0xff00_0000, 10), // 63 '?'
    Code::new(0xffd0_0000, 13), // 64 '@'
    Code::new(0x8400_0000, 6), // 65 'A'
    Code::new(0xba00_0000, 7), // 66 'B'
    Code::new(0xbc00_0000, 7), // 67 'C'
    Code::new(0xbe00_0000, 7), // 68 'D'
    Code::new(0xc000_0000, 7), // 69 'E'
    Code::new(0xc200_0000, 7), // 70 'F'
    Code::new(0xc400_0000, 7), // 71 'G'
    Code::new(0xc600_0000, 7), // 72 'H'
    Code::new(0xc800_0000, 7), // 73 'I'
    Code::new(0xca00_0000, 7), // 74 'J'
    Code::new(0xcc00_0000, 7), // 75 'K'
    Code::new(0xce00_0000, 7), // 76 'L'
    Code::new(0xd000_0000, 7), // 77 'M'
    Code::new(0xd200_0000, 7), // 78 'N'
    Code::new(0xd400_0000, 7), // 79 'O'
    Code::new(0xd600_0000, 7), // 80 'P'
    Code::new(0xd800_0000, 7), // 81 'Q'
    Code::new(0xda00_0000, 7), // 82 'R'
    Code::new(0xdc00_0000, 7), // 83 'S'
    Code::new(0xde00_0000, 7), // 84 'T'
    Code::new(0xe000_0000, 7), // 85 'U'
    Code::new(0xe200_0000, 7), // 86 'V'
    Code::new(0xe400_0000, 7), // 87 'W'
    Code::new(0xfc00_0000, 8), // 88 'X'
    Code::new(0xe600_0000, 7), // 89 'Y'
    Code::new(0xfd00_0000, 8), // 90 'Z'
    Code::new(0xffd8_0000, 13), // 91 '['
    Code::new(0xfffe_0000, 19), // 92 '\\'
    Code::new(0xffe0_0000, 13), // 93 ']'
    Code::new(0xfff0_0000, 14), // 94 '^'
    Code::new(0x8800_0000, 6), // 95 '_'
    Code::new(0xfffa_0000, 15), // 96 '`'
    Code::new(0x1800_0000, 5), // 97 'a'
    Code::new(0x8c00_0000, 6), // 98 'b'
    Code::new(0x2000_0000, 5), // 99 'c'
    Code::new(0x9000_0000, 6), // 100 'd'
    Code::new(0x2800_0000, 5), // 101 'e'
    Code::new(0x9400_0000, 6), // 102 'f'
    Code::new(0x9800_0000, 6), // 103 'g'
    Code::new(0x9c00_0000, 6), // 104 'h'
    Code::new(0x3000_0000, 5), // 105 'i'
    Code::new(0xe800_0000, 7), // 106 'j'
    Code::new(0xea00_0000, 7), // 107 'k'
    Code::new(0xa000_0000, 6), // 108 'l'
    Code::new(0xa400_0000, 6), // 109 'm'
    Code::new(0xa800_0000, 6), // 110 'n'
    Code::new(0x3800_0000, 5), // 111 'o'
    Code::new(0xac00_0000, 6), // 112 'p'
    Code::new(0xec00_0000, 7), // 113 'q'
    Code::new(0xb000_0000, 6), // 114 'r'
    Code::new(0x4000_0000, 5), // 115 's'
    Code::new(0x4800_0000, 5), // 116 't'
    Code::new(0xb400_0000, 6), // 117 'u'
    Code::new(0xee00_0000, 7), // 118 'v'
    Code::new(0xf000_0000, 7), // 119 'w'
    Code::new(0xf200_0000, 7), // 120 'x'
    Code::new(0xf400_0000, 7), // 121 'y'
    Code::new(0xf600_0000, 7), // 122 'z'
    Code::new(0xfffc_0000, 15), // 123 '{'
    Code::new(0xff80_0000, 11), // 124 '|'
    Code::new(0xfff4_0000, 14), // 125 '}'
    Code::new(0xffe8_0000, 13), // 126 '~'
    Code::new(0xffff_ffc0, 28), // 127
    Code::new(0xfffe_6000, 20), // 128
    Code::new(0xffff_4800, 22), // 129
    Code::new(0xfffe_7000, 20), // 130
    Code::new(0xfffe_8000, 20), // 131
    Code::new(0xffff_4c00, 22), // 132
    Code::new(0xffff_5000, 22), // 133
    Code::new(0xffff_5400, 22), // 134
    Code::new(0xffff_b200, 23), // 135
    Code::new(0xffff_5800, 22), // 136
    Code::new(0xffff_b400, 23), // 137
    Code::new(0xffff_b600, 23), // 138
    Code::new(0xffff_b800, 23), // 139
    Code::new(0xffff_ba00, 23), // 140
    Code::new(0xffff_bc00, 23), // 141
    Code::new(0xffff_eb00, 24), // 142
    Code::new(0xffff_be00, 23), // 143
    Code::new(0xffff_ec00, 24), // 144
    Code::new(0xffff_ed00, 24), // 145
    Code::new(0xffff_5c00, 22), // 146
    Code::new(0xffff_c000, 23), // 147
    Code::new(0xffff_ee00, 24), // 148
    Code::new(0xffff_c200, 23), // 149
    Code::new(0xffff_c400, 23), // 150
    Code::new(0xffff_c600, 23), // 151
    Code::new(0xffff_c800, 23), // 152
    Code::new(0xfffe_e000, 21), // 153
    Code::new(0xffff_6000, 22), // 154
    Code::new(0xffff_ca00, 23), // 155
    Code::new(0xffff_6400, 22), // 156
    Code::new(0xffff_cc00, 23), // 157
    Code::new(0xffff_ce00, 23), // 158
    Code::new(0xffff_ef00, 24), // 159
    Code::new(0xffff_6800, 22), // 160
    Code::new(0xfffe_e800, 21), // 161
    Code::new(0xfffe_9000, 20), // 162
    Code::new(0xffff_6c00, 22), // 163
    Code::new(0xffff_7000, 22), // 164
    Code::new(0xffff_d000, 23), // 165
    Code::new(0xffff_d200, 23), // 166
    Code::new(0xfffe_f000, 21), // 167
    Code::new(0xffff_d400, 23), // 168
    Code::new(0xffff_7400, 22), // 169
    Code::new(0xffff_7800, 22), // 170
    Code::new(0xffff_f000, 24), // 171
    Code::new(0xfffe_f800, 21), // 172
    Code::new(0xffff_7c00, 22), // 173
    Code::new(0xffff_d600, 23), // 174
    Code::new(0xffff_d800, 23), // 175
    Code::new(0xffff_0000, 21), // 176
    Code::new(0xffff_0800, 21), // 177
    Code::new(0xffff_8000, 22), // 178
    Code::new(0xffff_1000, 21), // 179
    Code::new(0xffff_da00, 23), // 180
    Code::new(0xffff_8400, 22), // 181
    Code::new(0xffff_dc00, 23), // 182
    Code::new(0xffff_de00, 23), // 183
    Code::new(0xfffe_a000, 20), // 184
    Code::new(0xffff_8800, 22), // 185
    Code::new(0xffff_8c00, 22), // 186
    Code::new(0xffff_9000, 22), // 187
    Code::new(0xffff_e000, 23), // 188
    Code::new(0xffff_9400, 22), // 189
    Code::new(0xffff_9800, 22), // 190
    Code::new(0xffff_e200, 23), // 191
    Code::new(0xffff_f800, 26), // 192
    Code::new(0xffff_f840, 26), // 193
    Code::new(0xfffe_b000, 20), // 194
    Code::new(0xfffe_2000, 19), // 195
    Code::new(0xffff_9c00, 22), // 196
    Code::new(0xffff_e400, 23), // 197
    Code::new(0xffff_a000, 22), // 198
    Code::new(0xffff_f600, 25), // 199
    Code::new(0xffff_f880, 26), // 200
    Code::new(0xffff_f8c0, 26), // 201
    Code::new(0xffff_f900, 26), // 202
    Code::new(0xffff_fbc0, 27), // 203
    Code::new(0xffff_fbe0, 27), // 204
    Code::new(0xffff_f940, 26), // 205
    Code::new(0xffff_f100, 24), // 206
    Code::new(0xffff_f680, 25), // 207
    Code::new(0xfffe_4000, 19), // 208
    Code::new(0xffff_1800, 21), // 209
    Code::new(0xffff_f980, 26), // 210
    Code::new(0xffff_fc00, 27), // 211
    Code::new(0xffff_fc20, 27), // 212
    Code::new(0xffff_f9c0, 26), // 213
    Code::new(0xffff_fc40, 27), // 214
    Code::new(0xffff_f200, 24), // 215
    Code::new(0xffff_2000, 21), // 216
    Code::new(0xffff_2800, 21), // 217
    Code::new(0xffff_fa00, 26), // 218
    Code::new(0xffff_fa40, 26), // 219
    Code::new(0xffff_ffd0, 28), // 220
    Code::new(0xffff_fc60, 27), // 221
    Code::new(0xffff_fc80, 27), // 222
    Code::new(0xffff_fca0, 27), // 223
    Code::new(0xfffe_c000, 20), // 224
    Code::new(0xffff_f300, 24), // 225
    Code::new(0xfffe_d000, 20), // 226
    Code::new(0xffff_3000, 21), // 227
    Code::new(0xffff_a400, 22), // 228
    Code::new(0xffff_3800, 21), // 229
    Code::new(0xffff_4000, 21), // 230
    Code::new(0xffff_e600, 23), // 231
    Code::new(0xffff_a800, 22), // 232
    Code::new(0xffff_ac00, 22), // 233
    Code::new(0xffff_f700, 25), // 234
    Code::new(0xffff_f780, 25), // 235
    Code::new(0xffff_f400, 24), // 236
    Code::new(0xffff_f500, 24), // 237
    Code::new(0xffff_fa80, 26), // 238
    Code::new(0xffff_e800, 23), // 239
    Code::new(0xffff_fac0, 26), // 240
    Code::new(0xffff_fcc0, 27), // 241
    Code::new(0xffff_fb00, 26), // 242
    Code::new(0xffff_fb40, 26), // 243
    Code::new(0xffff_fce0, 27), // 244
    Code::new(0xffff_fd00, 27), // 245
    Code::new(0xffff_fd20, 27), // 246
    Code::new(0xffff_fd40, 27), // 247
    Code::new(0xffff_fd60, 27), // 248
    Code::new(0xffff_ffe0, 28), // 249
    Code::new(0xffff_fd80, 27), // 250
    Code::new(0xffff_fda0, 27), // 251
    Code::new(0xffff_fdc0, 27), // 252
    Code::new(0xffff_fde0, 27), // 253
    Code::new(0xffff_fe00, 27), // 254
    Code::new(0xffff_fb80, 26), // 255
    Code::new(0xffff_fffc, 30), // EOS
];

/// One code length's worth of the canonical decoding table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodingRow {
    code_length: u8,
    code_max: u32,
    mask: u32,
    symbols: Vec<u16>,
}

impl DecodingRow {
    /// Bit length shared by every code in this row.
    pub fn code_length(&self) -> u8 {
        self.code_length
    }

    /// Exclusive upper bound of this row's right-aligned code values.
    pub fn code_max(&self) -> u32 {
        self.code_max
    }

    /// Mask isolating the top `code_length` bits of a window.
    pub fn mask(&self) -> u32 {
        self.mask
    }

    /// Symbols of this length, in ascending code order.
    pub fn symbols(&self) -> &[u16] {
        &self.symbols
    }

    /// Smallest right-aligned code value in this row.
    pub fn code_min(&self) -> u32 {
        self.code_max - self.symbols.len() as u32
    }
}

/// Canonical decoding table: rows sorted by ascending code length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodingTable {
    rows: Vec<DecodingRow>,
}

impl DecodingTable {
    /// Derive the decoding table from an encoding table indexed by symbol.
    ///
    /// Symbols are grouped by code length and ordered by their assigned code
    /// value within each group. Every code is checked against the position
    /// canonical assignment gives it, so duplicate codes, gaps and
    /// overlapping prefixes are rejected rather than producing a table that
    /// decodes incorrectly.
    ///
    /// # Errors
    /// Returns `TableError` if the table is empty, has a code length outside
    /// `1..=MAX_CODE_LENGTH`, or is not canonical.
    pub fn build(codes: &[Code]) -> Result<Self> {
        if codes.is_empty() {
            return Err(TableError::Empty.into());
        }
        if codes.len() > usize::from(u16::MAX) + 1 {
            return Err(TableError::TooManySymbols { count: codes.len() }.into());
        }

        let mut entries = Vec::with_capacity(codes.len());
        for (symbol, code) in codes.iter().enumerate() {
            let symbol = symbol as u16;
            if code.length == 0 || code.length > MAX_CODE_LENGTH {
                return Err(TableError::CodeLengthOutOfRange {
                    symbol,
                    length: code.length,
                    max: MAX_CODE_LENGTH,
                }
                .into());
            }
            if code.value & !top_bits_mask(code.length) != 0 {
                return Err(TableError::UnalignedCode {
                    symbol,
                    length: code.length,
                }
                .into());
            }
            entries.push((code.length, code.bits(), symbol));
        }

        // Ascending length, then ascending code value within a length.
        entries.sort_unstable_by_key(|&(length, bits, _)| (length, bits));

        let mut rows: Vec<DecodingRow> = Vec::new();
        for group in entries.chunk_by(|a, b| a.0 == b.0) {
            let code_length = group[0].0;

            // First code of this length: the previous row's bound extended
            // with zeros, or zero for the shortest length.
            let first = match rows.last() {
                Some(prev) => u64::from(prev.code_max) << (code_length - prev.code_length),
                None => 0,
            };
            let code_max = first + group.len() as u64;
            if code_max > 1u64 << code_length {
                return Err(TableError::Oversubscribed {
                    length: code_length,
                }
                .into());
            }

            let mut symbols = Vec::with_capacity(group.len());
            for (offset, &(_, bits, symbol)) in group.iter().enumerate() {
                let expected = (first + offset as u64) as u32;
                if bits != expected {
                    return Err(TableError::NonCanonical {
                        symbol,
                        expected,
                        actual: bits,
                    }
                    .into());
                }
                symbols.push(symbol);
            }

            rows.push(DecodingRow {
                code_length,
                code_max: code_max as u32,
                mask: top_bits_mask(code_length),
                symbols,
            });
        }

        Ok(Self { rows })
    }

    /// Rows in ascending code-length order.
    pub fn rows(&self) -> &[DecodingRow] {
        &self.rows
    }

    /// Shortest code length in the table.
    pub fn min_code_length(&self) -> u8 {
        self.rows.first().map_or(0, |row| row.code_length)
    }

    /// Longest code length in the table.
    pub fn max_code_length(&self) -> u8 {
        self.rows.last().map_or(0, |row| row.code_length)
    }
}

/// The decoding table for [`ENCODING_TABLE`], built once on first use.
pub fn decoding_table() -> &'static DecodingTable {
    static TABLE: OnceLock<DecodingTable> = OnceLock::new();
    TABLE.get_or_init(|| {
        let table = DecodingTable::build(&ENCODING_TABLE)
            .expect("static HPACK code table is canonical");
        trace!(
            rows = table.rows().len(),
            min_length = table.min_code_length(),
            max_length = table.max_code_length(),
            "built HPACK decoding table"
        );
        table
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn table_error(codes: &[Code]) -> TableError {
        match DecodingTable::build(codes) {
            Err(Error::Table(err)) => err,
            other => panic!("expected table error, got {other:?}"),
        }
    }

    #[test]
    fn test_row_layout() {
        let table = decoding_table();
        let lengths: Vec<u8> = table.rows().iter().map(|r| r.code_length()).collect();
        assert_eq!(
            lengths,
            vec![5, 6, 7, 8, 10, 11, 12, 13, 14, 15, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28, 30]
        );

        let code_max: Vec<u32> = table.rows().iter().map(|r| r.code_max()).collect();
        assert_eq!(
            code_max,
            vec![
                10, 46, 124, 254, 1021, 2045, 4092, 8190, 16382, 32767, 524275, 1048558,
                2097129, 4194284, 8388597, 16777206, 33554416, 67108847, 134217713,
                268435455, 1073741824,
            ]
        );
        assert_eq!(table.min_code_length(), 5);
        assert_eq!(table.max_code_length(), MAX_CODE_LENGTH);
    }

    #[test]
    fn test_row_symbols() {
        let rows = decoding_table().rows();
        assert_eq!(
            rows[0].symbols(),
            &[b'0', b'1', b'2', b'a', b'c', b'e', b'i', b'o', b's', b't'].map(u16::from)
        );
        assert_eq!(rows[3].symbols(), &[38, 42, 44, 59, 88, 90]);
        assert_eq!(rows.last().unwrap().symbols(), &[10, 13, 22, EOS]);

        let total: usize = rows.iter().map(|r| r.symbols().len()).sum();
        assert_eq!(total, ALPHABET_SIZE);
    }

    #[test]
    fn test_row_masks() {
        for row in decoding_table().rows() {
            assert_eq!(row.mask().leading_ones(), u32::from(row.code_length()));
            assert_eq!(row.mask().count_ones(), u32::from(row.code_length()));
        }
    }

    #[test]
    fn test_code_max_recurrence() {
        let rows = decoding_table().rows();
        assert_eq!(rows[0].code_max(), rows[0].symbols().len() as u32);
        for pair in rows.windows(2) {
            let shift = pair[1].code_length() - pair[0].code_length();
            assert_eq!(
                pair[1].code_max(),
                (pair[0].code_max() << shift) + pair[1].symbols().len() as u32
            );
        }
    }

    #[test]
    fn test_canonical_monotonicity() {
        for row in decoding_table().rows() {
            let codes: Vec<u32> = row
                .symbols()
                .iter()
                .map(|&s| ENCODING_TABLE[usize::from(s)].bits())
                .collect();
            for pair in codes.windows(2) {
                assert_eq!(pair[0] + 1, pair[1]);
            }
            assert_eq!(codes.first().copied(), Some(row.code_min()));
            assert_eq!(codes.last().copied(), Some(row.code_max() - 1));
            // For this alphabet code order coincides with symbol order.
            for pair in row.symbols().windows(2) {
                assert!(pair[0] < pair[1]);
            }
        }
    }

    #[test]
    fn test_prefix_free() {
        for (i, a) in ENCODING_TABLE.iter().enumerate() {
            for (j, b) in ENCODING_TABLE.iter().enumerate() {
                if i != j {
                    assert!(
                        !a.is_prefix_of(b),
                        "code of symbol {i} is a prefix of symbol {j}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_code_lengths_in_range() {
        for code in ENCODING_TABLE.iter() {
            assert!((5..=MAX_CODE_LENGTH).contains(&code.length));
            assert_eq!(code.value & !top_bits_mask(code.length), 0);
        }
        assert_eq!(ENCODING_TABLE[usize::from(EOS)], Code::new(0xffff_fffc, 30));
    }

    #[test]
    fn test_sorts_by_code_value_not_symbol() {
        // Symbol 1 owns the smaller code, so it must come first in the row.
        let codes = [
            Code::new(0b11 << 30, 2),
            Code::new(0b10 << 30, 2),
            Code::new(0, 1),
        ];
        let table = DecodingTable::build(&codes).unwrap();
        assert_eq!(table.rows().len(), 2);
        assert_eq!(table.rows()[0].symbols(), &[2]);
        assert_eq!(table.rows()[0].code_max(), 1);
        assert_eq!(table.rows()[1].symbols(), &[1, 0]);
        assert_eq!(table.rows()[1].code_max(), 4);
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(table_error(&[]), TableError::Empty);
    }

    #[test]
    fn test_rejects_bad_length() {
        let codes = [Code::new(0, 1), Code::new(0x8000_0000, 0)];
        assert!(matches!(
            table_error(&codes),
            TableError::CodeLengthOutOfRange { symbol: 1, length: 0, .. }
        ));

        let mut codes = ENCODING_TABLE;
        codes[usize::from(EOS)] = Code::new(0xffff_fffe, 31);
        assert!(matches!(
            table_error(&codes),
            TableError::CodeLengthOutOfRange { symbol: 256, length: 31, .. }
        ));
    }

    #[test]
    fn test_rejects_unaligned() {
        let codes = [Code::new(0x4000_0000, 1), Code::new(0x8000_0000, 1)];
        assert_eq!(
            table_error(&codes),
            TableError::UnalignedCode { symbol: 0, length: 1 }
        );
    }

    #[test]
    fn test_rejects_duplicate_code() {
        let mut codes = ENCODING_TABLE;
        codes[usize::from(b'a')] = codes[usize::from(b'c')];
        assert!(matches!(table_error(&codes), TableError::NonCanonical { .. }));
    }

    #[test]
    fn test_rejects_gap() {
        let codes = [Code::new(0, 2), Code::new(0x8000_0000, 2)];
        assert_eq!(
            table_error(&codes),
            TableError::NonCanonical {
                symbol: 1,
                expected: 1,
                actual: 2
            }
        );
    }

    #[test]
    fn test_rejects_oversubscribed() {
        let codes = [
            Code::new(0, 1),
            Code::new(0x8000_0000, 1),
            Code::new(0, 1),
        ];
        assert_eq!(table_error(&codes), TableError::Oversubscribed { length: 1 });
    }

    #[test]
    fn test_shared_instance_across_threads() {
        let handles: Vec<_> = (0..8)
            .map(|_| std::thread::spawn(|| decoding_table() as *const DecodingTable as usize))
            .collect();
        let addrs: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(addrs.windows(2).all(|w| w[0] == w[1]));
    }
}
