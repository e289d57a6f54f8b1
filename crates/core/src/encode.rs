//! Huffman encoding with the static HPACK code.

use crate::bitio::BitWriter;
use crate::table::{Code, ALPHABET_SIZE, ENCODING_TABLE};

/// Look up the code for `symbol`.
///
/// # Panics
/// Panics if `symbol` is outside `0..=256`. Passing such a symbol is a bug in
/// the caller, not a property of the data.
pub fn encode(symbol: u16) -> Code {
    let index = usize::from(symbol);
    assert!(
        index < ALPHABET_SIZE,
        "symbol {symbol} is outside the HPACK alphabet (0..=256)"
    );
    ENCODING_TABLE[index]
}

/// Huffman-encoded length of `data` in bytes, padding included.
pub fn encoded_len(data: &[u8]) -> usize {
    let bits: usize = data
        .iter()
        .map(|&byte| usize::from(ENCODING_TABLE[usize::from(byte)].length))
        .sum();
    bits.div_ceil(8)
}

/// Huffman-encode `data` and append it to `out`, padding the final byte
/// with one-bits.
pub fn encode_bytes(data: &[u8], out: &mut Vec<u8>) {
    let mut writer = BitWriter::with_buffer(std::mem::take(out));
    for &byte in data {
        writer.write_code(ENCODING_TABLE[usize::from(byte)]);
    }
    *out = writer.finish();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::EOS;

    #[test]
    fn test_encode_lookup() {
        assert_eq!(encode(u16::from(b'0')), Code::new(0x0000_0000, 5));
        assert_eq!(encode(u16::from(b'a')), Code::new(0x1800_0000, 5));
        assert_eq!(encode(u16::from(b' ')), Code::new(0x5000_0000, 6));
        assert_eq!(encode(0), Code::new(0xffc0_0000, 13));
        assert_eq!(encode(EOS), Code::new(0xffff_fffc, 30));
    }

    #[test]
    #[should_panic(expected = "outside the HPACK alphabet")]
    fn test_encode_out_of_range() {
        encode(257);
    }

    #[test]
    fn test_www_example_com() {
        // RFC 7541 C.4.1
        let mut out = Vec::new();
        encode_bytes(b"www.example.com", &mut out);
        assert_eq!(
            out,
            vec![0xf1, 0xe3, 0xc2, 0xe5, 0xf2, 0x3a, 0x6b, 0xa0, 0xab, 0x90, 0xf4, 0xff]
        );
        assert_eq!(encoded_len(b"www.example.com"), 12);
    }

    #[test]
    fn test_no_cache() {
        // RFC 7541 C.4.2
        let mut out = Vec::new();
        encode_bytes(b"no-cache", &mut out);
        assert_eq!(out, vec![0xa8, 0xeb, 0x10, 0x64, 0x9c, 0xbf]);
    }

    #[test]
    fn test_custom_key() {
        // RFC 7541 C.4.3
        let mut out = Vec::new();
        encode_bytes(b"custom-key", &mut out);
        assert_eq!(out, vec![0x25, 0xa8, 0x49, 0xe9, 0x5b, 0xa9, 0x7d, 0x7f]);
    }

    #[test]
    fn test_appends_to_existing() {
        let mut out = vec![0x82];
        encode_bytes(b"a", &mut out);
        // 'a' = 00011, padded with 111
        assert_eq!(out, vec![0x82, 0b0001_1111]);
    }

    #[test]
    fn test_empty() {
        let mut out = Vec::new();
        encode_bytes(b"", &mut out);
        assert!(out.is_empty());
        assert_eq!(encoded_len(b""), 0);
    }

    #[test]
    fn test_encoded_len_matches() {
        let data = b"Mon, 21 Oct 2013 20:13:21 GMT";
        let mut out = Vec::new();
        encode_bytes(data, &mut out);
        assert_eq!(encoded_len(data), out.len());
    }
}
