//! hpack-huffman-core: the canonical Huffman codec of HTTP header compression
//!
//! This library encodes bytes with the fixed 257-symbol Huffman code of
//! RFC 7541 Appendix B and decodes such bit streams back to bytes:
//! - Encoding is a table lookup per symbol plus MSB-first bit packing
//! - Decoding scans a length-sorted canonical table instead of walking a tree
//! - Trailing padding must be 1 to 7 one-bits; the end-of-stream symbol is
//!   never valid data
//!
//! # Architecture
//!
//! - `table`: the static code table and the derived decoding table
//! - `encode`: symbol lookup and byte-string packing
//! - `decode`: single-symbol lookup and the buffer decoding loop
//! - `bitio`: bit writer and the decoder's bit-window cursor
//! - `error`: structured errors
//!
//! # Example
//!
//! ```
//! use hpack_huffman_core::{decode, encode_bytes};
//!
//! let mut encoded = Vec::new();
//! encode_bytes(b"www.example.com", &mut encoded);
//! assert_eq!(encoded.len(), 12);
//!
//! let mut decoded = [0u8; 15];
//! let n = decode(&encoded, &mut decoded).unwrap();
//! assert_eq!(&decoded[..n], b"www.example.com");
//! ```
//!
//! # Thread Safety
//!
//! All functions are pure over caller-supplied buffers. The decoding table is
//! built once behind a `OnceLock` and is read-only afterwards.

pub mod bitio;
pub mod decode;
pub mod encode;
pub mod error;
pub mod table;

// Re-export commonly used types
pub use decode::{decode, decode_range, decode_symbol, decode_to_vec, max_decoded_len, Decoded};
pub use encode::{encode, encode_bytes, encoded_len};
pub use error::{DecodingError, Error, Result, TableError};
pub use table::{decoding_table, Code, DecodingRow, DecodingTable, ENCODING_TABLE, EOS};
