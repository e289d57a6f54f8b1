//! Sample input generation.
//!
//! When no input file is specified, we generate header-like text: the kind
//! of data the HPACK code was tuned for, so the compression ratio in the
//! metrics is meaningful.
//!
//! # Design
//!
//! Generated data has:
//! - Header lines built from common names and values (short codes)
//! - Random tokens and digit runs (mid-length codes)
//! - Occasional runs of arbitrary bytes (long codes, up to 30 bits)

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const HEADER_NAMES: &[&str] = &[
    "content-type",
    "cache-control",
    "user-agent",
    "accept-encoding",
    "set-cookie",
    "date",
    "location",
    "x-request-id",
];

const HEADER_VALUES: &[&str] = &[
    "text/html; charset=utf-8",
    "no-cache",
    "gzip, deflate, br",
    "max-age=3600",
    "https://www.example.com/",
    "Mon, 21 Oct 2013 20:13:21 GMT",
    "private",
];

const TOKEN_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789-_";

/// Generate a header-like sample.
///
/// # Arguments
/// - `seed`: random seed for determinism
/// - `size_bytes`: exact size of generated data
pub fn generate_sample_data(seed: u64, size_bytes: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut data = Vec::with_capacity(size_bytes + 64);

    while data.len() < size_bytes {
        match rng.gen_range(0..10u8) {
            // 60% header lines
            0..=5 => {
                let name = HEADER_NAMES[rng.gen_range(0..HEADER_NAMES.len())];
                let value = HEADER_VALUES[rng.gen_range(0..HEADER_VALUES.len())];
                data.extend_from_slice(name.as_bytes());
                data.extend_from_slice(b": ");
                data.extend_from_slice(value.as_bytes());
                data.extend_from_slice(b"\r\n");
            }

            // 20% random tokens
            6..=7 => {
                let len = rng.gen_range(8..=32);
                for _ in 0..len {
                    data.push(TOKEN_ALPHABET[rng.gen_range(0..TOKEN_ALPHABET.len())]);
                }
            }

            // 10% digit runs
            8 => {
                let len = rng.gen_range(1..=12);
                for _ in 0..len {
                    data.push(rng.gen_range(b'0'..=b'9'));
                }
            }

            // 10% arbitrary bytes
            _ => {
                let len = rng.gen_range(1..=16);
                for _ in 0..len {
                    data.push(rng.gen());
                }
            }
        }
    }

    data.truncate(size_bytes);
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_sample_data() {
        let data = generate_sample_data(42, 1000);
        assert_eq!(data.len(), 1000);
    }

    #[test]
    fn test_determinism() {
        let data1 = generate_sample_data(12345, 5000);
        let data2 = generate_sample_data(12345, 5000);

        assert_eq!(data1, data2);
    }

    #[test]
    fn test_different_seeds() {
        let data1 = generate_sample_data(1, 1000);
        let data2 = generate_sample_data(2, 1000);

        assert_ne!(data1, data2);
    }

    #[test]
    fn test_various_sizes() {
        for size in [0, 1, 100, 1000, 10000] {
            let data = generate_sample_data(999, size);
            assert_eq!(data.len(), size);
        }
    }

    #[test]
    fn test_sample_round_trips() {
        let data = generate_sample_data(7, 4096);
        let mut encoded = Vec::new();
        hpack_huffman_core::encode_bytes(&data, &mut encoded);
        assert!(encoded.len() < data.len());
        assert_eq!(hpack_huffman_core::decode_to_vec(&encoded).unwrap(), data);
    }
}
