//! hpack-huffman: encode, decode or round-trip data with the HPACK Huffman code.
//!
//! With no arguments the tool generates a header-like sample, encodes it,
//! decodes it again and reports the compression ratio.

mod config;
mod input_gen;
mod metrics;

use std::io::Write;
use std::process::ExitCode;

use config::{Config, Mode};
use hpack_huffman_core::{decode_to_vec, encode_bytes, encoded_len, Error, Result};
use metrics::CodecMetrics;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match Config::from_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            eprintln!("run with --help for usage");
            return ExitCode::from(2);
        }
    };

    if config.print_config {
        config.print();
    }

    match run(&config) {
        Ok(metrics) => {
            if config.print_metrics {
                metrics.print_summary();
            }
            if metrics.verified == Some(false) {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            error!(mode = config.mode.as_str(), "run failed: {e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Execute the configured mode and collect metrics.
fn run(config: &Config) -> Result<CodecMetrics> {
    let mut metrics = CodecMetrics::new();
    let input = load_input(config)?;
    metrics.input_bytes = input.len() as u64;

    let output = match config.mode {
        Mode::Encode => {
            let mut encoded = Vec::with_capacity(encoded_len(&input));
            encode_bytes(&input, &mut encoded);
            metrics.raw_bytes = input.len() as u64;
            metrics.encoded_bytes = encoded.len() as u64;
            Some(encoded)
        }
        Mode::Decode => {
            let decoded = decode_to_vec(&input)?;
            metrics.raw_bytes = decoded.len() as u64;
            metrics.encoded_bytes = input.len() as u64;
            Some(decoded)
        }
        Mode::RoundTrip => {
            let mut encoded = Vec::with_capacity(encoded_len(&input));
            encode_bytes(&input, &mut encoded);
            let decoded = decode_to_vec(&encoded)?;
            metrics.raw_bytes = input.len() as u64;
            metrics.encoded_bytes = encoded.len() as u64;

            let verified = decoded == input;
            if !verified {
                error!(
                    input = input.len(),
                    decoded = decoded.len(),
                    "round-trip output differs from input"
                );
            }
            metrics.verified = Some(verified);
            config.output_file.is_some().then_some(encoded)
        }
    };

    if let Some(output) = output {
        metrics.output_bytes = write_output(config, &output)? as u64;
    }

    metrics.complete();
    info!(
        mode = config.mode.as_str(),
        raw = metrics.raw_bytes,
        encoded = metrics.encoded_bytes,
        "run complete"
    );
    Ok(metrics)
}

/// Read the input file, or generate a sample when none is given.
///
/// In decode mode a generated sample is encoded first so there is something
/// to decode.
fn load_input(config: &Config) -> Result<Vec<u8>> {
    match &config.input_file {
        Some(path) => {
            let bytes = std::fs::read(path)?;
            debug!(path = %path.display(), len = bytes.len(), "read input");
            if config.hex {
                let text = std::str::from_utf8(&bytes)
                    .map_err(|_| Error::Config("hex input is not UTF-8".to_string()))?;
                parse_hex(text)
            } else {
                Ok(bytes)
            }
        }
        None => {
            let sample = input_gen::generate_sample_data(config.seed, config.sample_bytes);
            info!(seed = config.seed, len = sample.len(), "generated sample input");
            if config.mode == Mode::Decode {
                let mut encoded = Vec::with_capacity(encoded_len(&sample));
                encode_bytes(&sample, &mut encoded);
                Ok(encoded)
            } else {
                Ok(sample)
            }
        }
    }
}

/// Write `data` to the output file or stdout, returning the bytes written.
fn write_output(config: &Config, data: &[u8]) -> Result<usize> {
    let bytes = if config.hex {
        let mut text = format_hex(data);
        text.push('\n');
        text.into_bytes()
    } else {
        data.to_vec()
    };

    match &config.output_file {
        Some(path) => {
            std::fs::write(path, &bytes)?;
            debug!(path = %path.display(), len = bytes.len(), "wrote output");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&bytes)?;
            stdout.flush()?;
        }
    }
    Ok(bytes.len())
}

/// Parse hex text, ignoring whitespace.
fn parse_hex(text: &str) -> Result<Vec<u8>> {
    let digits: Vec<u8> = text.bytes().filter(|b| !b.is_ascii_whitespace()).collect();
    if digits.len() % 2 != 0 {
        return Err(Error::Config("hex input has an odd number of digits".to_string()));
    }

    digits
        .chunks(2)
        .map(|pair| {
            std::str::from_utf8(pair)
                .ok()
                .and_then(|s| u8::from_str_radix(s, 16).ok())
                .ok_or_else(|| {
                    Error::Config(format!("invalid hex digits: {}", String::from_utf8_lossy(pair)))
                })
        })
        .collect()
}

fn format_hex(data: &[u8]) -> String {
    data.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn config(mode: Mode) -> Config {
        Config {
            mode,
            input_file: None,
            output_file: None,
            hex: false,
            seed: 42,
            sample_bytes: 2048,
            print_config: false,
            print_metrics: false,
        }
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("f1e3 c2e5\nff").unwrap(), vec![0xf1, 0xe3, 0xc2, 0xe5, 0xff]);
        assert!(parse_hex("abc").is_err());
        assert!(parse_hex("zz").is_err());
        assert_eq!(format_hex(&[0x0a, 0xff]), "0aff");
    }

    #[test]
    fn test_roundtrip_sample() {
        let metrics = run(&config(Mode::RoundTrip)).unwrap();
        assert_eq!(metrics.verified, Some(true));
        assert_eq!(metrics.input_bytes, 2048);
        assert!(metrics.encoded_bytes < metrics.raw_bytes);
        assert_eq!(metrics.output_bytes, 0);
    }

    #[test]
    fn test_encode_then_decode_files() {
        let dir = std::env::temp_dir().join(format!("hpack-huffman-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let plain = dir.join("plain.txt");
        let encoded = dir.join("encoded.hex");
        let decoded = dir.join("decoded.txt");
        std::fs::write(&plain, b"www.example.com").unwrap();

        let mut encode = config(Mode::Encode);
        encode.input_file = Some(plain);
        encode.output_file = Some(encoded.clone());
        encode.hex = true;
        run(&encode).unwrap();
        assert_eq!(
            std::fs::read_to_string(&encoded).unwrap(),
            "f1e3c2e5f23a6ba0ab90f4ff\n"
        );

        let mut decode = config(Mode::Decode);
        decode.input_file = Some(encoded);
        decode.output_file = Some(decoded.clone());
        decode.hex = true;
        run(&decode).unwrap();
        assert_eq!(
            std::fs::read_to_string(&decoded).unwrap(),
            "7777772e6578616d706c652e636f6d\n"
        );

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_decode_rejects_bad_input() {
        let dir = std::env::temp_dir().join(format!("hpack-huffman-bad-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path: PathBuf = dir.join("bad.hex");
        std::fs::write(&path, "ffffffff").unwrap();

        let mut decode = config(Mode::Decode);
        decode.input_file = Some(path);
        decode.hex = true;
        let err = run(&decode).unwrap_err();
        assert!(err.is_decoding());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
