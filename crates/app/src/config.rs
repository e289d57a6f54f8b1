//! Configuration for the hpack-huffman command-line tool.
//!
//! Handles parsing command-line arguments and generating sensible defaults
//! (including randomized defaults that are reproducible with a seed).
//!
//! # Philosophy
//!
//! The tool should work with ZERO arguments: it then round-trips a generated
//! header-like sample. All defaults are printed with `--print-config` so runs
//! are reproducible.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;

/// What the tool does with its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Huffman-encode the input
    Encode,
    /// Huffman-decode the input
    Decode,
    /// Encode, decode again and verify the result matches
    RoundTrip,
}

impl Mode {
    fn parse(s: &str) -> Result<Self, String> {
        match s {
            "encode" => Ok(Mode::Encode),
            "decode" => Ok(Mode::Decode),
            "roundtrip" | "round-trip" => Ok(Mode::RoundTrip),
            other => Err(format!("unknown mode: {other}")),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Encode => "encode",
            Mode::Decode => "decode",
            Mode::RoundTrip => "roundtrip",
        }
    }
}

/// Complete configuration for a run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Operation to perform
    pub mode: Mode,

    // === Files ===
    /// Input file path (None = generate sample)
    pub input_file: Option<PathBuf>,

    /// Output file path (None = stdout for encode/decode, nothing for roundtrip)
    pub output_file: Option<PathBuf>,

    /// Treat input and output as hex text instead of raw bytes
    pub hex: bool,

    // === Sample generation ===
    /// Seed for the generated sample
    pub seed: u64,

    /// Size of the generated sample in bytes
    pub sample_bytes: usize,

    // === Behavior ===
    /// Whether to print detailed config
    pub print_config: bool,

    /// Whether to print detailed metrics summary
    pub print_metrics: bool,
}

impl Config {
    /// Parse configuration from command-line arguments.
    ///
    /// If no arguments provided, generates randomized defaults using a time-based seed.
    /// If --seed is provided, uses that seed for all randomness (fully deterministic).
    pub fn from_args(args: &[String]) -> Result<Self, String> {
        let mut mode = Mode::RoundTrip;
        let mut input_file: Option<PathBuf> = None;
        let mut output_file: Option<PathBuf> = None;
        let mut hex = false;
        let mut seed: Option<u64> = None;
        let mut sample_bytes: Option<usize> = None;
        let mut print_config = false;
        let mut print_metrics = true;

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--mode" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--mode requires encode, decode or roundtrip".to_string());
                    }
                    mode = Mode::parse(&args[i])?;
                }
                "--in" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--in requires a path".to_string());
                    }
                    input_file = Some(PathBuf::from(&args[i]));
                }
                "--out" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--out requires a path".to_string());
                    }
                    output_file = Some(PathBuf::from(&args[i]));
                }
                "--hex" => {
                    hex = true;
                }
                "--seed" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--seed requires a number".to_string());
                    }
                    seed = Some(args[i].parse().map_err(|_| "invalid seed")?);
                }
                "--sample-bytes" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--sample-bytes requires a number".to_string());
                    }
                    sample_bytes = Some(args[i].parse().map_err(|_| "invalid sample-bytes")?);
                }
                "--print-config" => {
                    print_config = true;
                }
                "--no-metrics" => {
                    print_metrics = false;
                }
                "--help" | "-h" => {
                    print_help();
                    std::process::exit(0);
                }
                _ => {
                    return Err(format!("unknown argument: {}", args[i]));
                }
            }
            i += 1;
        }

        // Determine seed (explicit or time-based)
        let seed = seed.unwrap_or_else(|| {
            use std::time::{SystemTime, UNIX_EPOCH};
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map_or(0, |d| d.as_millis() as u64)
        });

        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        Ok(Config {
            mode,
            input_file,
            output_file,
            hex,
            seed,
            sample_bytes: sample_bytes.unwrap_or_else(|| rng.gen_range(256..=16384)),
            print_config,
            print_metrics,
        })
    }

    /// Print the configuration in human-readable form.
    pub fn print(&self) {
        println!("=== Configuration ===");
        println!("Mode:        {}", self.mode.as_str());
        match &self.input_file {
            Some(path) => println!("Input file:  {}", path.display()),
            None => println!("Input file:  (generate sample)"),
        }
        match &self.output_file {
            Some(path) => println!("Output file: {}", path.display()),
            None => println!("Output file: (stdout)"),
        }
        println!("Hex I/O:     {}", self.hex);
        println!();
        println!("=== Sample ===");
        println!("Seed: {}", self.seed);
        println!("Sample size: {} bytes", self.sample_bytes);
        println!();
    }
}

fn print_help() {
    println!("hpack-huffman: HPACK Huffman encoder/decoder");
    println!();
    println!("USAGE:");
    println!("    hpack-huffman [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    --mode <MODE>           encode, decode or roundtrip (default: roundtrip)");
    println!("    --in <PATH>             Input file (default: generate sample)");
    println!("    --out <PATH>            Output file (default: stdout)");
    println!("    --hex                   Read and write hex text instead of raw bytes");
    println!();
    println!("    --seed <N>              Random seed for the generated sample");
    println!("    --sample-bytes <N>      Generated sample size (default: random 256-16384)");
    println!();
    println!("    --print-config          Print resolved configuration");
    println!("    --no-metrics            Don't print metrics summary");
    println!("    --help, -h              Print this help");
    println!();
    println!("Set RUST_LOG=debug to log rejected input.");
    println!();
    println!("EXAMPLES:");
    println!("    hpack-huffman                                   # Round-trip a random sample");
    println!("    hpack-huffman --seed 42                         # Deterministic run");
    println!("    hpack-huffman --mode encode --in headers.txt --out headers.huff");
    println!("    hpack-huffman --mode decode --hex --in frame.hex");
    println!();
}
