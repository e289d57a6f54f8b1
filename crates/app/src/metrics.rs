//! Metrics collection and reporting for a codec run.
//!
//! Tracks sizes on both sides of the codec and how long the run took, so the
//! summary can show the compression ratio and throughput.
//!
//! # Thread Safety
//!
//! The `CodecMetrics` struct is NOT thread-safe. The tool runs on one thread.

use std::time::{Duration, Instant};

/// Sizes and timing for a single run.
#[derive(Debug, Clone)]
pub struct CodecMetrics {
    // === Timing ===
    /// When the run started
    pub start_time: Instant,

    /// When the run ended (set on completion)
    pub end_time: Option<Instant>,

    // === Sizes ===
    /// Bytes read from the input
    pub input_bytes: u64,

    /// Plain (unencoded) bytes handled
    pub raw_bytes: u64,

    /// Huffman-encoded bytes handled
    pub encoded_bytes: u64,

    /// Bytes written to the output
    pub output_bytes: u64,

    // === Verification ===
    /// Round-trip result (None when the mode does not verify)
    pub verified: Option<bool>,
}

impl CodecMetrics {
    /// Create new metrics with start time set to now.
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            end_time: None,
            input_bytes: 0,
            raw_bytes: 0,
            encoded_bytes: 0,
            output_bytes: 0,
            verified: None,
        }
    }

    /// Mark the run as complete.
    pub fn complete(&mut self) {
        self.end_time = Some(Instant::now());
    }

    /// Get total duration (or current elapsed if not complete).
    pub fn duration(&self) -> Duration {
        match self.end_time {
            Some(end) => end.duration_since(self.start_time),
            None => self.start_time.elapsed(),
        }
    }

    /// Compute compression ratio (encoded / raw).
    ///
    /// Returns 0.0 if nothing was processed.
    pub fn compression_ratio(&self) -> f64 {
        if self.raw_bytes == 0 {
            0.0
        } else {
            self.encoded_bytes as f64 / self.raw_bytes as f64
        }
    }

    /// Average encoded bits per plain byte.
    pub fn bits_per_byte(&self) -> f64 {
        self.compression_ratio() * 8.0
    }

    /// Compute throughput in input bytes/second.
    pub fn throughput_bps(&self) -> f64 {
        let duration_secs = self.duration().as_secs_f64();
        if duration_secs == 0.0 {
            0.0
        } else {
            self.input_bytes as f64 / duration_secs
        }
    }

    /// Print a human-readable summary to stderr, keeping stdout for output.
    pub fn print_summary(&self) {
        eprintln!("\n=== Codec Summary ===");
        eprintln!("Duration: {} us", self.duration().as_micros());
        eprintln!("Input:   {} bytes", self.input_bytes);
        eprintln!("Output:  {} bytes", self.output_bytes);
        eprintln!();

        eprintln!("=== Compression ===");
        eprintln!("Raw:     {} bytes", self.raw_bytes);
        eprintln!("Encoded: {} bytes", self.encoded_bytes);
        eprintln!(
            "Ratio:   {:.1}% ({:.2} bits/byte)",
            self.compression_ratio() * 100.0,
            self.bits_per_byte()
        );
        eprintln!("Throughput: {:.2} MiB/s", self.throughput_bps() / 1024.0 / 1024.0);

        match self.verified {
            Some(true) => eprintln!("Verification: PASSED"),
            Some(false) => eprintln!("Verification: FAILED (decoded output differs)"),
            None => {}
        }
    }
}

impl Default for CodecMetrics {
    fn default() -> Self {
        Self::new()
    }
}
