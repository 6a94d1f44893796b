//! Command-Line Interface related code.
//!
//! This module handles the parsing of CLI arguments using the [`clap`][1] crate.
//! It defines the available runtime options and validates the numeric bounds
//! before any buffer gets allocated.
//!
//! [1]: https://crates.io/crates/clap

use crate::consts;
use crate::kernels::KernelBackend;

use clap::Parser;

/// Sustained SGEMM throughput microbenchmark.
///
/// Measures the wall-clock time and achieved GFLOP/s of repeated
/// single-precision matrix multiplications (`C = alpha * A * B + beta * C`)
/// on square N x N matrices, using either a parallel reference kernel or an
/// optimized BLAS-style backend.
#[derive(Clone, Debug, Parser)]
pub struct CliArgs {
    /// Matrix side length N (must be at least 128).
    #[arg(
        value_name = "N",
        value_parser = clap::value_parser!(u64).range(consts::MIN_SIZE..),
    )]
    pub size: Option<u64>,

    /// Number of multiply repetitions inside the timed region (must be at
    /// least 4).
    #[arg(
        value_name = "REPEATS",
        value_parser = clap::value_parser!(u64).range(consts::MIN_REPEATS..),
    )]
    pub repeats: Option<u64>,

    /// Alpha scaling factor.
    #[arg(value_name = "ALPHA", default_value_t = consts::DEFAULT_ALPHA)]
    pub alpha: f32,

    /// Beta scaling factor.
    #[arg(value_name = "BETA", default_value_t = consts::DEFAULT_BETA)]
    pub beta: f32,

    /// Multiply kernel backend to benchmark.
    #[arg(
        short,
        long,
        value_enum,
        value_name = "BACKEND",
        default_value = "reference",
    )]
    pub kernel: KernelBackend,

    /// Number of worker threads (defaults to all available cores).
    #[arg(short, long, value_name = "THREADS")]
    pub threads: Option<usize>,
}

impl CliArgs {
    /// Effective matrix side length, falling back to the default when the
    /// positional argument was omitted.
    pub fn size(&self) -> u64 {
        self.size.unwrap_or(consts::DEFAULT_SIZE)
    }

    /// Effective repetition count, falling back to the default when the
    /// positional argument was omitted.
    pub fn repeats(&self) -> u64 {
        self.repeats.unwrap_or(consts::DEFAULT_REPEATS)
    }
}
