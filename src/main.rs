//! sgemm-bench - SGEMM throughput microbenchmark
//!
//! # About
//! `sgemm-bench` measures the sustained single-precision floating-point
//! throughput of general matrix multiplication (SGEMM:
//! `C = alpha * A * B + beta * C`) on the host CPU. A fixed synthetic
//! workload (A = 2.0, B = 0.5, C = 1.0) is multiplied `repeats` times inside
//! a single timed region, then the mean of C is reported as a sanity
//! checksum alongside the elapsed time and the achieved GFLOP/s.
//!
//! Three interchangeable kernel backends are available:
//! - `naive`: sequential triple loop
//! - `reference`: parallel triple loop, one worker per block of output rows
//! - `optimized`: BLAS-style external routine (the `matrixmultiply` crate)
//!
//! # Quickstart
//! ## Build
//! As any Rust-based project, `sgemm-bench` is built and run with `cargo`:
//! ```sh
//! cargo build --release
//! ```
//!
//! ## Example runs
//! Default parameters (N = 256, 8 repeats, alpha = beta = 1.0):
//! ```sh
//! cargo run --release
//! ```
//!
//! A 2048 x 2048 multiply repeated 16 times on the optimized backend, using
//! 8 worker threads:
//! ```sh
//! cargo run --release -- 2048 16 --kernel optimized --threads 8
//! ```
//!
//! N must be at least 128 and repeats at least 4; smaller values are
//! rejected with a non-zero exit status before any matrix is allocated.
//!
//! ## Documentation
//! The crate's documentation is available using `cargo`:
//! ```sh
//! cargo doc --open
//! ```

pub mod cli;
pub mod consts;
pub mod driver;
pub mod kernels;
pub mod matrix;
pub mod perf_report;

use crate::cli::CliArgs;
use crate::driver::BenchConfig;

use clap::Parser;

use std::process::ExitCode;

/// Sizes the global rayon pool. Fails if the pool was already initialized.
fn configure_thread_pool(threads: usize) -> Result<(), rayon::ThreadPoolBuildError> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    if let Some(threads) = args.threads {
        if let Err(err) = configure_thread_pool(threads) {
            eprintln!("Error: failed to configure the rayon thread pool: {err}");
            return ExitCode::FAILURE;
        }
    }

    match args.size {
        Some(n) => println!("Matrix size input by command line: {n}"),
        None => println!("Matrix size defaulted to {}", consts::DEFAULT_SIZE),
    }
    match args.repeats {
        Some(r) => println!("Repeat multiply {r} times."),
        None => println!("Repeat multiply defaulted to {}", consts::DEFAULT_REPEATS),
    }
    println!("Alpha =    {:.6}", args.alpha);
    println!("Beta  =    {:.6}", args.beta);
    println!("Kernel:    {}", args.kernel);

    let config = BenchConfig::from(&args);
    match driver::run(&config) {
        Ok(report) => {
            print!("{report}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
