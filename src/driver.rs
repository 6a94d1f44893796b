//! Benchmark driver.
//!
//! Orchestrates a single benchmark run: validate the configuration, allocate
//! the three matrices, populate them with the synthetic workload, invoke the
//! selected kernel `repeats` times inside one timed span, then reduce C into
//! the sanity checksum. The driver owns every buffer for the full run; they
//! are released when [`run`] returns, on every path.
//!
//! There are no retries anywhere. Any failure is fatal to the run and is
//! reported to the caller as a [`BenchError`].

use crate::cli::CliArgs;
use crate::consts;
use crate::kernels::KernelBackend;
use crate::matrix::Matrix;
use crate::perf_report::PerfReport;

use thiserror::Error;

use std::time::Instant;

/// Fatal benchmark errors: precondition violations detected before any
/// allocation, or the allocation itself failing.
#[derive(Debug, Error)]
pub enum BenchError {
    #[error("matrix size must be at least {min}, got {got}")]
    SizeTooSmall { got: u64, min: u64 },

    #[error("repeats must be at least {min}, got {got}")]
    RepeatsTooSmall { got: u64, min: u64 },

    #[error("failed to allocate matrix buffer of {bytes} bytes")]
    Allocation { bytes: usize },
}

/// Validated input parameters of one benchmark run.
#[derive(Clone, Copy, Debug)]
pub struct BenchConfig {
    pub size: u64,
    pub repeats: u64,
    pub alpha: f32,
    pub beta: f32,
    pub backend: KernelBackend,
}

impl BenchConfig {
    /// Checks the size and repetition bounds. The CLI layer enforces the
    /// same bounds at parse time; this guards direct construction.
    pub fn validate(&self) -> Result<(), BenchError> {
        if self.size < consts::MIN_SIZE {
            return Err(BenchError::SizeTooSmall {
                got: self.size,
                min: consts::MIN_SIZE,
            });
        }
        if self.repeats < consts::MIN_REPEATS {
            return Err(BenchError::RepeatsTooSmall {
                got: self.repeats,
                min: consts::MIN_REPEATS,
            });
        }
        Ok(())
    }
}

impl From<&CliArgs> for BenchConfig {
    fn from(args: &CliArgs) -> Self {
        Self {
            size: args.size(),
            repeats: args.repeats(),
            alpha: args.alpha,
            beta: args.beta,
            backend: args.kernel,
        }
    }
}

/// Executes one full benchmark run and returns the performance report.
pub fn run(config: &BenchConfig) -> Result<PerfReport, BenchError> {
    config.validate()?;
    let n = config.size as usize;

    println!("Allocating matrices...");
    let mut a = Matrix::allocate(n)?;
    let mut b = Matrix::allocate(n)?;
    let mut c = Matrix::allocate(n)?;

    println!("Allocation complete, populating with values...");
    a.fill(consts::A_FILL);
    b.fill(consts::B_FILL);
    c.fill(consts::C_FILL);

    println!("Performing multiplication...");
    let kernel = config.backend.kernel();

    // C is intentionally not reset between repeats: iteration r's output is
    // iteration r+1's input, accumulating through beta.
    let start = Instant::now();
    for _ in 0..config.repeats {
        kernel(
            n,
            config.alpha,
            a.as_slice(),
            n,
            b.as_slice(),
            n,
            config.beta,
            c.as_mut_slice(),
            n,
        );
    }
    let elapsed = start.elapsed().as_secs_f64();

    println!("Calculating matrix check...");
    let final_sum = c.sum();

    Ok(PerfReport::new(config, final_sum, elapsed))
}
