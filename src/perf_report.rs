//! Performance report related structures and functions.
//!
//! This module derives the benchmark's output metrics from the recorded
//! elapsed time and the reduced C matrix: the sanity checksum, the matrix
//! memory footprint, the total floating-point operation count and the
//! achieved GFLOP/s rate.

use crate::driver::BenchConfig;
use crate::kernels::KernelBackend;

use std::{fmt, mem::size_of};

/// Performance information of a completed benchmark run.
#[derive(Debug)]
pub struct PerfReport {
    /// Kernel backend that was benchmarked.
    backend: KernelBackend,
    /// Matrix side length.
    size: u64,
    /// Number of multiply repetitions in the timed region.
    repeats: u64,
    /// Mean C element averaged over repeats: `final_sum / (N^2 * repeats)`.
    checksum: f32,
    /// Memory footprint of the three matrices in MB.
    matrix_memory_mb: f64,
    /// Elapsed wall-clock seconds for the whole timed region.
    elapsed: f64,
    /// Total floating-point operations computed.
    flops: u64,
    /// Computational performance in GFLOP/s.
    gflops: f64,
}

impl PerfReport {
    /// Builds a report from the run configuration, the reduction of the C
    /// matrix and the elapsed seconds of the timed region.
    pub fn new(config: &BenchConfig, final_sum: f32, elapsed: f64) -> Self {
        let n = config.size;
        let count = n * n;
        let checksum = final_sum / (count * config.repeats) as f32;
        let matrix_memory_mb =
            (3 * count * size_of::<f32>() as u64) as f64 / (1024.0 * 1024.0);

        // One multiply and one add per inner-product term, plus the
        // alpha/beta scaling pass over the N^2 outputs.
        let flops = (2 * n * n * n + 2 * n * n) * config.repeats;
        let gflops = flops as f64 / elapsed / 1.0e9;

        Self {
            backend: config.backend,
            size: n,
            repeats: config.repeats,
            checksum,
            matrix_memory_mb,
            elapsed,
            flops,
            gflops,
        }
    }

    pub fn checksum(&self) -> f32 {
        self.checksum
    }

    pub fn matrix_memory_mb(&self) -> f64 {
        self.matrix_memory_mb
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn flops(&self) -> u64 {
        self.flops
    }

    pub fn gflops(&self) -> f64 {
        self.gflops
    }
}

impl fmt::Display for PerfReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(
            f,
            "==============================================================="
        )?;
        writeln!(f, "Kernel:               {}", self.backend)?;
        writeln!(f, "Matrix size:          {} x {}", self.size, self.size)?;
        writeln!(f, "Repeats:              {}", self.repeats)?;
        writeln!(f, "Final sum is:         {:.6}", self.checksum)?;
        writeln!(f, "Memory for matrices:  {:.6} MB", self.matrix_memory_mb)?;
        writeln!(f, "Multiply time:        {:.6} seconds", self.elapsed)?;
        writeln!(f, "FLOPs computed:       {}", self.flops)?;
        writeln!(f, "GFLOP/s rate:         {:.6} GF/s", self.gflops)?;
        writeln!(
            f,
            "==============================================================="
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(size: u64, repeats: u64) -> BenchConfig {
        BenchConfig {
            size,
            repeats,
            alpha: 1.0,
            beta: 1.0,
            backend: KernelBackend::Reference,
        }
    }

    #[test]
    fn flops_formula() {
        let report = PerfReport::new(&config(128, 4), 0.0, 1.0);
        assert_eq!(report.flops(), 16_908_288);
    }

    #[test]
    fn memory_footprint_formula() {
        let report = PerfReport::new(&config(128, 4), 0.0, 1.0);
        assert_eq!(report.matrix_memory_mb(), 0.1875);

        let report = PerfReport::new(&config(1024, 4), 0.0, 1.0);
        assert_eq!(report.matrix_memory_mb(), 12.0);
    }

    #[test]
    fn checksum_divides_by_count_and_repeats() {
        // 16384 elements, all 513.0 after 4 repeats.
        let final_sum = 16384.0 * 513.0;
        let report = PerfReport::new(&config(128, 4), final_sum, 1.0);
        assert_eq!(report.checksum(), 128.25);
    }

    #[test]
    fn gflops_scales_with_elapsed_time() {
        let report = PerfReport::new(&config(128, 4), 0.0, 2.0);
        assert_eq!(report.gflops(), 16_908_288.0 / 2.0 / 1.0e9);
    }

    #[test]
    fn report_is_debug_formattable() {
        // Required by `Result::unwrap_err` in the driver tests.
        let report = PerfReport::new(&config(128, 4), 0.0, 1.0);
        assert!(format!("{report:?}").contains("PerfReport"));
    }

    #[test]
    fn display_contains_every_metric_line() {
        let report = PerfReport::new(&config(128, 4), 16384.0 * 513.0, 0.5);
        let text = report.to_string();
        assert!(text.contains("Final sum is:         128.250000"));
        assert!(text.contains("Memory for matrices:  0.187500 MB"));
        assert!(text.contains("Multiply time:        0.500000 seconds"));
        assert!(text.contains("FLOPs computed:       16908288"));
        assert!(text.contains("GFLOP/s rate:"));
    }
}
