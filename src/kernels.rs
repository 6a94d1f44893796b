//! SGEMM kernel implementations.
//!
//! All variants satisfy the same contract: for every `(i, j)` in
//! `[0, n) x [0, n)`,
//!
//! ```text
//! C[i, j] = alpha * sum(A[i, k] * B[k, j] for k in 0..n) + beta * C[i, j]
//! ```
//!
//! where the `C[i, j]` on the right-hand side is the value from before the
//! call. Matrices are row-major flat slices; `lda`, `ldb` and `ldc` are the
//! row strides (equal to `n` in this benchmark). The caller guarantees the
//! slices hold `n * n` elements.
//!
//! The parallel implementation relies on the [`rayon`][1] crate; the
//! optimized variant delegates to the [`matrixmultiply`][2] crate, which
//! stands in for a vendor BLAS library.
//!
//! [1]: https://crates.io/crates/rayon
//! [2]: https://crates.io/crates/matrixmultiply

use clap::ValueEnum;
use rayon::prelude::*;

use std::fmt;

/// Common signature shared by every kernel variant:
/// `(n, alpha, A, lda, B, ldb, beta, C, ldc)`.
pub type SgemmFn = fn(usize, f32, &[f32], usize, &[f32], usize, f32, &mut [f32], usize);

/// Selectable kernel backends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum KernelBackend {
    /// Sequential triple loop, single-threaded.
    Naive,
    /// Parallel triple loop, one worker per block of output rows.
    Reference,
    /// External BLAS-compatible routine (`matrixmultiply`).
    Optimized,
}

impl KernelBackend {
    /// Returns the kernel function implementing this backend.
    pub fn kernel(self) -> SgemmFn {
        match self {
            Self::Naive => naive_sgemm,
            Self::Reference => par_sgemm,
            Self::Optimized => blas_sgemm,
        }
    }
}

impl fmt::Display for KernelBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Naive => write!(f, "sequential naive"),
            Self::Reference => write!(f, "parallel reference"),
            Self::Optimized => write!(f, "optimized (matrixmultiply)"),
        }
    }
}

// Sequential implementation of the SGEMM kernel.
#[allow(clippy::too_many_arguments, non_snake_case)]
pub fn naive_sgemm(
    n: usize,
    alpha: f32,
    A: &[f32],
    lda: usize,
    B: &[f32],
    ldb: usize,
    beta: f32,
    C: &mut [f32],
    ldc: usize,
) {
    for i in 0..n {
        for j in 0..n {
            let mut acc = 0.0_f32;
            for k in 0..n {
                acc += A[i * lda + k] * B[k * ldb + j];
            }
            C[i * ldc + j] = alpha * acc + beta * C[i * ldc + j];
        }
    }
}

// Parallel implementation of the SGEMM kernel (using `rayon`'s parallel
// iterators). Rows of C never interact, so each worker owns a disjoint
// contiguous block of output rows and no synchronization is needed. The
// per-row arithmetic is identical to `naive_sgemm`, so for a fixed worker
// count the output is bit-identical to the sequential variant.
#[allow(clippy::too_many_arguments, non_snake_case)]
pub fn par_sgemm(
    n: usize,
    alpha: f32,
    A: &[f32],
    lda: usize,
    B: &[f32],
    ldb: usize,
    beta: f32,
    C: &mut [f32],
    ldc: usize,
) {
    C.par_chunks_exact_mut(ldc)
        .zip(A.par_chunks_exact(lda))
        .for_each(|(c_row, a_row)| {
            for (j, c_ij) in c_row.iter_mut().enumerate().take(n) {
                let mut acc = 0.0_f32;
                for k in 0..n {
                    acc += a_row[k] * B[k * ldb + j];
                }
                *c_ij = alpha * acc + beta * *c_ij;
            }
        });
}

// Optimized variant: delegates to `matrixmultiply::sgemm`, which satisfies
// the same contract with implementation-defined rounding. Row-major layout
// maps to row stride `ld` and column stride 1; `m = n = k` and no
// transposition.
#[allow(clippy::too_many_arguments, non_snake_case)]
pub fn blas_sgemm(
    n: usize,
    alpha: f32,
    A: &[f32],
    lda: usize,
    B: &[f32],
    ldb: usize,
    beta: f32,
    C: &mut [f32],
    ldc: usize,
) {
    debug_assert!(A.len() >= n * lda && B.len() >= n * ldb && C.len() >= n * ldc);

    // SAFETY: the slices are contiguous allocations of at least `n * ld`
    // elements each, so every `i * ld + j` access with `i, j < n` is in
    // bounds, and C does not alias A or B.
    unsafe {
        matrixmultiply::sgemm(
            n,
            n,
            n,
            alpha,
            A.as_ptr(),
            lda as isize,
            1,
            B.as_ptr(),
            ldb as isize,
            1,
            beta,
            C.as_mut_ptr(),
            ldc as isize,
            1,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::consts;

    // The canonical synthetic workload: A = 2.0, B = 0.5, C = 1.0. Every
    // inner product is exactly n in f32, so all expected values below are
    // exact and the assertions can compare bit-for-bit.
    fn canonical(n: usize) -> (Vec<f32>, Vec<f32>, Vec<f32>) {
        (
            vec![consts::A_FILL; n * n],
            vec![consts::B_FILL; n * n],
            vec![consts::C_FILL; n * n],
        )
    }

    #[test]
    fn naive_single_application() {
        let n = 128;
        let (a, b, mut c) = canonical(n);
        naive_sgemm(n, 1.0, &a, n, &b, n, 1.0, &mut c, n);
        assert!(c.iter().all(|&x| x == n as f32 + 1.0));
    }

    #[test]
    fn naive_repeat_recurrence() {
        let n = 64;
        let (a, b, mut c) = canonical(n);
        for r in 1..=5_usize {
            naive_sgemm(n, 1.0, &a, n, &b, n, 1.0, &mut c, n);
            let expected = (r * n) as f32 + 1.0;
            assert!(c.iter().all(|&x| x == expected), "repeat {r}");
        }
    }

    #[test]
    fn naive_applies_alpha_and_beta() {
        let n = 64;
        let (a, b, mut c) = canonical(n);
        naive_sgemm(n, 2.0, &a, n, &b, n, 0.5, &mut c, n);
        // alpha * n + beta * 1.0
        assert!(c.iter().all(|&x| x == 2.0 * n as f32 + 0.5));
    }

    #[test]
    fn parallel_matches_naive_bitwise() {
        let n = 96;
        // Non-uniform inputs so a transposed or misindexed access would show.
        let a: Vec<f32> = (0..n * n).map(|i| ((i % 7) as f32) - 3.0).collect();
        let b: Vec<f32> = (0..n * n).map(|i| ((i % 5) as f32) * 0.25).collect();
        let c0: Vec<f32> = (0..n * n).map(|i| (i % 3) as f32).collect();

        let mut c_seq = c0.clone();
        let mut c_par = c0;
        naive_sgemm(n, 1.5, &a, n, &b, n, 0.5, &mut c_seq, n);
        par_sgemm(n, 1.5, &a, n, &b, n, 0.5, &mut c_par, n);
        assert_eq!(c_seq, c_par);
    }

    #[test]
    fn optimized_matches_on_canonical_inputs() {
        let n = 128;
        let (a, b, mut c) = canonical(n);
        blas_sgemm(n, 1.0, &a, n, &b, n, 1.0, &mut c, n);
        // All intermediate sums are integers below 2^24, exact in any
        // summation order.
        assert!(c.iter().all(|&x| x == n as f32 + 1.0));
    }

    #[test]
    fn reads_pre_update_c_values() {
        // With beta = 2.0 each output must scale the value of C from before
        // the call, not a partially updated one.
        let n = 32;
        let (a, b, mut c) = canonical(n);
        naive_sgemm(n, 1.0, &a, n, &b, n, 2.0, &mut c, n);
        assert!(c.iter().all(|&x| x == n as f32 + 2.0));
        par_sgemm(n, 1.0, &a, n, &b, n, 2.0, &mut c, n);
        assert!(c.iter().all(|&x| x == n as f32 + 2.0 * (n as f32 + 2.0)));
    }

    #[test]
    fn backend_selection_dispatches_each_variant() {
        let n = 32;
        for backend in [
            KernelBackend::Naive,
            KernelBackend::Reference,
            KernelBackend::Optimized,
        ] {
            let (a, b, mut c) = canonical(n);
            let kernel = backend.kernel();
            kernel(n, 1.0, &a, n, &b, n, 1.0, &mut c, n);
            assert!(
                c.iter().all(|&x| x == n as f32 + 1.0),
                "backend {backend}"
            );
        }
    }
}
