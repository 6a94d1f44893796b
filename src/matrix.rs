//! Owned square matrix buffers.
//!
//! A [`Matrix`] is a flat, row-major `Vec<f32>` of `n * n` elements; element
//! `(i, j)` lives at offset `i * n + j`. The driver allocates three of these
//! and owns them for the whole run. Filling and summing operate on disjoint
//! rows in parallel.

use rayon::prelude::*;

use crate::driver::BenchError;

use std::mem::size_of;

/// Square `n x n` matrix of `f32`, stored row-major.
pub struct Matrix {
    n: usize,
    data: Vec<f32>,
}

impl Matrix {
    /// Allocates an `n x n` buffer. Surfaces an allocation failure as
    /// [`BenchError::Allocation`] rather than aborting, so the driver can
    /// report it and exit.
    pub fn allocate(n: usize) -> Result<Self, BenchError> {
        let len = n * n;
        let mut data = Vec::new();
        data.try_reserve_exact(len).map_err(|_| BenchError::Allocation {
            bytes: len * size_of::<f32>(),
        })?;
        // Cannot reallocate: capacity is already exact.
        data.resize(len, 0.0);
        Ok(Self { n, data })
    }

    /// Side length of the matrix.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Fills every element with `value`, parallelized over disjoint rows.
    pub fn fill(&mut self, value: f32) {
        let n = self.n;
        self.data
            .par_chunks_mut(n)
            .for_each(|row| row.fill(value));
    }

    /// Element at `(i, j)`.
    pub fn at(&self, i: usize, j: usize) -> f32 {
        self.data[i * self.n + j]
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Sum of all elements: per-row partial sums combined by a parallel
    /// reduction. The result is independent of the worker count up to f32
    /// non-associativity.
    pub fn sum(&self) -> f32 {
        self.data
            .par_chunks(self.n)
            .map(|row| row.iter().sum::<f32>())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocates_n_squared_elements() {
        let m = Matrix::allocate(130).unwrap();
        assert_eq!(m.n(), 130);
        assert_eq!(m.as_slice().len(), 130 * 130);
    }

    #[test]
    fn fill_writes_every_element() {
        let mut m = Matrix::allocate(64).unwrap();
        m.fill(2.5);
        assert!(m.as_slice().iter().all(|&x| x == 2.5));
    }

    #[test]
    fn row_major_indexing() {
        let mut m = Matrix::allocate(16).unwrap();
        m.as_mut_slice()[3 * 16 + 7] = 42.0;
        assert_eq!(m.at(3, 7), 42.0);
        assert_eq!(m.at(7, 3), 0.0);
    }

    #[test]
    fn sum_of_uniform_fill_is_exact() {
        let mut m = Matrix::allocate(128).unwrap();
        m.fill(1.0);
        // 16384 is exactly representable; so is every partial sum.
        assert_eq!(m.sum(), (128 * 128) as f32);
    }
}
