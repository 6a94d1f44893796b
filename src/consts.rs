//! Crate-level constants.

/// Default matrix side length.
pub const DEFAULT_SIZE: u64 = 256;

/// Default number of multiply repetitions performed inside the timed region.
pub const DEFAULT_REPEATS: u64 = 8;

/// Default `alpha` scaling factor.
pub const DEFAULT_ALPHA: f32 = 1.0;

/// Default `beta` scaling factor.
pub const DEFAULT_BETA: f32 = 1.0;

/// Smallest accepted matrix side length; below this the benchmark is
/// statistically meaningless.
pub const MIN_SIZE: u64 = 128;

/// Smallest accepted repetition count; fewer repeats are too noisy to average.
pub const MIN_REPEATS: u64 = 4;

/// Fill value for matrix A.
pub const A_FILL: f32 = 2.0;

/// Fill value for matrix B.
pub const B_FILL: f32 = 0.5;

/// Initial fill value for matrix C.
pub const C_FILL: f32 = 1.0;
