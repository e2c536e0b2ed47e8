//! # fftcheck - host-side FFT reference and result diffing
//!
//! Compute a radix-2 Fast Fourier Transform on the CPU and compare it, element
//! by element with a floating-point tolerance, against a result produced
//! somewhere else (typically a GPU compute kernel). When the two disagree the
//! crate tells you *where*: which index ranges match, which do not, and how
//! much of a mismatching region is explained by shifted runs.
//!
//! ## Features
//!
//! - **Recursive reference FFT** with cached per-thread twiddle tables
//! - **Iterative and Stockham level-by-level engines** modelling what
//!   level-synchronous kernels compute, including partial execution
//! - **Bit-reversal permutation** for kernels that skip the reordering step
//! - **Relative closeness predicate, equal-range scan and correspondence
//!   matching** for diagnosing near-equal sequences
//! - **Verification harness** around an opaque [`verify::Producer`]
//!
//! ## Cargo Features
//!
//! - `std` (default): thread-local context cache and `std::error::Error` impls
//! - `verbose-logging` (default): emit `log` records from the harness and cache
//! - `parallel`: verify several sizes on a Rayon pool
//! - `internal-tests`: in-crate property tests
//!
//! ## Example
//!
//! ```
//! use fftcheck::verify::{reference_forward_transform, verify, Verdict};
//!
//! let signal = [2.5f32, 9.0, -3.0, 5.0, 10.0, 4.0, 1.0, 7.0];
//! let expected = reference_forward_transform(&signal);
//! let produced = expected.clone();
//! assert!(matches!(verify(&expected, &produced, 1e-4, 2), Verdict::Pass));
//! ```
//!
//! ## License
//!
//! Licensed under either of
//! - Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or https://www.apache.org/licenses/LICENSE-2.0)
//! - MIT license ([LICENSE-MIT](LICENSE-MIT) or https://opensource.org/licenses/MIT)
//!
//! at your option.

#![no_std]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

/// Emit a `debug` record when `verbose-logging` is enabled.
macro_rules! debug_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "verbose-logging")]
        log::debug!($($arg)*);
    };
}

/// Emit an `info` record when `verbose-logging` is enabled.
macro_rules! info_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "verbose-logging")]
        log::info!($($arg)*);
    };
}

/// Power-of-two helpers and error bounds.
pub mod math;

/// Minimal float trait and complex number type.
pub mod num;

/// Bit-reversal permutation of power-of-two length sequences.
pub mod bitrev;

/// Roots of unity used as butterfly twiddle factors.
pub mod twiddle;

/// Twiddle-table contexts and the per-thread context cache.
pub mod context;

/// FFT engines: recursive reference, iterative and Stockham level models.
pub mod fft;

/// Naive O(N²) DFT used as a known-correct reference.
pub mod dft;

/// Relative closeness predicate and equal-range scanning.
pub mod compare;

/// Approximate alignment of two sequences into matching runs.
pub mod correspondence;

/// Verification harness around an external producer.
pub mod verify;

pub use compare::{close, equal_ranges, ApproxEq, MatchRange};
pub use correspondence::{correspondences, Correspondence};
pub use fft::{new_engine, FftDirection, FftEngine, FftStrategy, InputOrder};
pub use num::{Complex, Complex32, Complex64, Float};
pub use verify::{verify, FailureReport, Harness, Producer, Verdict, VerifyConfig, VerifyError};
