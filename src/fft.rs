//! Radix-2 Fast Fourier Transform engines.
//!
//! Three interchangeable engines implement [`FftEngine`]:
//!
//! - [`RecursiveFft`]: the divide-and-conquer
//!   [Cooley–Tukey](https://en.wikipedia.org/wiki/Cooley%E2%80%93Tukey_FFT_algorithm)
//!   reference. Slow but proven; consumes natural-order input.
//! - [`IterativeFft`]: explicit level-by-level butterflies on bit-reversed
//!   input, modelling what a level-synchronous compute kernel does.
//! - [`StockhamFft`]: double-buffered auto-sort variant on natural-order input,
//!   modelling the Stockham kernels.
//!
//! The level models accept a `max_level` so a partially executed kernel can be
//! compared against the same number of host levels.
//!
//! All engines share one contract: the length is a power of two and the
//! twiddle table belongs to a power-of-two size at least as large. Violations
//! panic. Inverse transforms are unscaled.

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::bitrev::bit_reverse_permutation;
use crate::context::{context_for_size, CachedFloat, FftContext};
use crate::math::{is_multiple, is_power_of_two, power_of_two_exponent};
use crate::num::{complexify, Complex, Float};

pub mod iterative;
pub mod recursive;
pub mod stockham;

/// Relative bound on the imaginary residue of an inverse transform whose
/// logical result is real.
const INVERSE_IMAG_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FftDirection {
    Forward,
    Inverse,
}

/// Element order an engine expects its input in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOrder {
    Natural,
    BitReversed,
}

/// Which engine to build with [`new_engine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FftStrategy {
    Recursive,
    #[default]
    Iterative,
    Stockham,
}

impl FftStrategy {
    pub fn name(self) -> &'static str {
        match self {
            FftStrategy::Recursive => "recursive",
            FftStrategy::Iterative => "iterative",
            FftStrategy::Stockham => "stockham",
        }
    }
}

/// The elementary combine `(a, b) -> (a + b·w, a - b·w)`.
#[inline(always)]
pub fn butterfly<T: Float>(
    a: Complex<T>,
    b: Complex<T>,
    twiddle: Complex<T>,
) -> (Complex<T>, Complex<T>) {
    let t = b.mul(twiddle);
    (a.add(t), a.sub(t))
}

/// Butterfly spans of a size-`n` transform: `1, 2, 4, .., n / 2`.
pub fn levels(n: usize) -> impl Iterator<Item = usize> {
    (0..power_of_two_exponent(n)).map(|e| 1usize << e)
}

/// Step through `roots` that yields the size-`n` roots of unity.
///
/// A table built for size `m >= n` serves size `n` with stride `m / n`.
pub(crate) fn table_stride(n: usize, roots_len: usize) -> usize {
    assert!(
        is_power_of_two(n),
        "FFT length must be a non-zero power of two, got {}",
        n
    );
    if n == 1 {
        return 1;
    }
    let half = n / 2;
    assert!(
        roots_len >= half && is_power_of_two(roots_len) && is_multiple(roots_len, half),
        "twiddle table of {} entries does not serve a size-{} transform",
        roots_len,
        n
    );
    roots_len / half
}

/// Copy of `input`, conjugated for the inverse direction.
pub(crate) fn oriented<T: Float>(direction: FftDirection, input: &[Complex<T>]) -> Vec<Complex<T>> {
    match direction {
        FftDirection::Forward => input.to_vec(),
        FftDirection::Inverse => input.iter().map(|c| c.conj()).collect(),
    }
}

/// Debug-build check that an inverse transform produced a real signal.
pub(crate) fn debug_assert_real<T: Float>(output: &[Complex<T>]) {
    if cfg!(debug_assertions) {
        let peak = output
            .iter()
            .map(|c| c.re.abs().to_f64())
            .fold(0.0f64, f64::max);
        for (i, c) in output.iter().enumerate() {
            let residue = c.im.abs().to_f64();
            let relative = if peak > 0.0 { residue / peak } else { residue };
            debug_assert!(
                relative < INVERSE_IMAG_TOLERANCE,
                "inverse output {} has imaginary residue {:e} (peak {:e})",
                i,
                residue,
                peak
            );
        }
    }
}

/// Common interface of the FFT backends.
///
/// `forward` and `inverse` take input already arranged in
/// [`input_order`](FftEngine::input_order) together with the context for its
/// length. The `*_signal`/`*_spectrum` helpers do the arranging and context
/// lookup for you.
pub trait FftEngine<T: CachedFloat> {
    fn name(&self) -> &'static str;
    fn input_order(&self) -> InputOrder;

    fn forward(&self, context: &FftContext<T>, input: &[Complex<T>]) -> Vec<Complex<T>>;
    /// Unscaled inverse transform; the logical result is expected to be real.
    fn inverse(&self, context: &FftContext<T>, input: &[Complex<T>]) -> Vec<Complex<T>>;

    /// Twiddle context for `size`, from this thread's cache.
    fn context(&self, size: usize) -> FftContext<T> {
        context_for_size(size)
    }

    /// Arrange natural-order data the way this engine reads it.
    fn arrange(&self, data: &[Complex<T>]) -> Vec<Complex<T>> {
        match self.input_order() {
            InputOrder::Natural => data.to_vec(),
            InputOrder::BitReversed => bit_reverse_permutation(data),
        }
    }

    /// Forward transform of a natural-order real signal.
    fn forward_signal(&self, signal: &[T]) -> Vec<Complex<T>> {
        let input = self.arrange(&complexify(signal));
        let context = self.context(input.len());
        self.forward(&context, &input)
    }

    /// Unscaled inverse transform of a natural-order spectrum.
    fn inverse_spectrum(&self, spectrum: &[Complex<T>]) -> Vec<Complex<T>> {
        let input = self.arrange(spectrum);
        let context = self.context(input.len());
        self.inverse(&context, &input)
    }
}

/// Divide-and-conquer reference engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecursiveFft;

impl<T: CachedFloat> FftEngine<T> for RecursiveFft {
    fn name(&self) -> &'static str {
        "recursive"
    }
    fn input_order(&self) -> InputOrder {
        InputOrder::Natural
    }
    fn forward(&self, context: &FftContext<T>, input: &[Complex<T>]) -> Vec<Complex<T>> {
        recursive::transform(FftDirection::Forward, input, context.roots())
    }
    fn inverse(&self, context: &FftContext<T>, input: &[Complex<T>]) -> Vec<Complex<T>> {
        let output = recursive::transform(FftDirection::Inverse, input, context.roots());
        debug_assert_real(&output);
        output
    }
}

/// Level-by-level engine on bit-reversed input.
#[derive(Debug, Clone, Copy, Default)]
pub struct IterativeFft {
    /// Largest butterfly span to apply; `None` runs every level.
    pub max_level: Option<usize>,
}

impl IterativeFft {
    pub fn with_max_level(max_level: usize) -> Self {
        Self {
            max_level: Some(max_level),
        }
    }
}

impl<T: CachedFloat> FftEngine<T> for IterativeFft {
    fn name(&self) -> &'static str {
        "iterative"
    }
    fn input_order(&self) -> InputOrder {
        InputOrder::BitReversed
    }
    fn forward(&self, context: &FftContext<T>, input: &[Complex<T>]) -> Vec<Complex<T>> {
        iterative::transform(FftDirection::Forward, input, context.roots(), self.max_level)
    }
    fn inverse(&self, context: &FftContext<T>, input: &[Complex<T>]) -> Vec<Complex<T>> {
        let output =
            iterative::transform(FftDirection::Inverse, input, context.roots(), self.max_level);
        if self.max_level.is_none() {
            debug_assert_real(&output);
        }
        output
    }
}

/// Double-buffered auto-sort engine on natural-order input.
#[derive(Debug, Clone, Copy, Default)]
pub struct StockhamFft {
    /// Largest butterfly span to apply; `None` runs every level.
    pub max_level: Option<usize>,
}

impl StockhamFft {
    pub fn with_max_level(max_level: usize) -> Self {
        Self {
            max_level: Some(max_level),
        }
    }
}

impl<T: CachedFloat> FftEngine<T> for StockhamFft {
    fn name(&self) -> &'static str {
        "stockham"
    }
    fn input_order(&self) -> InputOrder {
        InputOrder::Natural
    }
    fn forward(&self, context: &FftContext<T>, input: &[Complex<T>]) -> Vec<Complex<T>> {
        stockham::transform(FftDirection::Forward, input, context.roots(), self.max_level)
    }
    fn inverse(&self, context: &FftContext<T>, input: &[Complex<T>]) -> Vec<Complex<T>> {
        let output =
            stockham::transform(FftDirection::Inverse, input, context.roots(), self.max_level);
        if self.max_level.is_none() {
            debug_assert_real(&output);
        }
        output
    }
}

/// Build the engine selected by `strategy`, running every level.
pub fn new_engine<T: CachedFloat>(strategy: FftStrategy) -> Box<dyn FftEngine<T>> {
    new_engine_with_max_level(strategy, None)
}

/// Build the engine selected by `strategy`.
///
/// `max_level` caps the level models; the recursive engine always runs to
/// completion and ignores it.
pub fn new_engine_with_max_level<T: CachedFloat>(
    strategy: FftStrategy,
    max_level: Option<usize>,
) -> Box<dyn FftEngine<T>> {
    match strategy {
        FftStrategy::Recursive => Box::new(RecursiveFft),
        FftStrategy::Iterative => Box::new(IterativeFft { max_level }),
        FftStrategy::Stockham => Box::new(StockhamFft { max_level }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::ApproxEq;
    use crate::dft::dft;
    use crate::num::{Complex32, Complex64};
    use alloc::vec;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_signal(n: usize, seed: u64) -> Vec<f32> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..n).map(|_| rng.gen_range(-1.0f32..1.0)).collect()
    }

    #[test]
    fn butterfly_combines() {
        let (a, b) = butterfly(
            Complex64::new(1.0, 0.0),
            Complex64::new(2.0, 0.0),
            Complex64::new(0.0, -1.0),
        );
        assert_eq!(a, Complex64::new(1.0, -2.0));
        assert_eq!(b, Complex64::new(1.0, 2.0));
    }

    #[test]
    fn levels_of_sixteen() {
        assert_eq!(levels(16).collect::<Vec<_>>(), vec![1, 2, 4, 8]);
        assert_eq!(levels(1).count(), 0);
    }

    #[test]
    fn table_stride_accepts_larger_tables() {
        assert_eq!(table_stride(8, 4), 1);
        assert_eq!(table_stride(8, 16), 4);
        assert_eq!(table_stride(1, 0), 1);
    }

    #[test]
    #[should_panic(expected = "does not serve")]
    fn table_stride_rejects_small_table() {
        table_stride(16, 4);
    }

    #[test]
    #[should_panic(expected = "power of two")]
    fn table_stride_rejects_bad_length() {
        table_stride(6, 4);
    }

    #[test]
    fn all_strategies_match_dft() {
        let signal = random_signal(64, 7);
        let expected = dft(&complexify(&signal));
        for strategy in [
            FftStrategy::Recursive,
            FftStrategy::Iterative,
            FftStrategy::Stockham,
        ] {
            let engine = new_engine::<f32>(strategy);
            assert_eq!(engine.name(), strategy.name());
            let got = engine.forward_signal(&signal);
            for (k, (g, e)) in got.iter().zip(expected.iter()).enumerate() {
                assert!(g.close_to(e, 1e-3), "{} bin {}: {:?} vs {:?}", strategy.name(), k, g, e);
            }
        }
    }

    #[test]
    fn inverse_spectrum_recovers_scaled_signal() {
        let signal = random_signal(256, 11);
        for strategy in [
            FftStrategy::Recursive,
            FftStrategy::Iterative,
            FftStrategy::Stockham,
        ] {
            let engine = new_engine::<f32>(strategy);
            let spectrum = engine.forward_signal(&signal);
            let back = engine.inverse_spectrum(&spectrum);
            let scale = 1.0 / signal.len() as f32;
            for (b, s) in back.iter().zip(signal.iter()) {
                assert!((b.re * scale - s).abs() < 1e-4, "{}: {} vs {}", strategy.name(), b.re * scale, s);
            }
        }
    }

    // Not Hermitian, so the inverse cannot be real.
    fn lopsided_spectrum() -> Vec<Complex64> {
        vec![
            Complex64::new(1.0, 0.0),
            Complex64::new(0.0, 1.0),
            Complex64::zero(),
            Complex64::zero(),
        ]
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "imaginary residue")]
    fn recursive_inverse_flags_complex_output() {
        RecursiveFft.inverse_spectrum(&lopsided_spectrum());
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "imaginary residue")]
    fn stockham_inverse_flags_complex_output() {
        StockhamFft::default().inverse_spectrum(&lopsided_spectrum());
    }

    #[test]
    fn capped_inverse_skips_residue_check() {
        let spectrum = lopsided_spectrum();
        let iterative = IterativeFft::with_max_level(1).inverse_spectrum(&spectrum);
        assert!(iterative.iter().any(|c| c.im != 0.0));
        let stockham = StockhamFft::with_max_level(1 << 10).inverse_spectrum(&spectrum);
        assert!(stockham.iter().any(|c| c.im.abs() > 1e-3));
    }

    #[test]
    fn recursive_and_iterative_are_bit_identical() {
        for e in 1..=14 {
            let n = 1usize << e;
            let signal = random_signal(n, e as u64);
            let a = <RecursiveFft as FftEngine<f32>>::forward_signal(&RecursiveFft, &signal);
            let b = IterativeFft::default().forward_signal(&signal);
            assert_eq!(a, b, "size {}", n);
        }
    }

    #[test]
    fn partial_levels_prefix_full_run() {
        let signal = random_signal(32, 3);
        let full = IterativeFft::default().forward_signal(&signal);
        let capped = IterativeFft::with_max_level(1 << 20).forward_signal(&signal);
        assert_eq!(full, capped);
        let half_done = IterativeFft::with_max_level(4).forward_signal(&signal);
        assert_ne!(half_done, full);
    }

    #[test]
    fn single_point_transform_is_identity() {
        let engine = new_engine::<f64>(FftStrategy::Recursive);
        let out = engine.forward_signal(&[3.25]);
        assert_eq!(out, vec![Complex64::new(3.25, 0.0)]);
    }

    #[test]
    #[should_panic(expected = "power of two")]
    fn forward_signal_rejects_non_power_of_two() {
        let engine = new_engine::<f32>(FftStrategy::Stockham);
        engine.forward_signal(&[1.0, 2.0, 3.0]);
    }

    #[test]
    fn explicit_context_is_reusable() {
        let engine = RecursiveFft;
        let ctx = FftContext::<f32>::new(4);
        let x = vec![Complex32::new(1.0, 0.0); 4];
        let a = engine.forward(&ctx, &x);
        let b = engine.forward(&ctx, &x);
        assert_eq!(a, b);
        assert_eq!(a[0], Complex32::new(4.0, 0.0));
    }
}

#[cfg(all(feature = "internal-tests", test))]
mod coverage_tests {
    use super::*;
    use crate::bitrev::bit_reverse_permutation;
    use alloc::vec::Vec;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_recursive_matches_iterative(exp in 0u32..10, ref signal in proptest::collection::vec(-1000.0f32..1000.0, 512)) {
            let n = 1usize << exp;
            let input: Vec<Complex<f32>> = complexify(&signal[..n]);
            let ctx = FftContext::<f32>::new(n);
            let a = recursive::transform(FftDirection::Forward, &input, ctx.roots());
            let b = iterative::transform(FftDirection::Forward, &bit_reverse_permutation(&input), ctx.roots(), None);
            prop_assert_eq!(a, b);
        }

        #[test]
        fn prop_stockham_roundtrip(exp in 1u32..10, ref signal in proptest::collection::vec(1.0f64..2.0, 512)) {
            let n = 1usize << exp;
            let engine = StockhamFft::default();
            let spectrum = engine.forward_signal(&signal[..n]);
            let back = engine.inverse_spectrum(&spectrum);
            for (b, s) in back.iter().zip(signal.iter()) {
                prop_assert!((b.re / n as f64 - s).abs() < 1e-9);
            }
        }
    }
}
