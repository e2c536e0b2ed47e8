//! Recursive decimation-in-time transform.
//!
//! The even and odd halves are never copied out: each recursion level reads
//! the input through an `(offset, stride)` view and writes its half-size
//! spectra into the two halves of its output window before combining them in
//! place.

use alloc::vec;
use alloc::vec::Vec;

use super::{butterfly, table_stride, FftDirection};
use crate::num::{Complex, Float};

/// Transform natural-order `input` using `roots`, the twiddle table of a
/// power-of-two size no smaller than `input.len()`.
///
/// The inverse direction conjugates each element at the leaves and does not
/// scale; its result is the unscaled inverse transform for real signals.
///
/// # Panics
/// Panics if the length is not a power of two or the table does not serve it.
pub fn transform<T: Float>(
    direction: FftDirection,
    input: &[Complex<T>],
    roots: &[Complex<T>],
) -> Vec<Complex<T>> {
    let n = input.len();
    let stride = table_stride(n, roots.len());
    let mut output = vec![Complex::zero(); n];
    split_combine(direction, input, 0, 1, roots, stride, &mut output);
    output
}

fn split_combine<T: Float>(
    direction: FftDirection,
    input: &[Complex<T>],
    offset: usize,
    step: usize,
    roots: &[Complex<T>],
    root_step: usize,
    out: &mut [Complex<T>],
) {
    let len = out.len();
    if len == 1 {
        let x = input[offset];
        out[0] = match direction {
            FftDirection::Forward => x,
            FftDirection::Inverse => x.conj(),
        };
        return;
    }
    let half = len / 2;
    let (even, odd) = out.split_at_mut(half);
    split_combine(direction, input, offset, step * 2, roots, root_step * 2, even);
    split_combine(direction, input, offset + step, step * 2, roots, root_step * 2, odd);
    for p in 0..half {
        let (lo, hi) = butterfly(even[p], odd[p], roots[p * root_step]);
        even[p] = lo;
        odd[p] = hi;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::num::Complex64;
    use crate::twiddle::roots_of_unity;

    #[test]
    fn two_point() {
        let roots = roots_of_unity::<f64>(2);
        let out = transform(
            FftDirection::Forward,
            &[Complex64::new(1.0, 0.0), Complex64::new(2.0, 0.0)],
            &roots,
        );
        assert_eq!(out, [Complex64::new(3.0, 0.0), Complex64::new(-1.0, 0.0)]);
    }

    #[test]
    fn impulse_gives_flat_spectrum() {
        let mut x = vec![Complex64::zero(); 16];
        x[0] = Complex64::new(1.0, 0.0);
        let out = transform(FftDirection::Forward, &x, &roots_of_unity(16));
        for c in out {
            assert!((c.re - 1.0).abs() < 1e-12 && c.im.abs() < 1e-12);
        }
    }

    #[test]
    fn oversized_table_matches_exact_table() {
        let x: Vec<Complex64> = (0..8).map(|i| Complex64::new(i as f64, 0.5)).collect();
        let exact = transform(FftDirection::Forward, &x, &roots_of_unity(8));
        let big = transform(FftDirection::Forward, &x, &roots_of_unity(64));
        for (a, b) in exact.iter().zip(big.iter()) {
            assert!((a.re - b.re).abs() < 1e-12 && (a.im - b.im).abs() < 1e-12);
        }
    }

    #[test]
    fn inverse_is_unscaled() {
        let x = [
            Complex64::new(1.0, 0.0),
            Complex64::new(-2.0, 0.0),
            Complex64::new(0.5, 0.0),
            Complex64::new(4.0, 0.0),
        ];
        let roots = roots_of_unity::<f64>(4);
        let spectrum = transform(FftDirection::Forward, &x, &roots);
        let back = transform(FftDirection::Inverse, &spectrum, &roots);
        for (b, orig) in back.iter().zip(x.iter()) {
            assert!((b.re - 4.0 * orig.re).abs() < 1e-12);
            assert!(b.im.abs() < 1e-12);
        }
    }

    #[test]
    #[should_panic(expected = "does not serve")]
    fn short_table_panics() {
        let x = vec![Complex64::zero(); 8];
        transform(FftDirection::Forward, &x, &roots_of_unity::<f64>(4));
    }
}
