//! Level-synchronous transform on bit-reversed input.
//!
//! Each level `i = 1, 2, 4, ..` combines pairs `i` apart inside blocks of
//! `2i`. This is the loop a one-thread-per-butterfly kernel runs between
//! barriers, so stopping after a given level reproduces a partially executed
//! kernel.

use alloc::vec::Vec;

use super::{butterfly, oriented, table_stride, FftDirection};
use crate::num::{Complex, Float};

/// Transform bit-reversed `input` using `roots`.
///
/// Levels whose span `i` satisfies `i <= max_level` are applied (all of them
/// when `max_level` is `None`); `Some(0)` returns the oriented input
/// untouched. For the inverse direction the input is conjugated before the
/// first level and the result is not scaled.
///
/// The cap is inclusive: `Some(4)` runs spans 1, 2 and 4. A kernel driver
/// that loops `while span < max_level` stops one level earlier, so compare
/// its intermediate state against `Some(max_level / 2)`.
///
/// # Panics
/// Panics if the length is not a power of two or the table does not serve it.
pub fn transform<T: Float>(
    direction: FftDirection,
    input: &[Complex<T>],
    roots: &[Complex<T>],
    max_level: Option<usize>,
) -> Vec<Complex<T>> {
    let n = input.len();
    let stride = table_stride(n, roots.len());
    let mut data = oriented(direction, input);
    let last = max_level.map_or(n, |m| m.min(n));

    let mut span = 1;
    while span < n && span <= last {
        let root_step = (n / (2 * span)) * stride;
        for block in (0..n).step_by(2 * span) {
            for l in 0..span {
                let (lo, hi) = butterfly(data[block + l], data[block + l + span], roots[l * root_step]);
                data[block + l] = lo;
                data[block + l + span] = hi;
            }
        }
        span <<= 1;
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitrev::bit_reverse_permutation;
    use crate::num::Complex64;
    use crate::twiddle::roots_of_unity;
    use alloc::vec;

    fn ramp(n: usize) -> Vec<Complex64> {
        (0..n).map(|i| Complex64::new(i as f64 + 1.0, 0.0)).collect()
    }

    #[test]
    fn level_zero_is_passthrough() {
        let x = ramp(8);
        let out = transform(FftDirection::Forward, &x, &roots_of_unity(8), Some(0));
        assert_eq!(out, x);
    }

    #[test]
    fn first_level_is_pairwise_sum_and_difference() {
        let x = ramp(4);
        let out = transform(FftDirection::Forward, &x, &roots_of_unity(4), Some(1));
        assert_eq!(
            out,
            vec![
                Complex64::new(3.0, 0.0),
                Complex64::new(-1.0, 0.0),
                Complex64::new(7.0, 0.0),
                Complex64::new(-1.0, 0.0),
            ]
        );
    }

    #[test]
    fn level_between_spans_rounds_down() {
        let x = ramp(16);
        let roots = roots_of_unity(16);
        let three = transform(FftDirection::Forward, &x, &roots, Some(3));
        let two = transform(FftDirection::Forward, &x, &roots, Some(2));
        assert_eq!(three, two);
    }

    #[test]
    fn cap_includes_its_own_span() {
        let x = ramp(16);
        let roots = roots_of_unity(16);
        let four = transform(FftDirection::Forward, &x, &roots, Some(4));
        assert_eq!(four, transform(FftDirection::Forward, &x, &roots, Some(7)));
        assert_ne!(four, transform(FftDirection::Forward, &x, &roots, Some(2)));
    }

    #[test]
    fn full_run_matches_known_spectrum() {
        let x = bit_reverse_permutation(&ramp(4));
        let out = transform(FftDirection::Forward, &x, &roots_of_unity(4), None);
        let expected = [(10.0, 0.0), (-2.0, 2.0), (-2.0, 0.0), (-2.0, -2.0)];
        for (c, (re, im)) in out.iter().zip(expected.iter()) {
            assert!((c.re - re).abs() < 1e-12 && (c.im - im).abs() < 1e-12, "{:?}", c);
        }
    }

    #[test]
    fn inverse_conjugates_before_levels() {
        let x = vec![Complex64::new(1.0, 2.0), Complex64::new(3.0, -4.0)];
        let out = transform(FftDirection::Inverse, &x, &roots_of_unity(2), Some(0));
        assert_eq!(out, vec![Complex64::new(1.0, -2.0), Complex64::new(3.0, 4.0)]);
    }
}
