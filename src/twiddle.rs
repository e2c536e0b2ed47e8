use alloc::vec::Vec;

use crate::num::{Complex, Float};

/// Root of unity `exp(-2πi * index / size)` in the working precision `T`.
///
/// The angle is formed in double precision so large tables do not pick up
/// phase error from a single-precision π, then narrowed before `sin_cos`.
#[inline]
pub fn root_of_unity<T: Float>(index: usize, size: usize) -> Complex<T> {
    let angle = -2.0 * core::f64::consts::PI * index as f64 / size as f64;
    Complex::expi(T::from_f64(angle))
}

/// The first `n / 2` roots of unity for a size-`n` transform.
///
/// Entry `i` is [`root_of_unity(i, n)`](root_of_unity). This is the table
/// every butterfly level indexes into with a level-dependent stride.
pub fn roots_of_unity<T: Float>(n: usize) -> Vec<Complex<T>> {
    let half = n / 2;
    let mut table = Vec::with_capacity(half);
    for i in 0..half {
        table.push(root_of_unity(i, n));
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_half_size_entries() {
        assert_eq!(roots_of_unity::<f32>(1).len(), 0);
        assert_eq!(roots_of_unity::<f32>(2).len(), 1);
        assert_eq!(roots_of_unity::<f32>(1024).len(), 512);
    }

    #[test]
    fn first_root_is_one() {
        let t = roots_of_unity::<f64>(16);
        assert_eq!(t[0].re, 1.0);
        assert_eq!(t[0].im, 0.0);
    }

    #[test]
    fn quarter_turn_is_minus_i() {
        let t = roots_of_unity::<f64>(8);
        assert!(t[2].re.abs() < 1e-15);
        assert!((t[2].im + 1.0).abs() < 1e-15);
        let s = core::f64::consts::FRAC_1_SQRT_2;
        assert!((t[1].re - s).abs() < 1e-15);
        assert!((t[1].im + s).abs() < 1e-15);
    }

    #[test]
    fn roots_are_unit_magnitude_in_f32() {
        for w in roots_of_unity::<f32>(4096) {
            assert!((w.abs() - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn halving_size_is_stride_two() {
        let big = roots_of_unity::<f64>(64);
        let small = roots_of_unity::<f64>(32);
        for (i, w) in small.iter().enumerate() {
            assert!((w.re - big[2 * i].re).abs() < 1e-14);
            assert!((w.im - big[2 * i].im).abs() < 1e-14);
        }
    }
}
