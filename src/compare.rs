//! Approximate equality and equal-range scanning.
//!
//! Butterfly rounding error grows with the number of levels, so results are
//! compared with a relative, symmetric tolerance rather than `==`.

use alloc::vec::Vec;
use core::ops::Range;

use crate::num::{Complex, Float};

#[inline]
fn relative_close(magnitude_a: f64, magnitude_b: f64, difference: f64, epsilon: f64) -> bool {
    let range = magnitude_a + magnitude_b;
    if range == 0.0 {
        return true;
    }
    difference / range <= epsilon
}

/// Relative closeness: `|a - b| / (|a| + |b|) <= epsilon`, with two zeros
/// always close.
pub trait ApproxEq {
    fn close_to(&self, other: &Self, epsilon: f64) -> bool;
}

impl ApproxEq for f32 {
    fn close_to(&self, other: &Self, epsilon: f64) -> bool {
        (*self as f64).close_to(&(*other as f64), epsilon)
    }
}

impl ApproxEq for f64 {
    fn close_to(&self, other: &Self, epsilon: f64) -> bool {
        relative_close(libm::fabs(*self), libm::fabs(*other), libm::fabs(self - other), epsilon)
    }
}

// Magnitudes are moduli, so a bin whose imaginary part should be zero is not
// judged on that component alone.
impl<T: Float> ApproxEq for Complex<T> {
    fn close_to(&self, other: &Self, epsilon: f64) -> bool {
        let (ar, ai) = (self.re.to_f64(), self.im.to_f64());
        let (br, bi) = (other.re.to_f64(), other.im.to_f64());
        relative_close(
            libm::hypot(ar, ai),
            libm::hypot(br, bi),
            libm::hypot(ar - br, ai - bi),
            epsilon,
        )
    }
}

/// Free-function form of [`ApproxEq::close_to`].
#[inline]
pub fn close<T: ApproxEq>(a: &T, b: &T, epsilon: f64) -> bool {
    a.close_to(b, epsilon)
}

/// Half-open run `[start, end)` of positions that all match or all differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchRange {
    pub start: usize,
    pub end: usize,
    pub is_match: bool,
}

impl MatchRange {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Number of positions shared with `[start, end)`.
    pub fn overlap(&self, start: usize, end: usize) -> usize {
        let lo = self.start.max(start);
        let hi = self.end.min(end);
        hi.saturating_sub(lo)
    }
}

/// Partition `[0, N)` into maximal runs of matching and mismatching positions.
///
/// The result is ordered, gapless and alternates between matching and
/// mismatching runs. It is empty when both inputs are empty.
///
/// # Panics
/// Panics if `a` and `b` differ in length.
pub fn equal_ranges<T: ApproxEq>(a: &[T], b: &[T], epsilon: f64) -> Vec<MatchRange> {
    assert_eq!(
        a.len(),
        b.len(),
        "cannot scan sequences of different lengths"
    );
    let mut ranges: Vec<MatchRange> = Vec::new();
    for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
        let is_match = x.close_to(y, epsilon);
        match ranges.last_mut() {
            Some(open) if open.is_match == is_match => open.end = i + 1,
            _ => ranges.push(MatchRange {
                start: i,
                end: i + 1,
                is_match,
            }),
        }
    }
    ranges
}

/// `true` when a scan found nothing to report: no ranges, or one matching run.
pub fn ranges_all_match(ranges: &[MatchRange]) -> bool {
    match ranges {
        [] => true,
        [only] => only.is_match,
        _ => false,
    }
}

/// Cheap pass/fail comparison of two equal-length sequences.
///
/// # Panics
/// Panics if `a` and `b` differ in length.
pub fn sequences_equal<T: ApproxEq>(a: &[T], b: &[T], epsilon: f64) -> bool {
    ranges_all_match(&equal_ranges(a, b, epsilon))
}


#[cfg(all(feature = "internal-tests", test))]
mod coverage_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_close_symmetric(a in -1e6f64..1e6, b in -1e6f64..1e6, eps in 0.0f64..1.0) {
            prop_assert_eq!(close(&a, &b, eps), close(&b, &a, eps));
        }

        #[test]
        fn prop_ranges_cover_input(ref pairs in proptest::collection::vec((0i8..3, 0i8..3), 0..64)) {
            let a: Vec<f64> = pairs.iter().map(|p| p.0 as f64).collect();
            let b: Vec<f64> = pairs.iter().map(|p| p.1 as f64).collect();
            let ranges = equal_ranges(&a, &b, 1e-9);
            let covered: usize = ranges.iter().map(MatchRange::len).sum();
            prop_assert_eq!(covered, a.len());
            for r in &ranges {
                for i in r.range() {
                    prop_assert_eq!(close(&a[i], &b[i], 1e-9), r.is_match);
                }
            }
        }
    }
}
