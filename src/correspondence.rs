//! Approximate alignment of two sequences.
//!
//! When a produced spectrum is shifted, has a garbled window, or was written
//! out of order, an index-aligned scan only says "everything after `k` is
//! wrong". [`correspondences`] instead finds runs of `A` that reappear in `B`
//! at some offset, so a diagnosis can tell a shift from real corruption.
//!
//! The scan is greedy over `A`, claims each `B` position at most once, and
//! discards runs shorter than `min_length`: the discarded run's `B` positions
//! are released and the scan restarts at the run's first `A` position,
//! searching `B` strictly after where the discarded run began.

use alloc::vec::Vec;
use core::fmt;
use core::ops::Range;

use hashbrown::HashSet;

use crate::compare::ApproxEq;

/// A run where `a[index_in_a + k]` is close to `b[index_in_b + k]` for every
/// `k < len`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Correspondence {
    pub index_in_a: usize,
    pub index_in_b: usize,
    pub len: usize,
}

impl Correspondence {
    pub fn a_range(&self) -> Range<usize> {
        self.index_in_a..self.index_in_a + self.len
    }

    pub fn b_range(&self) -> Range<usize> {
        self.index_in_b..self.index_in_b + self.len
    }

    /// Offset of the run in `B` relative to `A`.
    pub fn shift(&self) -> isize {
        self.index_in_b as isize - self.index_in_a as isize
    }
}

impl fmt::Display for Correspondence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "a[{}..{}] ~ b[{}..{}] (shift {:+})",
            self.index_in_a,
            self.index_in_a + self.len,
            self.index_in_b,
            self.index_in_b + self.len,
            self.shift()
        )
    }
}

struct Matcher<'s, T> {
    a: &'s [T],
    b: &'s [T],
    min_length: usize,
    epsilon: f64,
    /// Next position of `A` to place.
    i: usize,
    /// Lowest `B` position the next search may return.
    floor: usize,
    claimed: HashSet<usize>,
    active: Option<Correspondence>,
    found: Vec<Correspondence>,
}

impl<'s, T: ApproxEq> Matcher<'s, T> {
    fn new(a: &'s [T], b: &'s [T], min_length: usize, epsilon: f64) -> Self {
        Self {
            a,
            b,
            min_length,
            epsilon,
            i: 0,
            floor: 0,
            claimed: HashSet::new(),
            active: None,
            found: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<Correspondence> {
        loop {
            if self.i == self.a.len() {
                match self.active.take() {
                    Some(run) => {
                        self.close(run);
                        continue;
                    }
                    None => break,
                }
            }
            if self.extend() {
                continue;
            }
            if let Some(run) = self.active.take() {
                if !self.close(run) {
                    continue;
                }
            }
            self.search();
        }
        self.found
    }

    /// Grow the active run by `A[i]` if the next `B` position fits.
    fn extend(&mut self) -> bool {
        let run = match self.active.as_mut() {
            Some(run) => run,
            None => return false,
        };
        let j = run.index_in_b + run.len;
        if j < self.b.len()
            && !self.claimed.contains(&j)
            && self.a[self.i].close_to(&self.b[j], self.epsilon)
        {
            self.claimed.insert(j);
            run.len += 1;
            self.i += 1;
            true
        } else {
            false
        }
    }

    /// Keep a finished run, or release it and rewind. Returns `true` if kept.
    fn close(&mut self, run: Correspondence) -> bool {
        if run.len >= self.min_length {
            self.found.push(run);
            return true;
        }
        for j in run.b_range() {
            self.claimed.remove(&j);
        }
        self.i = run.index_in_a;
        self.floor = run.index_in_b + 1;
        false
    }

    /// Open a run at the first unclaimed close `B` position, then advance.
    fn search(&mut self) {
        let target = &self.a[self.i];
        let hit = (self.floor..self.b.len())
            .find(|j| !self.claimed.contains(j) && target.close_to(&self.b[*j], self.epsilon));
        self.floor = 0;
        if let Some(j) = hit {
            self.claimed.insert(j);
            self.active = Some(Correspondence {
                index_in_a: self.i,
                index_in_b: j,
                len: 1,
            });
        }
        self.i += 1;
    }
}

/// Find runs of `a` that reappear, approximately, somewhere in `b`.
///
/// Results are ordered by position in `a` and their `b` intervals never
/// overlap. Runs shorter than `min_length` are not reported; `0` and `1` keep
/// every run. Worst case is `O(len(a) * len(b))` comparisons per pass.
///
/// ```
/// use fftcheck::correspondences;
///
/// let a = [1.0f64, 2.0, 3.0, 4.0, 5.0];
/// let b = [1.0f64, 2.0, 9.0, 4.0, 5.0];
/// let runs = correspondences(&a, &b, 1, 1e-9);
/// assert_eq!(runs.len(), 2);
/// assert_eq!((runs[1].index_in_a, runs[1].index_in_b, runs[1].len), (3, 3, 2));
/// ```
pub fn correspondences<T: ApproxEq>(
    a: &[T],
    b: &[T],
    min_length: usize,
    epsilon: f64,
) -> Vec<Correspondence> {
    let found = Matcher::new(a, b, min_length, epsilon).run();
    debug_log!(
        "matched {} runs covering {} of {} positions",
        found.len(),
        found.iter().map(|c| c.len).sum::<usize>(),
        a.len()
    );
    found
}


#[cfg(all(feature = "internal-tests", test))]
mod coverage_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_b_intervals_disjoint(
            ref a in proptest::collection::vec(0u8..4, 0..40),
            ref b in proptest::collection::vec(0u8..4, 0..40),
            min_length in 0usize..4,
        ) {
            let a: Vec<f64> = a.iter().map(|&x| x as f64).collect();
            let b: Vec<f64> = b.iter().map(|&x| x as f64).collect();
            let found = correspondences(&a, &b, min_length, 1e-9);
            let mut seen = HashSet::new();
            for c in &found {
                prop_assert!(c.len >= min_length.max(1));
                for (ia, ib) in c.a_range().zip(c.b_range()) {
                    prop_assert!(seen.insert(ib));
                    prop_assert!(a[ia].close_to(&b[ib], 1e-9));
                }
            }
            for w in found.windows(2) {
                prop_assert!(w[0].a_range().end <= w[1].index_in_a);
            }
        }
    }
}
