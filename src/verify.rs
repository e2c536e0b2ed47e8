//! Verification harness.
//!
//! A [`Producer`] computes a forward transform somewhere this crate cannot
//! see (a GPU kernel, another library, a file on disk). The harness runs the
//! recursive reference on the same signal, optionally checks that the chosen
//! host model agrees with it, and compares the two results:
//!
//! 1. [`equal_ranges`] for a cheap index-aligned pass/fail;
//! 2. on failure, [`correspondences`] to find shifted runs;
//! 3. a [`Diagnosis`] per mismatching range saying how much of it the runs
//!    explain.
//!
//! A mismatch is reported as [`Verdict::Fail`], never as an error. Errors are
//! reserved for the producer failing or returning the wrong length.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::compare::{equal_ranges, ranges_all_match, MatchRange};
use crate::context::CachedFloat;
use crate::correspondence::{correspondences, Correspondence};
use crate::fft::{new_engine, FftEngine, FftStrategy, RecursiveFft};
use crate::num::{Complex, Float};

/// Something that turns a real signal into a complex spectrum of the same
/// length.
///
/// Closures `FnMut(&[T]) -> Result<Vec<Complex<T>>, E>` are producers.
pub trait Producer<T: Float> {
    type Error;
    fn produce(&mut self, input: &[T]) -> Result<Vec<Complex<T>>, Self::Error>;
}

impl<T, E, F> Producer<T> for F
where
    T: Float,
    F: FnMut(&[T]) -> Result<Vec<Complex<T>>, E>,
{
    type Error = E;
    fn produce(&mut self, input: &[T]) -> Result<Vec<Complex<T>>, E> {
        self(input)
    }
}

/// Producer backed by one of the in-crate engines.
///
/// Useful as a stand-in for a kernel while bringing up a driver, and as the
/// baseline a kernel's output is checked against.
pub struct EngineProducer<T: CachedFloat> {
    engine: Box<dyn FftEngine<T>>,
}

impl<T: CachedFloat> EngineProducer<T> {
    pub fn new(strategy: FftStrategy) -> Self {
        Self {
            engine: new_engine(strategy),
        }
    }

    pub fn from_engine(engine: Box<dyn FftEngine<T>>) -> Self {
        Self { engine }
    }
}

impl<T: CachedFloat> Producer<T> for EngineProducer<T> {
    type Error = core::convert::Infallible;
    fn produce(&mut self, input: &[T]) -> Result<Vec<Complex<T>>, Self::Error> {
        Ok(self.engine.forward_signal(input))
    }
}

/// Errors that abort a verification run.
#[derive(Debug)]
pub enum VerifyError<E> {
    /// The producer reported a failure.
    Producer(E),
    /// The producer returned a result of the wrong length.
    LengthMismatch { expected: usize, actual: usize },
    /// The host model disagrees with the recursive reference.
    InconsistentReference { report: FailureReport },
}

impl<E: fmt::Display> fmt::Display for VerifyError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerifyError::Producer(e) => write!(f, "producer failed: {}", e),
            VerifyError::LengthMismatch { expected, actual } => write!(
                f,
                "producer returned {} values, expected {}",
                actual, expected
            ),
            VerifyError::InconsistentReference { report } => {
                write!(f, "host model disagrees with reference: {}", report.summary())
            }
        }
    }
}

#[cfg(feature = "std")]
impl<E: std::error::Error + 'static> std::error::Error for VerifyError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            VerifyError::Producer(e) => Some(e),
            _ => None,
        }
    }
}

/// How one mismatching range is explained by shifted runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnosis {
    pub range: MatchRange,
    /// Correspondences whose `A` interval overlaps the range.
    pub explained_by: Vec<Correspondence>,
    /// Positions of the range covered by those correspondences.
    pub explained: usize,
    /// Positions no correspondence accounts for.
    pub unexplained: usize,
}

impl Diagnosis {
    /// Residual positions nothing explains.
    pub fn is_hard_failure(&self) -> bool {
        self.unexplained > 0
    }
}

/// Build one [`Diagnosis`] per mismatching range.
///
/// Correspondence `A` intervals are disjoint, so their overlaps add up.
pub fn diagnose(ranges: &[MatchRange], found: &[Correspondence]) -> Vec<Diagnosis> {
    ranges
        .iter()
        .filter(|r| !r.is_match)
        .map(|range| {
            let explained_by: Vec<Correspondence> = found
                .iter()
                .filter(|c| range.overlap(c.index_in_a, c.index_in_a + c.len) > 0)
                .copied()
                .collect();
            let explained = explained_by
                .iter()
                .map(|c| range.overlap(c.index_in_a, c.index_in_a + c.len))
                .sum::<usize>();
            Diagnosis {
                range: *range,
                explained_by,
                explained,
                unexplained: range.len() - explained,
            }
        })
        .collect()
}

/// Everything known about a failed comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureReport {
    pub ranges: Vec<MatchRange>,
    pub correspondences: Vec<Correspondence>,
    pub diagnoses: Vec<Diagnosis>,
}

impl FailureReport {
    pub fn new(ranges: Vec<MatchRange>, correspondences: Vec<Correspondence>) -> Self {
        let diagnoses = diagnose(&ranges, &correspondences);
        Self {
            ranges,
            correspondences,
            diagnoses,
        }
    }

    /// Number of compared positions.
    pub fn len(&self) -> usize {
        self.ranges.last().map_or(0, |r| r.end)
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Number of positions outside any matching range.
    pub fn mismatched(&self) -> usize {
        self.diagnoses.iter().map(|d| d.range.len()).sum()
    }

    /// Number of mismatching positions no shifted run explains.
    pub fn unexplained(&self) -> usize {
        self.diagnoses.iter().map(|d| d.unexplained).sum()
    }

    /// `true` when some mismatch is not a shift of correct data.
    pub fn is_hard_failure(&self) -> bool {
        self.diagnoses.iter().any(Diagnosis::is_hard_failure)
    }

    /// One-line summary.
    pub fn summary(&self) -> Summary<'_> {
        Summary(self)
    }
}

/// One-line [`Display`](fmt::Display) form of a [`FailureReport`].
pub struct Summary<'r>(&'r FailureReport);

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        write!(
            f,
            "{} of {} positions differ in {} range(s), {} unexplained",
            report.mismatched(),
            report.len(),
            report.diagnoses.len(),
            report.unexplained()
        )
    }
}

impl fmt::Display for FailureReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.summary())?;
        for d in &self.diagnoses {
            writeln!(
                f,
                "  mismatch [{}, {}): {} explained by {} run(s), {} unexplained",
                d.range.start,
                d.range.end,
                d.explained,
                d.explained_by.len(),
                d.unexplained
            )?;
            for c in &d.explained_by {
                writeln!(f, "    {}", c)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail(FailureReport),
}

impl Verdict {
    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Pass)
    }

    pub fn report(&self) -> Option<&FailureReport> {
        match self {
            Verdict::Pass => None,
            Verdict::Fail(report) => Some(report),
        }
    }
}

/// Forward transform of a natural-order real signal with the recursive
/// reference engine.
///
/// # Panics
/// Panics if the length is not a power of two.
pub fn reference_forward_transform<T: CachedFloat>(signal: &[T]) -> Vec<Complex<T>> {
    RecursiveFft.forward_signal(signal)
}

/// True inverse of [`reference_forward_transform`]: the unscaled inverse
/// divided by `N`, keeping only real parts.
///
/// # Panics
/// Panics if the length is not a power of two.
pub fn reference_inverse_transform<T: CachedFloat>(spectrum: &[Complex<T>]) -> Vec<T> {
    let scale = T::from_f64(1.0 / spectrum.len() as f64);
    RecursiveFft
        .inverse_spectrum(spectrum)
        .into_iter()
        .map(|c| c.re * scale)
        .collect()
}

/// Compare `a` (expected) with `b` (produced).
///
/// Runs of at least `min_length` elements are used to explain mismatches.
///
/// # Panics
/// Panics if `a` and `b` differ in length.
pub fn verify<T: Float>(
    a: &[Complex<T>],
    b: &[Complex<T>],
    epsilon: f64,
    min_length: usize,
) -> Verdict {
    let ranges = equal_ranges(a, b, epsilon);
    if ranges_all_match(&ranges) {
        return Verdict::Pass;
    }
    debug_log!(
        "{} ranges over {} values, searching for correspondences",
        ranges.len(),
        a.len()
    );
    let found = correspondences(a, b, min_length, epsilon);
    Verdict::Fail(FailureReport::new(ranges, found))
}

/// Tolerances and host model used by a [`Harness`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerifyConfig {
    /// Relative tolerance of the closeness predicate.
    pub epsilon: f64,
    /// Shortest run accepted as a correspondence.
    pub min_correspondence_len: usize,
    /// Host model checked against the reference.
    pub strategy: FftStrategy,
    /// Check the host model against the recursive reference before calling
    /// the producer.
    pub check_consistency: bool,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            epsilon: 1e-3,
            min_correspondence_len: 4,
            strategy: FftStrategy::Iterative,
            check_consistency: true,
        }
    }
}

/// Runs producers against the reference under a [`VerifyConfig`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Harness {
    config: VerifyConfig,
}

impl Harness {
    pub fn new(config: VerifyConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &VerifyConfig {
        &self.config
    }

    /// Reference spectrum of `signal`, cross-checked against the host model
    /// when the config asks for it.
    pub fn expected<T: CachedFloat>(&self, signal: &[T]) -> Result<Vec<Complex<T>>, FailureReport> {
        let reference = reference_forward_transform(signal);
        if self.config.check_consistency && self.config.strategy != FftStrategy::Recursive {
            let model = new_engine::<T>(self.config.strategy).forward_signal(signal);
            if let Verdict::Fail(report) = verify(
                &reference,
                &model,
                self.config.epsilon,
                self.config.min_correspondence_len,
            ) {
                return Err(report);
            }
            debug_log!(
                "{} model consistent with reference at size {}",
                self.config.strategy.name(),
                signal.len()
            );
        }
        Ok(reference)
    }

    /// Verify one producer call on `signal`.
    pub fn run<T, P>(&self, producer: &mut P, signal: &[T]) -> Result<Verdict, VerifyError<P::Error>>
    where
        T: CachedFloat,
        P: Producer<T> + ?Sized,
    {
        let n = signal.len();
        let expected = self
            .expected(signal)
            .map_err(|report| VerifyError::InconsistentReference { report })?;
        let produced = producer.produce(signal).map_err(VerifyError::Producer)?;
        if produced.len() != n {
            return Err(VerifyError::LengthMismatch {
                expected: n,
                actual: produced.len(),
            });
        }
        let verdict = verify(
            &expected,
            &produced,
            self.config.epsilon,
            self.config.min_correspondence_len,
        );
        match &verdict {
            Verdict::Pass => {
                info_log!(
                    "size {}: pass (epsilon {:e}, fft bound {:e})",
                    n,
                    self.config.epsilon,
                    crate::math::fft_epsilon::<T>(n)
                );
            }
            Verdict::Fail(report) => {
                info_log!(
                    "size {}: FAIL (epsilon {:e}, fft bound {:e}), {}",
                    n,
                    self.config.epsilon,
                    crate::math::fft_epsilon::<T>(n),
                    report.summary()
                );
            }
        }
        Ok(verdict)
    }

    /// Verify every signal in order with one producer.
    pub fn run_all<T, P>(
        &self,
        producer: &mut P,
        signals: &[Vec<T>],
    ) -> Vec<Result<Verdict, VerifyError<P::Error>>>
    where
        T: CachedFloat,
        P: Producer<T> + ?Sized,
    {
        signals.iter().map(|s| self.run(producer, s)).collect()
    }

    /// Verify every signal on the Rayon pool, one producer per task.
    ///
    /// Results are returned in input order. Each worker thread builds its
    /// own twiddle tables.
    #[cfg(feature = "parallel")]
    pub fn par_run_all<T, P, F>(
        &self,
        make_producer: F,
        signals: &[Vec<T>],
    ) -> Vec<Result<Verdict, VerifyError<P::Error>>>
    where
        T: CachedFloat + Send + Sync,
        P: Producer<T>,
        P::Error: Send,
        F: Fn() -> P + Sync,
    {
        use rayon::prelude::*;
        signals
            .par_iter()
            .map(|s| self.run(&mut make_producer(), s))
            .collect()
    }
}
