use clap::ValueEnum;
use fftcheck::fft::FftStrategy;
use fftcheck::math::fft_epsilon;
use fftcheck::num::Complex32;
use fftcheck::verify::{EngineProducer, Harness, Producer, Verdict, VerifyError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::convert::Infallible;
use std::error::Error;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// In-process stand-ins for a compute kernel.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProducerKind {
    /// Host model of the level-synchronous kernel.
    Iterative,
    /// Host model of the Stockham kernel.
    Stockham,
    /// Iterative output rotated right by `--shift` positions.
    Shifted,
    /// Iterative output with a window overwritten by noise.
    Corrupted,
}

/// Producer selected on the command line.
pub enum DemoProducer {
    Engine(EngineProducer<f32>),
    Shifted { shift: usize },
    Corrupted { seed: u64 },
}

impl DemoProducer {
    pub fn new(kind: ProducerKind, shift: usize, seed: u64) -> Self {
        match kind {
            ProducerKind::Iterative => Self::Engine(EngineProducer::new(FftStrategy::Iterative)),
            ProducerKind::Stockham => Self::Engine(EngineProducer::new(FftStrategy::Stockham)),
            ProducerKind::Shifted => Self::Shifted { shift },
            ProducerKind::Corrupted => Self::Corrupted { seed },
        }
    }
}

impl Producer<f32> for DemoProducer {
    type Error = Infallible;

    fn produce(&mut self, input: &[f32]) -> Result<Vec<Complex32>, Infallible> {
        match self {
            DemoProducer::Engine(engine) => engine.produce(input),
            DemoProducer::Shifted { shift } => {
                let mut out = EngineProducer::<f32>::new(FftStrategy::Iterative).produce(input)?;
                let len = out.len();
                out.rotate_right(*shift % len.max(1));
                Ok(out)
            }
            DemoProducer::Corrupted { seed } => {
                let mut out = EngineProducer::<f32>::new(FftStrategy::Iterative).produce(input)?;
                garble(&mut out, *seed);
                Ok(out)
            }
        }
    }
}

/// Overwrite `[n/4, n/4 + max(1, n/8))` with large random values.
///
/// The noise depends only on `seed` and the length, so sequential and
/// parallel runs corrupt the same positions the same way.
pub fn garble(spectrum: &mut [Complex32], seed: u64) {
    let n = spectrum.len();
    if n == 0 {
        return;
    }
    let mut rng = StdRng::seed_from_u64(seed ^ n as u64);
    let start = n / 4;
    let end = (start + (n / 8).max(1)).min(n);
    for c in &mut spectrum[start..end] {
        *c = Complex32::new(rng.gen_range(1e3..1e4), rng.gen_range(-1e4..-1e3));
    }
}

/// Seeded signals of length `2, 4, .., 2^max_log2` with samples in `[0, 1)`.
pub fn signals(max_log2: u32, seed: u64) -> Vec<Vec<f32>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (1..=max_log2)
        .map(|e| (0..1usize << e).map(|_| rng.gen::<f32>()).collect())
        .collect()
}

pub type Outcome = Result<Verdict, VerifyError<Infallible>>;

/// Verify every signal with a fresh producer of `kind`.
pub fn run(
    harness: &Harness,
    kind: ProducerKind,
    shift: usize,
    seed: u64,
    signals: &[Vec<f32>],
    parallel: bool,
) -> Result<Vec<Outcome>, Box<dyn Error>> {
    if parallel {
        return run_parallel(harness, kind, shift, seed, signals);
    }
    let mut producer = DemoProducer::new(kind, shift, seed);
    Ok(harness.run_all(&mut producer, signals))
}

#[cfg(feature = "parallel")]
fn run_parallel(
    harness: &Harness,
    kind: ProducerKind,
    shift: usize,
    seed: u64,
    signals: &[Vec<f32>],
) -> Result<Vec<Outcome>, Box<dyn Error>> {
    Ok(harness.par_run_all(|| DemoProducer::new(kind, shift, seed), signals))
}

#[cfg(not(feature = "parallel"))]
fn run_parallel(
    _harness: &Harness,
    _kind: ProducerKind,
    _shift: usize,
    _seed: u64,
    _signals: &[Vec<f32>],
) -> Result<Vec<Outcome>, Box<dyn Error>> {
    Err("--parallel requires building with the `parallel` feature".into())
}

/// `true` when every outcome is a pass.
pub fn all_passed(outcomes: &[Outcome]) -> bool {
    outcomes
        .iter()
        .all(|o| matches!(o, Ok(verdict) if verdict.is_pass()))
}

/// One line per size, with the single-precision error bound of that size
/// next to the verdict.
pub fn summarize<W: Write>(
    out: &mut W,
    signals: &[Vec<f32>],
    outcomes: &[Outcome],
) -> io::Result<()> {
    for (signal, outcome) in signals.iter().zip(outcomes) {
        let n = signal.len();
        write!(out, "size {:>7} (bound {:.1e}): ", n, fft_epsilon::<f32>(n))?;
        match outcome {
            Ok(Verdict::Pass) => writeln!(out, "pass")?,
            Ok(Verdict::Fail(report)) => writeln!(out, "FAIL {}", report.summary())?,
            Err(e) => writeln!(out, "error: {}", e)?,
        }
    }
    Ok(())
}

/// Write the full report of every failing size to `path`.
pub fn write_report(path: &Path, signals: &[Vec<f32>], outcomes: &[Outcome]) -> io::Result<()> {
    let mut file = File::create(path)?;
    for (signal, outcome) in signals.iter().zip(outcomes) {
        match outcome {
            Ok(Verdict::Fail(report)) => {
                writeln!(file, "== size {} ==", signal.len())?;
                write!(file, "{}", report)?;
            }
            Err(VerifyError::InconsistentReference { report }) => {
                writeln!(file, "== size {} (host model) ==", signal.len())?;
                write!(file, "{}", report)?;
            }
            _ => {}
        }
    }
    Ok(())
}
