use clap::{Parser, ValueEnum};
use fftcheck::fft::FftStrategy;
use fftcheck::verify::{Harness, VerifyConfig};
use sanity_check::{all_passed, run, signals, summarize, write_report, ProducerKind};
use std::error::Error;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Model {
    Recursive,
    Iterative,
    Stockham,
}

impl From<Model> for FftStrategy {
    fn from(m: Model) -> Self {
        match m {
            Model::Recursive => FftStrategy::Recursive,
            Model::Iterative => FftStrategy::Iterative,
            Model::Stockham => FftStrategy::Stockham,
        }
    }
}

/// Verify an FFT producer against the host reference for sizes 2 .. 2^max-log2.
#[derive(Parser)]
struct Args {
    /// Largest size, as a power of two
    #[arg(long, default_value_t = 12, value_parser = clap::value_parser!(u32).range(1..=24))]
    max_log2: u32,

    /// Relative tolerance
    #[arg(long, default_value_t = 1e-3)]
    epsilon: f64,

    /// Shortest run used to explain a mismatch
    #[arg(long, default_value_t = 4)]
    min_run: usize,

    /// Producer under test
    #[arg(long, value_enum, default_value_t = ProducerKind::Iterative)]
    producer: ProducerKind,

    /// Rotation applied by the `shifted` producer
    #[arg(long, default_value_t = 1)]
    shift: usize,

    /// Seed for input signals and corruption
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Host model cross-checked against the recursive reference
    #[arg(long, value_enum, default_value_t = Model::Iterative)]
    model: Model,

    /// Skip the host model consistency check
    #[arg(long)]
    no_consistency: bool,

    /// Write every failure report to this file
    #[arg(long)]
    report: Option<PathBuf>,

    /// Verify sizes on a Rayon pool
    #[arg(long)]
    parallel: bool,
}

fn main() -> Result<ExitCode, Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let harness = Harness::new(VerifyConfig {
        epsilon: args.epsilon,
        min_correspondence_len: args.min_run,
        strategy: args.model.into(),
        check_consistency: !args.no_consistency,
    });
    let inputs = signals(args.max_log2, args.seed);
    let outcomes = run(
        &harness,
        args.producer,
        args.shift,
        args.seed,
        &inputs,
        args.parallel,
    )?;

    summarize(&mut io::stdout().lock(), &inputs, &outcomes)?;
    if let Some(path) = &args.report {
        write_report(path, &inputs, &outcomes)?;
        log::info!("report written to {}", path.display());
    }

    if all_passed(&outcomes) {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
