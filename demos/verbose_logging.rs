//! Demonstrates enabling verbose logging for fftcheck.
use fftcheck::verify::{EngineProducer, Harness};
use fftcheck::FftStrategy;

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .init();

    let harness = Harness::default();
    let mut producer = EngineProducer::<f32>::new(FftStrategy::Stockham);
    for e in 1..=4 {
        let signal: Vec<f32> = (0..1usize << e).map(|i| i as f32 + 1.0).collect();
        harness.run(&mut producer, &signal).unwrap();
    }
}
