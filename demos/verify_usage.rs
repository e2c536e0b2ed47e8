//! Verifies a stand-in "kernel" against the host reference and prints the
//! diagnosis for a spectrum whose upper half was written one slot late.
use fftcheck::num::Complex32;
use fftcheck::verify::{Harness, Verdict, VerifyConfig};
use fftcheck::{new_engine, FftStrategy};

fn main() {
    let signal: Vec<f32> = (0..64).map(|i| ((i * 7) % 13) as f32 / 13.0).collect();
    let harness = Harness::new(VerifyConfig::default());

    let model = new_engine::<f32>(FftStrategy::Stockham);
    let mut kernel = |input: &[f32]| -> Result<Vec<Complex32>, String> {
        let mut out = model.forward_signal(input);
        out[32..].rotate_right(1);
        Ok(out)
    };

    match harness.run(&mut kernel, &signal) {
        Ok(Verdict::Pass) => println!("kernel output matches"),
        Ok(Verdict::Fail(report)) => print!("{}", report),
        Err(e) => eprintln!("verification aborted: {}", e),
    }
}
