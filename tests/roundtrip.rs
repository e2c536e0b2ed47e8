// Test intent: forward then inverse transforms return the input.
use fftcheck::bitrev::bit_reverse_permutation;
use fftcheck::compare::ApproxEq;
use fftcheck::context::context_for_size;
use fftcheck::fft::{iterative, FftDirection};
use fftcheck::num::complexify;
use fftcheck::verify::{reference_forward_transform, reference_inverse_transform};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// Samples stay away from zero so a relative tolerance is meaningful.
fn signal(n: usize, seed: u64) -> Vec<f32> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| rng.gen_range(1.0f32..2.0)).collect()
}

#[test]
fn reference_roundtrip_all_sizes() {
    for e in 0..=12 {
        let n = 1usize << e;
        let x = signal(n, e as u64);
        let back = reference_inverse_transform(&reference_forward_transform(&x));
        assert_eq!(back.len(), n);
        for (i, (b, o)) in back.iter().zip(x.iter()).enumerate() {
            assert!(b.close_to(o, 1e-4), "size {} index {}: {} vs {}", n, i, b, o);
        }
    }
}

#[test]
fn iterative_roundtrip_through_bit_reversal() {
    for e in 1..=12 {
        let n = 1usize << e;
        let x = signal(n, 100 + e as u64);
        let ctx = context_for_size::<f32>(n);
        let spectrum = iterative::transform(
            FftDirection::Forward,
            &bit_reverse_permutation(&complexify(&x)),
            ctx.roots(),
            None,
        );
        let back = iterative::transform(
            FftDirection::Inverse,
            &bit_reverse_permutation(&spectrum),
            ctx.roots(),
            None,
        );
        let scale = 1.0 / n as f32;
        for (b, o) in back.iter().zip(x.iter()) {
            assert!((b.re * scale).close_to(o, 1e-4), "size {}: {} vs {}", n, b.re * scale, o);
        }
    }
}

#[test]
fn f64_roundtrip_is_tight() {
    let x: Vec<f64> = (0..1024).map(|i| (i as f64 * 0.01) - 5.0).collect();
    let back = reference_inverse_transform(&reference_forward_transform(&x));
    for (b, o) in back.iter().zip(x.iter()) {
        assert!((b - o).abs() < 1e-9);
    }
}
