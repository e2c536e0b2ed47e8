// Test intent: every engine computes the same transform as the reference.
use fftcheck::bitrev::bit_reverse_permutation;
use fftcheck::compare::{sequences_equal, ApproxEq};
use fftcheck::context::context_for_size;
use fftcheck::dft::dft;
use fftcheck::fft::{
    iterative, levels, new_engine_with_max_level, recursive, stockham, FftDirection, FftEngine,
    FftStrategy, InputOrder, IterativeFft, RecursiveFft, StockhamFft,
};
use fftcheck::num::{complexify, Complex32};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn input(n: usize, seed: u64) -> Vec<Complex32> {
    let mut rng = StdRng::seed_from_u64(seed);
    let x: Vec<f32> = (0..n).map(|_| rng.gen_range(-1.0f32..1.0)).collect();
    complexify(&x)
}

#[test]
fn recursive_matches_iterative_on_bit_reversed_input() {
    for e in 1..=14 {
        let n = 1usize << e;
        let x = input(n, e as u64);
        let ctx = context_for_size::<f32>(n);
        let r = recursive::transform(FftDirection::Forward, &x, ctx.roots());
        let i = iterative::transform(
            FftDirection::Forward,
            &bit_reverse_permutation(&x),
            ctx.roots(),
            None,
        );
        assert!(sequences_equal(&r, &i, 1e-3), "size {}", n);
        assert_eq!(r, i, "size {}", n);
    }
}

#[test]
fn stockham_matches_recursive() {
    for e in 1..=12 {
        let n = 1usize << e;
        let x = input(n, 50 + e as u64);
        let ctx = context_for_size::<f32>(n);
        let r = recursive::transform(FftDirection::Forward, &x, ctx.roots());
        let s = stockham::transform(FftDirection::Forward, &x, ctx.roots(), None);
        assert!(sequences_equal(&r, &s, 1e-3), "size {}", n);
    }
}

#[test]
fn engines_declare_their_input_order() {
    assert_eq!(FftEngine::<f32>::input_order(&RecursiveFft), InputOrder::Natural);
    assert_eq!(FftEngine::<f32>::input_order(&IterativeFft::default()), InputOrder::BitReversed);
    assert_eq!(FftEngine::<f32>::input_order(&StockhamFft::default()), InputOrder::Natural);
}

#[test]
fn eight_point_example_matches_dft() {
    let signal = [2.5f32, 9.0, -3.0, 5.0, 10.0, 4.0, 1.0, 7.0];
    let natural = complexify(&signal);
    let permuted = bit_reverse_permutation(&natural);
    assert_eq!(permuted[1], natural[4]);
    assert_eq!(permuted[3], natural[6]);
    assert_eq!(permuted[4], natural[1]);
    assert_eq!(permuted[6], natural[3]);

    let expected = dft(&natural);
    let ctx = context_for_size::<f32>(8);
    let iterative_out = iterative::transform(FftDirection::Forward, &permuted, ctx.roots(), None);
    let recursive_out = recursive::transform(FftDirection::Forward, &natural, ctx.roots());
    for k in 0..8 {
        assert!(iterative_out[k].close_to(&expected[k], 1e-4), "bin {}", k);
        assert!(recursive_out[k].close_to(&expected[k], 1e-4), "bin {}", k);
    }
}

#[test]
fn partial_levels_leave_later_levels_untouched() {
    let n = 64;
    let x = bit_reverse_permutation(&input(n, 9));
    let ctx = context_for_size::<f32>(n);
    let spans: Vec<usize> = levels(n).collect();
    assert_eq!(spans, vec![1, 2, 4, 8, 16, 32]);
    // Applying levels one at a time from a partial state equals a longer run.
    let mut previous = x.clone();
    for &span in &spans {
        let partial = iterative::transform(FftDirection::Forward, &x, ctx.roots(), Some(span));
        assert_ne!(partial, previous, "span {} changed nothing", span);
        previous = partial;
    }
    let full = iterative::transform(FftDirection::Forward, &x, ctx.roots(), None);
    assert_eq!(previous, full);
    let none = iterative::transform(FftDirection::Forward, &x, ctx.roots(), Some(0));
    assert_eq!(none, x);
}

#[test]
fn capped_engine_ignores_cap_for_recursive() {
    let x: Vec<f32> = (0..32).map(|i| i as f32).collect();
    let full = new_engine_with_max_level::<f32>(FftStrategy::Recursive, None).forward_signal(&x);
    let capped = new_engine_with_max_level::<f32>(FftStrategy::Recursive, Some(1)).forward_signal(&x);
    assert_eq!(full, capped);
    let partial = new_engine_with_max_level::<f32>(FftStrategy::Stockham, Some(1)).forward_signal(&x);
    assert_ne!(full, partial);
}

#[test]
#[should_panic(expected = "power of two")]
fn non_power_of_two_panics() {
    let x = input(12, 0);
    let ctx = context_for_size::<f32>(16);
    recursive::transform(FftDirection::Forward, &x, ctx.roots());
}
