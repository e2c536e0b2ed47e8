//! Naive O(N²) discrete Fourier transform.
//!
//! Any length is accepted. Sums are accumulated in double precision, which
//! makes this a slow but independent oracle for the fast engines.

use alloc::vec::Vec;

use crate::num::{Complex, Float};

fn naive<T: Float>(input: &[Complex<T>], sign: f64) -> Vec<Complex<T>> {
    let n = input.len();
    let mut output = Vec::with_capacity(n);
    for k in 0..n {
        let mut re = 0.0f64;
        let mut im = 0.0f64;
        for (t, x) in input.iter().enumerate() {
            // Reduce k*t modulo n so the angle stays small for long inputs.
            let phase = ((k * t) % n) as f64;
            let angle = sign * 2.0 * core::f64::consts::PI * phase / n as f64;
            let (s, c) = libm::sincos(angle);
            let xr = x.re.to_f64();
            let xi = x.im.to_f64();
            re += xr * c - xi * s;
            im += xr * s + xi * c;
        }
        output.push(Complex::new(T::from_f64(re), T::from_f64(im)));
    }
    output
}

/// Forward DFT: `X[k] = Σ x[t]·exp(-2πi·k·t/N)`.
pub fn dft<T: Float>(input: &[Complex<T>]) -> Vec<Complex<T>> {
    naive(input, -1.0)
}

/// Unscaled inverse DFT: `x[t] = Σ X[k]·exp(+2πi·k·t/N)`.
pub fn idft<T: Float>(input: &[Complex<T>]) -> Vec<Complex<T>> {
    naive(input, 1.0)
}
