use alloc::vec::Vec;

// Float operations the engines and the comparison need (no_std, math through libm)
pub trait Float:
    Copy
    + Clone
    + PartialEq
    + PartialOrd
    + core::fmt::Debug
    + core::ops::Add<Output = Self>
    + core::ops::Sub<Output = Self>
    + core::ops::Mul<Output = Self>
    + core::ops::Div<Output = Self>
    + core::ops::Neg<Output = Self>
    + 'static
{
    fn zero() -> Self;
    /// Narrowing conversion for values computed in double precision.
    fn from_f64(x: f64) -> Self;
    fn to_f64(self) -> f64;
    fn sin_cos(self) -> (Self, Self);
    fn sqrt(self) -> Self;
    fn abs(self) -> Self;
    /// Machine epsilon of the type.
    fn epsilon() -> Self;
}

impl Float for f32 {
    fn zero() -> Self {
        0.0
    }
    fn from_f64(x: f64) -> Self {
        x as f32
    }
    fn to_f64(self) -> f64 {
        self as f64
    }
    fn sin_cos(self) -> (Self, Self) {
        libm::sincosf(self)
    }
    fn sqrt(self) -> Self {
        libm::sqrtf(self)
    }
    fn abs(self) -> Self {
        libm::fabsf(self)
    }
    fn epsilon() -> Self {
        f32::EPSILON
    }
}

impl Float for f64 {
    fn zero() -> Self {
        0.0
    }
    fn from_f64(x: f64) -> Self {
        x
    }
    fn to_f64(self) -> f64 {
        self
    }
    fn sin_cos(self) -> (Self, Self) {
        libm::sincos(self)
    }
    fn sqrt(self) -> Self {
        libm::sqrt(self)
    }
    fn abs(self) -> Self {
        libm::fabs(self)
    }
    fn epsilon() -> Self {
        f64::EPSILON
    }
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Complex<T: Float> {
    pub re: T,
    pub im: T,
}

impl<T: Float> Complex<T> {
    pub fn new(re: T, im: T) -> Self {
        Self { re, im }
    }
    pub fn zero() -> Self {
        Self {
            re: T::zero(),
            im: T::zero(),
        }
    }
    /// Complex number with the given real part and a zero imaginary part.
    pub fn from_real(re: T) -> Self {
        Self { re, im: T::zero() }
    }
    /// Unit-magnitude number at angle `theta`.
    #[inline(always)]
    pub fn expi(theta: T) -> Self {
        let (sin, cos) = theta.sin_cos();
        Self { re: cos, im: sin }
    }
    #[allow(clippy::should_implement_trait)]
    #[inline(always)]
    pub fn add(self, other: Self) -> Self {
        Self {
            re: self.re + other.re,
            im: self.im + other.im,
        }
    }
    #[allow(clippy::should_implement_trait)]
    #[inline(always)]
    pub fn sub(self, other: Self) -> Self {
        Self {
            re: self.re - other.re,
            im: self.im - other.im,
        }
    }
    #[allow(clippy::should_implement_trait)]
    #[inline(always)]
    pub fn mul(self, other: Self) -> Self {
        Self {
            re: self.re * other.re - self.im * other.im,
            im: self.re * other.im + self.im * other.re,
        }
    }
    #[inline(always)]
    pub fn conj(self) -> Self {
        Self {
            re: self.re,
            im: -self.im,
        }
    }
    /// Squared magnitude.
    #[inline(always)]
    pub fn norm_sqr(self) -> T {
        self.re * self.re + self.im * self.im
    }
    /// Magnitude (modulus).
    #[inline(always)]
    pub fn abs(self) -> T {
        self.norm_sqr().sqrt()
    }
}

pub type Complex32 = Complex<f32>;
pub type Complex64 = Complex<f64>;

/// Lift a real signal into the complex domain.
pub fn complexify<T: Float>(signal: &[T]) -> Vec<Complex<T>> {
    signal.iter().map(|&x| Complex::from_real(x)).collect()
}

/// Convert a buffer laid out as `[re_0 .. re_n, im_0 .. im_n]` into
/// interleaved complex values.
///
/// Split-buffer kernels write their real and imaginary results into the two
/// halves of one allocation; this undoes that layout.
///
/// # Panics
/// Panics if `split.len()` is odd.
pub fn unseparate<T: Float>(split: &[T]) -> Vec<Complex<T>> {
    assert!(
        split.len() % 2 == 0,
        "split buffer length {} is not even",
        split.len()
    );
    let (re, im) = split.split_at(split.len() / 2);
    re.iter().zip(im).map(|(&re, &im)| Complex::new(re, im)).collect()
}

/// Inverse of [`unseparate`]: all real parts followed by all imaginary parts.
pub fn separate<T: Float>(input: &[Complex<T>]) -> Vec<T> {
    input
        .iter()
        .map(|c| c.re)
        .chain(input.iter().map(|c| c.im))
        .collect()
}
