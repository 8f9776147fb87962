//! Scalar types shared by every transform: the [`Float`] trait, the
//! [`Complex`] value type and the [`FftElement`] embedding used to feed real
//! or complex arrays into the drivers.
//!
//! Trigonometry goes through `libm` so the kernels stay usable without `std`.

// Minimal float trait for the generic kernels (no_std, libm-backed)
pub trait Float:
    Copy
    + Clone
    + PartialEq
    + PartialOrd
    + Default
    + Send
    + Sync
    + core::fmt::Debug
    + core::ops::Add<Output = Self>
    + core::ops::Sub<Output = Self>
    + core::ops::Mul<Output = Self>
    + core::ops::Div<Output = Self>
    + core::ops::Neg<Output = Self>
    + 'static
{
    fn zero() -> Self;
    fn one() -> Self;
    fn from_f64(x: f64) -> Self;
    /// Convert a length or index into the float type.
    /// Returns `None` if the value cannot be represented exactly.
    fn from_usize(x: usize) -> Option<Self>;
    fn sin_cos(self) -> (Self, Self);
    fn hypot(self, other: Self) -> Self;
    fn pi() -> Self;
}

impl Float for f32 {
    fn zero() -> Self {
        0.0
    }
    fn one() -> Self {
        1.0
    }
    fn from_f64(x: f64) -> Self {
        x as f32
    }
    fn from_usize(x: usize) -> Option<Self> {
        const MAX_EXACT: usize = 1usize << 24;
        if x <= MAX_EXACT {
            Some(x as f32)
        } else {
            None
        }
    }
    fn sin_cos(self) -> (Self, Self) {
        libm::sincosf(self)
    }
    fn hypot(self, other: Self) -> Self {
        libm::hypotf(self, other)
    }
    fn pi() -> Self {
        core::f32::consts::PI
    }
}

impl Float for f64 {
    fn zero() -> Self {
        0.0
    }
    fn one() -> Self {
        1.0
    }
    fn from_f64(x: f64) -> Self {
        x
    }
    fn from_usize(x: usize) -> Option<Self> {
        const MAX_EXACT: u64 = 1u64 << 53;
        if (x as u64) <= MAX_EXACT {
            Some(x as f64)
        } else {
            None
        }
    }
    fn sin_cos(self) -> (Self, Self) {
        libm::sincos(self)
    }
    fn hypot(self, other: Self) -> Self {
        libm::hypot(self, other)
    }
    fn pi() -> Self {
        core::f64::consts::PI
    }
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Default)]
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
    /// `e^{i·theta}`
    #[inline(always)]
    pub fn expi(theta: T) -> Self {
        let (sin, cos) = theta.sin_cos();
        Self { re: cos, im: sin }
    }
    #[inline(always)]
    pub fn conj(self) -> Self {
        Self {
            re: self.re,
            im: -self.im,
        }
    }
    /// Modulus `|z|`.
    #[inline]
    pub fn norm(self) -> T {
        self.re.hypot(self.im)
    }
    #[inline(always)]
    pub fn norm_sqr(self) -> T {
        self.re * self.re + self.im * self.im
    }
    #[inline(always)]
    pub fn scale(self, factor: T) -> Self {
        Self {
            re: self.re * factor,
            im: self.im * factor,
        }
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
}

impl<T: Float> core::ops::Neg for Complex<T> {
    type Output = Self;
    #[inline(always)]
    fn neg(self) -> Self {
        Self {
            re: -self.re,
            im: -self.im,
        }
    }
}

impl<T: Float> core::ops::Add for Complex<T> {
    type Output = Self;
    #[inline(always)]
    fn add(self, other: Self) -> Self {
        Complex::<T>::add(self, other)
    }
}

impl<T: Float> core::ops::Sub for Complex<T> {
    type Output = Self;
    #[inline(always)]
    fn sub(self, other: Self) -> Self {
        Complex::<T>::sub(self, other)
    }
}

impl<T: Float> core::ops::Mul for Complex<T> {
    type Output = Self;
    #[inline(always)]
    fn mul(self, other: Self) -> Self {
        Complex::<T>::mul(self, other)
    }
}

impl<T: Float> core::ops::Mul<T> for Complex<T> {
    type Output = Self;
    #[inline(always)]
    fn mul(self, factor: T) -> Self {
        self.scale(factor)
    }
}

impl<T: Float> core::ops::AddAssign for Complex<T> {
    #[inline(always)]
    fn add_assign(&mut self, other: Self) {
        *self = Complex::<T>::add(*self, other);
    }
}

impl<T: Float> From<T> for Complex<T> {
    fn from(re: T) -> Self {
        Self { re, im: T::zero() }
    }
}

pub type Complex32 = Complex<f32>;
pub type Complex64 = Complex<f64>;

/// Array element a driver can transform.
///
/// Real elements embed as `x + 0i`; complex elements pass through. The
/// embedding happens once per element while lines are gathered, the source
/// array is never written.
pub trait FftElement: Copy + Send + Sync + 'static {
    type Real: Float;
    fn to_complex(self) -> Complex<Self::Real>;
}

impl FftElement for f32 {
    type Real = f32;
    #[inline(always)]
    fn to_complex(self) -> Complex32 {
        Complex32::new(self, 0.0)
    }
}

impl FftElement for f64 {
    type Real = f64;
    #[inline(always)]
    fn to_complex(self) -> Complex64 {
        Complex64::new(self, 0.0)
    }
}

impl<T: Float> FftElement for Complex<T> {
    type Real = T;
    #[inline(always)]
    fn to_complex(self) -> Complex<T> {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complex_operations() {
        let a = Complex64::new(1.0, -2.0);
        let b = Complex64::new(3.0, 4.0);
        let c = a * b;
        assert!((c.re - (1.0 * 3.0 - (-2.0) * 4.0)).abs() < 1e-12);
        assert!((c.im - (1.0 * 4.0 + (-2.0) * 3.0)).abs() < 1e-12);
        let n = -a;
        assert_eq!(n.re, -1.0);
        assert_eq!(n.im, 2.0);
        assert_eq!(a + b, Complex64::new(4.0, 2.0));
        assert_eq!(a - b, Complex64::new(-2.0, -6.0));
    }

    #[test]
    fn test_conj_and_norm() {
        let z = Complex64::new(3.0, -4.0);
        assert_eq!(z.conj(), Complex64::new(3.0, 4.0));
        assert!((z.norm() - 5.0).abs() < 1e-12);
        assert!((z.norm_sqr() - 25.0).abs() < 1e-12);
        let p = z * z.conj();
        assert!((p.re - 25.0).abs() < 1e-12);
        assert!(p.im.abs() < 1e-12);
    }

    #[test]
    fn test_expi_quarter_turn() {
        let e = Complex64::expi(<f64 as Float>::pi() / 2.0);
        assert!(e.re.abs() < 1e-12);
        assert!((e.im - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_from_usize_bounds() {
        assert_eq!(<f32 as Float>::from_usize(1 << 24), Some(16_777_216.0));
        assert_eq!(<f32 as Float>::from_usize((1 << 24) + 1), None);
        assert_eq!(<f64 as Float>::from_usize(1024), Some(1024.0));
    }

    #[test]
    fn test_embedding() {
        assert_eq!(2.5f64.to_complex(), Complex64::new(2.5, 0.0));
        assert_eq!(1.5f32.to_complex(), Complex32::new(1.5, 0.0));
        let z = Complex64::new(1.0, -1.0);
        assert_eq!(z.to_complex(), z);
    }
}
