//! Raw 1D transform kernel.
//!
//! Power-of-two lengths run a radix-2 [Stockham autosort] pass; every other
//! length goes through [Bluestein's algorithm] over a power-of-two
//! convolution. [`FftPlanner`] caches plans by length. An [`FftPlan`] is
//! immutable and can be shared between threads, each caller brings its own
//! scratch buffer.
//!
//! Forward transforms are unnormalized; inverse transforms divide by `n`.
//!
//! [Stockham autosort]: https://en.wikipedia.org/wiki/Cooley%E2%80%93Tukey_FFT_algorithm
//! [Bluestein's algorithm]: https://en.wikipedia.org/wiki/Chirp_Z-transform#Bluestein's_algorithm

use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;
use hashbrown::HashMap;

pub use crate::num::{Complex, Complex32, Complex64, FftElement, Float};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FftError {
    /// A length, length list or other scalar argument is unusable.
    InvalidArgument { reason: &'static str },
    /// The array shape does not fit the requested operation.
    ShapeMismatch {
        shape: Vec<usize>,
        reason: &'static str,
    },
}

impl fmt::Display for FftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument { reason } => write!(f, "invalid argument: {reason}"),
            Self::ShapeMismatch { shape, reason } => {
                write!(f, "shape mismatch for {shape:?}: {reason}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FftError {}

/// Transform direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// `e^{-2πi·jk/n}`, no scaling.
    Forward,
    /// `e^{+2πi·jk/n}`, scaled by `1/n`.
    Inverse,
}

/// Kernel a plan runs, chosen from the transform length alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FftStrategy {
    /// Lengths 0 and 1 are their own transform.
    Identity,
    /// Radix-2 Stockham autosort for powers of two.
    Stockham,
    /// Chirp-z convolution over a power-of-two Stockham transform, for every
    /// other length.
    Bluestein,
}

/// Convert a signed target length into a transform length.
///
/// Negative lengths signal [`FftError::InvalidArgument`].
pub fn target_len(n: isize) -> Result<usize, FftError> {
    usize::try_from(n).map_err(|_| FftError::InvalidArgument {
        reason: "target length must be non-negative",
    })
}

/// `e^{sign·2πi·numer/denom}` evaluated in `f64` before narrowing to `T`.
fn unit_root<T: Float>(numer: usize, denom: usize, inverse: bool) -> Complex<T> {
    let turn = numer as f64 / denom as f64;
    let sign = if inverse { 1.0 } else { -1.0 };
    let root = Complex::<f64>::expi(sign * 2.0 * f64::pi() * turn);
    Complex::new(T::from_f64(root.re), T::from_f64(root.im))
}

/// Reciprocal of a transform length, rejecting lengths the float type cannot hold.
fn inverse_len<T: Float>(n: usize) -> Result<T, FftError> {
    let len = T::from_usize(n).ok_or(FftError::InvalidArgument {
        reason: "transform length not representable in the float type",
    })?;
    Ok(T::one() / len)
}

/// Twiddle table of length `n/2` holding `exp(-2πi·k/n)`.
fn build_twiddles<T: Float>(n: usize) -> Vec<Complex<T>> {
    (0..n / 2).map(|k| unit_root(k, n, false)).collect()
}

/// Radix-2 Stockham pass. `scratch` must hold at least `data.len()` elements;
/// the result always ends up in `data`.
fn stockham<T: Float>(data: &mut [Complex<T>], scratch: &mut [Complex<T>], twiddles: &[Complex<T>]) {
    let n = data.len();
    let scratch = &mut scratch[..n];
    let mut in_data = true;
    let mut n1 = 1usize;
    let mut n2 = n;
    while n1 < n {
        n2 >>= 1;
        let (src, dst): (&[Complex<T>], &mut [Complex<T>]) = if in_data {
            (&*data, &mut *scratch)
        } else {
            (&*scratch, &mut *data)
        };
        for k in 0..n1 {
            // exp(-2πi·k/(2·n1)) == table[k·n2]
            let w = twiddles[k * n2];
            let base0 = 2 * k * n2;
            let base1 = base0 + n2;
            for j in 0..n2 {
                let u = src[base0 + j];
                let v = src[base1 + j].mul(w);
                dst[k * n2 + j] = u.add(v);
                dst[(k + n1) * n2 + j] = u.sub(v);
            }
        }
        in_data = !in_data;
        n1 <<= 1;
    }
    if !in_data {
        data.copy_from_slice(scratch);
    }
}

enum Kernel<T: Float> {
    Identity,
    Stockham {
        twiddles: Arc<[Complex<T>]>,
    },
    Bluestein {
        /// `exp(-πi·j²/n)` for `j < n`.
        chirp: Arc<[Complex<T>]>,
        /// Forward transform of the conjugate chirp, wrapped to length `m`.
        spectrum: Arc<[Complex<T>]>,
        /// Twiddles of the length-`m` convolution.
        twiddles: Arc<[Complex<T>]>,
    },
}

/// Precomputed transform of one fixed length.
pub struct FftPlan<T: Float> {
    n: usize,
    scale: T,
    kernel: Kernel<T>,
}

impl<T: Float> FftPlan<T> {
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn strategy(&self) -> FftStrategy {
        match self.kernel {
            Kernel::Identity => FftStrategy::Identity,
            Kernel::Stockham { .. } => FftStrategy::Stockham,
            Kernel::Bluestein { .. } => FftStrategy::Bluestein,
        }
    }

    /// Number of scratch elements [`FftPlan::process`] uses.
    pub fn scratch_len(&self) -> usize {
        match &self.kernel {
            Kernel::Identity => 0,
            Kernel::Stockham { .. } => self.n,
            Kernel::Bluestein { spectrum, .. } => 2 * spectrum.len(),
        }
    }

    /// In-place transform of `buf`, which must hold exactly [`FftPlan::len`]
    /// elements. `scratch` grows as needed and can be reused across calls.
    pub fn process(
        &self,
        buf: &mut [Complex<T>],
        scratch: &mut Vec<Complex<T>>,
        direction: Direction,
    ) -> Result<(), FftError> {
        if buf.len() != self.n {
            return Err(FftError::InvalidArgument {
                reason: "buffer length does not match plan length",
            });
        }
        if self.n <= 1 {
            return Ok(());
        }
        let needed = self.scratch_len();
        if scratch.len() < needed {
            scratch.resize(needed, Complex::zero());
        }
        match direction {
            Direction::Forward => self.forward_unscaled(buf, scratch),
            Direction::Inverse => {
                for c in buf.iter_mut() {
                    c.im = -c.im;
                }
                self.forward_unscaled(buf, scratch);
                for c in buf.iter_mut() {
                    *c = c.conj().scale(self.scale);
                }
            }
        }
        Ok(())
    }

    pub fn forward(
        &self,
        buf: &mut [Complex<T>],
        scratch: &mut Vec<Complex<T>>,
    ) -> Result<(), FftError> {
        self.process(buf, scratch, Direction::Forward)
    }

    pub fn inverse(
        &self,
        buf: &mut [Complex<T>],
        scratch: &mut Vec<Complex<T>>,
    ) -> Result<(), FftError> {
        self.process(buf, scratch, Direction::Inverse)
    }

    fn forward_unscaled(&self, buf: &mut [Complex<T>], scratch: &mut [Complex<T>]) {
        match &self.kernel {
            Kernel::Identity => {}
            Kernel::Stockham { twiddles } => stockham(buf, scratch, twiddles),
            Kernel::Bluestein {
                chirp,
                spectrum,
                twiddles,
            } => {
                let m = spectrum.len();
                let (conv, inner) = scratch[..2 * m].split_at_mut(m);
                for (slot, (&x, &w)) in conv.iter_mut().zip(buf.iter().zip(chirp.iter())) {
                    *slot = x.mul(w);
                }
                for slot in conv[self.n..].iter_mut() {
                    *slot = Complex::zero();
                }
                stockham(conv, inner, twiddles);
                // pointwise product, conjugated so the next forward pass inverts
                for (c, &s) in conv.iter_mut().zip(spectrum.iter()) {
                    *c = c.mul(s).conj();
                }
                stockham(conv, inner, twiddles);
                let inv_m = T::one() / T::from_f64(m as f64);
                for (out, (&c, &w)) in buf.iter_mut().zip(conv.iter().zip(chirp.iter())) {
                    *out = c.conj().scale(inv_m).mul(w);
                }
            }
        }
    }
}

/// Cache of transform plans keyed by length.
///
/// The planner is an explicit value: drivers create one per call and callers
/// that repeat transforms may keep their own. Plans are handed out as
/// `Arc<FftPlan<T>>` so worker threads share them without copying.
pub struct FftPlanner<T: Float> {
    plans: HashMap<usize, Arc<FftPlan<T>>>,
    /// Stage twiddles by power-of-two length, shared by Stockham plans and
    /// Bluestein convolutions.
    twiddles: HashMap<usize, Arc<[Complex<T>]>>,
}

impl<T: Float> Default for FftPlanner<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> FftPlanner<T> {
    pub fn new() -> Self {
        Self {
            plans: HashMap::new(),
            twiddles: HashMap::new(),
        }
    }

    /// Strategy a plan of length `n` would use.
    pub fn plan_strategy(n: usize) -> FftStrategy {
        if n <= 1 {
            FftStrategy::Identity
        } else if n.is_power_of_two() {
            FftStrategy::Stockham
        } else {
            FftStrategy::Bluestein
        }
    }

    /// Number of cached plans.
    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }

    /// Retrieve the table `exp(-2πi·k/n)` for `k < n/2`.
    pub(crate) fn get_twiddles(&mut self, n: usize) -> Arc<[Complex<T>]> {
        let table = self
            .twiddles
            .entry(n)
            .or_insert_with(|| Arc::from(build_twiddles::<T>(n)));
        Arc::clone(table)
    }

    /// Retrieve or build the plan for length `n`.
    pub fn plan(&mut self, n: usize) -> Result<Arc<FftPlan<T>>, FftError> {
        if let Some(plan) = self.plans.get(&n) {
            return Ok(Arc::clone(plan));
        }
        let scale = if n == 0 { T::one() } else { inverse_len::<T>(n)? };
        let strategy = Self::plan_strategy(n);
        fft_debug!("building {:?} plan for n = {}", strategy, n);
        let kernel = match strategy {
            FftStrategy::Identity => Kernel::Identity,
            FftStrategy::Stockham => Kernel::Stockham {
                twiddles: self.get_twiddles(n),
            },
            FftStrategy::Bluestein => self.bluestein(n)?,
        };
        let plan = Arc::new(FftPlan { n, scale, kernel });
        self.plans.insert(n, Arc::clone(&plan));
        Ok(plan)
    }

    fn bluestein(&mut self, n: usize) -> Result<Kernel<T>, FftError> {
        let m = n
            .checked_mul(2)
            .and_then(|twice| twice.checked_next_power_of_two())
            .ok_or(FftError::InvalidArgument {
                reason: "transform length too large for Bluestein convolution",
            })?;
        inverse_len::<T>(m)?;
        let twiddles = self.get_twiddles(m);

        // j² mod 2n, tracked incrementally to keep the chirp angle exact
        let period = 2 * n;
        let mut chirp = Vec::with_capacity(n);
        let mut q = 0usize;
        for j in 0..n {
            chirp.push(unit_root::<T>(q, period, false));
            q = (q + 2 * j + 1) % period;
        }

        let mut kernel = vec![Complex::zero(); m];
        for (j, &w) in chirp.iter().enumerate() {
            kernel[j] = w.conj();
            if j > 0 {
                kernel[m - j] = w.conj();
            }
        }
        let mut scratch = vec![Complex::zero(); m];
        stockham(&mut kernel, &mut scratch, &twiddles);

        Ok(Kernel::Bluestein {
            chirp: Arc::from(chirp),
            spectrum: Arc::from(kernel),
            twiddles,
        })
    }
}

/// Copy `src` into `dst` resized to exactly `n` elements: extra source
/// elements are dropped, missing ones are zero.
pub(crate) fn fill_resized<'a, E, I>(dst: &mut Vec<Complex<E::Real>>, src: I, n: usize)
where
    E: FftElement,
    I: IntoIterator<Item = &'a E>,
{
    dst.clear();
    dst.extend(src.into_iter().take(n).map(|&e| e.to_complex()));
    dst.resize(n, Complex::zero());
}

/// In-place 1D transforms plus the resizing raw kernel built on them.
pub trait FftImpl<T: Float> {
    fn fft(&self, input: &mut [Complex<T>]) -> Result<(), FftError>;
    fn ifft(&self, input: &mut [Complex<T>]) -> Result<(), FftError>;

    /// Resize `input` to `n` (zero-pad or truncate the time-domain sequence),
    /// then run the forward transform.
    fn rawfft(&self, input: &[Complex<T>], n: usize) -> Result<Vec<Complex<T>>, FftError> {
        let mut line = Vec::with_capacity(n);
        fill_resized(&mut line, input, n);
        self.fft(&mut line)?;
        Ok(line)
    }

    /// Resize `input` to `n`, then run the normalized inverse transform.
    fn rawifft(&self, input: &[Complex<T>], n: usize) -> Result<Vec<Complex<T>>, FftError> {
        let mut line = Vec::with_capacity(n);
        fill_resized(&mut line, input, n);
        self.ifft(&mut line)?;
        Ok(line)
    }
}

/// Single-threaded transform engine owning a planner and a scratch buffer.
pub struct ScalarFftImpl<T: Float> {
    planner: RefCell<FftPlanner<T>>,
    scratch: RefCell<Vec<Complex<T>>>,
}

impl<T: Float> Default for ScalarFftImpl<T> {
    fn default() -> Self {
        Self::with_planner(FftPlanner::new())
    }
}

impl<T: Float> ScalarFftImpl<T> {
    pub fn with_planner(planner: FftPlanner<T>) -> Self {
        Self {
            planner: RefCell::new(planner),
            scratch: RefCell::new(Vec::new()),
        }
    }

    /// Give back the planner with every plan built so far.
    pub fn into_planner(self) -> FftPlanner<T> {
        self.planner.into_inner()
    }

    fn run(&self, input: &mut [Complex<T>], direction: Direction) -> Result<(), FftError> {
        let plan = self.planner.borrow_mut().plan(input.len())?;
        let mut scratch = self.scratch.borrow_mut();
        plan.process(input, &mut scratch, direction)
    }
}

impl<T: Float> FftImpl<T> for ScalarFftImpl<T> {
    fn fft(&self, input: &mut [Complex<T>]) -> Result<(), FftError> {
        self.run(input, Direction::Forward)
    }

    fn ifft(&self, input: &mut [Complex<T>]) -> Result<(), FftError> {
        self.run(input, Direction::Inverse)
    }
}

/// Forward transform of `input` resized to `n` elements.
pub fn rawfft<T: Float>(input: &[Complex<T>], n: usize) -> Result<Vec<Complex<T>>, FftError> {
    ScalarFftImpl::<T>::default().rawfft(input, n)
}

/// Normalized inverse transform of `input` resized to `n` elements.
pub fn rawifft<T: Float>(input: &[Complex<T>], n: usize) -> Result<Vec<Complex<T>>, FftError> {
    ScalarFftImpl::<T>::default().rawifft(input, n)
}
