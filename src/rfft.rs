//! Real-input FFT helpers and the Hermitian inverse.
//!
//! The spectrum of a real signal of length `n` satisfies
//! `X[n-k] = conj(X[k])`, so bins `0..=n/2` carry all of it. [`rfft`] keeps
//! that half; [`irfft`] rebuilds the full spectrum from a half by conjugate
//! mirroring, runs the normalized inverse and returns the real part.

use alloc::vec::Vec;
use ndarray::{ArrayBase, ArrayD, ArrayView1, ArrayViewD, Data, Dimension};

use crate::axis::{map_lanes, AxisOptions, AxisSelection};
use crate::fft::{fill_resized, Direction, FftError, FftPlanner};
use crate::ndfft::{check_axes, run_passes, validate, AxesSelection, NdOptions};
use crate::num::{Complex, FftElement, Float};

/// Axis and output length of [`irfft`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IrfftOptions {
    pub axis: AxisSelection,
    /// Output length `N` along the axis.
    ///
    /// `None` uses the even-length convention `N = 2·(m − 1)`, where `m` is
    /// the length of the half spectrum. Odd outputs need an explicit length:
    /// a half spectrum of `m` bins fits both `2m − 2` and `2m − 1`.
    pub len: Option<usize>,
}

impl IrfftOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn along(axis: usize) -> Self {
        Self {
            axis: AxisSelection::Explicit(axis),
            len: None,
        }
    }

    #[must_use]
    pub fn with_len(mut self, n: usize) -> Self {
        self.len = Some(n);
        self
    }

    #[must_use]
    pub fn with_axis(mut self, axis: AxisSelection) -> Self {
        self.axis = axis;
        self
    }

    /// Resolve to `(axis, N)` for a half spectrum of `shape`.
    pub fn resolve(&self, shape: &[usize]) -> Result<(usize, usize), FftError> {
        let axis = self.axis.resolve(shape)?;
        let n = match self.len {
            Some(n) => n,
            None => even_len(shape[axis])?,
        };
        Ok((axis, n))
    }
}

/// Axes and lengths of [`irfftn`]. The last visited axis holds the half
/// spectrum.
///
/// Defaults to every axis. `lens: None` keeps the current size of all but the
/// last axis, which follows the even-length convention of
/// [`IrfftOptions::len`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IrfftnOptions {
    pub axes: AxesSelection,
    pub lens: Option<Vec<usize>>,
}

impl Default for IrfftnOptions {
    fn default() -> Self {
        Self {
            axes: AxesSelection::All,
            lens: None,
        }
    }
}

impl IrfftnOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn along(axes: impl Into<Vec<usize>>) -> Self {
        Self {
            axes: AxesSelection::Explicit(axes.into()),
            lens: None,
        }
    }

    #[must_use]
    pub fn with_lens(mut self, lens: impl Into<Vec<usize>>) -> Self {
        self.lens = Some(lens.into());
        self
    }

    #[must_use]
    pub fn with_axes(mut self, axes: AxesSelection) -> Self {
        self.axes = axes;
        self
    }

    /// Resolve to validated `(axes, lens)` lists for a half spectrum of
    /// `shape`.
    pub fn resolve(&self, shape: &[usize]) -> Result<(Vec<usize>, Vec<usize>), FftError> {
        let axes = self.axes.resolve(shape)?;
        let lens = match &self.lens {
            Some(lens) => lens.clone(),
            None => {
                check_axes(shape, &axes)?;
                let last = axes.len().saturating_sub(1);
                axes.iter()
                    .enumerate()
                    .map(|(i, &axis)| {
                        if i == last {
                            even_len(shape[axis])
                        } else {
                            Ok(shape[axis])
                        }
                    })
                    .collect::<Result<Vec<_>, _>>()?
            }
        };
        validate(shape, &lens, &axes)?;
        Ok((axes, lens))
    }
}

fn even_len(m: usize) -> Result<usize, FftError> {
    match m.checked_sub(1).and_then(|k| k.checked_mul(2)) {
        Some(n) if n > 0 => Ok(n),
        _ => Err(FftError::InvalidArgument {
            reason: "cannot derive an output length from fewer than 2 spectrum bins",
        }),
    }
}

/// Bins kept by [`rfft`] for a transform of length `n`.
pub fn half_len(n: usize) -> usize {
    if n == 0 {
        0
    } else {
        n / 2 + 1
    }
}

/// Write the length-`n` Hermitian spectrum implied by `half` into `full`.
///
/// Bins `0..=n/2` come from `half` (zero when it is shorter), bin `n-k` is
/// `conj(half[k])`. The Nyquist bin of an even `n` is not mirrored.
fn rebuild_hermitian<T: Float>(full: &mut Vec<Complex<T>>, half: ArrayView1<'_, Complex<T>>, n: usize) {
    full.clear();
    full.resize(n, Complex::zero());
    if n == 0 {
        return;
    }
    let m = half.len().min(n / 2 + 1);
    for (k, &bin) in half.iter().take(m).enumerate() {
        full[k] = bin;
        if k > 0 && n - k >= m {
            full[n - k] = bin.conj();
        }
    }
}

pub(crate) fn rfft_axis<E: FftElement>(
    planner: &mut FftPlanner<E::Real>,
    input: ArrayViewD<'_, E>,
    axis: usize,
    n: usize,
) -> Result<ArrayD<Complex<E::Real>>, FftError> {
    let plan = planner.plan(n)?;
    fft_debug!("real forward pass on axis {}: n = {}, {} bins kept", axis, n, half_len(n));
    map_lanes(input, axis, half_len(n), Complex::zero(), |bufs, src, mut dst| {
        fill_resized(&mut bufs.line, src.iter(), n);
        plan.forward(&mut bufs.line, &mut bufs.scratch)?;
        for (out, &bin) in dst.iter_mut().zip(bufs.line.iter()) {
            *out = bin;
        }
        Ok(())
    })
}

pub(crate) fn irfft_axis<T: Float>(
    planner: &mut FftPlanner<T>,
    half: ArrayViewD<'_, Complex<T>>,
    axis: usize,
    n: usize,
) -> Result<ArrayD<T>, FftError> {
    let plan = planner.plan(n)?;
    fft_debug!("hermitian inverse pass on axis {}: {} bins -> n = {}", axis, half.shape()[axis], n);
    map_lanes(half, axis, n, T::zero(), |bufs, src, mut dst| {
        rebuild_hermitian(&mut bufs.line, src, n);
        plan.inverse(&mut bufs.line, &mut bufs.scratch)?;
        for (out, z) in dst.iter_mut().zip(bufs.line.iter()) {
            *out = z.re;
        }
        Ok(())
    })
}

/// Forward transform along one axis, keeping bins `0..=n/2`.
///
/// Intended for real input; complex input is accepted and truncated the same
/// way, which discards information.
pub fn rfft<E, S, D>(
    input: &ArrayBase<S, D>,
    options: &AxisOptions,
) -> Result<ArrayD<Complex<E::Real>>, FftError>
where
    E: FftElement,
    S: Data<Elem = E>,
    D: Dimension,
{
    let input = input.view().into_dyn();
    let (axis, n) = options.resolve(input.shape())?;
    let mut planner = FftPlanner::new();
    rfft_axis(&mut planner, input, axis, n)
}

/// Real signal whose spectrum along one axis has `half` as its
/// non-redundant part.
///
/// ```
/// use ndspectra::ndarray::array;
/// use ndspectra::{irfft, Complex64, IrfftOptions};
///
/// let half = array![Complex64::new(4.0, 0.0), Complex64::new(0.0, 0.0), Complex64::new(0.0, 0.0)];
/// let signal = irfft(&half, &IrfftOptions::new()).unwrap();
/// assert_eq!(signal.len(), 4);
/// assert!(signal.iter().all(|&v| (v - 1.0).abs() < 1e-12));
/// ```
pub fn irfft<T, S, D>(half: &ArrayBase<S, D>, options: &IrfftOptions) -> Result<ArrayD<T>, FftError>
where
    T: Float,
    S: Data<Elem = Complex<T>>,
    D: Dimension,
{
    let half = half.view().into_dyn();
    let (axis, n) = options.resolve(half.shape())?;
    let mut planner = FftPlanner::new();
    irfft_axis(&mut planner, half, axis, n)
}

/// N-d forward transform of a real array: [`rfft`] along the last visited
/// axis, then full transforms along the others in order.
pub fn rfftn<E, S, D>(
    input: &ArrayBase<S, D>,
    options: &NdOptions,
) -> Result<ArrayD<Complex<E::Real>>, FftError>
where
    E: FftElement,
    S: Data<Elem = E>,
    D: Dimension,
{
    let input = input.view().into_dyn();
    let (axes, lens) = options.resolve(input.shape())?;
    let (Some((&last, rest)), Some((&n, rest_lens))) = (axes.split_last(), lens.split_last()) else {
        return Err(FftError::InvalidArgument {
            reason: "real n-d transform needs at least one axis",
        });
    };
    let mut planner = FftPlanner::new();
    let half = rfft_axis(&mut planner, input, last, n)?;
    run_passes(&mut planner, half.view(), rest_lens, rest, Direction::Forward)
}

/// Inverse of [`rfftn`]: normalized inverse transforms along every visited
/// axis but the last, then [`irfft`] along the last.
pub fn irfftn<T, S, D>(half: &ArrayBase<S, D>, options: &IrfftnOptions) -> Result<ArrayD<T>, FftError>
where
    T: Float,
    S: Data<Elem = Complex<T>>,
    D: Dimension,
{
    let half = half.view().into_dyn();
    let (axes, lens) = options.resolve(half.shape())?;
    let (Some((&last, rest)), Some((&n, rest_lens))) = (axes.split_last(), lens.split_last()) else {
        return Err(FftError::InvalidArgument {
            reason: "real n-d inverse needs at least one axis",
        });
    };
    let mut planner = FftPlanner::new();
    let mixed = run_passes(&mut planner, half, rest_lens, rest, Direction::Inverse)?;
    irfft_axis(&mut planner, mixed.view(), last, n)
}
