//! Multi-dimensional FFT over ndarray arrays.
//!
//! - Ordered pipeline of single-axis passes, one target length per pass
//! - Each pass resizes the data current at that step, so order matters when
//!   a step pads or truncates
//! - One planner per call; plans are shared by every pass of equal length
//! - Real or complex input for `fftn`/`ifftn`, complex for the raw variants

use alloc::vec;
use alloc::vec::Vec;
use ndarray::{ArrayBase, ArrayD, ArrayViewD, Data, Dimension};

use crate::axis::{transform_axis, AxisSelection};
use crate::fft::{Direction, FftError, FftPlanner};
use crate::num::{Complex, FftElement, Float};

/// Which axes an n-d transform visits, in order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AxesSelection {
    /// A single axis: the first non-singleton one (axis 0 if there is none).
    #[default]
    Implied,
    /// Every axis, `0..ndim`.
    All,
    /// The listed axes in list order. Repeats are allowed.
    Explicit(Vec<usize>),
}

impl AxesSelection {
    /// The axes to visit for an array of `shape`, not yet range-checked.
    pub fn resolve(&self, shape: &[usize]) -> Result<Vec<usize>, FftError> {
        Ok(match self {
            Self::Implied => vec![AxisSelection::FirstNonSingleton.resolve(shape)?],
            Self::All => (0..shape.len()).collect(),
            Self::Explicit(axes) => axes.clone(),
        })
    }
}

/// Axes and per-axis target lengths of an n-d transform.
///
/// `lens: None` keeps the current size of each visited axis. When given,
/// `lens` must have one entry per resolved axis.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NdOptions {
    pub axes: AxesSelection,
    pub lens: Option<Vec<usize>>,
}

impl NdOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all_axes() -> Self {
        Self {
            axes: AxesSelection::All,
            lens: None,
        }
    }

    pub fn along(axes: impl Into<Vec<usize>>) -> Self {
        Self {
            axes: AxesSelection::Explicit(axes.into()),
            lens: None,
        }
    }

    /// `fftn(x, dimension, n)`: one axis at length `n`.
    pub fn single(axis: usize, n: usize) -> Self {
        Self {
            axes: AxesSelection::Explicit(vec![axis]),
            lens: Some(vec![n]),
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

    /// Resolve to validated `(axes, lens)` lists for `shape`.
    pub fn resolve(&self, shape: &[usize]) -> Result<(Vec<usize>, Vec<usize>), FftError> {
        let axes = self.axes.resolve(shape)?;
        let lens = match &self.lens {
            Some(lens) => lens.clone(),
            None => axes
                .iter()
                .map(|&a| shape.get(a).copied().unwrap_or(0))
                .collect(),
        };
        validate(shape, &lens, &axes)?;
        Ok((axes, lens))
    }
}

pub(crate) fn validate(shape: &[usize], lens: &[usize], axes: &[usize]) -> Result<(), FftError> {
    if lens.len() != axes.len() {
        return Err(FftError::InvalidArgument {
            reason: "axes and target lengths differ in count",
        });
    }
    check_axes(shape, axes)
}

pub(crate) fn check_axes(shape: &[usize], axes: &[usize]) -> Result<(), FftError> {
    if axes.iter().any(|&axis| axis >= shape.len()) {
        return Err(FftError::ShapeMismatch {
            shape: shape.to_vec(),
            reason: "axis out of range",
        });
    }
    Ok(())
}

/// Run one pass per `(axis, len)` pair in order. Arguments must already be
/// validated.
pub(crate) fn run_passes<E: FftElement>(
    planner: &mut FftPlanner<E::Real>,
    input: ArrayViewD<'_, E>,
    lens: &[usize],
    axes: &[usize],
    direction: Direction,
) -> Result<ArrayD<Complex<E::Real>>, FftError> {
    let Some((&first, rest)) = axes.split_first() else {
        return Ok(input.mapv(FftElement::to_complex));
    };
    fft_debug!("{:?} n-d transform of {:?}: axes {:?}, lens {:?}", direction, input.shape(), axes, lens);
    let mut current = transform_axis(planner, input, first, lens[0], direction)?;
    for (&axis, &n) in rest.iter().zip(&lens[1..]) {
        current = transform_axis(planner, current.view(), axis, n, direction)?;
    }
    Ok(current)
}

fn raw<T: Float>(
    input: ArrayViewD<'_, Complex<T>>,
    lens: &[usize],
    axes: &[usize],
    direction: Direction,
) -> Result<ArrayD<Complex<T>>, FftError> {
    validate(input.shape(), lens, axes)?;
    let mut planner = FftPlanner::new();
    run_passes(&mut planner, input, lens, axes, direction)
}

fn resolved<E: FftElement>(
    input: ArrayViewD<'_, E>,
    options: &NdOptions,
    direction: Direction,
) -> Result<ArrayD<Complex<E::Real>>, FftError> {
    let (axes, lens) = options.resolve(input.shape())?;
    let mut planner = FftPlanner::new();
    run_passes(&mut planner, input, &lens, &axes, direction)
}

/// Forward transform along each of `axes` in order, resizing axis
/// `axes[i]` to `lens[i]` just before its pass.
///
/// An empty `axes` returns a copy of the input.
pub fn rawfftn<T, S, D>(
    input: &ArrayBase<S, D>,
    lens: &[usize],
    axes: &[usize],
) -> Result<ArrayD<Complex<T>>, FftError>
where
    T: Float,
    S: Data<Elem = Complex<T>>,
    D: Dimension,
{
    raw(input.view().into_dyn(), lens, axes, Direction::Forward)
}

/// Inverse counterpart of [`rawfftn`]; every pass is normalized by its own
/// length.
pub fn rawifftn<T, S, D>(
    input: &ArrayBase<S, D>,
    lens: &[usize],
    axes: &[usize],
) -> Result<ArrayD<Complex<T>>, FftError>
where
    T: Float,
    S: Data<Elem = Complex<T>>,
    D: Dimension,
{
    raw(input.view().into_dyn(), lens, axes, Direction::Inverse)
}

/// N-d forward transform of a real or complex array.
///
/// The output shape equals the input shape with each visited axis replaced
/// by its target length; other axes are carried through unchanged.
pub fn fftn<E, S, D>(
    input: &ArrayBase<S, D>,
    options: &NdOptions,
) -> Result<ArrayD<Complex<E::Real>>, FftError>
where
    E: FftElement,
    S: Data<Elem = E>,
    D: Dimension,
{
    resolved(input.view().into_dyn(), options, Direction::Forward)
}

/// N-d normalized inverse transform of a real or complex array.
pub fn ifftn<E, S, D>(
    input: &ArrayBase<S, D>,
    options: &NdOptions,
) -> Result<ArrayD<Complex<E::Real>>, FftError>
where
    E: FftElement,
    S: Data<Elem = E>,
    D: Dimension,
{
    resolved(input.view().into_dyn(), options, Direction::Inverse)
}
