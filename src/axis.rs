//! Axis-iteration driver.
//!
//! Applies the raw kernel to every line of an array along one axis: all
//! other coordinates are held fixed, the selected axis is varied. The output
//! is allocated up front with the selected axis resized to the target length,
//! then each line is gathered, transformed and written back to its own slot.
//!
//! With the `parallel` feature, lines of a large pass are spread over Rayon
//! workers. Each worker owns its line and scratch buffers and writes only
//! the output lines it was handed.

use alloc::vec::Vec;
use ndarray::{ArrayBase, ArrayD, ArrayView1, ArrayViewD, ArrayViewMut1, Axis, Data, Dimension, IxDyn};

use crate::fft::{fill_resized, Direction, FftError, FftPlanner};
use crate::num::{Complex, FftElement, Float};

/// Which axis a driver transforms when the caller does not name one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisSelection {
    /// First axis whose size is greater than 1, or axis 0 when every axis has
    /// size 0 or 1.
    #[default]
    FirstNonSingleton,
    /// Like `FirstNonSingleton`, but the array must be a vector: more than
    /// one axis larger than 1 is a [`FftError::ShapeMismatch`].
    Vector,
    /// A specific axis.
    Explicit(usize),
}

impl AxisSelection {
    /// Resolve the selection against `shape`.
    pub fn resolve(self, shape: &[usize]) -> Result<usize, FftError> {
        if shape.is_empty() {
            return Err(FftError::ShapeMismatch {
                shape: Vec::new(),
                reason: "zero-dimensional array has no axis to transform",
            });
        }
        match self {
            Self::Explicit(axis) if axis < shape.len() => Ok(axis),
            Self::Explicit(_) => Err(FftError::ShapeMismatch {
                shape: shape.to_vec(),
                reason: "axis out of range",
            }),
            Self::FirstNonSingleton => Ok(first_non_singleton(shape).unwrap_or(0)),
            Self::Vector => {
                if shape.iter().filter(|&&d| d > 1).count() > 1 {
                    return Err(FftError::ShapeMismatch {
                        shape: shape.to_vec(),
                        reason: "vector transform needs at most one axis larger than 1",
                    });
                }
                Ok(first_non_singleton(shape).unwrap_or(0))
            }
        }
    }
}

/// Index of the first axis whose size is greater than 1.
pub fn first_non_singleton(shape: &[usize]) -> Option<usize> {
    shape.iter().position(|&d| d > 1)
}

/// Target length and axis of a single-axis transform.
///
/// `len: None` keeps the current size of the chosen axis. A longer target
/// zero-pads each line, a shorter one truncates it, always before the
/// transform runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AxisOptions {
    pub len: Option<usize>,
    pub axis: AxisSelection,
}

impl AxisOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Vector-only form: full length, rejects arrays with several
    /// non-singleton axes.
    pub fn vector() -> Self {
        Self {
            len: None,
            axis: AxisSelection::Vector,
        }
    }

    /// Transform along `axis`.
    pub fn along(axis: usize) -> Self {
        Self {
            len: None,
            axis: AxisSelection::Explicit(axis),
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

    /// Resolve to a concrete `(axis, target length)` pair for `shape`.
    pub fn resolve(&self, shape: &[usize]) -> Result<(usize, usize), FftError> {
        let axis = self.axis.resolve(shape)?;
        Ok((axis, self.len.unwrap_or(shape[axis])))
    }
}

/// Per-worker buffers reused from one line to the next.
#[derive(Default)]
pub(crate) struct LineBuffers<T: Float> {
    pub(crate) line: Vec<Complex<T>>,
    pub(crate) scratch: Vec<Complex<T>>,
}

/// Allocate the output (input shape with `axis` set to `out_len`) and run
/// `op` once per line pair.
pub(crate) fn map_lanes<E, O, F>(
    input: ArrayViewD<'_, E>,
    axis: usize,
    out_len: usize,
    fill: O,
    op: F,
) -> Result<ArrayD<O>, FftError>
where
    E: FftElement,
    O: Copy + Send + Sync,
    F: Fn(&mut LineBuffers<E::Real>, ArrayView1<'_, E>, ArrayViewMut1<'_, O>) -> Result<(), FftError>
        + Sync
        + Send,
{
    let mut out_shape = input.shape().to_vec();
    out_shape[axis] = out_len;
    let mut output = ArrayD::from_elem(IxDyn(&out_shape), fill);
    if output.is_empty() {
        return Ok(output);
    }
    let lines = output.len() / out_len;

    #[cfg(feature = "parallel")]
    if lines > 1 && crate::par::should_parallelize(output.len()) {
        use rayon::prelude::*;
        fft_debug!("axis {}: {} lines of {} on rayon workers", axis, lines, out_len);
        let pairs: Vec<_> = output
            .lanes_mut(Axis(axis))
            .into_iter()
            .zip(input.lanes(Axis(axis)))
            .collect();
        pairs
            .into_par_iter()
            .try_for_each_init(LineBuffers::<E::Real>::default, |bufs, (dst, src)| {
                op(bufs, src, dst)
            })?;
        return Ok(output);
    }

    fft_debug!("axis {}: {} lines of {} serially", axis, lines, out_len);
    let mut bufs = LineBuffers::<E::Real>::default();
    for (dst, src) in output
        .lanes_mut(Axis(axis))
        .into_iter()
        .zip(input.lanes(Axis(axis)))
    {
        op(&mut bufs, src, dst)?;
    }
    Ok(output)
}

/// One pass of the axis driver: every line along `axis` is resized to `n`
/// and transformed in `direction`.
pub(crate) fn transform_axis<E: FftElement>(
    planner: &mut FftPlanner<E::Real>,
    input: ArrayViewD<'_, E>,
    axis: usize,
    n: usize,
    direction: Direction,
) -> Result<ArrayD<Complex<E::Real>>, FftError> {
    let plan = planner.plan(n)?;
    fft_debug!(
        "{:?} pass on axis {} of {:?}: {} -> {}",
        direction,
        axis,
        input.shape(),
        input.shape()[axis],
        n
    );
    map_lanes(input, axis, n, Complex::zero(), |bufs, src, mut dst| {
        fill_resized(&mut bufs.line, src.iter(), n);
        plan.process(&mut bufs.line, &mut bufs.scratch, direction)?;
        for (out, &value) in dst.iter_mut().zip(bufs.line.iter()) {
            *out = value;
        }
        Ok(())
    })
}

fn run<E: FftElement>(
    input: ArrayViewD<'_, E>,
    options: &AxisOptions,
    direction: Direction,
) -> Result<ArrayD<Complex<E::Real>>, FftError> {
    let (axis, n) = options.resolve(input.shape())?;
    let mut planner = FftPlanner::new();
    transform_axis(&mut planner, input, axis, n, direction)
}

/// Forward transform of every line along one axis.
///
/// Real arrays are embedded as complex numbers with zero imaginary part.
///
/// ```
/// use ndspectra::ndarray::array;
/// use ndspectra::{fft, AxisOptions, Complex64};
///
/// let x = array![1.0f64, 0.0, 0.0, 0.0];
/// let spectrum = fft(&x, &AxisOptions::vector()).unwrap();
/// assert!(spectrum.iter().all(|c| (*c - Complex64::new(1.0, 0.0)).norm() < 1e-12));
/// ```
pub fn fft<E, S, D>(
    input: &ArrayBase<S, D>,
    options: &AxisOptions,
) -> Result<ArrayD<Complex<E::Real>>, FftError>
where
    E: FftElement,
    S: Data<Elem = E>,
    D: Dimension,
{
    run(input.view().into_dyn(), options, Direction::Forward)
}

/// Normalized inverse transform of every line along one axis.
pub fn ifft<E, S, D>(
    input: &ArrayBase<S, D>,
    options: &AxisOptions,
) -> Result<ArrayD<Complex<E::Real>>, FftError>
where
    E: FftElement,
    S: Data<Elem = E>,
    D: Dimension,
{
    run(input.view().into_dyn(), options, Direction::Inverse)
}
