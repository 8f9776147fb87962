//! # ndspectra - N-dimensional FFT engine for Rust
//!
//! Discrete Fourier transforms over [`ndarray`] arrays of any rank: raw 1-D
//! kernels, per-axis transforms, ordered multi-axis pipelines and the
//! Hermitian real-spectrum pair `rfft`/`irfft`.
//!
//! ## Features
//!
//! - **Any length**: Stockham radix-2 for powers of two, Bluestein's chirp-z
//!   for everything else
//! - **Zero-pad or truncate** every transform to a requested length
//! - **Axis iteration** with a first-non-singleton default axis
//! - **Ordered n-d pipelines**: per-axis lengths applied in the order given
//! - **Real spectra**: `rfft`/`irfft` with the even-length convention
//! - **Parallel lines** (optional) through Rayon
//!
//! ## Cargo Features
//!
//! - `std` (default): Enable standard library features
//! - `parallel`: Spread the lines of large passes over Rayon workers
//! - `verbose-logging`: Emit plan and pass decisions through `log::debug!`
//!
//! ## Environment
//!
//! - `NDSPECTRA_PAR_THRESHOLD`: output elements a pass needs before it goes
//!   parallel (`parallel` feature only). Unset or `0` uses
//!   `4096 * num_cpus`.
//!
//! ## Examples
//!
//! Run the demos with:
//! ```bash
//! cargo run --example basic_usage
//! cargo run --example ndfft_usage
//! cargo run --example rfft_usage
//! cargo run --example verbose_logging --features verbose-logging
//! ```
//!
//! ```
//! use ndspectra::ndarray::array;
//! use ndspectra::{fftn, ifftn, NdOptions};
//!
//! let x = array![[1.0f64, 2.0], [3.0, 4.0]];
//! let spectrum = fftn(&x, &NdOptions::all_axes()).unwrap();
//! assert!((spectrum[[0, 0]].re - 10.0).abs() < 1e-12);
//! let back = ifftn(&spectrum, &NdOptions::all_axes()).unwrap();
//! assert!((back[[1, 0]].re - 3.0).abs() < 1e-12);
//! ```
//!
//! ## License
//!
//! Licensed under either of
//! - Apache License, Version 2.0
//! - MIT license
//!
//! at your option.

#![no_std]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

#[cfg(feature = "verbose-logging")]
macro_rules! fft_debug {
    ($($arg:tt)*) => {
        log::debug!($($arg)*)
    };
}

#[cfg(not(feature = "verbose-logging"))]
macro_rules! fft_debug {
    ($($arg:tt)*) => {
        if false {
            let _ = format_args!($($arg)*);
        }
    };
}

/// Scalar and complex number types
pub mod num;

/// Raw 1-D transforms
///
/// Plans, the planner cache and the resize-then-transform kernels every
/// driver is built on.
pub mod fft;

/// Single-axis transforms over n-d arrays
pub mod axis;

/// N-dimensional FFT operations
///
/// Ordered multi-axis pipelines with per-axis target lengths.
pub mod ndfft;

/// Real-input transforms and the Hermitian inverse
pub mod rfft;

/// Parallel fan-out configuration
#[cfg(feature = "parallel")]
pub mod par;

pub use axis::{fft, ifft, AxisOptions, AxisSelection};
pub use fft::{rawfft, rawifft, FftError, FftImpl, FftPlan, FftPlanner, ScalarFftImpl};
pub use ndarray;
pub use ndfft::{fftn, ifftn, rawfftn, rawifftn, AxesSelection, NdOptions};
pub use num::{Complex, Complex32, Complex64, FftElement, Float};
pub use rfft::{irfft, irfftn, rfft, rfftn, IrfftOptions, IrfftnOptions};
