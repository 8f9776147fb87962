//! NDFFT usage example for ndspectra
//! Demonstrates `fftn` over all axes and an ordered `rawfftn` pipeline.

use ndspectra::ndarray::Array3;
use ndspectra::{fftn, ifftn, rawfftn, Complex64, FftError, NdOptions};

fn main() -> Result<(), FftError> {
    let volume = Array3::from_shape_fn((2, 3, 4), |(i, j, k)| (i + 2 * j + 3 * k) as f64);

    let spectrum = fftn(&volume, &NdOptions::all_axes())?;
    println!("3D FFT shape: {:?}", spectrum.shape());
    println!("DC bin: {:?}", spectrum[[0, 0, 0]]);

    let back = ifftn(&spectrum, &NdOptions::all_axes())?;
    let max_err = back
        .iter()
        .zip(volume.iter())
        .map(|(z, &v)| (z.re - v).abs())
        .fold(0.0f64, f64::max);
    println!("Round trip max error: {max_err:.2e}");

    // Pad the last axis to 8, then keep 1 bin of the first.
    let complex = volume.mapv(|v| Complex64::new(v, 0.0));
    let reduced = rawfftn(&complex, &[8, 1], &[2, 0])?;
    println!("Ordered pipeline shape: {:?}", reduced.shape());
    Ok(())
}
