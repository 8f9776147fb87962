//! Real-spectrum example: rfft keeps bins 0..=n/2, irfft rebuilds the signal.

use ndspectra::ndarray::array;
use ndspectra::{irfft, irfftn, rfft, rfftn, AxisOptions, FftError, IrfftOptions, IrfftnOptions, NdOptions};

fn main() -> Result<(), FftError> {
    let signal = array![1.0f64, 0.5, -0.25, 2.0, 0.0, -1.0];
    let half = rfft(&signal, &AxisOptions::vector())?;
    println!("{} samples -> {} bins", signal.len(), half.len());

    // even length, so N = 2 * (bins - 1) recovers it
    let back = irfft(&half, &IrfftOptions::new())?;
    println!("Recovered: {:?}", back.iter().map(|v| (v * 1e6).round() / 1e6).collect::<Vec<_>>());

    let odd = array![3.0f64, 1.0, 4.0, 1.0, 5.0];
    let half = rfft(&odd, &AxisOptions::vector())?;
    let back = irfft(&half, &IrfftOptions::new().with_len(odd.len()))?;
    println!("Odd length with explicit N: {:?}", back.iter().map(|v| v.round()).collect::<Vec<_>>());

    let image = array![[1.0f64, 2.0, 3.0, 4.0], [5.0, 6.0, 7.0, 8.0]];
    let half = rfftn(&image, &NdOptions::all_axes())?;
    println!("rfftn shape: {:?}", half.shape());
    let back = irfftn(&half, &IrfftnOptions::new())?;
    println!("irfftn shape: {:?}", back.shape());
    Ok(())
}
