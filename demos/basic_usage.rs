//! Basic usage example for ndspectra
//!
//! Raw 1D transforms with zero-padding and truncation, then per-axis
//! transforms over a 2D array.

use ndspectra::fft::{FftImpl, ScalarFftImpl};
use ndspectra::ndarray::array;
use ndspectra::{fft, ifft, rawfft, AxisOptions, Complex64, FftError, FftPlanner};

fn fmt(values: &[Complex64]) -> Vec<String> {
    values
        .iter()
        .map(|c| format!("{:.2}{:+.2}i", c.re, c.im))
        .collect()
}

fn main() -> Result<(), FftError> {
    println!("=== ndspectra Basic Usage Example ===\n");

    // 1. Raw transform
    println!("1. Raw FFT");
    let signal = vec![
        Complex64::new(1.0, 0.0),
        Complex64::new(2.0, 0.0),
        Complex64::new(3.0, 0.0),
    ];
    println!("   Input: {:?}", signal.iter().map(|c| c.re).collect::<Vec<_>>());
    println!("   FFT (n = 3): {:?}", fmt(&rawfft(&signal, 3)?));
    println!("   FFT (n = 4, zero-padded): {:?}", fmt(&rawfft(&signal, 4)?));
    println!("   FFT (n = 2, truncated): {:?}", fmt(&rawfft(&signal, 2)?));
    println!();

    // 2. Reusing plans
    println!("2. Planner-backed engine");
    let engine = ScalarFftImpl::with_planner(FftPlanner::<f64>::new());
    let mut data = signal.clone();
    engine.fft(&mut data)?;
    engine.ifft(&mut data)?;
    println!("   Round trip: {:?}", fmt(&data));
    println!("   Cached plans: {}", engine.into_planner().len());
    println!();

    // 3. Axis transforms
    println!("3. Per-axis FFT");
    let image = array![[1.0f64, 2.0, 3.0, 4.0], [0.0, 1.0, 0.0, -1.0]];
    let rows = fft(&image, &AxisOptions::along(1))?;
    println!("   Rows: {:?}", rows.shape());
    let cols = fft(&image, &AxisOptions::along(0).with_len(4))?;
    println!("   Columns padded to 4: {:?}", cols.shape());
    let back = ifft(&rows, &AxisOptions::along(1))?;
    println!(
        "   Row inverse: {:?}",
        back.iter().map(|c| (c.re * 100.0).round() / 100.0).collect::<Vec<_>>()
    );
    Ok(())
}
