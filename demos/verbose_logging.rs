//! Demonstrates enabling verbose logging for ndspectra.
use ndspectra::ndarray::Array2;
use ndspectra::{fftn, irfft, Complex64, IrfftOptions, NdOptions};

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .init();

    let grid = Array2::from_shape_fn((4, 6), |(i, j)| (i * j) as f64);
    fftn(&grid, &NdOptions::all_axes().with_lens([8, 5])).unwrap();

    let half = ndspectra::ndarray::array![Complex64::new(2.0, 0.0), Complex64::new(0.0, 1.0)];
    irfft(&half, &IrfftOptions::new()).unwrap();
}
