// Test intent: raw 1D transforms against the direct DFT sum, resizing and linearity.

use ndspectra::fft::{rawfft, rawifft, target_len, FftError, FftImpl, FftPlanner, ScalarFftImpl};
use ndspectra::{Complex32, Complex64};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn dft(input: &[Complex64]) -> Vec<Complex64> {
    let len = input.len();
    (0..len)
        .map(|k| {
            let mut sum = Complex64::new(0.0, 0.0);
            for (n, &x) in input.iter().enumerate() {
                let angle = -2.0 * std::f64::consts::PI * ((k * n) % len) as f64 / len as f64;
                sum = sum + x * Complex64::new(angle.cos(), angle.sin());
            }
            sum
        })
        .collect()
}

fn random_signal(rng: &mut StdRng, n: usize) -> Vec<Complex64> {
    (0..n)
        .map(|_| Complex64::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)))
        .collect()
}

fn assert_close(a: &[Complex64], b: &[Complex64], tol: f64) {
    assert_eq!(a.len(), b.len());
    for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
        assert!(
            (*x - *y).norm() <= tol * 1.0f64.max(y.norm()),
            "bin {i}: {x:?} vs {y:?}"
        );
    }
}

#[test]
fn impulse_gives_flat_spectrum() {
    let x = [
        Complex64::new(1.0, 0.0),
        Complex64::new(0.0, 0.0),
        Complex64::new(0.0, 0.0),
        Complex64::new(0.0, 0.0),
    ];
    let spectrum = rawfft(&x, 4).unwrap();
    assert_close(&spectrum, &[Complex64::new(1.0, 0.0); 4], 1e-12);
    let back = rawifft(&[Complex64::new(1.0, 0.0); 4], 4).unwrap();
    assert_close(&back, &x, 1e-12);
}

#[test]
fn every_length_up_to_40_matches_dft() {
    let mut rng = StdRng::seed_from_u64(2024);
    for n in 1..=40 {
        let x = random_signal(&mut rng, n);
        assert_close(&rawfft(&x, n).unwrap(), &dft(&x), 1e-9);
    }
}

#[test]
fn large_prime_length_matches_dft() {
    let mut rng = StdRng::seed_from_u64(17);
    let x = random_signal(&mut rng, 257);
    assert_close(&rawfft(&x, 257).unwrap(), &dft(&x), 1e-8);
}

#[test]
fn inverse_is_normalized() {
    let x = [Complex64::new(4.0, 0.0), Complex64::new(0.0, 0.0)];
    let back = rawifft(&x, 2).unwrap();
    assert_close(&back, &[Complex64::new(2.0, 0.0), Complex64::new(2.0, 0.0)], 1e-12);
}

#[test]
fn zero_padding_equals_explicit_padding() {
    let mut rng = StdRng::seed_from_u64(3);
    let x = random_signal(&mut rng, 5);
    let mut padded = x.clone();
    padded.resize(12, Complex64::new(0.0, 0.0));
    assert_close(&rawfft(&x, 12).unwrap(), &dft(&padded), 1e-9);
}

#[test]
fn truncation_equals_explicit_truncation() {
    let mut rng = StdRng::seed_from_u64(4);
    let x = random_signal(&mut rng, 9);
    assert_close(&rawifft(&x, 6).unwrap(), &rawifft(&x[..6], 6).unwrap(), 1e-12);
}

#[test]
fn linearity() {
    let mut rng = StdRng::seed_from_u64(5);
    let x = random_signal(&mut rng, 10);
    let y = random_signal(&mut rng, 10);
    let (a, b) = (Complex64::new(0.5, -2.0), Complex64::new(-1.5, 0.25));
    let mixed: Vec<_> = x.iter().zip(&y).map(|(&p, &q)| a * p + b * q).collect();
    let fx = rawfft(&x, 10).unwrap();
    let fy = rawfft(&y, 10).unwrap();
    let expected: Vec<_> = fx.iter().zip(&fy).map(|(&p, &q)| a * p + b * q).collect();
    assert_close(&rawfft(&mixed, 10).unwrap(), &expected, 1e-9);
}

#[test]
fn f32_transforms_are_close_to_f64() {
    let x: Vec<Complex32> = (0..24).map(|i| Complex32::new(i as f32, -(i as f32) / 2.0)).collect();
    let wide: Vec<Complex64> = x.iter().map(|c| Complex64::new(c.re as f64, c.im as f64)).collect();
    let narrow = rawfft(&x, 24).unwrap();
    let reference = dft(&wide);
    for (a, b) in narrow.iter().zip(&reference) {
        assert!((a.re as f64 - b.re).abs() < 1e-3 * b.norm().max(1.0));
        assert!((a.im as f64 - b.im).abs() < 1e-3 * b.norm().max(1.0));
    }
}

#[test]
fn planner_backed_engine_reuses_plans() {
    let engine = ScalarFftImpl::<f64>::with_planner(FftPlanner::new());
    let mut a = vec![Complex64::new(1.0, 1.0); 6];
    let mut b = vec![Complex64::new(2.0, 0.0); 6];
    engine.fft(&mut a).unwrap();
    engine.ifft(&mut b).unwrap();
    let planner = engine.into_planner();
    assert_eq!(planner.len(), 1);
}

#[test]
fn negative_target_length_is_invalid() {
    assert_eq!(
        target_len(-3),
        Err(FftError::InvalidArgument {
            reason: "target length must be non-negative"
        })
    );
    let err = target_len(-1).unwrap_err();
    assert!(err.to_string().starts_with("invalid argument"));
}

proptest! {
    #[test]
    fn prop_padding_then_truncating_roundtrips(
        ref signal in proptest::collection::vec(-100.0f64..100.0, 1..40),
        extra in 0usize..20,
    ) {
        let x: Vec<Complex64> = signal.iter().map(|&re| Complex64::new(re, 0.0)).collect();
        let n = x.len();
        let spectrum = rawfft(&x, n + extra).unwrap();
        let back = rawifft(&spectrum, n + extra).unwrap();
        for (i, z) in back.iter().enumerate() {
            let expected = if i < n { x[i] } else { Complex64::new(0.0, 0.0) };
            prop_assert!((*z - expected).norm() < 1e-8);
        }
    }
}
