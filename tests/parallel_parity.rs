// Test intent: parallel and serial passes produce bit-identical output.
#![cfg(all(feature = "parallel", feature = "std"))]

use ndarray::{Array, IxDyn};
use ndspectra::par::THRESHOLD_ENV;
use ndspectra::{fftn, irfftn, rfftn, Complex64, IrfftnOptions, NdOptions};
use std::process::Command;

/// Transforms a fixed 3-d input and prints every output value as raw bits.
#[test]
fn dump_transforms() {
    let x = Array::from_shape_fn(IxDyn(&[6, 10, 12]), |idx| {
        let (i, j, k) = (idx[0] as f64, idx[1] as f64, idx[2] as f64);
        Complex64::new((i * 0.7 + j * 1.3).sin(), (k * 0.9 - j).cos())
    });
    let spectrum = fftn(&x, &NdOptions::all_axes().with_lens([8, 10, 15])).unwrap();
    // Move off the libtest progress line so the first value stands alone.
    println!();
    for z in spectrum.iter() {
        println!("{:016x} {:016x}", z.re.to_bits(), z.im.to_bits());
    }
    let real = x.mapv(|z| z.re);
    let half = rfftn(&real, &NdOptions::all_axes()).unwrap();
    let back = irfftn(&half, &IrfftnOptions::new()).unwrap();
    for v in back.iter() {
        println!("{:016x}", v.to_bits());
    }
}

fn run_with_threshold(threshold: &str) -> Vec<String> {
    let exe = std::env::current_exe().unwrap();
    let output = Command::new(&exe)
        .env(THRESHOLD_ENV, threshold)
        .args(["--exact", "dump_transforms", "--nocapture", "--test-threads=1"])
        .output()
        .expect("run dump test");
    assert!(output.status.success());
    String::from_utf8(output.stdout)
        .unwrap()
        .lines()
        .filter(|l| l.chars().all(|c| c.is_ascii_hexdigit() || c == ' ') && !l.is_empty())
        .map(str::to_owned)
        .collect()
}

const VALUES: usize = 8 * 10 * 15 + 6 * 10 * 12;

#[test]
fn parallel_matches_serial() {
    let parallel = run_with_threshold("1");
    let serial = run_with_threshold(&usize::MAX.to_string());
    assert_eq!(parallel.len(), VALUES);
    assert_eq!(parallel, serial);
}
