// Test intent: NDSPECTRA_PAR_THRESHOLD is honoured and bad values fall back to the heuristic.
#![cfg(all(feature = "parallel", feature = "std"))]

use ndspectra::par::{parallel_threshold, DEFAULT_PER_CORE_WORK, THRESHOLD_ENV};
use std::process::Command;

const MARKER: &str = "THRESHOLD=";

#[test]
fn print_threshold() {
    // libtest prints `test print_threshold ... ` without a newline first.
    println!("\n{MARKER}{}", parallel_threshold());
}

fn threshold_with(value: &str) -> usize {
    let exe = std::env::current_exe().unwrap();
    let output = Command::new(&exe)
        .env(THRESHOLD_ENV, value)
        .args(["--exact", "print_threshold", "--nocapture"])
        .output()
        .expect("run threshold test");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let value = stdout
        .lines()
        .find_map(|l| l.trim().strip_prefix(MARKER))
        .and_then(|v| v.parse().ok());
    value.unwrap_or_else(|| panic!("no threshold line in output:\n{stdout}"))
}

#[test]
fn env_value_sets_threshold() {
    assert_eq!(threshold_with("32"), 32);
    assert_eq!(threshold_with("64"), 64);
}

#[test]
fn zero_or_garbage_uses_heuristic() {
    let heuristic = threshold_with("0");
    assert!(heuristic >= DEFAULT_PER_CORE_WORK);
    assert_eq!(heuristic % DEFAULT_PER_CORE_WORK, 0);
    assert_eq!(threshold_with("not-a-number"), heuristic);
}
