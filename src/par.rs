//! When a pass goes parallel.
//!
//! The threshold is read from `NDSPECTRA_PAR_THRESHOLD` the first time it is
//! needed and fixed for the life of the process. Unset, `0` or unparsable
//! values fall back to [`DEFAULT_PER_CORE_WORK`] elements per logical CPU.

use std::sync::OnceLock;

/// Output elements each core should own before fan-out pays off.
pub const DEFAULT_PER_CORE_WORK: usize = 4096;

pub const THRESHOLD_ENV: &str = "NDSPECTRA_PAR_THRESHOLD";

static PARALLEL_THRESHOLD: OnceLock<usize> = OnceLock::new();

fn threshold_from(value: Option<&str>, cores: usize) -> usize {
    value
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|&t| t != 0)
        .unwrap_or_else(|| DEFAULT_PER_CORE_WORK.saturating_mul(cores.max(1)))
}

/// Minimum output elements for a parallel pass.
pub fn parallel_threshold() -> usize {
    *PARALLEL_THRESHOLD.get_or_init(|| {
        let raw = std::env::var(THRESHOLD_ENV).ok();
        let threshold = threshold_from(raw.as_deref(), num_cpus::get());
        fft_debug!("parallel threshold = {} elements", threshold);
        threshold
    })
}

pub(crate) fn should_parallelize(elements: usize) -> bool {
    elements >= parallel_threshold()
}
