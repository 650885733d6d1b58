// Rust guideline compliant 2026-07-26

//! A single benchmark instance: one concrete (argument tuple, thread count)
//! combination expanded from a [`crate::Family`].

use crate::family::{BigO, FamilyId};
use crate::time_unit::TimeUnit;

/// One runnable expansion of a family: a specific argument tuple at a
/// specific thread count, with the family's knobs resolved to concrete
/// values, in the tradition of Google Benchmark's own `BenchmarkInstance`.
#[derive(Debug, Clone)]
pub struct Instance {
    /// The family this instance was expanded from.
    pub family_id: FamilyId,
    /// Fully suffixed display name, e.g. `"BM_StringCopy/8/threads:4"`.
    pub name: String,
    /// This instance's argument tuple.
    pub args: Vec<i64>,
    /// Number of threads this instance runs with.
    pub threads: usize,
    /// Number of repetitions to run.
    pub repetitions: u32,
    /// Minimum measurement time per repetition, in seconds.
    pub min_time: f64,
    /// Minimum warm-up time before measurement begins.
    pub min_warmup_time: f64,
    /// Fixed iteration count, bypassing the adaptive search entirely.
    pub fixed_iterations: Option<u64>,
    /// Wall-clock time is the primary measurement for this instance.
    pub use_real_time: bool,
    /// The callable reports iteration time itself.
    pub use_manual_time: bool,
    /// Asymptotic complexity fitting mode, inherited from the family.
    pub complexity: BigO,
    /// Unit timings are reported in.
    pub time_unit: TimeUnit,
    /// Whether this is the last instance expanded from its family --
    /// reporters use this to decide whether to draw a family separator.
    pub last_in_family: bool,
}

impl Instance {
    /// Whether this instance should be skipped entirely: a thread count of
    /// zero is a configuration error rather than a degenerate-but-valid
    /// case.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.threads > 0 && self.repetitions > 0
    }
}
