// Rust guideline compliant 2026-07-26

//! Global fallbacks used when an instance doesn't override them:
//! `min_time := instance.min_time or global_flag_min_time`.

/// Process-wide defaults the controller falls back to when an instance
/// doesn't specify its own (`--benchmark_min_time`/`--benchmark_repetitions`).
#[derive(Debug, Clone, Copy)]
pub struct GlobalDefaults {
    /// Fallback minimum measurement time per repetition, in seconds.
    pub min_time: f64,
    /// Fallback repetition count.
    pub repetitions: u32,
}

impl Default for GlobalDefaults {
    fn default() -> Self {
        Self { min_time: 0.5, repetitions: 1 }
    }
}
