// Rust guideline compliant 2026-07-26

//! Iteration controller: for one instance, decides how many iterations
//! yield a significant measurement, then repeats.
//!
//! Orchestration style -- a `run` loop threading counted state through a
//! small number of owned collaborators; the trial-growth heuristic itself
//! (1.4x overshoot, 10x damping, 5x min_time watchdog) is ported verbatim
//! from Google Benchmark's own `BenchmarkRunner`.

mod global_defaults;
mod runner;

pub use global_defaults::GlobalDefaults;
pub use runner::{run_family, run_instance};
