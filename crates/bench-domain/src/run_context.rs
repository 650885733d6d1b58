// Rust guideline compliant 2026-07-26

//! The hexagonal port a benchmark body measures itself through.
//!
//! A trait owned by the zero-dependency `domain` crate, implemented by an
//! adapter defined elsewhere: here the adapter is the concrete `State` type
//! defined in the `bench-state` crate, which depends on this one. Declaring
//! the trait here rather than alongside `State` is what lets
//! [`crate::Family`] hold a `Box<dyn Fn(&mut dyn RunContext)>` without
//! `bench-domain` depending on `bench-state`/`bench-coordinator`.
//!
//! Every method takes concrete argument types rather than `impl Trait` or
//! generics so the trait stays object-safe.

use crate::CounterMap;

/// What a running benchmark body sees and drives, standing in for Google
/// Benchmark's `benchmark::State`.
pub trait RunContext {
    /// Advance to the next iteration and report whether the loop should
    /// keep running. Benchmark bodies structure their work as
    /// `while ctx.keep_running() { ... }`.
    fn keep_running(&mut self) -> bool;

    /// The `i`-th argument of the instance's argument tuple, or `0` if `i` is out of bounds.
    fn range(&self, i: usize) -> i64;

    /// Zero-based index of the calling thread within the instance.
    fn thread_index(&self) -> usize;

    /// Total number of threads running this instance concurrently.
    fn threads(&self) -> usize;

    /// Record the number of bytes processed, for `bytes_per_second`
    /// reporting.
    fn set_bytes_processed(&mut self, n: u64);

    /// Record the number of logical items processed, for
    /// `items_per_second` reporting.
    fn set_items_processed(&mut self, n: u64);

    /// Attach a free-form label to this run's report line.
    fn set_label(&mut self, label: &str);

    /// Manual-time mode: report the iteration's elapsed time directly
    /// rather than relying on the wall/cpu clock around the loop body.
    fn set_iteration_time(&mut self, seconds: f64);

    /// Abort the run, marking it as failed with `msg` rather than
    /// panicking. This is a user-reported condition, not a programmer
    /// error.
    fn skip_with_error(&mut self, msg: &str);

    /// Exclude the time from here until [`RunContext::resume_timing`] from
    /// the measured interval (e.g. to set up per-iteration fixtures).
    fn pause_timing(&mut self);

    /// Resume measurement after [`RunContext::pause_timing`].
    fn resume_timing(&mut self);

    /// Record the input size `n` used for asymptotic complexity fitting.
    fn set_complexity_n(&mut self, n: i64);

    /// Mutable access to this run's user-declared counters.
    fn counters(&mut self) -> &mut CounterMap;
}
