// Rust guideline compliant 2026-07-26

//! The reporter port.

use domain::RunRecord;

use crate::context::Context;

/// Receives benchmark output. Implementations MUST accept both a
/// single-run group and an aggregated-run group in [`report_runs`](Self::report_runs).
///
/// Object-safe so the orchestration crate can hold `Vec<Box<dyn Reporter>>`
/// for simultaneous console + file sinks.
pub trait Reporter {
    /// Called once, before any runs, with host/build facts. Returning
    /// `false` aborts the whole run.
    fn report_context(&mut self, ctx: &Context) -> bool;

    /// Called once per family-or-instance group.
    fn report_runs(&mut self, runs: &[RunRecord]);

    /// Called once, after the last group.
    fn finalize(&mut self);
}
