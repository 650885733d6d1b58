// Rust guideline compliant 2026-07-26

//! Workspace-wide error type.
//!
//! Most failure modes in this harness are non-fatal (logged and defaulted)
//! or user-reported (`skip_with_error`, carried on the `RunRecord` rather
//! than this enum). `Error` covers the handful of failures that *do* need
//! to propagate as a `Result`: invalid configuration, filter compilation,
//! reporter rejection, and sink-open failure. Programmer-contract
//! violations are not represented here -- they panic/abort at the call
//! site.

/// Errors that can surface from the public API of the benchmark harness.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A family or instance configuration failed validation.
    #[error("invalid benchmark configuration: {reason}")]
    InvalidConfig {
        /// Human-readable description of the problem.
        reason: String,
    },
    /// `--benchmark_filter` (or an equivalent programmatic filter) failed to
    /// compile as a regular expression.
    ///
    /// An invalid filter is typically reported to stderr with matching
    /// falling back to the empty list; this variant exists for callers that
    /// want the failure as a `Result` instead of relying on the empty-list
    /// convention.
    #[error("filter regex failed to compile: {0}")]
    FilterCompile(String),
    /// A [`crate::RunContext`] implementation's reporter rejected the run by
    /// returning `false` from `report_context`.
    #[error("reporter rejected the run context")]
    ReporterRejected,
    /// Opening a file-based reporter sink failed.
    #[error("failed to open report sink {path}: {source}")]
    SinkOpen {
        /// Path that failed to open.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
