// Rust guideline compliant 2026-07-26

//! Reporter port + three concrete adapters.
//!
//! The [`Reporter`] trait mirrors Google Benchmark's own
//! `BenchmarkReporter`: a `report_context` gate, a `report_runs` called
//! once per family-or-instance group, and a final `finalize`. [`console`],
//! [`json`], and [`csv`] provide three swappable sink adapters behind that
//! one port.

mod console;
mod context;
mod csv;
mod json;
mod reporter;

pub use console::ConsoleReporter;
pub use context::Context;
pub use csv::CsvReporter;
pub use json::JsonReporter;
pub use reporter::Reporter;
