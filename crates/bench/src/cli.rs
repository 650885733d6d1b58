// Rust guideline compliant 2026-07-26

//! Command-line/environment surface.
//!
//! Every flag also falls back to a `BENCHMARK_<UPPER_NAME>` environment
//! variable via `clap`'s built-in `env` support. Boolean flags use
//! [`parse_truthy`] instead of clap's default bool parser so `1`/`yes`/`y`/
//! `on` (case-insensitive) are accepted alongside `true`/`false`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Output format shared by `--benchmark_format` and `--benchmark_out_format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Tabular, human-readable (console sink only).
    Console,
    /// `{ "context": ..., "benchmarks": [...] }`.
    Json,
    /// Fixed-column CSV.
    Csv,
}

/// `--benchmark_color` tri-state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Force color on.
    #[value(name = "true")]
    True,
    /// Force color off.
    #[value(name = "false")]
    False,
    /// Color on iff stdout is a terminal.
    Auto,
}

/// Parse the truthy-bool rule: `1`, `true`, `yes`, `y`, `on`
/// (case-insensitive) are true; everything else is false.
///
/// # Errors
///
/// Never actually errs -- unrecognised strings parse to `false` -- but
/// returns a `Result` to satisfy `clap`'s value-parser signature.
pub fn parse_truthy(s: &str) -> Result<bool, std::convert::Infallible> {
    Ok(matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "y" | "on"))
}

/// Microbenchmark harness CLI.
#[derive(Debug, Parser)]
#[command(name = "bench", about = "Adaptive microbenchmark harness")]
pub struct Cli {
    /// Print matching instance names and exit.
    #[arg(long = "benchmark_list_tests", env = "BENCHMARK_LIST_TESTS", value_parser = parse_truthy, default_value = "false")]
    pub benchmark_list_tests: bool,

    /// Restrict instances by name; `""` runs nothing, omitted runs all.
    #[arg(long = "benchmark_filter", env = "BENCHMARK_FILTER")]
    pub benchmark_filter: Option<String>,

    /// Per-run minimum accumulated time, in seconds.
    #[arg(long = "benchmark_min_time", env = "BENCHMARK_MIN_TIME")]
    pub benchmark_min_time: Option<f64>,

    /// Default repetition count.
    #[arg(long = "benchmark_repetitions", env = "BENCHMARK_REPETITIONS")]
    pub benchmark_repetitions: Option<u32>,

    /// Suppress per-run rows in the file sink.
    #[arg(
        long = "benchmark_report_aggregates_only",
        env = "BENCHMARK_REPORT_AGGREGATES_ONLY",
        value_parser = parse_truthy,
        default_value = "false"
    )]
    pub benchmark_report_aggregates_only: bool,

    /// Suppress per-run rows in the console sink.
    #[arg(
        long = "benchmark_display_aggregates_only",
        env = "BENCHMARK_DISPLAY_AGGREGATES_ONLY",
        value_parser = parse_truthy,
        default_value = "false"
    )]
    pub benchmark_display_aggregates_only: bool,

    /// Console sink format.
    #[arg(long = "benchmark_format", env = "BENCHMARK_FORMAT", value_enum, default_value = "console")]
    pub benchmark_format: ReportFormat,

    /// File sink format, used when `--benchmark_out` is set.
    #[arg(long = "benchmark_out_format", env = "BENCHMARK_OUT_FORMAT", value_enum, default_value = "json")]
    pub benchmark_out_format: ReportFormat,

    /// Also write the report to this file, in `--benchmark_out_format`.
    #[arg(long = "benchmark_out", env = "BENCHMARK_OUT")]
    pub benchmark_out: Option<PathBuf>,

    /// Colorize console output.
    #[arg(long = "benchmark_color", env = "BENCHMARK_COLOR", value_enum, default_value = "auto")]
    pub benchmark_color: ColorMode,

    /// Verbosity level, forwarded to the `tracing-subscriber` env filter.
    #[arg(long = "v", env = "BENCHMARK_V", default_value_t = 0)]
    pub v: u32,

    /// Path to a config file supplement: a JSON object of extra
    /// key/value pairs merged into the reporter [`report::Context`].
    #[arg(long = "benchmark_context", env = "BENCHMARK_CONTEXT")]
    pub benchmark_context: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthy_accepts_every_documented_spelling() {
        for s in ["1", "true", "TRUE", "yes", "Y", "on"] {
            assert!(parse_truthy(s).unwrap(), "{s} should be truthy");
        }
    }

    #[test]
    fn truthy_rejects_everything_else() {
        for s in ["0", "false", "no", "", "maybe"] {
            assert!(!parse_truthy(s).unwrap(), "{s} should not be truthy");
        }
    }

    #[test]
    fn default_flags_parse_from_program_name_alone() {
        let cli = Cli::parse_from(["bench"]);
        assert!(!cli.benchmark_list_tests);
        assert_eq!(cli.benchmark_format, ReportFormat::Console);
        assert_eq!(cli.benchmark_color, ColorMode::Auto);
    }

    #[test]
    fn filter_flag_is_captured() {
        let cli = Cli::parse_from(["bench", "--benchmark_filter=^BM_Copy"]);
        assert_eq!(cli.benchmark_filter.as_deref(), Some("^BM_Copy"));
    }
}
