// Rust guideline compliant 2026-07-26

//! Tabular console reporter, in the tradition of Google Benchmark's own
//! `ConsoleReporter`.

use std::io::{self, Write as _};

use domain::{AggregateKind, RunRecord};
use owo_colors::OwoColorize as _;

use crate::context::Context;
use crate::reporter::Reporter;

/// Prints a `Benchmark | Time | CPU | Iterations | <counters>` table to
/// `W`. Aggregated rows (`_mean`/`_BigO`/...) are colored blue, plain runs
/// green, errors red -- matching Google Benchmark's own
/// `COLOR_GREEN`/`COLOR_BLUE`/`COLOR_RED` convention.
#[derive(Debug)]
pub struct ConsoleReporter<W> {
    out: W,
    name_field_width: usize,
    display_aggregates_only: bool,
    use_color: bool,
}

impl<W: io::Write> ConsoleReporter<W> {
    /// Create a reporter writing to `out`. `display_aggregates_only`
    /// suppresses [`AggregateKind::Iteration`] rows, matching
    /// `--benchmark_display_aggregates_only`.
    #[must_use]
    pub fn new(out: W, display_aggregates_only: bool, use_color: bool) -> Self {
        Self { out, name_field_width: 0, display_aggregates_only, use_color }
    }

    fn colorize(&self, text: &str, is_aggregate: bool, is_error: bool) -> String {
        if !self.use_color {
            return text.to_owned();
        }
        if is_error {
            text.red().to_string()
        } else if is_aggregate {
            text.blue().to_string()
        } else {
            text.green().to_string()
        }
    }

    fn print_run(&mut self, run: &RunRecord) {
        let is_aggregate = !matches!(run.aggregate_kind, AggregateKind::Iteration);
        let name = self.colorize(&format!("{:<width$}", run.name, width = self.name_field_width), is_aggregate, run.is_error());
        if run.is_error() {
            let msg = run.error_message.as_deref().unwrap_or("");
            let _ = writeln!(self.out, "{name} {}", self.colorize(&format!("ERROR OCCURRED: '{msg}'"), is_aggregate, true));
            return;
        }

        let unit = run.time_unit.suffix();
        let real = run.time_unit.scale_seconds(run.real_time_seconds);
        let cpu = run.time_unit.scale_seconds(run.cpu_time_seconds);
        let mut line = format!("{name} {real:>10.2} {unit:<3} {cpu:>10.2} {unit:<3} {:>10}", run.iterations);

        if let Some(bytes) = run.bytes_processed {
            let seconds = run.primary_time_seconds(false).max(1e-9);
            line.push_str(&format!(" {:>12.2}B/s", bytes as f64 / seconds));
        }
        if let Some(items) = run.items_processed {
            let seconds = run.primary_time_seconds(false).max(1e-9);
            line.push_str(&format!(" {:>12.2} items/s", items as f64 / seconds));
        }
        if let Some(label) = &run.label {
            line.push_str(&format!(" {label}"));
        }
        for counter in run.counters.iter() {
            line.push_str(&format!(" {}={:.3}", counter.name, counter.value));
        }

        let _ = writeln!(self.out, "{line}");
    }
}

impl<W: io::Write> Reporter for ConsoleReporter<W> {
    fn report_context(&mut self, ctx: &Context) -> bool {
        self.name_field_width = ctx.name_field_width;

        let plural = if ctx.num_cpus > 1 { "s" } else { "" };
        let _ = writeln!(self.out, "Run on ({} X {:.0} MHz CPU{plural})", ctx.num_cpus, ctx.mhz_per_cpu);
        let _ = writeln!(self.out, "{}", ctx.date_time);
        for (key, value) in &ctx.extra {
            let _ = writeln!(self.out, "{key}: {value}");
        }
        if ctx.cpu_scaling_enabled {
            let _ = writeln!(
                self.out,
                "***WARNING*** CPU scaling is enabled, the benchmark real time measurements may be noisy."
            );
        }
        if ctx.build_type == "debug" {
            let _ = writeln!(self.out, "***WARNING*** Library was built as DEBUG. Timings may be affected.");
        }

        let header = format!("{:<width$} {:>13} {:>13} {:>10}", "Benchmark", "Time", "CPU", "Iterations", width = ctx.name_field_width);
        let _ = writeln!(self.out, "{header}");
        let _ = writeln!(self.out, "{}", "-".repeat(header.len()));
        true
    }

    fn report_runs(&mut self, runs: &[RunRecord]) {
        for run in runs {
            if self.display_aggregates_only && matches!(run.aggregate_kind, AggregateKind::Iteration) {
                continue;
            }
            self.print_run(run);
        }
    }

    fn finalize(&mut self) {
        let _ = self.out.flush();
    }
}
