// Rust guideline compliant 2026-07-26

//! CSV reporter, in the tradition of Google Benchmark's `CSVReporter`.
//!
//! Google Benchmark's own CSV reporter prints a header before every
//! `ReportRuns` call, recomputing the counter-name set from just that
//! group. A single fixed header for the whole file reads more naturally
//! for this harness, so this reporter buffers every group and writes one
//! header (with the union of every counter name seen) at
//! [`finalize`](Reporter::finalize), the same buffering shape
//! `JsonReporter` uses.

use std::collections::BTreeSet;
use std::io::{self, Write as _};

use domain::RunRecord;

use crate::context::Context;
use crate::reporter::Reporter;

const FIXED_COLUMNS: [&str; 10] = [
    "name",
    "iterations",
    "real_time",
    "cpu_time",
    "time_unit",
    "bytes_per_second",
    "items_per_second",
    "label",
    "error_occurred",
    "error_message",
];

/// Writes the fixed-column CSV format to `W`.
#[derive(Debug)]
pub struct CsvReporter<W> {
    out: W,
    runs: Vec<RunRecord>,
    report_aggregates_only: bool,
}

impl<W: io::Write> CsvReporter<W> {
    /// Create a reporter writing to `out`. `report_aggregates_only`
    /// suppresses [`domain::AggregateKind::Iteration`] rows, matching
    /// `--benchmark_report_aggregates_only`.
    #[must_use]
    pub fn new(out: W, report_aggregates_only: bool) -> Self {
        Self { out, runs: Vec::new(), report_aggregates_only }
    }
}

/// Double embedded quotes and wrap the field in double quotes -- the
/// quoting rule applied to `name`/`label`/`error_message`.
fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn format_row(run: &RunRecord, counter_names: &[String]) -> String {
    let mut cols = vec![quote(&run.name)];

    if run.is_error() {
        cols.push(String::new()); // iterations
        cols.push(String::new()); // real_time
        cols.push(String::new()); // cpu_time
        cols.push(String::new()); // time_unit
        cols.push(String::new()); // bytes_per_second
        cols.push(String::new()); // items_per_second
        cols.push(String::new()); // label
        cols.push("true".to_owned());
        cols.push(quote(run.error_message.as_deref().unwrap_or("")));
        cols.extend(counter_names.iter().map(|_| String::new()));
        return cols.join(",");
    }

    cols.push(run.iterations.to_string());
    cols.push(format!("{}", run.time_unit.scale_seconds(run.real_time_seconds)));
    cols.push(format!("{}", run.time_unit.scale_seconds(run.cpu_time_seconds)));
    cols.push(run.time_unit.suffix().to_owned());
    cols.push(run.bytes_processed.map_or_else(String::new, |bytes| {
        let seconds = run.primary_time_seconds(false).max(1e-9);
        format!("{}", bytes as f64 / seconds)
    }));
    cols.push(run.items_processed.map_or_else(String::new, |items| {
        let seconds = run.primary_time_seconds(false).max(1e-9);
        format!("{}", items as f64 / seconds)
    }));
    cols.push(run.label.as_deref().map_or_else(String::new, quote));
    cols.push(String::new()); // error_occurred
    cols.push(String::new()); // error_message

    for name in counter_names {
        cols.push(run.counters.get(name).map_or_else(String::new, |c| format!("{}", c.value)));
    }
    cols.join(",")
}

impl<W: io::Write> Reporter for CsvReporter<W> {
    fn report_context(&mut self, _ctx: &Context) -> bool {
        true
    }

    fn report_runs(&mut self, runs: &[RunRecord]) {
        for run in runs {
            if self.report_aggregates_only && matches!(run.aggregate_kind, domain::AggregateKind::Iteration) {
                continue;
            }
            self.runs.push(run.clone());
        }
    }

    fn finalize(&mut self) {
        let mut counter_names: BTreeSet<String> = BTreeSet::new();
        for run in &self.runs {
            for counter in run.counters.iter() {
                counter_names.insert(counter.name.clone());
            }
        }
        let counter_names: Vec<String> = counter_names.into_iter().collect();

        let mut header = FIXED_COLUMNS.join(",");
        for name in &counter_names {
            header.push(',');
            header.push_str(name);
        }
        let _ = writeln!(self.out, "{header}");

        for run in &self.runs {
            let _ = writeln!(self.out, "{}", format_row(run, &counter_names));
        }
        let _ = self.out.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{AggregateKind, CounterFlags, CounterMap, TimeUnit};

    fn sample_run(name: &str) -> RunRecord {
        RunRecord {
            name: name.to_owned(),
            aggregate_kind: AggregateKind::Iteration,
            custom_statistic_name: None,
            iterations: 10,
            real_time_seconds: 1.0,
            cpu_time_seconds: 1.0,
            manual_time_seconds: None,
            time_unit: TimeUnit::S,
            bytes_processed: None,
            items_processed: None,
            complexity_n: None,
            label: None,
            counters: CounterMap::new(),
            threads: 1,
            repetitions: 1,
            repetition_index: Some(0),
            error_message: None,
        }
    }

    #[test]
    fn header_lists_fixed_columns_plus_sorted_counters() {
        let mut out = Vec::new();
        let mut reporter = CsvReporter::new(&mut out, false);
        let mut run = sample_run("BM_X");
        run.counters.set("zeta", 1.0, CounterFlags::NONE);
        run.counters.set("alpha", 2.0, CounterFlags::NONE);
        reporter.report_context(&Context::new(1, 1000.0, false, 5, "release", "now"));
        reporter.report_runs(&[run]);
        reporter.finalize();

        let text = String::from_utf8(out).unwrap();
        let header = text.lines().next().unwrap();
        assert!(header.ends_with("alpha,zeta"));
    }

    #[test]
    fn quotes_embedded_double_quotes_in_name() {
        let mut out = Vec::new();
        let mut reporter = CsvReporter::new(&mut out, false);
        reporter.report_runs(&[sample_run("BM_\"Weird\"")]);
        reporter.finalize();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\"BM_\"\"Weird\"\"\""));
    }

    #[test]
    fn error_row_leaves_timing_columns_blank() {
        let mut out = Vec::new();
        let mut reporter = CsvReporter::new(&mut out, false);
        let mut run = sample_run("BM_Fails");
        run.error_message = Some("boom".to_owned());
        reporter.report_runs(&[run]);
        reporter.finalize();
        let text = String::from_utf8(out).unwrap();
        let row = text.lines().nth(1).unwrap();
        assert!(row.contains(",true,\"boom\""));
    }
}
