// Rust guideline compliant 2026-07-26

//! JSON reporter, in the tradition of Google Benchmark's `JSONReporter`;
//! buffers every group and writes one top-level
//! `{ "context": ..., "benchmarks": [...] }` object at
//! [`finalize`](Reporter::finalize) rather than streaming an array
//! incrementally.

use std::io::{self, Write as _};

use domain::RunRecord;
use serde_json::{Map, Value, json};

use crate::context::Context;
use crate::reporter::Reporter;

/// Writes `{ "context": {...}, "benchmarks": [...] }` to `W` once
/// [`finalize`](Reporter::finalize) is called.
#[derive(Debug)]
pub struct JsonReporter<W> {
    out: W,
    context: Option<Context>,
    runs: Vec<RunRecord>,
    report_aggregates_only: bool,
}

impl<W: io::Write> JsonReporter<W> {
    /// Create a reporter writing to `out`. `report_aggregates_only`
    /// suppresses [`domain::AggregateKind::Iteration`] rows, matching
    /// `--benchmark_report_aggregates_only`.
    #[must_use]
    pub fn new(out: W, report_aggregates_only: bool) -> Self {
        Self { out, context: None, runs: Vec::new(), report_aggregates_only }
    }
}

fn context_to_json(ctx: &Context) -> Value {
    let mut obj = Map::new();
    obj.insert("num_cpus".to_owned(), json!(ctx.num_cpus));
    obj.insert("mhz_per_cpu".to_owned(), json!(ctx.mhz_per_cpu));
    obj.insert("cpu_scaling_enabled".to_owned(), json!(ctx.cpu_scaling_enabled));
    obj.insert("library_build_type".to_owned(), json!(ctx.build_type));
    obj.insert("date".to_owned(), json!(ctx.date_time));
    for (key, value) in &ctx.extra {
        obj.insert(key.clone(), json!(value));
    }
    Value::Object(obj)
}

fn run_to_json(run: &RunRecord) -> Value {
    let mut obj = Map::new();
    obj.insert("name".to_owned(), json!(run.name));
    obj.insert("iterations".to_owned(), json!(run.iterations));
    obj.insert("real_time".to_owned(), json!(run.time_unit.scale_seconds(run.real_time_seconds)));
    obj.insert("cpu_time".to_owned(), json!(run.time_unit.scale_seconds(run.cpu_time_seconds)));
    obj.insert("time_unit".to_owned(), json!(run.time_unit.suffix()));

    if let Some(bytes) = run.bytes_processed {
        let seconds = run.primary_time_seconds(false).max(1e-9);
        obj.insert("bytes_per_second".to_owned(), json!(bytes as f64 / seconds));
    }
    if let Some(items) = run.items_processed {
        let seconds = run.primary_time_seconds(false).max(1e-9);
        obj.insert("items_per_second".to_owned(), json!(items as f64 / seconds));
    }
    if let Some(label) = &run.label {
        obj.insert("label".to_owned(), json!(label));
    }
    if run.is_error() {
        obj.insert("error_occurred".to_owned(), json!(true));
        obj.insert("error_message".to_owned(), json!(run.error_message.clone().unwrap_or_default()));
    }
    for counter in run.counters.iter() {
        obj.insert(counter.name.clone(), json!(counter.value));
    }

    Value::Object(obj)
}

impl<W: io::Write> Reporter for JsonReporter<W> {
    fn report_context(&mut self, ctx: &Context) -> bool {
        self.context = Some(ctx.clone());
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
        let context = self.context.as_ref().map_or_else(|| Value::Object(Map::new()), context_to_json);
        let benchmarks: Vec<Value> = self.runs.iter().map(run_to_json).collect();
        let document = json!({ "context": context, "benchmarks": benchmarks });
        if let Ok(text) = serde_json::to_string_pretty(&document) {
            let _ = writeln!(self.out, "{text}");
        } else {
            log::error!("json_reporter.finalize: failed to serialize report");
        }
        let _ = self.out.flush();
    }
}
