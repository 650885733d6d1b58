// Rust guideline compliant 2026-07-26

//! End-to-end scenarios run against the public `Harness` surface: register
//! families, run through a temp-file JSON sink, parse the result back and
//! assert on it -- a round trip through the real reporter rather than
//! asserting on in-memory records directly.

use std::sync::Arc;

use bench::cli::Cli;
use bench::Harness;
use clap::Parser as _;
use domain::{BigO, CounterFlags, RunContext};
use registry::FamilyBuilder;
use serde_json::Value;

fn run_and_parse(harness: &Harness, extra_args: &[&str]) -> Value {
    let out = tempfile::NamedTempFile::new().expect("create temp file");
    let path = out.path().to_str().unwrap().to_owned();
    let mut args = vec!["bench", "--benchmark_out_format=json", "--benchmark_out"];
    args.push(&path);
    args.extend_from_slice(extra_args);
    let cli = Cli::parse_from(args);
    let code = harness.run(&cli).expect("harness run should succeed");
    assert_eq!(code, 0, "expected a clean exit code");
    let text = std::fs::read_to_string(out.path()).expect("read report file");
    serde_json::from_str(&text).expect("report file should be valid JSON")
}

fn benchmarks<'a>(doc: &'a Value, name_prefix: &str) -> Vec<&'a Value> {
    doc["benchmarks"]
        .as_array()
        .expect("benchmarks array")
        .iter()
        .filter(|b| b["name"].as_str().unwrap_or_default().starts_with(name_prefix))
        .collect()
}

#[test]
fn scenario_1_empty_body_three_repetitions_yields_aggregates() {
    let mut harness = Harness::new();
    harness
        .register(
            FamilyBuilder::new("BM_Empty", Arc::new(|ctx: &mut dyn RunContext| while ctx.keep_running() {}))
                .repetitions(3)
                .min_time(0.001),
        )
        .unwrap();

    let doc = run_and_parse(&harness, &[]);
    let rows = benchmarks(&doc, "BM_Empty");

    let raw_name = "BM_Empty/min_time:0.001/repeats:3";
    let raw: Vec<_> = rows.iter().filter(|r| r["name"] == raw_name).collect();
    assert_eq!(raw.len(), 3, "expected 3 raw repetitions, got {rows:?}");
    for r in &raw {
        assert!(r["iterations"].as_u64().unwrap() >= 1);
    }

    for suffix in ["_mean", "_median", "_stddev", "_cv"] {
        let name = format!("{raw_name}{suffix}");
        assert!(rows.iter().any(|r| r["name"] == name.as_str()), "missing {name}");
    }
}

#[test]
fn scenario_2_rate_counter_matches_items_per_second() {
    let mut harness = Harness::new();
    harness
        .register(
            FamilyBuilder::new("BM_Items", Arc::new(items_body))
                .repetitions(1)
                .min_time(0.02),
        )
        .unwrap();

    let doc = run_and_parse(&harness, &[]);
    let rows = benchmarks(&doc, "BM_Items");
    let raw = rows
        .iter()
        .find(|r| r["name"] == "BM_Items/min_time:0.020/repeats:1")
        .expect("raw row");

    let iterations = raw["iterations"].as_u64().unwrap() as f64;
    let seconds = raw["real_time"].as_f64().unwrap() * raw["time_unit"].as_str().map_or(1e-9, time_unit_scale);
    let reported_rate = raw["items_rate"].as_f64().expect("items_rate counter field");
    let expected_rate = 42.0 * iterations / seconds;
    assert!(
        (reported_rate - expected_rate).abs() / expected_rate < 0.1,
        "reported={reported_rate} expected={expected_rate}"
    );
}

fn items_body(ctx: &mut dyn RunContext) {
    let mut total = 0u64;
    while ctx.keep_running() {
        total += 42;
        ctx.set_items_processed(total);
        // The counter value must be the per-iteration quantity (42), not
        // the running total: `{Rate, IterationInvariant}` finalizes as
        // `value / elapsed * iterations`, already multiplying by iteration
        // count.
        ctx.counters().set("items_rate", 42.0, CounterFlags::RATE | CounterFlags::ITERATION_INVARIANT);
    }
}

fn time_unit_scale(unit: &str) -> f64 {
    match unit {
        "ns" => 1e-9,
        "us" => 1e-6,
        "ms" => 1e-3,
        _ => 1.0,
    }
}

#[test]
fn scenario_3_range_names_and_filter() {
    let mut harness = Harness::new();
    harness
        .register(FamilyBuilder::new("BM_Range", Arc::new(|ctx: &mut dyn RunContext| while ctx.keep_running() {})).range(1, 16).min_time(0.001))
        .unwrap();

    let doc = run_and_parse(&harness, &[]);
    let mut names: Vec<&str> = benchmarks(&doc, "BM_Range").iter().map(|r| r["name"].as_str().unwrap()).collect();
    names.sort();
    for n in [1, 2, 4, 8, 16] {
        let expected = format!("BM_Range/{n}/min_time:0.001");
        assert!(names.contains(&expected.as_str()), "missing {expected} in {names:?}");
    }

    let filtered_doc = run_and_parse(&harness, &["--benchmark_filter=BM_Range/[24]/min_time"]);
    let filtered: Vec<&str> = benchmarks(&filtered_doc, "BM_Range")
        .iter()
        .filter(|r| {
            let n = r["name"].as_str().unwrap();
            n == "BM_Range/2/min_time:0.001" || n == "BM_Range/4/min_time:0.001"
        })
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(filtered.len(), 2);
}

#[test]
fn scenario_4_manual_time_matches_reported_iteration_time() {
    let mut harness = Harness::new();
    harness
        .register(
            FamilyBuilder::new("BM_Manual", Arc::new(manual_time_body))
                .threads(4)
                .use_manual_time()
                .repetitions(1)
                .min_time(0.01),
        )
        .unwrap();

    let doc = run_and_parse(&harness, &[]);
    let raw = benchmarks(&doc, "BM_Manual")
        .into_iter()
        .find(|r| r["name"] == "BM_Manual/threads:4/min_time:0.010/repeats:1/manual_time")
        .expect("raw row");
    let iterations = raw["iterations"].as_u64().unwrap() as f64;
    let seconds = raw["real_time"].as_f64().unwrap() * time_unit_scale(raw["time_unit"].as_str().unwrap());
    let expected = iterations * 0.001;
    assert!((seconds - expected).abs() / expected < 0.5, "seconds={seconds} expected={expected}");
}

fn manual_time_body(ctx: &mut dyn RunContext) {
    while ctx.keep_running() {
        ctx.set_iteration_time(0.001);
    }
}

#[test]
fn scenario_5_quadratic_complexity_fits_with_low_rms() {
    let mut harness = Harness::new();
    harness
        .register(
            FamilyBuilder::new("BM_Quadratic", Arc::new(quadratic_body))
                .args(vec![1])
                .args(vec![2])
                .args(vec![4])
                .args(vec![8])
                .args(vec![16])
                .args(vec![32])
                .complexity(BigO::ONSquared)
                .repetitions(1)
                .min_time(0.001),
        )
        .unwrap();

    let doc = run_and_parse(&harness, &[]);
    let rows = benchmarks(&doc, "BM_Quadratic");
    let big_o = rows.iter().find(|r| r["name"] == "BM_Quadratic_BigO").expect("BigO row");
    assert_eq!(big_o["label"], "O(N^2)");
    let rms = rows.iter().find(|r| r["name"] == "BM_Quadratic_RMS").expect("RMS row");
    assert!(rms["real_time"].as_f64().unwrap() <= 5.0, "rms% too high: {rms:?}");
}

fn quadratic_body(ctx: &mut dyn RunContext) {
    let n = ctx.range(0).max(1);
    ctx.set_complexity_n(n);
    while ctx.keep_running() {
        let mut acc = 0i64;
        for i in 0..n {
            for j in 0..n {
                acc = acc.wrapping_add(i * j);
            }
        }
        std::hint::black_box(acc);
    }
}

#[test]
fn scenario_6_filter_runs_only_matching_family() {
    use std::sync::atomic::{AtomicBool, Ordering};
    static A_CALLED: AtomicBool = AtomicBool::new(false);
    static B_CALLED: AtomicBool = AtomicBool::new(false);

    let mut harness = Harness::new();
    harness
        .register(
            FamilyBuilder::new(
                "A",
                Arc::new(|ctx: &mut dyn RunContext| {
                    A_CALLED.store(true, Ordering::SeqCst);
                    while ctx.keep_running() {}
                }),
            )
            .min_time(0.001),
        )
        .unwrap();
    harness
        .register(
            FamilyBuilder::new(
                "B",
                Arc::new(|ctx: &mut dyn RunContext| {
                    B_CALLED.store(true, Ordering::SeqCst);
                    while ctx.keep_running() {}
                }),
            )
            .min_time(0.001),
        )
        .unwrap();

    let doc = run_and_parse(&harness, &["--benchmark_filter=^B/min_time:0.001$"]);
    let names: Vec<&str> = doc["benchmarks"].as_array().unwrap().iter().map(|r| r["name"].as_str().unwrap()).collect();
    assert!(names.iter().all(|n| *n == "B/min_time:0.001"), "expected only B, got {names:?}");
    assert!(!A_CALLED.load(Ordering::SeqCst), "A's callable must never run");
    assert!(B_CALLED.load(Ordering::SeqCst));
}
