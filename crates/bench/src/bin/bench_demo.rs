// Rust guideline compliant 2026-07-26

//! Demo benchmark suite and entry point.
//!
//! Initializes `tracing-subscriber` before any other work, bridging the
//! `log`-facade output of every library crate via `tracing-log`'s
//! `LogTracer`.

use std::sync::Arc;
use std::time::Duration;

use bench::cli::Cli;
use bench::Harness;
use clap::Parser as _;
use domain::{BigO, CounterFlags, RunContext};
use registry::FamilyBuilder;
use state::{Fixture, fixture_fn};

/// `BM_VecSort`: sorts a vector of `n` elements, `n` driven by `--benchmark_filter`
/// instance selection via `Args`.
fn bm_vec_sort(ctx: &mut dyn RunContext) {
    let n = ctx.range(0).max(1) as usize;
    while ctx.keep_running() {
        ctx.pause_timing();
        let mut data: Vec<u64> = (0..n as u64).rev().collect();
        ctx.resume_timing();
        data.sort_unstable();
        std::hint::black_box(&data);
    }
    ctx.set_items_processed(n as u64);
    ctx.set_complexity_n(n as i64);
}

/// `BM_MemCopy`: copies `n` bytes per iteration, reporting throughput via
/// `bytes_per_second` and a `{Rate}` counter.
fn bm_mem_copy(ctx: &mut dyn RunContext) {
    let n = ctx.range(0).max(1) as usize;
    let src = vec![0xABu8; n];
    let mut dst = vec![0u8; n];
    let mut copies = 0u64;
    while ctx.keep_running() {
        dst.copy_from_slice(&src);
        std::hint::black_box(&dst);
        copies += 1;
    }
    ctx.set_bytes_processed((n as u64) * copies);
    ctx.counters().set("copies", copies as f64, CounterFlags::RATE);
}

/// `BM_FailsAlways`: demonstrates the error-reporting path.
fn bm_fails_always(ctx: &mut dyn RunContext) {
    ctx.skip_with_error("synthetic failure for the error-reporting demo");
}

struct SleepFixture {
    warmed_up: bool,
}

impl Fixture for SleepFixture {
    fn setup(&mut self, _ctx: &mut dyn RunContext) {
        self.warmed_up = true;
    }

    fn run(&mut self, ctx: &mut dyn RunContext) {
        while ctx.keep_running() {
            std::thread::sleep(Duration::from_micros(1));
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_log::LogTracer::init()?;
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    tracing::info!("bench_demo.start");

    let cli = Cli::parse();

    let mut harness = Harness::new();
    harness.register(
        FamilyBuilder::new("BM_VecSort", Arc::new(bm_vec_sort))
            .range(1 << 4, 1 << 12)
            .complexity(BigO::Auto)
            .min_time(0.1),
    )?;
    harness.register(
        FamilyBuilder::new("BM_MemCopy", Arc::new(bm_mem_copy))
            .arg(1 << 10)
            .arg(1 << 16)
            .thread_range(1, 2)
            .min_time(0.1),
    )?;
    harness.register(FamilyBuilder::new("BM_FailsAlways", Arc::new(bm_fails_always)).min_time(0.01))?;
    harness.register(
        FamilyBuilder::new("BM_SleepFixture", fixture_fn(SleepFixture { warmed_up: false })).min_time(0.01),
    )?;

    let code = harness.run(&cli)?;
    std::process::exit(code);
}
