// Rust guideline compliant 2026-07-26

//! The adaptive trial-count search and repetition loop,
//! ported from Google Benchmark's own `benchmark::internal::BenchmarkRunner`.

use std::sync::{Arc, Mutex};

use coordinator::Coordinator;
use domain::{CounterMap, Family, Instance, RunRecord};
use state::State;

use crate::global_defaults::GlobalDefaults;

/// One thread's contribution to a trial, read back from its [`State`] after
/// the benchmark body returns.
struct ThreadOutcome {
    iterations_run: u64,
    bytes_processed: u64,
    items_processed: u64,
    label: Option<String>,
    error_message: Option<String>,
    complexity_n: Option<i64>,
    counters: CounterMap,
}

impl ThreadOutcome {
    fn from_state(state: State) -> Self {
        Self {
            iterations_run: state.iterations_run(),
            bytes_processed: state.bytes_processed(),
            items_processed: state.items_processed(),
            label: state.label().map(str::to_owned),
            error_message: state.error_message().map(str::to_owned),
            complexity_n: state.complexity_n(),
            counters: state.into_counters(),
        }
    }
}

/// Run every thread of one trial (a fixed `iters` count) and collect each
/// thread's outcome. The calling thread itself runs thread 0's body rather
/// than spawning `instance.threads` separate OS threads.
fn run_trial(instance: &Instance, family: &Family, iters: u64) -> (Arc<Coordinator>, Vec<ThreadOutcome>) {
    let coordinator = Arc::new(Coordinator::new(instance.threads));
    let results: Mutex<Vec<Option<ThreadOutcome>>> = Mutex::new((0..instance.threads).map(|_| None).collect());

    std::thread::scope(|scope| {
        for thread_index in 1..instance.threads {
            let coordinator = Arc::clone(&coordinator);
            let func = Arc::clone(&family.func);
            let args = instance.args.clone();
            let threads = instance.threads;
            let use_manual_time = instance.use_manual_time;
            let results = &results;
            scope.spawn(move || {
                let mut state = State::new(thread_index, threads, args, iters, coordinator, use_manual_time);
                func(&mut state);
                results.lock().unwrap_or_else(std::sync::PoisonError::into_inner)[thread_index] =
                    Some(ThreadOutcome::from_state(state));
            });
        }

        let mut state0 = State::new(
            0,
            instance.threads,
            instance.args.clone(),
            iters,
            Arc::clone(&coordinator),
            instance.use_manual_time,
        );
        (family.func)(&mut state0);
        results.lock().unwrap_or_else(std::sync::PoisonError::into_inner)[0] = Some(ThreadOutcome::from_state(state0));
    });

    let outcomes = results
        .into_inner()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
        .into_iter()
        .map(|o| o.expect("every thread slot is filled before thread::scope returns"))
        .collect();
    (coordinator, outcomes)
}

struct MergedOutcome {
    iterations_run: u64,
    bytes_processed: u64,
    items_processed: u64,
    label: Option<String>,
    error_message: Option<String>,
    complexity_n: Option<i64>,
    counters: CounterMap,
}

fn merge_outcomes(outcomes: Vec<ThreadOutcome>) -> MergedOutcome {
    let iterations_run = outcomes.first().map_or(0, |o| o.iterations_run);
    let mut bytes_processed = 0;
    let mut items_processed = 0;
    let mut label = None;
    let mut error_message = None;
    let mut complexity_n = None;
    let mut counters = CounterMap::new();

    for outcome in outcomes {
        bytes_processed += outcome.bytes_processed;
        items_processed += outcome.items_processed;
        label = label.or(outcome.label);
        error_message = error_message.or(outcome.error_message);
        complexity_n = complexity_n.or(outcome.complexity_n);
        counters.merge_add(&outcome.counters);
    }

    MergedOutcome {
        iterations_run,
        bytes_processed,
        items_processed,
        label,
        error_message,
        complexity_n,
        counters,
    }
}

/// Compute the next trial's iteration count: grow by 1.4x the ratio still
/// needed to reach `target_seconds`, damped to at most 10x when the last
/// trial undershot badly, always at least one more iteration than last
/// time.
fn grow_iters(iters: u64, reported_seconds: f64, target_seconds: f64) -> u64 {
    let mut multiplier = (target_seconds * 1.4 / reported_seconds.max(1e-9)).max(1.0);
    if reported_seconds / target_seconds < 0.1 {
        multiplier = multiplier.min(10.0);
    }
    if multiplier <= 1.0 {
        multiplier = 2.0;
    }
    let next = ((multiplier * iters as f64).max(iters as f64 + 1.0)).round() as u64;
    next.min(1_000_000_000)
}

/// Run an optional warm-up floor before the real measurement: an adaptive
/// search identical in shape to [`run_instance`]'s, targeting
/// `instance.min_warmup_time` instead of `min_time`, whose result is
/// discarded entirely. A no-op when `min_warmup_time` is zero.
fn run_warmup(instance: &Instance, family: &Family) {
    let target = instance.min_warmup_time;
    if target <= 0.0 {
        return;
    }

    let mut iters: u64 = 1;
    loop {
        let (coordinator, outcomes) = run_trial(instance, family, iters);
        let (real_time_used, cpu_time_used, manual_time_used) = coordinator.finalize();
        let coordinator_error = coordinator.error_message();
        let merged = merge_outcomes(outcomes);
        let error_message = merged.error_message.or(coordinator_error);

        let reported_seconds = if instance.use_manual_time {
            manual_time_used
        } else if instance.use_real_time {
            real_time_used
        } else {
            cpu_time_used
        };

        let should_stop = error_message.is_some() || iters >= 1_000_000_000 || reported_seconds >= target || real_time_used >= 5.0 * target;

        if should_stop {
            return;
        }

        iters = grow_iters(iters, reported_seconds, target);
    }
}

/// Run `instance` through the full adaptive-search algorithm: an optional
/// discarded warm-up floor, then a search on the first repetition to pick
/// an iteration count that runs for at least `min_time` (or, when
/// `instance.fixed_iterations` is set, that exact count with no search at
/// all), then that same iteration count reused for every remaining
/// repetition. Returns one raw (non-aggregate) [`RunRecord`] per
/// repetition.
#[must_use]
pub fn run_instance(instance: &Instance, family: &Family, defaults: GlobalDefaults) -> Vec<RunRecord> {
    let min_time = if instance.min_time > 0.0 { instance.min_time } else { defaults.min_time };
    let repeats = if instance.repetitions > 0 { instance.repetitions } else { defaults.repetitions };

    run_warmup(instance, family);

    let mut iters: u64 = instance.fixed_iterations.unwrap_or(1);
    let mut records = Vec::with_capacity(repeats as usize);

    for repetition in 0..repeats {
        let first_attempt = repetition == 0;

        loop {
            let (coordinator, outcomes) = run_trial(instance, family, iters);
            let (real_time_used, cpu_time_used, manual_time_used) = coordinator.finalize();
            let coordinator_error = coordinator.error_message();
            let merged = merge_outcomes(outcomes);
            let error_message = merged.error_message.clone().or(coordinator_error);

            let reported_seconds = if instance.use_manual_time {
                manual_time_used
            } else if instance.use_real_time {
                real_time_used
            } else {
                cpu_time_used
            };

            let should_stop_searching = instance.fixed_iterations.is_some()
                || !first_attempt
                || error_message.is_some()
                || iters >= 1_000_000_000
                || reported_seconds >= min_time
                || real_time_used >= 5.0 * min_time;

            if should_stop_searching {
                let mut counters = merged.counters;
                counters.finalize_all(reported_seconds.max(1e-9), instance.threads as u64, iters);

                log::info!(
                    "controller.run_instance: name={} repetition={repetition} iters={iters} \
                     real_time={real_time_used:.9} cpu_time={cpu_time_used:.9}",
                    instance.name
                );

                records.push(RunRecord {
                    name: instance.name.clone(),
                    aggregate_kind: domain::AggregateKind::Iteration,
                    custom_statistic_name: None,
                    iterations: merged.iterations_run,
                    real_time_seconds: real_time_used,
                    cpu_time_seconds: cpu_time_used,
                    manual_time_seconds: instance.use_manual_time.then_some(manual_time_used),
                    time_unit: instance.time_unit,
                    bytes_processed: (merged.bytes_processed > 0).then_some(merged.bytes_processed),
                    items_processed: (merged.items_processed > 0).then_some(merged.items_processed),
                    complexity_n: merged.complexity_n,
                    label: merged.label,
                    counters,
                    threads: instance.threads,
                    repetitions: repeats,
                    repetition_index: Some(repetition),
                    error_message,
                });
                break;
            }

            iters = grow_iters(iters, reported_seconds, min_time);
        }
    }

    records
}

/// Run every instance belonging to one family, in the order given, and
/// return the full record set: each instance's raw per-repetition records,
/// its aggregate rows (mean/median/stddev/cv/custom) once it
/// has two or more repetitions, and finally the family's `_BigO`/`_RMS`
/// complexity rows once the instance flagged `last_in_family` is reached.
#[must_use]
pub fn run_family(family: &Family, instances: &[Instance], defaults: GlobalDefaults) -> Vec<RunRecord> {
    let mut all_records = Vec::new();
    let mut complexity_samples: Vec<(i64, f64)> = Vec::new();

    for instance in instances {
        let raw = run_instance(instance, family, defaults);

        if !matches!(family.complexity, domain::BigO::None) {
            if let Some(n) = raw.first().and_then(|r| r.complexity_n) {
                // The fit is against per-iteration time, not accumulated
                // time: the adaptive search runs every instance to
                // roughly the same min_time regardless of N, so
                // accumulated time alone carries no signal about N's
                // effect on cost.
                let mean_per_iteration_seconds = raw
                    .iter()
                    .map(|r| r.primary_time_seconds(instance.use_real_time) / r.iterations.max(1) as f64)
                    .sum::<f64>()
                    / raw.len() as f64;
                complexity_samples.push((n, mean_per_iteration_seconds));
            }
        }

        let aggregates = aggregate::aggregate_instance(&raw, &family.custom_statistics);
        all_records.extend(raw);
        all_records.extend(aggregates);

        if instance.last_in_family && !complexity_samples.is_empty() {
            if let Some((big_o, rms)) =
                aggregate::family_complexity_rows(&complexity_samples, &family.complexity, &family.name, family.time_unit)
            {
                all_records.push(big_o);
                all_records.push(rms);
            }
        }
    }

    all_records
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{BigO, FamilyId, TimeUnit};
    use std::sync::atomic::{AtomicU64, Ordering};

    fn instance(threads: usize, repetitions: u32, min_time: f64) -> Instance {
        Instance {
            family_id: FamilyId(0),
            name: "BM_Test".to_owned(),
            args: vec![8],
            threads,
            repetitions,
            min_time,
            min_warmup_time: 0.0,
            fixed_iterations: None,
            use_real_time: false,
            use_manual_time: false,
            complexity: BigO::None,
            time_unit: TimeUnit::default(),
            last_in_family: true,
        }
    }

    #[test]
    fn run_instance_produces_one_record_per_repetition() {
        let fam = Family::new(FamilyId(0), "BM_Test", Arc::new(|ctx: &mut dyn domain::RunContext| while ctx.keep_running() {}));
        let inst = instance(1, 3, 0.0001);
        let records = run_instance(&inst, &fam, GlobalDefaults::default());
        assert_eq!(records.len(), 3);
        for r in &records {
            assert!(r.iterations >= 1);
            assert!(!r.is_error());
        }
    }

    #[test]
    fn run_instance_with_multiple_threads_sums_items_processed() {
        let fam = Family::new(
            FamilyId(0),
            "BM_Sum",
            Arc::new(|ctx: &mut dyn domain::RunContext| {
                let mut n = 0u64;
                while ctx.keep_running() {
                    n += 1;
                }
                ctx.set_items_processed(n);
            }),
        );
        let inst = instance(3, 1, 0.0001);
        let records = run_instance(&inst, &fam, GlobalDefaults::default());
        assert_eq!(records.len(), 1);
        assert!(records[0].items_processed.unwrap() > 0);
    }

    #[test]
    fn growth_search_reaches_min_time_before_stopping() {
        static CALLS: AtomicU64 = AtomicU64::new(0);
        CALLS.store(0, Ordering::SeqCst);
        let fam = Family::new(
            FamilyId(0),
            "BM_Count",
            Arc::new(|ctx: &mut dyn domain::RunContext| {
                while ctx.keep_running() {
                    CALLS.fetch_add(1, Ordering::SeqCst);
                }
            }),
        );
        let inst = instance(1, 1, 0.00001);
        let records = run_instance(&inst, &fam, GlobalDefaults::default());
        assert_eq!(records.len(), 1);
        assert!(CALLS.load(Ordering::SeqCst) >= 1);
    }

    #[test]
    fn skip_with_error_marks_the_record() {
        let fam = Family::new(
            FamilyId(0),
            "BM_Fails",
            Arc::new(|ctx: &mut dyn domain::RunContext| {
                ctx.skip_with_error("deliberate failure");
            }),
        );
        let inst = instance(1, 1, 0.001);
        let records = run_instance(&inst, &fam, GlobalDefaults::default());
        assert_eq!(records.len(), 1);
        assert!(records[0].is_error());
        assert_eq!(records[0].error_message.as_deref(), Some("deliberate failure"));
    }

    #[test]
    fn fixed_iterations_bypasses_the_adaptive_search() {
        static CALLS: AtomicU64 = AtomicU64::new(0);
        CALLS.store(0, Ordering::SeqCst);
        let fam = Family::new(
            FamilyId(0),
            "BM_Fixed",
            Arc::new(|ctx: &mut dyn domain::RunContext| {
                while ctx.keep_running() {
                    CALLS.fetch_add(1, Ordering::SeqCst);
                }
            }),
        );
        // An unreachable min_time: if the search ran at all it would never
        // converge within a reasonable iteration count.
        let mut inst = instance(1, 2, 1_000.0);
        inst.fixed_iterations = Some(37);
        let records = run_instance(&inst, &fam, GlobalDefaults::default());
        assert_eq!(records.len(), 2);
        for r in &records {
            assert_eq!(r.iterations, 37);
        }
    }

    #[test]
    fn warmup_runs_are_not_counted_in_the_returned_records() {
        static CALLS: AtomicU64 = AtomicU64::new(0);
        CALLS.store(0, Ordering::SeqCst);
        let fam = Family::new(
            FamilyId(0),
            "BM_Warm",
            Arc::new(|ctx: &mut dyn domain::RunContext| {
                while ctx.keep_running() {
                    CALLS.fetch_add(1, Ordering::SeqCst);
                }
            }),
        );
        let mut inst = instance(1, 1, 0.0001);
        inst.min_warmup_time = 0.0001;
        let records = run_instance(&inst, &fam, GlobalDefaults::default());
        assert_eq!(records.len(), 1, "warm-up must not add extra records");
        let total_calls = CALLS.load(Ordering::SeqCst);
        assert!(total_calls > records[0].iterations, "warm-up should have run the body some extra times");
    }

    #[test]
    fn run_family_emits_complexity_rows_once_last_instance_completes() {
        let fam = Family {
            complexity: BigO::ON,
            ..Family::new(
                FamilyId(0),
                "BM_Linear",
                Arc::new(|ctx: &mut dyn domain::RunContext| {
                    let n = ctx.range(0);
                    ctx.set_complexity_n(n);
                    while ctx.keep_running() {}
                }),
            )
        };

        let mut instances = Vec::new();
        for &n in &[1_i64, 2, 4, 8] {
            let mut inst = instance(1, 1, 0.00001);
            inst.args = vec![n];
            inst.complexity = BigO::ON;
            inst.last_in_family = n == 8;
            instances.push(inst);
        }

        let records = run_family(&fam, &instances, GlobalDefaults::default());
        assert!(records.iter().any(|r| r.aggregate_kind == domain::AggregateKind::BigO));
        assert!(records.iter().any(|r| r.aggregate_kind == domain::AggregateKind::Rms));
    }

    #[test]
    fn complexity_fit_uses_per_iteration_time_not_accumulated_time() {
        // Every instance is adaptively searched to roughly the same total
        // min_time regardless of N, so only a per-iteration fit can recover
        // the underlying N^2 cost; a fit against accumulated time would
        // degenerate toward O(1) with a high RMS.
        let fam = Family {
            complexity: BigO::ONSquared,
            ..Family::new(
                FamilyId(0),
                "BM_Quadratic",
                Arc::new(|ctx: &mut dyn domain::RunContext| {
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
                }),
            )
        };

        let mut instances = Vec::new();
        for &n in &[1_i64, 2, 4, 8, 16, 32] {
            let mut inst = instance(1, 1, 0.002);
            inst.args = vec![n];
            inst.complexity = BigO::ONSquared;
            inst.last_in_family = n == 32;
            instances.push(inst);
        }

        let records = run_family(&fam, &instances, GlobalDefaults::default());
        let rms = records.iter().find(|r| r.aggregate_kind == domain::AggregateKind::Rms).expect("RMS row");
        let rms_percent = rms.real_time_seconds * rms.time_unit.from_seconds_factor();
        assert!(rms_percent <= 20.0, "rms% too high for a clean N^2 workload: {rms_percent}");
    }
}
