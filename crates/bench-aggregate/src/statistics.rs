// Rust guideline compliant 2026-07-26

//! Built-in and custom aggregate statistics across a vector of
//! same-instance [`RunRecord`]s.

use domain::{AggregateKind, CounterFlags, CounterMap, NamedStatistic, RunRecord};

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

fn stddev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}

fn coefficient_of_variation(values: &[f64]) -> f64 {
    let m = mean(values);
    if m == 0.0 { 0.0 } else { stddev(values) / m }
}

/// Apply `stat_fn` across every numeric quantity present on `records`
/// (real time, cpu time, bytes/sec, items/sec, and every counter), kept as
/// a template method so the four built-in statistics and any custom one
/// share the same field-selection logic.
/// Per-record bytes/sec (or items/sec) implied by `value` and that
/// record's own elapsed time, matching how the reporters derive the same
/// rate from a raw `Iteration` row (`value / primary_time_seconds(false)`).
fn implied_rate(value: Option<u64>, record: &RunRecord) -> Option<f64> {
    value.map(|v| v as f64 / record.primary_time_seconds(false).max(1e-9))
}

fn apply_across_fields(
    records: &[RunRecord],
    kind: AggregateKind,
    custom_statistic_name: Option<&str>,
    stat_fn: impl Fn(&[f64]) -> f64,
) -> RunRecord {
    let reals: Vec<f64> = records.iter().map(|r| r.real_time_seconds).collect();
    let cpus: Vec<f64> = records.iter().map(|r| r.cpu_time_seconds).collect();
    let aggregated_cpu_seconds = stat_fn(&cpus);

    let mut counters = CounterMap::new();
    if let Some(first) = records.first() {
        for counter in first.counters.iter() {
            let values: Vec<f64> = records
                .iter()
                .map(|r| r.counters.get(&counter.name).map_or(0.0, |c| c.value))
                .collect();
            counters.set(counter.name.clone(), stat_fn(&values), CounterFlags::NONE);
        }
    }

    // Reporters recompute bytes_per_second/items_per_second from the raw
    // count divided by this record's own elapsed time, so storing
    // stat_fn(rates) * aggregated_time here survives that later division
    // and reproduces the rate statistic rather than a raw-count statistic
    // -- the same pre-multiplication trick the complexity RMS row uses.
    let bytes_rates: Option<Vec<f64>> = records.iter().map(|r| implied_rate(r.bytes_processed, r)).collect();
    let items_rates: Option<Vec<f64>> = records.iter().map(|r| implied_rate(r.items_processed, r)).collect();
    let bytes_processed = bytes_rates.map(|rates| (stat_fn(&rates) * aggregated_cpu_seconds).round() as u64);
    let items_processed = items_rates.map(|rates| (stat_fn(&rates) * aggregated_cpu_seconds).round() as u64);

    let name_suffix = custom_statistic_name.map_or_else(|| kind.name_suffix().to_owned(), |n| format!("_{n}"));

    RunRecord {
        name: format!("{}{name_suffix}", records[0].name),
        aggregate_kind: kind,
        custom_statistic_name: custom_statistic_name.map(str::to_owned),
        iterations: records[0].iterations,
        real_time_seconds: stat_fn(&reals),
        cpu_time_seconds: aggregated_cpu_seconds,
        manual_time_seconds: None,
        time_unit: records[0].time_unit,
        bytes_processed,
        items_processed,
        complexity_n: None,
        label: None,
        counters,
        threads: records[0].threads,
        repetitions: records[0].repetitions,
        repetition_index: None,
        error_message: None,
    }
}

/// Compute the built-in mean/median/stddev/cv rows plus one row per custom
/// statistic, over `records` (already checked by the caller to hold at
/// least two entries).
#[must_use]
pub fn aggregate_statistics(records: &[RunRecord], custom_statistics: &[NamedStatistic]) -> Vec<RunRecord> {
    let mut out = vec![
        apply_across_fields(records, AggregateKind::Mean, None, mean),
        apply_across_fields(records, AggregateKind::Median, None, median),
        apply_across_fields(records, AggregateKind::Stddev, None, stddev),
        apply_across_fields(records, AggregateKind::Cv, None, coefficient_of_variation),
    ];
    for stat in custom_statistics {
        out.push(apply_across_fields(records, AggregateKind::Custom, Some(&stat.name), |values| {
            (stat.compute)(values)
        }));
    }
    log::debug!("aggregate.statistics: instance={} rows={}", records[0].name, out.len());
    out
}
