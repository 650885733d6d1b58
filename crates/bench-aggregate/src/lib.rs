// Rust guideline compliant 2026-07-26

//! Aggregator: turns a family's per-repetition [`domain::RunRecord`]s into
//! the derived `_mean`/`_median`/`_stddev`/`_cv` rows, plus the `_BigO`/
//! `_RMS` complexity rows at family boundaries.

mod complexity;
mod statistics;

pub use complexity::{LeastSq, fit_complexity};
pub use statistics::aggregate_statistics;

use domain::{AggregateKind, NamedStatistic, RunRecord};

/// Given the raw per-repetition records for a single instance, return the
/// additional aggregate rows to append: built-in statistics (mean/median/
/// stddev/cv) plus any custom statistics declared on the family.
///
/// Fewer than two records yields no aggregate rows at all -- a lone
/// repetition has nothing to summarise.
#[must_use]
pub fn aggregate_instance(records: &[RunRecord], custom_statistics: &[NamedStatistic]) -> Vec<RunRecord> {
    if records.len() < 2 {
        return Vec::new();
    }
    statistics::aggregate_statistics(records, custom_statistics)
}

/// Build the `_BigO` and `_RMS` rows for a family, given the
/// `(complexity_n, primary_time_seconds)` pairs collected across every
/// instance in the family (one pair per instance, using that instance's
/// mean time). Returns `None` when fewer than two distinct `n` values are
/// present or complexity fitting isn't requested.
#[must_use]
pub fn family_complexity_rows(
    samples: &[(i64, f64)],
    big_o: &domain::BigO,
    family_name: &str,
    time_unit: domain::TimeUnit,
) -> Option<(RunRecord, RunRecord)> {
    if matches!(big_o, domain::BigO::None) {
        return None;
    }
    let distinct_n = {
        let mut ns: Vec<i64> = samples.iter().map(|&(n, _)| n).collect();
        ns.sort_unstable();
        ns.dedup();
        ns.len()
    };
    if distinct_n < 2 {
        log::debug!("aggregate.family_complexity_rows: fewer than 2 distinct N, skipping fit");
        return None;
    }

    let fit = complexity::fit_complexity(samples, big_o)?;

    let name_prefix = family_name;
    let big_o_record = RunRecord {
        name: format!("{name_prefix}{}", AggregateKind::BigO.name_suffix()),
        aggregate_kind: AggregateKind::BigO,
        custom_statistic_name: None,
        iterations: 0,
        real_time_seconds: fit.coef,
        cpu_time_seconds: fit.coef,
        manual_time_seconds: None,
        time_unit,
        bytes_processed: None,
        items_processed: None,
        complexity_n: None,
        label: Some(fit.complexity.label().to_owned()),
        counters: domain::CounterMap::new(),
        threads: 1,
        repetitions: 1,
        repetition_index: None,
        error_message: None,
    };
    let rms_record = RunRecord {
        name: format!("{name_prefix}{}", AggregateKind::Rms.name_suffix()),
        aggregate_kind: AggregateKind::Rms,
        custom_statistic_name: None,
        iterations: 0,
        // Reporters scale every time field by `time_unit`'s multiplier before
        // display; pre-dividing here cancels that scaling so the percentage
        // survives unit conversion, the same trick Google Benchmark's own
        // `ComputeBigO` uses (`rms->real_accumulated_time = result.rms / multiplier`).
        real_time_seconds: fit.rms * 100.0 / time_unit.from_seconds_factor(),
        cpu_time_seconds: fit.rms * 100.0 / time_unit.from_seconds_factor(),
        manual_time_seconds: None,
        time_unit,
        bytes_processed: None,
        items_processed: None,
        complexity_n: None,
        label: Some("%".to_owned()),
        counters: domain::CounterMap::new(),
        threads: 1,
        repetitions: 1,
        repetition_index: None,
        error_message: None,
    };
    Some((big_o_record, rms_record))
}
