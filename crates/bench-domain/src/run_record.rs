// Rust guideline compliant 2026-07-26

//! The result of one measured run: either a single repetition or a derived
//! aggregate across repetitions.

use serde::{Deserialize, Serialize};

use crate::counter::CounterMap;
use crate::time_unit::TimeUnit;

/// Which derived statistic a [`RunRecord`] represents, when it is not a raw
/// per-repetition measurement. Drives the `_mean`/`_median`/`_stddev`/`_cv`/
/// `_BigO`/`_RMS` name suffixes in console/JSON/CSV output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregateKind {
    /// Not an aggregate -- one concrete repetition.
    Iteration,
    /// Arithmetic mean across repetitions.
    Mean,
    /// Median across repetitions.
    Median,
    /// Sample standard deviation across repetitions.
    Stddev,
    /// Coefficient of variation (`stddev / mean`) across repetitions.
    Cv,
    /// Fitted asymptotic-complexity coefficient.
    BigO,
    /// RMS residual of the complexity fit.
    Rms,
    /// A user-declared custom statistic; the name lives in
    /// [`RunRecord::custom_statistic_name`], not in this tag.
    Custom,
}

impl AggregateKind {
    /// The name suffix this aggregate appends to the instance name, or the
    /// empty string for a raw iteration.
    #[must_use]
    pub fn name_suffix(self) -> &'static str {
        match self {
            Self::Iteration => "",
            Self::Mean => "_mean",
            Self::Median => "_median",
            Self::Stddev => "_stddev",
            Self::Cv => "_cv",
            Self::BigO => "_BigO",
            Self::Rms => "_RMS",
            // The actual suffix for a custom statistic is
            // `_{custom_statistic_name}`, assembled by the aggregator since
            // it depends on data this tag alone doesn't carry.
            Self::Custom => "",
        }
    }
}

/// One reported line of output: a raw repetition, a built-in aggregate, or
/// a custom-statistic aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRecord {
    /// Fully suffixed name, e.g. `"BM_StringCopy/8_mean"`.
    pub name: String,
    /// Which kind of record this is.
    pub aggregate_kind: AggregateKind,
    /// Name of the custom statistic this record reports, if
    /// `aggregate_kind` doesn't already capture it (custom statistics don't
    /// fit the closed `AggregateKind` set).
    pub custom_statistic_name: Option<String>,
    /// Number of iterations the measurement ran for.
    pub iterations: u64,
    /// Accumulated wall-clock time, in seconds.
    pub real_time_seconds: f64,
    /// Accumulated CPU time, in seconds.
    pub cpu_time_seconds: f64,
    /// Accumulated manually-reported time, in seconds, when the family uses
    /// manual timing.
    pub manual_time_seconds: Option<f64>,
    /// Unit the above times should be displayed in.
    pub time_unit: TimeUnit,
    /// Bytes processed, if the benchmark body reported any.
    pub bytes_processed: Option<u64>,
    /// Items processed, if the benchmark body reported any.
    pub items_processed: Option<u64>,
    /// Input size used for complexity fitting, if set.
    pub complexity_n: Option<i64>,
    /// Free-form label attached by the benchmark body.
    pub label: Option<String>,
    /// User-declared counters, already finalised.
    pub counters: CounterMap,
    /// Number of threads the instance ran with.
    pub threads: usize,
    /// Number of repetitions the instance was configured to run overall
    /// (not necessarily how many this record summarises).
    pub repetitions: u32,
    /// Index of this repetition within the instance, for
    /// [`AggregateKind::Iteration`] records.
    pub repetition_index: Option<u32>,
    /// Set when the run failed (`skip_with_error` or a caught panic);
    /// reporters render this instead of timings.
    pub error_message: Option<String>,
}

impl RunRecord {
    /// Whether this record represents a failed run.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.error_message.is_some()
    }

    /// CPU time, or wall-clock time if the instance uses real-time timing,
    /// in seconds -- the "primary" timing that feeds rate counters and
    /// complexity fitting.
    #[must_use]
    pub fn primary_time_seconds(&self, use_real_time: bool) -> f64 {
        if use_real_time {
            self.real_time_seconds
        } else {
            self.manual_time_seconds.unwrap_or(self.cpu_time_seconds)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RunRecord {
        RunRecord {
            name: "BM_Example".to_owned(),
            aggregate_kind: AggregateKind::Iteration,
            custom_statistic_name: None,
            iterations: 1000,
            real_time_seconds: 0.5,
            cpu_time_seconds: 0.48,
            manual_time_seconds: None,
            time_unit: TimeUnit::default(),
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
    fn aggregate_suffixes_match_spec_names() {
        assert_eq!(AggregateKind::Mean.name_suffix(), "_mean");
        assert_eq!(AggregateKind::BigO.name_suffix(), "_BigO");
        assert_eq!(AggregateKind::Iteration.name_suffix(), "");
    }

    #[test]
    fn primary_time_prefers_manual_over_cpu() {
        let mut rec = sample();
        rec.manual_time_seconds = Some(0.3);
        assert_eq!(rec.primary_time_seconds(false), 0.3);
        assert_eq!(rec.primary_time_seconds(true), 0.5);
    }

    #[test]
    fn is_error_reflects_error_message() {
        let mut rec = sample();
        assert!(!rec.is_error());
        rec.error_message = Some("boom".to_owned());
        assert!(rec.is_error());
    }

    #[test]
    fn serde_round_trip_preserves_fields() {
        let rec = sample();
        let json = serde_json::to_string(&rec).unwrap();
        let back: RunRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.name, rec.name);
        assert_eq!(back.iterations, rec.iterations);
    }
}
