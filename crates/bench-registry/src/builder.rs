// Rust guideline compliant 2026-07-26

//! Fluent builder for describing a [`Family`] before registering it.
//!
//! Mirrors the chained `BENCHMARK(Fn)->Arg(8)->Threads(4)` style of Google
//! Benchmark's own registration macros, translated into a consuming-builder
//! idiom (`FamilyBuilder::new(..)...build()`).

use std::sync::Arc;

use domain::{BigO, ComplexityLambda, Family, FamilyFn, FamilyId, NamedStatistic, TimeUnit};

use crate::range::{add_dense_range, add_range};

/// Builds a [`Family`] one knob at a time; finalize with
/// [`FamilyBuilder::build`].
#[derive(Debug)]
pub struct FamilyBuilder {
    family: Family,
}

impl FamilyBuilder {
    /// Start describing a family named `name`, running `func` for each of
    /// its instances. The id is a placeholder -- [`crate::Registry::add`]
    /// assigns the real one at registration time.
    #[must_use]
    pub fn new(name: impl Into<String>, func: FamilyFn) -> Self {
        Self {
            family: Family::new(FamilyId(0), name, func),
        }
    }

    /// Add a single-argument instance.
    #[must_use]
    pub fn arg(mut self, value: i64) -> Self {
        self.family.args.push(vec![value]);
        self
    }

    /// Add a multi-argument instance.
    #[must_use]
    pub fn args(mut self, values: Vec<i64>) -> Self {
        self.family.args.push(values);
        self
    }

    /// Add a two-argument instance.
    #[must_use]
    pub fn arg_pair(mut self, x: i64, y: i64) -> Self {
        self.family.args.push(vec![x, y]);
        self
    }

    /// Name each positional argument (for display, e.g.
    /// `BM_Foo/rows:8/cols:4`).
    #[must_use]
    pub fn arg_names(mut self, names: &[&str]) -> Self {
        self.family.arg_names = names.iter().map(|s| (*s).to_owned()).collect();
        self
    }

    /// Set the multiplier used by [`FamilyBuilder::range`].
    #[must_use]
    pub fn range_multiplier(mut self, mult: i64) -> Self {
        self.family.range_multiplier = mult;
        self
    }

    /// Add single-argument instances spaced out in powers of the current
    /// range multiplier between `lo` and `hi` inclusive.
    #[must_use]
    pub fn range(mut self, lo: i64, hi: i64) -> Self {
        let mut values = Vec::new();
        add_range(&mut values, lo, hi, self.family.range_multiplier);
        for v in values {
            self.family.args.push(vec![v]);
        }
        self
    }

    /// Add single-argument instances evenly spaced by `step` between `lo`
    /// and `hi` inclusive.
    #[must_use]
    pub fn dense_range(mut self, lo: i64, hi: i64, step: i64) -> Self {
        let mut values = Vec::new();
        add_dense_range(&mut values, lo, hi, step);
        for v in values {
            self.family.args.push(vec![v]);
        }
        self
    }

    /// Add two-argument instances covering the Cartesian product of a
    /// `[lo1, hi1]` range and a `[lo2, hi2]` range, each spaced out in
    /// powers of the current range multiplier.
    #[must_use]
    pub fn range_pair(mut self, lo1: i64, hi1: i64, lo2: i64, hi2: i64) -> Self {
        let mut first = Vec::new();
        add_range(&mut first, lo1, hi1, self.family.range_multiplier);
        let mut second = Vec::new();
        add_range(&mut second, lo2, hi2, self.family.range_multiplier);
        for &a in &first {
            for &b in &second {
                self.family.args.push(vec![a, b]);
            }
        }
        self
    }

    /// Run this family with exactly `n` threads.
    #[must_use]
    pub fn threads(mut self, n: usize) -> Self {
        self.family.thread_counts.push(n);
        self
    }

    /// Run this family once for every thread count in `lo..=hi`.
    #[must_use]
    pub fn thread_range(mut self, lo: usize, hi: usize) -> Self {
        self.family.thread_counts.extend(lo..=hi);
        self
    }

    /// Run this family with one thread per logical CPU on this host
    /// (falls back to a single thread if the CPU count can't be
    /// determined).
    #[must_use]
    pub fn thread_per_cpu(mut self) -> Self {
        let num_cpus = clock::cpu_info().num_cpus.max(1);
        self.family.thread_counts.push(num_cpus);
        self
    }

    /// Fix the repetition count (overriding the controller's default).
    #[must_use]
    pub fn repetitions(mut self, n: u32) -> Self {
        self.family.repetitions = Some(n);
        self
    }

    /// Minimum measurement time per repetition, in seconds.
    #[must_use]
    pub fn min_time(mut self, seconds: f64) -> Self {
        self.family.min_time = Some(seconds);
        self
    }

    /// Minimum warm-up time before measurement begins, in seconds.
    #[must_use]
    pub fn min_warmup_time(mut self, seconds: f64) -> Self {
        self.family.min_warmup_time = seconds;
        self
    }

    /// Run exactly `n` iterations per repetition instead of adaptively
    /// searching for an iteration count that reaches `min_time` -- a
    /// distinct, fixed-count measurement mode.
    #[must_use]
    pub fn iterations(mut self, n: u64) -> Self {
        self.family.fixed_iterations = Some(n);
        self
    }

    /// Use wall-clock time as the primary measurement instead of CPU time.
    #[must_use]
    pub fn use_real_time(mut self) -> Self {
        self.family.use_real_time = true;
        self
    }

    /// The callable reports its own iteration time via
    /// `RunContext::set_iteration_time` rather than relying on the
    /// surrounding clock.
    #[must_use]
    pub fn use_manual_time(mut self) -> Self {
        self.family.use_manual_time = true;
        self
    }

    /// Fit a built-in asymptotic complexity curve.
    #[must_use]
    pub fn complexity(mut self, big_o: BigO) -> Self {
        self.family.complexity = big_o;
        self
    }

    /// Fit a user-supplied complexity curve.
    #[must_use]
    pub fn complexity_lambda(mut self, f: ComplexityLambda) -> Self {
        self.family.complexity = BigO::Lambda(f);
        self
    }

    /// Add a custom aggregate statistic, computed over per-repetition
    /// times in addition to the built-in mean/median/stddev/cv.
    #[must_use]
    pub fn custom_statistic(
        mut self,
        name: impl Into<String>,
        compute: Arc<dyn Fn(&[f64]) -> f64 + Send + Sync>,
    ) -> Self {
        self.family.custom_statistics.push(NamedStatistic {
            name: name.into(),
            compute,
        });
        self
    }

    /// Report only the aggregate rows, not each individual repetition.
    #[must_use]
    pub fn report_aggregates_only(mut self) -> Self {
        self.family.report_aggregates_only = true;
        self
    }

    /// Display only the aggregate rows in the console reporter even when
    /// repetitions are still written to machine-readable sinks.
    #[must_use]
    pub fn display_aggregates_only(mut self) -> Self {
        self.family.display_aggregates_only = true;
        self
    }

    /// Unit this family's timings are reported in.
    #[must_use]
    pub fn time_unit(mut self, unit: TimeUnit) -> Self {
        self.family.time_unit = unit;
        self
    }

    /// Apply a reusable function of chained builder calls, for sharing a
    /// common configuration (thread counts, complexity mode, ...) across
    /// several families without repeating the chain at each call site.
    #[must_use]
    pub fn apply(self, f: impl FnOnce(Self) -> Self) -> Self {
        f(self)
    }

    /// Validate and finalize the family.
    ///
    /// # Errors
    ///
    /// Returns [`domain::Error::InvalidConfig`] when the name is empty,
    /// `range_multiplier` is below 2, or a declared thread count is zero.
    #[must_use = "the Result must be checked; use ? or unwrap"]
    pub fn build(self) -> Result<Family, domain::Error> {
        let family = self.family;
        if family.name.is_empty() {
            return Err(domain::Error::InvalidConfig {
                reason: "family name must not be empty".to_owned(),
            });
        }
        if family.range_multiplier < 2 {
            return Err(domain::Error::InvalidConfig {
                reason: format!("range_multiplier must be >= 2, got {}", family.range_multiplier),
            });
        }
        if family.thread_counts.iter().any(|&t| t == 0) {
            return Err(domain::Error::InvalidConfig {
                reason: "thread count must be >= 1".to_owned(),
            });
        }
        Ok(family)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop() -> FamilyFn {
        Arc::new(|_ctx| {})
    }

    #[test]
    fn build_rejects_empty_name() {
        let err = FamilyBuilder::new("", noop()).build().unwrap_err();
        assert!(matches!(err, domain::Error::InvalidConfig { .. }));
    }

    #[test]
    fn build_rejects_zero_thread_count() {
        let err = FamilyBuilder::new("BM_X", noop()).threads(0).build().unwrap_err();
        assert!(matches!(err, domain::Error::InvalidConfig { .. }));
    }

    #[test]
    fn range_populates_args_by_power_of_multiplier() {
        let fam = FamilyBuilder::new("BM_X", noop()).range(1, 8).build().unwrap();
        assert_eq!(fam.args, vec![vec![1], vec![8]]);
    }

    #[test]
    fn thread_range_is_inclusive() {
        let fam = FamilyBuilder::new("BM_X", noop()).thread_range(1, 4).build().unwrap();
        assert_eq!(fam.thread_counts, vec![1, 2, 3, 4]);
    }

    #[test]
    fn arg_pair_pushes_a_two_element_tuple() {
        let fam = FamilyBuilder::new("BM_X", noop()).arg_pair(3, 5).build().unwrap();
        assert_eq!(fam.args, vec![vec![3, 5]]);
    }

    #[test]
    fn range_pair_is_the_cartesian_product_of_both_ranges() {
        let fam = FamilyBuilder::new("BM_X", noop()).range_pair(1, 2, 1, 2).build().unwrap();
        assert_eq!(fam.args, vec![vec![1, 1], vec![1, 2], vec![2, 1], vec![2, 2]]);
    }

    #[test]
    fn thread_per_cpu_adds_at_least_one_thread_count() {
        let fam = FamilyBuilder::new("BM_X", noop()).thread_per_cpu().build().unwrap();
        assert_eq!(fam.thread_counts.len(), 1);
        assert!(fam.thread_counts[0] >= 1);
    }

    #[test]
    fn iterations_sets_fixed_iteration_count() {
        let fam = FamilyBuilder::new("BM_X", noop()).iterations(1000).build().unwrap();
        assert_eq!(fam.fixed_iterations, Some(1000));
    }

    #[test]
    fn apply_runs_the_given_function_over_the_builder() {
        let fam = FamilyBuilder::new("BM_X", noop()).apply(|b| b.threads(2).min_time(1.0)).build().unwrap();
        assert_eq!(fam.thread_counts, vec![2]);
        assert_eq!(fam.min_time, Some(1.0));
    }

    #[test]
    fn builder_chains_produce_expected_family() {
        let fam = FamilyBuilder::new("BM_Sort", noop())
            .arg(100)
            .arg(1000)
            .threads(2)
            .min_time(1.0)
            .use_real_time()
            .complexity(BigO::ON)
            .build()
            .unwrap();
        assert_eq!(fam.args, vec![vec![100], vec![1000]]);
        assert_eq!(fam.thread_counts, vec![2]);
        assert_eq!(fam.min_time, Some(1.0));
        assert!(fam.use_real_time);
        assert_eq!(fam.complexity, BigO::ON);
    }
}
