// Rust guideline compliant 2026-07-26

//! Counters: user-declared numeric accumulators attached to a measurement.
//!
//! In the tradition of Google Benchmark's `Counter`/`BenchmarkCounters`:
//! `Counter::Finish` becomes [`Counter::finalize`], with the same flag
//! semantics generalised from Google Benchmark's four fixed combinations
//! (`CT_Default`/`CT_Rate`/`CT_ThreadAverage`/`CT_ThreadAverageRate`) to a
//! full bitset (`Rate`, `AvgThreads`, `AvgIterations`, `IterationInvariant`,
//! `Invert`, freely composable).

use serde::{Deserialize, Serialize};

/// Whether a counter's human-readable form uses 1000 or 1024 as its base
/// (`1.2k` vs `1.2Ki`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CounterBase {
    /// SI-style base-1000 scaling (`k`, `M`, `G`, ...).
    OneK1000,
    /// IEC-style base-1024 scaling (`Ki`, `Mi`, `Gi`, ...).
    OneK1024,
}

impl Default for CounterBase {
    fn default() -> Self {
        Self::OneK1000
    }
}

/// Bitset of flags controlling how a counter's raw value is finalised into
/// the value a reporter sees.
///
/// Flags compose commutatively -- applying `Rate` then `AvgThreads` gives
/// the same result as `AvgThreads` then `Rate` -- except [`CounterFlags::INVERT`],
/// which is always applied last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CounterFlags(u8);

impl CounterFlags {
    /// No flags: the counter reports its literal accumulated value.
    pub const NONE: Self = Self(0);
    /// Divide the final value by the elapsed measurement time in seconds.
    pub const RATE: Self = Self(1 << 0);
    /// Divide the final value by the number of threads in the instance.
    pub const AVG_THREADS: Self = Self(1 << 1);
    /// Divide the final value by the total iteration count.
    pub const AVG_ITERATIONS: Self = Self(1 << 2);
    /// Multiply the final value by the total iteration count -- the
    /// complement of `AVG_ITERATIONS`, used when the user's accumulator is
    /// naturally "per iteration".
    pub const ITERATION_INVARIANT: Self = Self(1 << 3);
    /// Replace the final value with its reciprocal. Always applied last.
    pub const INVERT: Self = Self(1 << 4);

    /// Whether `self` contains every bit set in `other`.
    #[must_use]
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::ops::BitOr for CounterFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for CounterFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// A single user-declared counter: name, raw accumulated value, and the
/// flags controlling finalisation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Counter {
    /// Counter name, unique within its [`CounterMap`].
    pub name: String,
    /// Raw accumulated value before finalisation.
    pub value: f64,
    /// Finalisation flags.
    pub flags: CounterFlags,
    /// Human-readable scaling base.
    pub base: CounterBase,
}

impl Counter {
    /// Create a new counter with the given `name`, initial `value`, `flags`,
    /// and base-1000 human-readable scaling.
    #[must_use]
    pub fn new(name: impl Into<String>, value: f64, flags: CounterFlags) -> Self {
        Self {
            name: name.into(),
            value,
            flags,
            base: CounterBase::default(),
        }
    }

    /// Use base-1024 scaling for this counter's human-readable form.
    #[must_use]
    pub fn with_base_1024(mut self) -> Self {
        self.base = CounterBase::OneK1024;
        self
    }

    /// Compute the finalised value given the measurement's elapsed seconds,
    /// thread count, and total iteration count.
    ///
    /// `Rate`, `AvgThreads`, `AvgIterations`, and `IterationInvariant` are
    /// all multiplicative and so commute; `Invert` is always applied last.
    #[must_use]
    pub fn finalize(&self, elapsed_seconds: f64, thread_count: u64, total_iterations: u64) -> f64 {
        let mut v = self.value;
        if self.flags.contains(CounterFlags::RATE) {
            v /= elapsed_seconds;
        }
        if self.flags.contains(CounterFlags::AVG_THREADS) {
            v /= thread_count as f64;
        }
        if self.flags.contains(CounterFlags::AVG_ITERATIONS) {
            v /= total_iterations as f64;
        }
        if self.flags.contains(CounterFlags::ITERATION_INVARIANT) {
            v *= total_iterations as f64;
        }
        if self.flags.contains(CounterFlags::INVERT) {
            v = 1.0 / v;
        }
        v
    }
}

/// Ordered mapping from counter name to [`Counter`].
///
/// Ordering matches insertion order; reporters that emit
/// columns sort or project as they see fit. Backed by a `Vec` rather than a
/// hash map precisely so iteration order is insertion order without an
/// auxiliary index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CounterMap {
    entries: Vec<Counter>,
}

impl CounterMap {
    /// An empty counter map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the counter named `name`.
    ///
    /// Overwriting preserves the original insertion position; names stay
    /// unique within a counter map.
    pub fn set(&mut self, name: impl Into<String>, value: f64, flags: CounterFlags) {
        let name = name.into();
        if let Some(existing) = self.entries.iter_mut().find(|c| c.name == name) {
            existing.value = value;
            existing.flags = flags;
        } else {
            self.entries.push(Counter::new(name, value, flags));
        }
    }

    /// Look up a counter by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Counter> {
        self.entries.iter().find(|c| c.name == name)
    }

    /// Iterate counters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Counter> {
        self.entries.iter()
    }

    /// Number of counters in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no counters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Additively merge `other` into `self`: counters present in both maps
    /// have their raw values summed (used when combining per-thread
    /// counters into the instance-wide total); counters unique to `other`
    /// are appended, preserving `other`'s ordering after `self`'s.
    pub fn merge_add(&mut self, other: &Self) {
        for counter in &other.entries {
            if let Some(existing) = self.entries.iter_mut().find(|c| c.name == counter.name) {
                existing.value += counter.value;
            } else {
                self.entries.push(counter.clone());
            }
        }
    }

    /// Finalise every counter in place given the measurement totals.
    pub fn finalize_all(&mut self, elapsed_seconds: f64, thread_count: u64, total_iterations: u64) {
        for counter in &mut self.entries {
            counter.value = counter.finalize(elapsed_seconds, thread_count, total_iterations);
            // Finalisation is applied exactly once; clear the
            // flags so a second finalize_all call (e.g. from the
            // aggregator re-using a cloned record) is a no-op rather than
            // re-dividing by elapsed time.
            counter.flags = CounterFlags::NONE;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_flags_reports_literal_value() {
        let c = Counter::new("x", 42.0, CounterFlags::NONE);
        assert_eq!(c.finalize(2.0, 4, 10), 42.0);
    }

    #[test]
    fn rate_divides_by_elapsed_seconds() {
        let c = Counter::new("x", 100.0, CounterFlags::RATE);
        assert_eq!(c.finalize(2.0, 1, 1), 50.0);
    }

    #[test]
    fn iteration_invariant_multiplies_by_iterations() {
        let c = Counter::new("items", 42.0, CounterFlags::ITERATION_INVARIANT);
        assert_eq!(c.finalize(1.0, 1, 100), 4200.0);
    }

    #[test]
    fn avg_threads_divides_by_thread_count() {
        let c = Counter::new("x", 100.0, CounterFlags::AVG_THREADS);
        assert_eq!(c.finalize(1.0, 4, 1), 25.0);
    }

    #[test]
    fn invert_is_applied_last() {
        // Rate then Invert: (100 / 2) = 50, then 1/50 = 0.02.
        let c = Counter::new("x", 100.0, CounterFlags::RATE | CounterFlags::INVERT);
        assert!((c.finalize(2.0, 1, 1) - 0.02).abs() < 1e-12);
    }

    #[test]
    fn items_per_second_combination() {
        // {Rate, IterationInvariant}: 42 items/iteration * 100 iterations / t seconds.
        let c = Counter::new(
            "items_per_second",
            42.0,
            CounterFlags::RATE | CounterFlags::ITERATION_INVARIANT,
        );
        let t = 2.0;
        let iters = 100;
        let got = c.finalize(t, 1, iters);
        let want = 42.0 * iters as f64 / t;
        assert!((got - want).abs() / want < 0.001, "got={got} want={want}");
    }

    #[test]
    fn flags_compose_commutatively_except_invert() {
        let value = 123.0;
        let elapsed = 3.0;
        let threads = 2;
        let iters = 50;
        let a = Counter::new("a", value, CounterFlags::RATE | CounterFlags::AVG_THREADS);
        let b = Counter::new("b", value, CounterFlags::AVG_THREADS | CounterFlags::RATE);
        assert_eq!(
            a.finalize(elapsed, threads, iters),
            b.finalize(elapsed, threads, iters)
        );
    }

    #[test]
    fn map_preserves_insertion_order() {
        let mut m = CounterMap::new();
        m.set("b", 1.0, CounterFlags::NONE);
        m.set("a", 2.0, CounterFlags::NONE);
        let names: Vec<&str> = m.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn set_overwrite_keeps_position() {
        let mut m = CounterMap::new();
        m.set("a", 1.0, CounterFlags::NONE);
        m.set("b", 2.0, CounterFlags::NONE);
        m.set("a", 99.0, CounterFlags::NONE);
        let names: Vec<&str> = m.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(m.get("a").unwrap().value, 99.0);
    }

    #[test]
    fn merge_add_sums_shared_counters() {
        let mut m1 = CounterMap::new();
        m1.set("x", 10.0, CounterFlags::NONE);
        let mut m2 = CounterMap::new();
        m2.set("x", 5.0, CounterFlags::NONE);
        m2.set("y", 1.0, CounterFlags::NONE);
        m1.merge_add(&m2);
        assert_eq!(m1.get("x").unwrap().value, 15.0);
        assert_eq!(m1.get("y").unwrap().value, 1.0);
    }

    #[test]
    fn finalize_all_is_idempotent() {
        let mut m = CounterMap::new();
        m.set("x", 100.0, CounterFlags::RATE);
        m.finalize_all(2.0, 1, 1);
        assert_eq!(m.get("x").unwrap().value, 50.0);
        m.finalize_all(2.0, 1, 1);
        assert_eq!(m.get("x").unwrap().value, 50.0, "second finalize must be a no-op");
    }
}
