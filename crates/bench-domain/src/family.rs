// Rust guideline compliant 2026-07-26

//! Benchmark families: a registered name plus the callable and knobs shared
//! by every instance generated from it.

use std::fmt;
use std::sync::Arc;

use crate::RunContext;
use crate::time_unit::TimeUnit;

/// Identifier of a registered [`Family`], assigned by the registry at
/// registration time. Stable for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FamilyId(pub u64);

impl fmt::Display for FamilyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user-supplied function mapping an input size `n` to the expected
/// asymptotic cost, used when [`BigO::Lambda`] is selected.
pub type ComplexityLambda = Arc<dyn Fn(i64) -> f64 + Send + Sync>;

/// The callable a family runs for each instance. Takes the run through the
/// [`RunContext`] port rather than a concrete state type so this crate
/// never depends on `bench-state`.
pub type FamilyFn = Arc<dyn Fn(&mut dyn RunContext) + Send + Sync>;

/// A user-supplied aggregate statistic computed over a family's repetition
/// times, reported alongside the built-in mean/median/stddev.
#[derive(Clone)]
pub struct NamedStatistic {
    /// Column name, e.g. `"p90"`.
    pub name: String,
    /// Computes the statistic from a slice of per-repetition times.
    pub compute: Arc<dyn Fn(&[f64]) -> f64 + Send + Sync>,
}

impl fmt::Debug for NamedStatistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamedStatistic").field("name", &self.name).finish_non_exhaustive()
    }
}

/// Asymptotic complexity tag for a family.
#[derive(Debug, Clone)]
pub enum BigO {
    /// Constant.
    O1,
    /// Logarithmic.
    OLogN,
    /// Linear.
    ON,
    /// Linearithmic.
    ONLogN,
    /// Quadratic.
    ONSquared,
    /// Cubic.
    ONCubed,
    /// Fit against every built-in curve and keep the best (lowest RMS)
    /// candidate.
    Auto,
    /// Fit against a user-supplied curve.
    Lambda(ComplexityLambda),
    /// No complexity fitting for this family.
    None,
}

impl PartialEq for BigO {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::O1, Self::O1)
                | (Self::OLogN, Self::OLogN)
                | (Self::ON, Self::ON)
                | (Self::ONLogN, Self::ONLogN)
                | (Self::ONSquared, Self::ONSquared)
                | (Self::ONCubed, Self::ONCubed)
                | (Self::Auto, Self::Auto)
                | (Self::None, Self::None)
        )
        // `Lambda` holds a non-comparable closure; two lambda tags are
        // never considered equal to each other or anything else.
    }
}

impl BigO {
    /// The label used in reports (`"O(1)"`, `"O(N)"`, ...).
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::O1 => "O(1)",
            Self::OLogN => "O(log N)",
            Self::ON => "O(N)",
            Self::ONLogN => "O(N log N)",
            Self::ONSquared => "O(N^2)",
            Self::ONCubed => "O(N^3)",
            Self::Auto => "O(auto)",
            Self::Lambda(_) => "O(f(N))",
            Self::None => "",
        }
    }
}

/// A registered benchmark family: the callable plus every knob that applies
/// uniformly across the instances generated from it.
#[derive(Clone)]
pub struct Family {
    /// Assigned by the registry at registration time.
    pub id: FamilyId,
    /// User-facing name, e.g. `"BM_StringCopy"`.
    pub name: String,
    /// The function each instance runs.
    pub func: FamilyFn,
    /// Argument tuples to instantiate; each inner `Vec` is one instance's tuple.
    pub args: Vec<Vec<i64>>,
    /// Names for each positional argument (Google Benchmark's
    /// `ArgNames`), parallel to the inner length of `args`.
    pub arg_names: Vec<String>,
    /// Thread counts to instantiate.
    pub thread_counts: Vec<usize>,
    /// Fixed repetition count, or `None` to use the controller's default.
    pub repetitions: Option<u32>,
    /// Minimum measurement time per repetition, in seconds.
    pub min_time: Option<f64>,
    /// Minimum warm-up time before measurement begins (Google Benchmark's
    /// `MinWarmUpTime`).
    pub min_warmup_time: f64,
    /// Fixed iteration count (Google Benchmark's `Iterations`), bypassing
    /// the adaptive search entirely: every repetition runs exactly this
    /// many iterations instead of growing toward `min_time`.
    pub fixed_iterations: Option<u64>,
    /// Multiplier used when expanding a `Range`/`DenseRange` spec.
    pub range_multiplier: i64,
    /// Use wall-clock time instead of CPU time as the primary measurement.
    pub use_real_time: bool,
    /// The callable manages iteration timing itself via
    /// [`RunContext::set_iteration_time`].
    pub use_manual_time: bool,
    /// Asymptotic complexity fitting mode.
    pub complexity: BigO,
    /// User-declared aggregate statistics beyond the built-in ones.
    pub custom_statistics: Vec<NamedStatistic>,
    /// Report only the aggregates (mean/median/stddev/...), not each
    /// individual repetition (`--benchmark_report_aggregates_only`-style).
    pub report_aggregates_only: bool,
    /// Also emit individual repetitions even when aggregates-only display
    /// is requested globally (the family-level override of the global
    /// flag).
    pub display_aggregates_only: bool,
    /// Unit timings are reported in for instances of this family.
    pub time_unit: TimeUnit,
}

impl fmt::Debug for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Family")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("args", &self.args)
            .field("thread_counts", &self.thread_counts)
            .field("repetitions", &self.repetitions)
            .field("min_time", &self.min_time)
            .field("use_real_time", &self.use_real_time)
            .field("use_manual_time", &self.use_manual_time)
            .field("complexity", &self.complexity)
            .field("time_unit", &self.time_unit)
            .finish_non_exhaustive()
    }
}

impl Family {
    /// A new family registered with default knobs and no argument tuples
    /// (callers add those via the registry's builder methods).
    #[must_use]
    pub fn new(id: FamilyId, name: impl Into<String>, func: FamilyFn) -> Self {
        Self {
            id,
            name: name.into(),
            func,
            args: Vec::new(),
            arg_names: Vec::new(),
            thread_counts: Vec::new(),
            repetitions: None,
            min_time: None,
            min_warmup_time: 0.0,
            fixed_iterations: None,
            range_multiplier: 8,
            use_real_time: false,
            use_manual_time: false,
            complexity: BigO::None,
            custom_statistics: Vec::new(),
            report_aggregates_only: false,
            display_aggregates_only: false,
            time_unit: TimeUnit::default(),
        }
    }
}
