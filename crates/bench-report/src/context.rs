// Rust guideline compliant 2026-07-26

//! Reporter context: host/build facts shared with every reporter before the
//! first run group.

/// Information reported once, before any benchmark runs, so a [`crate::Reporter`]
/// can decide whether to proceed.
#[derive(Debug, Clone)]
pub struct Context {
    /// Number of logical CPUs on the host.
    pub num_cpus: usize,
    /// Clock speed of each CPU, in MHz.
    pub mhz_per_cpu: f64,
    /// Whether CPU frequency scaling is enabled (measurements may be noisy).
    pub cpu_scaling_enabled: bool,
    /// Width of the widest instance name, for column alignment.
    pub name_field_width: usize,
    /// `"release"` or `"debug"`, mirroring a `NDEBUG`-style build check.
    pub build_type: &'static str,
    /// Local date-time string, e.g. `"2026-07-26 10:03:12"`.
    pub date_time: String,
    /// Extra key/value pairs merged from `--benchmark_context=<path>`;
    /// shown in the console header and under `context` in JSON output.
    pub extra: Vec<(String, String)>,
}

impl Context {
    /// A context with no extra key/value pairs.
    #[must_use]
    pub fn new(
        num_cpus: usize,
        mhz_per_cpu: f64,
        cpu_scaling_enabled: bool,
        name_field_width: usize,
        build_type: &'static str,
        date_time: impl Into<String>,
    ) -> Self {
        Self {
            num_cpus,
            mhz_per_cpu,
            cpu_scaling_enabled,
            name_field_width,
            build_type,
            date_time: date_time.into(),
            extra: Vec::new(),
        }
    }

    /// Merge in the extra key/value pairs loaded from a context file.
    #[must_use]
    pub fn with_extra(mut self, extra: Vec<(String, String)>) -> Self {
        self.extra = extra;
        self
    }
}
