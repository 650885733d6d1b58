// Rust guideline compliant 2026-07-26

//! Timing services for the benchmark harness.
//!
//! Three monotonic clocks -- [`real_now`], [`process_cpu_now`], and
//! [`thread_cpu_now`] -- plus a wall-date formatter and a one-time CPU
//! info probe. Every function here is pure (no interior state beyond the
//! process-wide [`cpu_info`] cache) and returns seconds as `f64`.
//!
//! Platforms without a per-thread CPU clock fall back to the process clock;
//! callers are told about this via [`ThreadClockKind::Imprecise`] so the
//! reporter can annotate affected runs.

use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

mod probe;

pub use probe::{CpuInfo, cpu_info};

/// Whether [`thread_cpu_now`] reflects real per-thread accounting or has
/// fallen back to the process-wide clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreadClockKind {
    /// `clock_gettime(CLOCK_THREAD_CPUTIME_ID, ..)` (or platform equivalent)
    /// succeeded.
    PerThread,
    /// No per-thread clock was available; [`thread_cpu_now`] returns the
    /// process CPU clock instead.
    Imprecise,
}

/// Current wall-clock time in seconds since the Unix epoch, monotonic-ish
/// resolution in practice (nanosecond granularity on every target we run
/// on).
///
/// # Panics
///
/// Never panics in normal operation; a system clock set before the Unix
/// epoch would be a misconfigured host, not a recoverable error, so this
/// unwraps rather than threading a `Result` through every caller.
#[must_use]
pub fn real_now() -> f64 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock is before the Unix epoch");
    now.as_secs_f64()
}

/// CPU time consumed by the whole process (user + system), in seconds.
///
/// Returns `0.0` if the platform call fails; this is a non-fatal timing
/// failure per the harness's error-handling design -- callers should not
/// treat `0.0` as "no CPU used" on a platform where the probe itself is
/// broken.
#[must_use]
pub fn process_cpu_now() -> f64 {
    probe::process_cpu_usage()
}

/// CPU time consumed by the calling thread, in seconds, along with whether
/// the value is truly per-thread or a process-wide fallback.
#[must_use]
pub fn thread_cpu_now() -> (f64, ThreadClockKind) {
    probe::thread_cpu_usage()
}

/// Format `real_now()`-style seconds-since-epoch as `YYYY-MM-DD HH:MM:SS`
/// in local time.
///
/// Falls back to UTC if the local offset cannot be determined -- matching
/// the "non-fatal, blank on failure" posture of the rest of this crate.
#[must_use]
pub fn local_date_time_string() -> String {
    probe::local_date_time_string()
}

static INIT: OnceLock<()> = OnceLock::new();

/// Process-wide one-time initialisation: estimates CPU frequency and
/// detects CPU scaling, both for a contextual info line in reports.
///
/// Idempotent -- safe to call from every crate that might be first to need
/// clock services. Failures are non-fatal: affected fields stay at their
/// zero/false defaults and a `warn` log line is emitted.
pub fn init() {
    INIT.get_or_init(|| {
        let info = probe::cpu_info();
        if info.num_cpus == 0 {
            log::warn!("clock.init: failed to determine CPU count, defaulting to 0");
        }
        if info.mhz_per_cpu == 0.0 {
            log::warn!("clock.init: failed to estimate CPU frequency, defaulting to 0.0");
        }
        log::debug!(
            "clock.init: num_cpus={} mhz_per_cpu={:.1} scaling_enabled={}",
            info.num_cpus,
            info.mhz_per_cpu,
            info.scaling_enabled
        );
    });
}
