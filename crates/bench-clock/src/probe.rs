// Rust guideline compliant 2026-07-26

//! Platform probing: process/thread CPU usage, CPU count/frequency, and the
//! local-time formatter. Ported from `benchmark::ProcessCPUUsage` /
//! `ThreadCPUUsage` / `DateTimeString` (see `timers.cc` in the retained
//! upstream reference) and `sysinfo.cc`'s CPU-frequency probe, trading the
//! original's `#ifdef`-per-OS ladder for a single Linux/`libc` code path --
//! this harness targets Linux hosts; other platforms degrade to the
//! documented zero/fallback behaviour rather than failing to build.

use std::fs;
use std::mem::MaybeUninit;
use std::sync::OnceLock;

use crate::ThreadClockKind;

/// Contextual CPU information gathered once at process start.
#[derive(Debug, Clone, Copy)]
pub struct CpuInfo {
    /// Number of logical CPUs, or `0` if undetermined.
    pub num_cpus: usize,
    /// Estimated clock frequency in MHz, or `0.0` if undetermined.
    pub mhz_per_cpu: f64,
    /// Whether any CPU is running under a non-`performance` scaling
    /// governor (Linux `cpufreq`), which would make repeated-run timing
    /// noisier than usual.
    pub scaling_enabled: bool,
}

fn timespec_to_secs(ts: libc::timespec) -> f64 {
    ts.tv_sec as f64 + (ts.tv_nsec as f64) * 1e-9
}

fn timeval_to_secs(tv: libc::timeval) -> f64 {
    tv.tv_sec as f64 + (tv.tv_usec as f64) * 1e-6
}

/// CPU time consumed by the whole process (user + system), via
/// `clock_gettime(CLOCK_PROCESS_CPUTIME_ID, ..)`, falling back to
/// `getrusage(RUSAGE_SELF, ..)` if the clock call fails.
pub fn process_cpu_usage() -> f64 {
    let mut ts = MaybeUninit::<libc::timespec>::uninit();
    // SAFETY: `ts` is a valid out-pointer for `clock_gettime`; we only read
    // it after checking the return code is zero.
    let rc = unsafe { libc::clock_gettime(libc::CLOCK_PROCESS_CPUTIME_ID, ts.as_mut_ptr()) };
    if rc == 0 {
        return timespec_to_secs(unsafe { ts.assume_init() });
    }

    let mut ru = MaybeUninit::<libc::rusage>::uninit();
    // SAFETY: `ru` is a valid out-pointer for `getrusage`.
    let rc = unsafe { libc::getrusage(libc::RUSAGE_SELF, ru.as_mut_ptr()) };
    if rc == 0 {
        let ru = unsafe { ru.assume_init() };
        return timeval_to_secs(ru.ru_utime) + timeval_to_secs(ru.ru_stime);
    }

    log::warn!("clock.process_cpu_usage: both clock_gettime and getrusage failed");
    0.0
}

/// CPU time consumed by the calling thread, via
/// `clock_gettime(CLOCK_THREAD_CPUTIME_ID, ..)`. Falls back to
/// [`process_cpu_usage`] (marked [`ThreadClockKind::Imprecise`]) when the
/// per-thread clock is unavailable.
pub fn thread_cpu_usage() -> (f64, ThreadClockKind) {
    let mut ts = MaybeUninit::<libc::timespec>::uninit();
    // SAFETY: `ts` is a valid out-pointer for `clock_gettime`.
    let rc = unsafe { libc::clock_gettime(libc::CLOCK_THREAD_CPUTIME_ID, ts.as_mut_ptr()) };
    if rc == 0 {
        return (
            timespec_to_secs(unsafe { ts.assume_init() }),
            ThreadClockKind::PerThread,
        );
    }
    log::warn!("clock.thread_cpu_usage: CLOCK_THREAD_CPUTIME_ID unavailable, falling back to process clock");
    (process_cpu_usage(), ThreadClockKind::Imprecise)
}

/// Format the current local time as `YYYY-MM-DD HH:MM:SS`.
pub fn local_date_time_string() -> String {
    let now = unsafe { libc::time(std::ptr::null_mut()) };
    let mut tm = MaybeUninit::<libc::tm>::uninit();
    // SAFETY: `now` points at a valid `time_t`, `tm` is a valid out-pointer.
    let tm_ptr = unsafe { libc::localtime_r(&now, tm.as_mut_ptr()) };
    if tm_ptr.is_null() {
        log::warn!("clock.local_date_time_string: localtime_r failed, using epoch");
        return "1970-01-01 00:00:00".to_owned();
    }
    let tm = unsafe { tm.assume_init() };
    format!(
        "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
        tm.tm_year + 1900,
        tm.tm_mon + 1,
        tm.tm_mday,
        tm.tm_hour,
        tm.tm_min,
        tm.tm_sec
    )
}

fn detect_num_cpus() -> usize {
    // SAFETY: sysconf with a valid name argument has no preconditions.
    let n = unsafe { libc::sysconf(libc::_SC_NPROCESSORS_ONLN) };
    if n > 0 { n as usize } else { 0 }
}

/// Best-effort MHz estimate from `/proc/cpuinfo`'s `cpu MHz` field, averaged
/// across cores. Returns `0.0` on any parse failure -- this is informational
/// only (spec's "cycle-counter CPU frequency estimation" note), never a hard
/// error.
fn estimate_mhz() -> f64 {
    let Ok(contents) = fs::read_to_string("/proc/cpuinfo") else {
        return 0.0;
    };
    let mut sum = 0.0_f64;
    let mut count = 0usize;
    for line in contents.lines() {
        if let Some(rest) = line.strip_prefix("cpu MHz") {
            if let Some(value) = rest.split(':').nth(1) {
                if let Ok(mhz) = value.trim().parse::<f64>() {
                    sum += mhz;
                    count += 1;
                }
            }
        }
    }
    if count == 0 { 0.0 } else { sum / count as f64 }
}

/// Whether any `scaling_governor` under `/sys/devices/system/cpu` is set to
/// something other than `performance`. Missing files (containers, non-Linux)
/// read as "no scaling detected" rather than an error.
fn detect_scaling() -> bool {
    let Ok(entries) = fs::read_dir("/sys/devices/system/cpu") else {
        return false;
    };
    for entry in entries.flatten() {
        let path = entry.path().join("cpufreq/scaling_governor");
        if let Ok(governor) = fs::read_to_string(&path) {
            if governor.trim() != "performance" {
                return true;
            }
        }
    }
    false
}

static CPU_INFO: OnceLock<CpuInfo> = OnceLock::new();

/// Process-wide cached [`CpuInfo`], computed once on first access.
pub fn cpu_info() -> CpuInfo {
    *CPU_INFO.get_or_init(|| CpuInfo {
        num_cpus: detect_num_cpus(),
        mhz_per_cpu: estimate_mhz(),
        scaling_enabled: detect_scaling(),
    })
}
