// Rust guideline compliant 2026-07-26

//! [`State`]: the concrete [`domain::RunContext`] adapter a benchmark body
//! measures itself through.

use std::sync::Arc;

use coordinator::Coordinator;
use domain::{CounterMap, RunContext};

/// One thread's view of a running instance. Constructed
/// fresh per thread per repetition by the controller; its post-run fields
/// (`iterations_run`, `bytes_processed`, ...) are read back to build that
/// thread's contribution to the instance's [`domain::RunRecord`].
pub struct State {
    thread_index: usize,
    threads: usize,
    args: Vec<i64>,
    max_iters: u64,
    iterations: u64,
    started: bool,
    use_manual_time: bool,
    coordinator: Arc<Coordinator>,
    bytes_processed: u64,
    items_processed: u64,
    label: Option<String>,
    error_message: Option<String>,
    complexity_n: Option<i64>,
    counters: CounterMap,
}

impl State {
    /// Create a new state for `thread_index` (of `threads` total) running
    /// `max_iters` iterations of an instance whose argument tuple is
    /// `args`, coordinated by `coordinator`.
    #[must_use]
    pub fn new(
        thread_index: usize,
        threads: usize,
        args: Vec<i64>,
        max_iters: u64,
        coordinator: Arc<Coordinator>,
        use_manual_time: bool,
    ) -> Self {
        Self {
            thread_index,
            threads,
            args,
            max_iters,
            iterations: 0,
            started: false,
            use_manual_time,
            coordinator,
            bytes_processed: 0,
            items_processed: 0,
            label: None,
            error_message: None,
            complexity_n: None,
            counters: CounterMap::new(),
        }
    }

    /// How many iterations the loop body actually ran.
    #[must_use]
    pub fn iterations_run(&self) -> u64 {
        self.iterations
    }

    /// Bytes processed, as reported via `set_bytes_processed`.
    #[must_use]
    pub fn bytes_processed(&self) -> u64 {
        self.bytes_processed
    }

    /// Items processed, as reported via `set_items_processed`.
    #[must_use]
    pub fn items_processed(&self) -> u64 {
        self.items_processed
    }

    /// Free-form label attached by the benchmark body, if any.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Error message set via `skip_with_error`, if any.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Input size recorded via `set_complexity_n`, if any.
    #[must_use]
    pub fn complexity_n(&self) -> Option<i64> {
        self.complexity_n
    }

    /// Consume this state and return its counter map.
    #[must_use]
    pub fn into_counters(self) -> CounterMap {
        self.counters
    }
}

impl RunContext for State {
    fn keep_running(&mut self) -> bool {
        if self.error_message.is_some() {
            return false;
        }
        if !self.started {
            self.coordinator.start_timer();
            self.started = true;
        }
        if self.iterations < self.max_iters {
            self.iterations += 1;
            true
        } else {
            self.coordinator.stop_timer();
            false
        }
    }

    fn range(&self, i: usize) -> i64 {
        self.args.get(i).copied().unwrap_or(0)
    }

    fn thread_index(&self) -> usize {
        self.thread_index
    }

    fn threads(&self) -> usize {
        self.threads
    }

    fn set_bytes_processed(&mut self, n: u64) {
        self.bytes_processed = n;
    }

    fn set_items_processed(&mut self, n: u64) {
        self.items_processed = n;
    }

    fn set_label(&mut self, label: &str) {
        self.label = Some(label.to_owned());
    }

    fn set_iteration_time(&mut self, seconds: f64) {
        assert!(
            self.use_manual_time,
            "state.set_iteration_time: called on an instance that is not use_manual_time"
        );
        self.coordinator.set_iteration_time(seconds);
    }

    fn skip_with_error(&mut self, msg: &str) {
        log::warn!("state.skip_with_error: thread={} msg={msg}", self.thread_index);
        self.error_message = Some(msg.to_owned());
        self.coordinator.remove_errored_thread(msg);
    }

    fn pause_timing(&mut self) {
        self.coordinator.pause_timer();
    }

    fn resume_timing(&mut self) {
        self.coordinator.resume_timer();
    }

    fn set_complexity_n(&mut self, n: i64) {
        self.complexity_n = Some(n);
    }

    fn counters(&mut self) -> &mut CounterMap {
        &mut self.counters
    }
}
