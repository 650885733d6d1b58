// Rust guideline compliant 2026-07-26

//! Fixture sugar over a plain [`domain::RunContext`] callable.
//!
//! A plain closure benchmark is the common case; [`Fixture`] exists for
//! the benchmarks that want `setup`/`teardown` hooks run once on thread 0
//!. `setup` runs before that thread's first
//! `keep_running` call -- which is what crosses the start barrier -- so it
//! naturally executes outside the timed region without needing its own
//! pause/resume dance; `teardown` runs after the loop exits, which is
//! likewise already past the stop barrier.

use std::sync::{Arc, Mutex};

use domain::{FamilyFn, RunContext};

/// Setup/run/teardown hooks for a benchmark body.
pub trait Fixture: Send {
    /// Runs once on thread 0, before any thread starts its measured loop.
    fn setup(&mut self, _ctx: &mut dyn RunContext) {}

    /// The measured body, run by every thread.
    fn run(&mut self, ctx: &mut dyn RunContext);

    /// Runs once on thread 0, after every thread has exited its loop.
    fn teardown(&mut self, _ctx: &mut dyn RunContext) {}
}

/// Adapt a [`Fixture`] into the plain [`FamilyFn`] a [`crate::State`] is
/// driven through.
#[must_use]
pub fn fixture_fn<F>(fixture: F) -> FamilyFn
where
    F: Fixture + 'static,
{
    let fixture = Arc::new(Mutex::new(fixture));
    Arc::new(move |ctx: &mut dyn RunContext| {
        let is_root = ctx.thread_index() == 0;
        if is_root {
            fixture.lock().unwrap_or_else(std::sync::PoisonError::into_inner).setup(ctx);
        }
        fixture.lock().unwrap_or_else(std::sync::PoisonError::into_inner).run(ctx);
        if is_root {
            fixture.lock().unwrap_or_else(std::sync::PoisonError::into_inner).teardown(ctx);
        }
    })
}
