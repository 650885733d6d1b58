// Rust guideline compliant 2026-07-26

//! State object: what a running benchmark body sees.
//!
//! [`State`] is the concrete adapter implementing [`domain::RunContext`],
//! the hexagonal port declared in `bench-domain` -- the same shape as the
//! teacher's `ConcurrentBuffer` implementing `Buffer1`, just synchronous
//! and thread-coordinated instead of `async`.

mod fixture;
mod optimizer;
mod state;

pub use fixture::{Fixture, fixture_fn};
pub use optimizer::{clobber_memory, do_not_optimize};
pub use state::State;
