// Rust guideline compliant 2026-07-26

//! Shared domain types for the benchmark harness.
//!
//! Defines the data model ([`Family`], [`Instance`],
//! [`RunRecord`], [`Counter`]/[`CounterMap`]), the [`RunContext`] hexagonal
//! port that lets a family's callable drive a measurement without this
//! crate depending on the concrete `State` implementation, and the shared
//! [`Error`] type. All other crates in the workspace depend on this one;
//! it has no internal dependencies of its own.

mod counter;
mod error;
mod family;
mod instance;
mod run_context;
mod run_record;
mod time_unit;

pub use counter::{Counter, CounterFlags, CounterMap};
pub use error::Error;
pub use family::{BigO, ComplexityLambda, Family, FamilyFn, FamilyId, NamedStatistic};
pub use instance::Instance;
pub use run_context::RunContext;
pub use run_record::{AggregateKind, RunRecord};
pub use time_unit::TimeUnit;
