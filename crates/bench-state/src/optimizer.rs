// Rust guideline compliant 2026-07-26

//! Compile-level primitives that prevent the optimiser from eliding the
//! work a benchmark body measures. Both are zero-cost at
//! runtime: they produce no instructions beyond what `std::hint::black_box`
//! already inserts.

/// Force the optimiser to treat `value` as observed, preventing dead-code
/// elimination of the computation that produced it.
pub fn do_not_optimize<T>(value: T) -> T {
    std::hint::black_box(value)
}

/// Force the optimiser to treat all memory as potentially written,
/// preventing it from hoisting loads/stores across this call.
pub fn clobber_memory() {
    std::hint::black_box(());
    std::sync::atomic::fence(std::sync::atomic::Ordering::SeqCst);
}
