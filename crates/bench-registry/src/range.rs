// Rust guideline compliant 2026-07-26

//! Range expansion for `Range`/`DenseRange`-style argument generation.
//!
//! [`add_range`] is a direct port of Google Benchmark's own `AddRange<T>`
//! template: space benchmarks out in powers of `mult` between `lo` and `hi`
//! inclusive, always including both endpoints.

/// Append `[lo, lo*mult, lo*mult^2, ..., hi]` to `dst`, per Google
/// Benchmark's own `AddRange`. `lo` must be `>= 0`, `hi >= lo`, `mult >= 2`;
/// callers (the builder) are expected to have already validated this,
/// matching its `CHECK_GE` preconditions -- violating them is a programmer
/// error, not a runtime one, so this panics rather than returning a
/// `Result`.
pub fn add_range(dst: &mut Vec<i64>, lo: i64, hi: i64, mult: i64) {
    assert!(lo >= 0, "add_range: lo must be >= 0, got {lo}");
    assert!(hi >= lo, "add_range: hi must be >= lo ({hi} < {lo})");
    assert!(mult >= 2, "add_range: mult must be >= 2, got {mult}");

    dst.push(lo);

    let mut i: i64 = 1;
    while i < hi {
        if i > lo {
            dst.push(i);
        }
        if i > i64::MAX / mult {
            break;
        }
        i *= mult;
    }

    if hi != lo {
        dst.push(hi);
    }
}

/// Append `lo, lo+step, lo+2*step, ..., hi` to `dst` (Google Benchmark's
/// own `DenseRange`).
pub fn add_dense_range(dst: &mut Vec<i64>, lo: i64, hi: i64, step: i64) {
    assert!(hi >= lo, "add_dense_range: hi must be >= lo ({hi} < {lo})");
    assert!(step >= 1, "add_dense_range: step must be >= 1, got {step}");

    let mut i = lo;
    while i < hi {
        dst.push(i);
        i += step;
    }
    dst.push(hi);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_range_spaces_out_in_powers_of_mult() {
        let mut dst = Vec::new();
        add_range(&mut dst, 1, 100, 10);
        assert_eq!(dst, vec![1, 10, 100]);
    }

    #[test]
    fn add_range_always_includes_lo_and_hi() {
        let mut dst = Vec::new();
        add_range(&mut dst, 8, 8, 2);
        assert_eq!(dst, vec![8]);
    }

    #[test]
    fn add_range_default_mult_is_8() {
        let mut dst = Vec::new();
        add_range(&mut dst, 1, 64, 8);
        assert_eq!(dst, vec![1, 8, 64]);
    }

    #[test]
    fn add_dense_range_is_arithmetic() {
        let mut dst = Vec::new();
        add_dense_range(&mut dst, 0, 10, 3);
        assert_eq!(dst, vec![0, 3, 6, 9, 10]);
    }

    #[test]
    #[should_panic(expected = "mult must be >= 2")]
    fn add_range_rejects_mult_below_2() {
        let mut dst = Vec::new();
        add_range(&mut dst, 1, 10, 1);
    }
}
