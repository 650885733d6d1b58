// Rust guideline compliant 2026-07-26

//! Least-squares asymptotic complexity fitting, ported formula-for-formula
//! from Google Benchmark's own `CalculateLeastSq`/`MinimalLeastSq`.

use domain::BigO;

/// Result of fitting one candidate curve: the leading coefficient and the
/// normalised RMS residual.
#[derive(Debug, Clone)]
pub struct LeastSq {
    /// Fitted coefficient for the chosen curve.
    pub coef: f64,
    /// RMS residual, normalised by the mean observed time.
    pub rms: f64,
    /// Which curve this fit used (meaningful when [`BigO::Auto`] picks the
    /// best of several).
    pub complexity: BigO,
}

fn fitting_curve(big_o: &BigO) -> impl Fn(i64) -> f64 + '_ {
    move |n: i64| match big_o {
        BigO::ON => n as f64,
        BigO::ONSquared => (n as f64) * (n as f64),
        BigO::ONCubed => (n as f64) * (n as f64) * (n as f64),
        BigO::OLogN => (n as f64).log2(),
        BigO::ONLogN => (n as f64) * (n as f64).log2(),
        BigO::Lambda(f) => f(n),
        BigO::O1 | BigO::Auto | BigO::None => 1.0,
    }
}

/// Fit `samples` (pairs of `(n, time_seconds)`) against `fitting_curve`,
/// returning the leading coefficient and normalised RMS residual. Direct
/// port of `CalculateLeastSq`.
fn calculate_least_sq(samples: &[(i64, f64)], curve: impl Fn(i64) -> f64) -> (f64, f64) {
    let mut sigma_gn_squared = 0.0;
    let mut sigma_time_gn = 0.0;
    let mut sigma_time = 0.0;

    for &(n, time) in samples {
        let gn = curve(n);
        sigma_gn_squared += gn * gn;
        sigma_time_gn += time * gn;
        sigma_time += time;
    }

    let coef = sigma_time_gn / sigma_gn_squared;

    let mut rms = 0.0;
    for &(n, time) in samples {
        let fit = coef * curve(n);
        rms += (time - fit).powi(2);
    }

    let mean = sigma_time / samples.len() as f64;
    let normalised_rms = if mean == 0.0 {
        0.0
    } else {
        (rms / samples.len() as f64).sqrt() / mean
    };

    (coef, normalised_rms)
}

/// Fit `samples` against `big_o`. For [`BigO::Auto`] this tries every
/// built-in candidate curve and keeps the one with the smallest RMS
/// residual, defaulting to `O(1)` (`MinimalLeastSq`'s behaviour).
///
/// Returns `None` for [`BigO::None`]; callers are expected to have already
/// checked there are at least two distinct `n` values.
#[must_use]
pub fn fit_complexity(samples: &[(i64, f64)], big_o: &BigO) -> Option<LeastSq> {
    if matches!(big_o, BigO::None) {
        return None;
    }

    if matches!(big_o, BigO::Auto) {
        let candidates = [BigO::OLogN, BigO::ON, BigO::ONLogN, BigO::ONSquared, BigO::ONCubed];

        let (coef, rms) = calculate_least_sq(samples, fitting_curve(&BigO::O1));
        let mut best = LeastSq { coef, rms, complexity: BigO::O1 };

        for candidate in &candidates {
            let (coef, rms) = calculate_least_sq(samples, fitting_curve(candidate));
            if rms < best.rms {
                best = LeastSq { coef, rms, complexity: clone_tag(candidate) };
            }
        }
        return Some(best);
    }

    let (coef, rms) = calculate_least_sq(samples, fitting_curve(big_o));
    Some(LeastSq { coef, rms, complexity: clone_tag(big_o) })
}

fn clone_tag(big_o: &BigO) -> BigO {
    match big_o {
        BigO::O1 => BigO::O1,
        BigO::OLogN => BigO::OLogN,
        BigO::ON => BigO::ON,
        BigO::ONLogN => BigO::ONLogN,
        BigO::ONSquared => BigO::ONSquared,
        BigO::ONCubed => BigO::ONCubed,
        BigO::Auto => BigO::Auto,
        BigO::Lambda(f) => BigO::Lambda(f.clone()),
        BigO::None => BigO::None,
    }
}
