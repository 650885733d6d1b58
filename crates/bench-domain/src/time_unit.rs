// Rust guideline compliant 2026-07-26

//! Time unit used to scale a family's reported durations.

use serde::{Deserialize, Serialize};

/// The unit a family's timings are reported in. Internally every duration is
/// tracked in seconds; this only controls display/serialization scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    /// Nanoseconds -- the default unit for reported durations.
    Ns,
    /// Microseconds.
    Us,
    /// Milliseconds.
    Ms,
    /// Seconds.
    S,
}

impl Default for TimeUnit {
    fn default() -> Self {
        Self::Ns
    }
}

impl TimeUnit {
    /// Multiplier to convert a duration in seconds into this unit.
    #[must_use]
    pub fn from_seconds_factor(self) -> f64 {
        match self {
            Self::Ns => 1e9,
            Self::Us => 1e6,
            Self::Ms => 1e3,
            Self::S => 1.0,
        }
    }

    /// Scale a duration given in seconds into this unit.
    #[must_use]
    pub fn scale_seconds(self, seconds: f64) -> f64 {
        seconds * self.from_seconds_factor()
    }

    /// The short suffix used in console headers (`ns`, `us`, `ms`, `s`).
    #[must_use]
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Ns => "ns",
            Self::Us => "us",
            Self::Ms => "ms",
            Self::S => "s",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_ns() {
        assert_eq!(TimeUnit::default(), TimeUnit::Ns);
    }

    #[test]
    fn scale_seconds_round_trip() {
        assert!((TimeUnit::Ns.scale_seconds(1.0) - 1e9).abs() < 1e-6);
        assert!((TimeUnit::Ms.scale_seconds(1.0) - 1e3).abs() < 1e-6);
        assert!((TimeUnit::S.scale_seconds(1.0) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn serde_round_trip() {
        let json = serde_json::to_string(&TimeUnit::Us).unwrap();
        assert_eq!(json, "\"us\"");
        let back: TimeUnit = serde_json::from_str(&json).unwrap();
        assert_eq!(back, TimeUnit::Us);
    }
}
