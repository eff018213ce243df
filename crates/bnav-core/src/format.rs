//! Human-readable duration and distance helpers.
//!
//! Kept deliberately structural: `duration_parts` returns the broken-down
//! components so UI layers can localize the unit labels; the `Display` impl
//! is a plain-text default.

use std::fmt;

/// A duration broken into whole minutes and rounded residual seconds.
///
/// Seconds are rounded, not floored, so `duration_parts(59.6)` reports
/// `0 min 60 s` — same convention as the countdown displays this feeds.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DurationParts {
    pub minutes: u64,
    pub seconds: u32,
}

/// Break a duration in seconds into display components.
///
/// `minutes = floor(secs / 60)`, `seconds = round(secs mod 60)`.
pub fn duration_parts(secs: f64) -> DurationParts {
    DurationParts {
        minutes: (secs / 60.0).floor() as u64,
        seconds: (secs % 60.0).round() as u32,
    }
}

impl fmt::Display for DurationParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} min {} s", self.minutes, self.seconds)
    }
}

/// Format a distance in metres as kilometres with two decimal places.
pub fn format_distance_km(meters: f64) -> String {
    format!("{:.2} km", meters / 1000.0)
}
