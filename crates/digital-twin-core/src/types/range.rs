//! Inclusive value ranges for bounded sub-state fields.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{TwinError, TwinResult};

/// Inclusive `[min, max]` bound for a scalar field.
///
/// Three shapes recur across the sub-states:
/// - [`ValueRange::BIDIRECTIONAL`]: `[-1, 1]`, zero is neutral
/// - [`ValueRange::UNIPOLAR`]: `[0, 1]`, zero is absence
/// - [`ValueRange::SLEEP_HOURS`]: `[0, 24]` hours
///
/// # Example
/// ```rust
/// use digital_twin_core::types::ValueRange;
///
/// assert!(ValueRange::UNIPOLAR.contains(1.0));
/// assert!(!ValueRange::UNIPOLAR.contains(-0.01));
/// assert!(!ValueRange::BIDIRECTIONAL.contains(f32::NAN));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f32,
    pub max: f32,
}

impl ValueRange {
    /// `[-1.0, 1.0]` with zero as neutral.
    pub const BIDIRECTIONAL: Self = Self::new(-1.0, 1.0);

    /// `[0.0, 1.0]` with zero as absence.
    pub const UNIPOLAR: Self = Self::new(0.0, 1.0);

    /// `[0.0, 24.0]` hours per day.
    pub const SLEEP_HOURS: Self = Self::new(0.0, 24.0);

    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// True when `value` lies within the bound. NaN is never contained.
    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    /// Check `value` for `field`, failing with [`TwinError::OutOfRange`].
    pub fn check(&self, field: &str, value: f32) -> TwinResult<f32> {
        if self.contains(value) {
            Ok(value)
        } else {
            Err(TwinError::out_of_range(field, value, *self))
        }
    }
}

impl fmt::Display for ValueRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

/// Check `values` against the `(name, range)` table they were read in.
///
/// Returns the first violation so callers can reject the whole input before
/// any state is handed out.
pub(crate) fn check_all(fields: &[(&'static str, ValueRange)], values: &[f32]) -> TwinResult<()> {
    for (&(name, range), &value) in fields.iter().zip(values) {
        range.check(name, value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_are_inclusive() {
        assert!(ValueRange::BIDIRECTIONAL.contains(-1.0));
        assert!(ValueRange::BIDIRECTIONAL.contains(1.0));
        assert!(ValueRange::UNIPOLAR.contains(0.0));
        assert!(ValueRange::SLEEP_HOURS.contains(24.0));
        assert!(!ValueRange::SLEEP_HOURS.contains(24.5));
    }

    #[test]
    fn test_non_finite_rejected() {
        for value in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            assert!(!ValueRange::UNIPOLAR.contains(value));
            assert!(ValueRange::BIDIRECTIONAL.check("x", value).is_err());
        }
    }

    #[test]
    fn test_check_all_reports_first_violation() {
        let fields = [
            ("a", ValueRange::UNIPOLAR),
            ("b", ValueRange::UNIPOLAR),
            ("c", ValueRange::BIDIRECTIONAL),
        ];
        let err = check_all(&fields, &[0.5, 2.0, -3.0]).unwrap_err();
        assert_eq!(err.field(), Some("b"));
    }

    #[test]
    fn test_display() {
        assert_eq!(ValueRange::UNIPOLAR.to_string(), "[0, 1]");
        assert_eq!(ValueRange::SLEEP_HOURS.to_string(), "[0, 24]");
    }
}
