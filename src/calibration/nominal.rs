// Nominal - totally ordered f64 key for the calibration map

use std::cmp::Ordering;

/// Nominal value usable as an ordered map key
///
/// Ordering follows `f64::total_cmp`. Negative zero is folded into positive
/// zero on construction so both address the same calibration point.
#[derive(Debug, Clone, Copy)]
pub struct Nominal(f64);

impl Nominal {
    pub fn new(value: f64) -> Self {
        // -0.0 + 0.0 == +0.0
        Self(value + 0.0)
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl PartialEq for Nominal {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Nominal {}

impl PartialOrd for Nominal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Nominal {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}
