use std::fmt::{self, Debug, Display};

use crate::traits::RealInterval;

/// A half-open real interval `[inf, sup)`.
///
/// Construction is order-insensitive: the smaller argument always becomes
/// the lower bound. A zero-width interval is legal and contains no points.
///
/// # Examples
///
/// ```
/// use dyadic_segments::{Interval, RealInterval};
///
/// let interval = Interval::new(1.0, 0.0);
/// assert_eq!(interval.inf(), 0.0);
/// assert_eq!(interval.sup(), 1.0);
///
/// assert!(interval.contains(&Interval::new(0.25, 0.5)));
/// assert_eq!(interval.to_string(), "[0.000000, 1.000000)");
/// assert_eq!(format!("{interval:?}"), "Interval(0.000000, 1.000000)");
/// ```
#[derive(Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Interval {
    inf: f64,
    sup: f64,
}

static_assertions::assert_eq_size!(Interval, [f64; 2]);

impl Interval {
    /// The unit interval `[0, 1)`.
    pub const UNIT: Self = Self { inf: 0.0, sup: 1.0 };

    /// Creates an interval spanning `a` and `b`, in either order.
    #[inline]
    pub fn new(a: f64, b: f64) -> Self {
        if b < a {
            Self { inf: b, sup: a }
        } else {
            Self { inf: a, sup: b }
        }
    }

    /// Returns true if both bounds are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.inf.is_finite() && self.sup.is_finite()
    }
}

impl RealInterval for Interval {
    #[inline]
    fn inf(&self) -> f64 {
        self.inf
    }

    #[inline]
    fn sup(&self) -> f64 {
        self.sup
    }
}

impl From<(f64, f64)> for Interval {
    #[inline]
    fn from((a, b): (f64, f64)) -> Self {
        Self::new(a, b)
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.6}, {:.6})", self.inf, self.sup)
    }
}

impl Debug for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Interval({:.6}, {:.6})", self.inf, self.sup)
    }
}
