use crate::Interval;

/// Read access to a half-open real interval `[inf, sup)`.
///
/// Implemented by [`Interval`], [`crate::DyadicInterval`] and
/// [`crate::Leaf`], so any of them can be passed where an interval is
/// expected.
pub trait RealInterval {
    /// the inclusive lower bound
    fn inf(&self) -> f64;

    /// the exclusive upper bound
    fn sup(&self) -> f64;

    /// the end point contained in the interval, equal to `inf`
    #[inline]
    fn included_end(&self) -> f64 {
        self.inf()
    }

    /// the end point omitted from the interval, equal to `sup`
    #[inline]
    fn excluded_end(&self) -> f64 {
        self.sup()
    }

    #[inline]
    fn width(&self) -> f64 {
        self.sup() - self.inf()
    }

    /// returns true if the interval contains no points
    #[inline]
    fn is_empty(&self) -> bool {
        self.inf() >= self.sup()
    }

    /// returns true if `other` lies entirely within this interval
    #[inline]
    fn contains<R: RealInterval + ?Sized>(&self, other: &R) -> bool {
        other.inf() >= self.inf() && other.sup() <= self.sup()
    }

    /// returns true if `value` lies in `[inf, sup)`
    #[inline]
    fn contains_point(&self, value: f64) -> bool {
        self.inf() <= value && value < self.sup()
    }

    /// returns the plain [`Interval`] with the same bounds
    #[inline]
    fn to_interval(&self) -> Interval {
        Interval::new(self.inf(), self.sup())
    }
}

impl<T> RealInterval for &T
where
    T: RealInterval + ?Sized,
{
    #[inline]
    fn inf(&self) -> f64 {
        (**self).inf()
    }

    #[inline]
    fn sup(&self) -> f64 {
        (**self).sup()
    }
}
