use std::{
    cmp::Ordering,
    fmt::{self, Debug, Display},
};

use num::{Integer, ToPrimitive};

use crate::{
    IntervalError,
    dyadic::{Dyadic, pow2},
    interval::Interval,
    traits::RealInterval,
};

/// Selects one of the two end points of a dyadic interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum End {
    /// the included (left) end
    Lower = 0,
    /// the excluded (right) end
    Upper = 1,
}

impl TryFrom<i64> for End {
    type Error = IntervalError;

    /// Converts a raw direction, `0` or `1`, into an [`End`].
    fn try_from(direction: i64) -> Result<Self, Self::Error> {
        match direction {
            0 => Ok(End::Lower),
            1 => Ok(End::Upper),
            other => Err(IntervalError::InvalidDirection(other)),
        }
    }
}

/// `floor(k / 2^shift)` for any shift.
#[inline]
fn floor_shr(k: i64, shift: u32) -> i64 {
    k >> shift.min(i64::BITS - 1)
}

/// A dyadic interval `[k/2^n, (k+1)/2^n)`.
///
/// `n` is the resolution: the number of bisections separating the interval
/// from a unit-width one. `k` is unrestricted, so the type also addresses
/// dyadic intervals outside `[0, 1)`.
///
/// Intervals built with [`DyadicInterval::new`] always have `n >= 0`.
/// Navigation above resolution zero ([`DyadicInterval::expand_interval`],
/// [`DyadicInterval::bracket`], [`crate::to_dyadic_intervals`]) produces
/// intervals wider than one with a negative `n`.
///
/// All operations are pure and return new values. Ordering follows the leaves
/// of the dyadic tree: by included end, coarser intervals first.
///
/// # Examples
///
/// ```
/// use dyadic_segments::{DyadicInterval, End, RealInterval};
///
/// let unit = DyadicInterval::default();
/// assert_eq!(unit.to_string(), "[0.000000, 1.000000)");
///
/// let lower = unit.shrink_to_contained_end(End::Lower);
/// let upper = unit.shrink_to_omitted_end();
/// assert_eq!((lower.inf(), lower.sup()), (0.0, 0.5));
/// assert_eq!((upper.inf(), upper.sup()), (0.5, 1.0));
///
/// let next = unit.flip_interval();
/// assert_eq!(format!("{next:?}"), "DyadicInterval(1, 0)");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DyadicInterval {
    k: i64,
    n: i32,
}

static_assertions::assert_eq_size!(DyadicInterval, Dyadic);

impl DyadicInterval {
    /// The unit interval `[0, 1)`.
    pub const UNIT: Self = Self { k: 0, n: 0 };

    /// The smallest `k` accepted by [`DyadicInterval::new`].
    pub const MIN_K: i64 = -(1 << 62);

    /// The largest `k` accepted by [`DyadicInterval::new`]. Both children of
    /// an interval in `MIN_K..=MAX_K`, and both of its neighbours, still fit
    /// an `i64`.
    pub const MAX_K: i64 = (1 << 62) - 1;

    /// Creates the dyadic interval `[k/2^n, (k+1)/2^n)`.
    ///
    /// Fails if `n` is negative or `k` is outside `MIN_K..=MAX_K`.
    pub fn new(k: i64, n: i32) -> Result<Self, IntervalError> {
        if n < 0 {
            return Err(IntervalError::NegativeResolution(n));
        }
        if !(Self::MIN_K..=Self::MAX_K).contains(&k) {
            return Err(IntervalError::IndexOutOfRange(k));
        }
        Ok(Self { k, n })
    }

    #[inline]
    pub(crate) const fn from_parts(k: i64, n: i32) -> Self {
        Self { k, n }
    }

    /// The dyadic interval at `resolution` containing `value`, i.e. with
    /// `k = floor(value * 2^resolution)`.
    ///
    /// Returns `None` if `value` is not finite or `k` does not fit an `i64`.
    pub fn bracket(value: f64, resolution: i32) -> Option<Self> {
        let k = (value * pow2(resolution)).floor().to_i64()?;
        Some(Self { k, n: resolution })
    }

    #[inline]
    pub const fn k(&self) -> i64 {
        self.k
    }

    #[inline]
    pub const fn n(&self) -> i32 {
        self.n
    }

    /// the resolution, an alias for [`DyadicInterval::n`]
    #[inline]
    pub const fn resolution(&self) -> i32 {
        self.n
    }

    /// the included end as an exact dyadic
    #[inline]
    pub const fn inf_dyadic(&self) -> Dyadic {
        Dyadic::new(self.k, self.n)
    }

    /// the excluded end as an exact dyadic
    #[inline]
    pub const fn sup_dyadic(&self) -> Dyadic {
        match self.k.checked_add(1) {
            Some(k) => Dyadic::new(k, self.n),
            // k == i64::MAX, so k + 1 == 2^63
            None => Dyadic::new(1 << 62, self.n.saturating_sub(1)),
        }
    }

    /// The adjacent interval at the same resolution whose included end is
    /// this interval's excluded end.
    #[inline]
    pub const fn flip_interval(&self) -> Self {
        self.shift_fwd(1)
    }

    /// Translates the interval `steps` widths towards `-inf`.
    #[inline]
    pub const fn shift_back(&self, steps: i64) -> Self {
        Self { k: self.k - steps, n: self.n }
    }

    /// Translates the interval `steps` widths towards `+inf`.
    #[inline]
    pub const fn shift_fwd(&self, steps: i64) -> Self {
        Self { k: self.k + steps, n: self.n }
    }

    /// The half of this interval that keeps `end` as one of its end points.
    #[inline]
    pub const fn shrink_to_contained_end(&self, end: End) -> Self {
        Self {
            k: 2 * self.k + end as i64,
            n: self.n + 1,
        }
    }

    /// The upper half of this interval: the half that omits the included
    /// end. Together with `shrink_to_contained_end(End::Lower)` it tiles
    /// this interval.
    #[inline]
    pub const fn shrink_to_omitted_end(&self) -> Self {
        self.shrink_to_contained_end(End::Upper)
    }

    /// Both halves of this interval, lower first.
    #[inline]
    pub const fn children(&self) -> (Self, Self) {
        (
            self.shrink_to_contained_end(End::Lower),
            self.shrink_to_omitted_end(),
        )
    }

    /// The unique interval `levels` resolutions coarser that contains this
    /// interval.
    #[inline]
    pub fn expand_interval(&self, levels: u32) -> Self {
        Self {
            k: floor_shr(self.k, levels),
            n: self.n - levels as i32,
        }
    }

    #[inline]
    pub fn parent(&self) -> Self {
        self.expand_interval(1)
    }

    /// Returns true if this interval shares its included end with its
    /// parent, that is if it is the lower half of the parent.
    #[inline]
    pub fn aligned(&self) -> bool {
        self.k.is_even()
    }

    /// The other half of this interval's parent.
    #[inline]
    pub fn sibling(&self) -> Self {
        if self.aligned() {
            self.shift_fwd(1)
        } else {
            self.shift_back(1)
        }
    }

    /// Returns true if `other` is this interval or one of its descendants in
    /// the dyadic tree.
    pub fn contains_dyadic(&self, other: &Self) -> bool {
        other.n >= self.n && floor_shr(other.k, other.n.abs_diff(self.n)) == self.k
    }
}

impl RealInterval for DyadicInterval {
    #[inline]
    fn inf(&self) -> f64 {
        self.inf_dyadic().to_f64()
    }

    #[inline]
    fn sup(&self) -> f64 {
        self.sup_dyadic().to_f64()
    }

    #[inline]
    fn width(&self) -> f64 {
        pow2(-self.n)
    }
}

impl From<DyadicInterval> for Interval {
    #[inline]
    fn from(value: DyadicInterval) -> Self {
        value.to_interval()
    }
}

impl Ord for DyadicInterval {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inf_dyadic()
            .cmp_value(&other.inf_dyadic())
            .then(self.n.cmp(&other.n))
    }
}

impl PartialOrd for DyadicInterval {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for DyadicInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.6}, {:.6})", self.inf(), self.sup())
    }
}

impl Debug for DyadicInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DyadicInterval({}, {})", self.k, self.n)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use itertools::Itertools;
    use proptest::proptest;

    use super::*;

    const PARAMS: [(i64, i32); 5] = [(0, 1), (0, 2), (1, 2), (3, 3), (-1, 3)];

    fn dyadic(k: i64, n: i32) -> DyadicInterval {
        DyadicInterval::new(k, n).unwrap()
    }

    #[test]
    fn test_defaults() {
        let unit = DyadicInterval::default();
        assert_eq!(unit, DyadicInterval::UNIT);
        assert_eq!(unit.inf(), 0.0);
        assert_eq!(unit.sup(), 1.0);
    }

    #[test]
    fn test_member_access() {
        for (k, n) in PARAMS {
            let interval = dyadic(k, n);
            let scale = 2f64.powi(n);
            assert_eq!(interval.inf(), k as f64 / scale, "case: ({k}, {n})");
            assert_eq!(interval.sup(), (k + 1) as f64 / scale, "case: ({k}, {n})");
            assert_eq!(interval.included_end(), interval.inf());
            assert_eq!(interval.excluded_end(), interval.sup());
        }
    }

    #[test]
    fn test_rendering() {
        for (k, n) in PARAMS {
            let interval = dyadic(k, n);
            let scale = 2f64.powi(n);
            assert_eq!(format!("{interval:?}"), format!("DyadicInterval({k}, {n})"));
            assert_eq!(
                interval.to_string(),
                format!("[{:.6}, {:.6})", k as f64 / scale, (k + 1) as f64 / scale)
            );
        }
    }

    #[test]
    fn test_negative_resolution_is_rejected() {
        assert_matches!(
            DyadicInterval::new(0, -1),
            Err(IntervalError::NegativeResolution(-1))
        );
    }

    #[test]
    fn test_index_range() {
        let top = dyadic(DyadicInterval::MAX_K, 0);
        assert_eq!(top.sup(), 2f64.powi(62));
        assert_eq!(top.to_string(), format!("[{:.6}, {:.6})", top.inf(), top.sup()));
        assert_eq!(top.flip_interval().k(), 1 << 62);
        let (_, upper) = top.children();
        assert_eq!(upper.k(), i64::MAX);
        assert_eq!(upper.sup(), top.sup());

        let bottom = dyadic(DyadicInterval::MIN_K, 3);
        assert_eq!(bottom.inf(), -(2f64.powi(59)));
        assert_eq!(bottom.children().0.k(), i64::MIN);
        assert_eq!(bottom.shift_back(1).k(), DyadicInterval::MIN_K - 1);

        assert_matches!(
            DyadicInterval::new(i64::MAX, 0),
            Err(IntervalError::IndexOutOfRange(i64::MAX))
        );
        assert_matches!(
            DyadicInterval::new(DyadicInterval::MIN_K - 1, 0),
            Err(IntervalError::IndexOutOfRange(_))
        );
    }

    #[test]
    fn test_last_node_of_deepest_level() {
        // 2^63 - 1 at resolution 63, the last child reachable from resolution 62
        let last = DyadicInterval::from_parts(i64::MAX, 63);
        assert_eq!(last.sup(), 1.0);
        assert!(last.sup_dyadic().rational_eq(&Dyadic::ONE));
        assert!(last.inf() <= last.sup());
        assert_eq!(last.to_string(), "[1.000000, 1.000000)");
    }

    #[test]
    fn test_direction_conversion() {
        assert_eq!(End::try_from(0).unwrap(), End::Lower);
        assert_eq!(End::try_from(1).unwrap(), End::Upper);
        assert_matches!(End::try_from(2), Err(IntervalError::InvalidDirection(2)));
        assert_matches!(End::try_from(-1), Err(IntervalError::InvalidDirection(-1)));
    }

    #[test]
    fn test_flip_interval() {
        let next = DyadicInterval::UNIT.flip_interval();
        assert_eq!(next.inf(), 1.0);
        assert_eq!(next.sup(), 2.0);

        // stepping along a resolution level
        let mut cursor = dyadic(0, 2);
        let mut ends = vec![];
        for _ in 0..4 {
            ends.push(cursor.inf());
            cursor = cursor.flip_interval();
        }
        assert_eq!(ends, [0.0, 0.25, 0.5, 0.75]);
    }

    #[test]
    fn test_shrink() {
        let unit = DyadicInterval::UNIT;
        let lower = unit.shrink_to_contained_end(End::Lower);
        assert_eq!((lower.inf(), lower.sup()), (0.0, 0.5));

        let upper = unit.shrink_to_contained_end(End::Upper);
        assert_eq!((upper.inf(), upper.sup()), (0.5, 1.0));

        let omitted = unit.shrink_to_omitted_end();
        assert_eq!(omitted, upper);
        assert_eq!(unit.children(), (lower, upper));
    }

    #[test]
    fn test_expand_and_alignment() {
        let d = dyadic(5, 3);
        assert!(!d.aligned());
        assert_eq!(d.parent(), DyadicInterval::from_parts(2, 2));
        assert_eq!(d.sibling(), dyadic(4, 3));
        assert_eq!(d.sibling().sibling(), d);
        assert_eq!(d.expand_interval(5), DyadicInterval::from_parts(0, -2));

        let negative = dyadic(-3, 1);
        assert_eq!(negative.parent(), DyadicInterval::from_parts(-2, 0));
        assert!(negative.parent().contains_dyadic(&negative));
        assert!(!negative.aligned());
        assert_eq!(negative.sibling(), dyadic(-4, 1));
    }

    #[test]
    fn test_bracket() {
        let d = DyadicInterval::bracket(0.3, 2).unwrap();
        assert_eq!(d, dyadic(1, 2));
        assert!(d.contains_point(0.3));

        let d = DyadicInterval::bracket(-0.3, 2).unwrap();
        assert_eq!(d, dyadic(-2, 2));
        assert!(d.contains_point(-0.3));

        let coarse = DyadicInterval::bracket(15.2, -2).unwrap();
        assert_eq!((coarse.inf(), coarse.sup()), (12.0, 16.0));

        assert!(DyadicInterval::bracket(f64::NAN, 0).is_none());
        assert!(DyadicInterval::bracket(1e30, 60).is_none());
    }

    #[test]
    fn test_contains_dyadic() {
        let d = dyadic(1, 1);
        assert!(d.contains_dyadic(&d));
        assert!(d.contains_dyadic(&dyadic(3, 2)));
        assert!(d.contains_dyadic(&dyadic(23, 5)));
        assert!(!d.contains_dyadic(&dyadic(1, 2)));
        assert!(!d.contains_dyadic(&DyadicInterval::UNIT));
    }

    #[test]
    fn test_tree_leaf_order() {
        let mut intervals = vec![
            dyadic(1, 1),
            dyadic(0, 2),
            DyadicInterval::UNIT,
            dyadic(1, 2),
            dyadic(-1, 0),
        ];
        intervals.sort();
        assert_eq!(
            intervals,
            [
                dyadic(-1, 0),
                DyadicInterval::UNIT,
                dyadic(0, 2),
                dyadic(1, 2),
                dyadic(1, 1),
            ]
        );
    }

    #[test]
    fn test_interval_view() {
        let interval: Interval = dyadic(3, 2).into();
        assert_eq!(interval, Interval::new(0.75, 1.0));
        assert!(Interval::UNIT.contains(&dyadic(3, 2)));
        assert!(!Interval::UNIT.contains(&dyadic(4, 2)));
    }

    proptest! {
        #[test]
        fn test_dyadic_bounds_proptest(k in -1_000_000i64..1_000_000, n in 0i32..40) {
            let d = dyadic(k, n);
            let scale = 2f64.powi(n);
            assert_eq!(d.inf(), k as f64 / scale);
            assert_eq!(d.sup(), (k + 1) as f64 / scale);
            assert_eq!(d.sup() - d.inf(), 1.0 / scale);
        }

        #[test]
        fn test_children_tile_parent_proptest(k in -1_000_000i64..1_000_000, n in 0i32..40) {
            let d = dyadic(k, n);
            let lower = d.shrink_to_contained_end(End::Lower);
            let omitted = d.shrink_to_omitted_end();
            assert_eq!(lower.inf(), d.inf());
            assert_eq!(lower.sup(), omitted.inf());
            assert_eq!(omitted.sup(), d.sup());
            assert!(d.contains_dyadic(&lower) && d.contains_dyadic(&omitted));
            assert_eq!(lower.parent(), d);
            assert_eq!(omitted.parent(), d);
            assert!(lower.aligned() && !omitted.aligned());
        }

        #[test]
        fn test_flip_is_adjacent_proptest(k in -1_000_000i64..1_000_000, n in 0i32..40) {
            let d = dyadic(k, n);
            let next = d.flip_interval();
            assert_eq!(next.inf(), d.sup());
            assert_eq!(next.width(), d.width());
            assert!(next > d);
            assert!([d, next].iter().tuple_windows().all(|(a, b)| a.sup() <= b.inf()));
        }
    }
}
