use std::convert::Infallible;

use tracing::{debug, trace};

use crate::{
    SegmentError,
    bounds::{DISABLED, ResolutionBounds},
    dyadic_interval::DyadicInterval,
    interval::Interval,
    scale::UnitScale,
    traits::RealInterval,
};

/// Why a node became a leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Termination {
    /// the characteristic function accepted the node
    Accepted,
    /// the node is finer than the maximum resolution
    ResolutionCap,
}

/// A terminal piece of a segmentation.
///
/// `node` addresses the piece in the dyadic tree of the unit interval, which
/// is mapped onto the segmented root; `interval` is the piece in the root's
/// coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Leaf {
    node: DyadicInterval,
    interval: Interval,
    termination: Termination,
}

impl Leaf {
    #[inline]
    pub fn node(&self) -> DyadicInterval {
        self.node
    }

    #[inline]
    pub fn interval(&self) -> Interval {
        self.interval
    }

    #[inline]
    pub fn termination(&self) -> Termination {
        self.termination
    }

    #[inline]
    pub fn is_accepted(&self) -> bool {
        self.termination == Termination::Accepted
    }
}

impl RealInterval for Leaf {
    #[inline]
    fn inf(&self) -> f64 {
        self.interval.inf()
    }

    #[inline]
    fn sup(&self) -> f64 {
        self.interval.sup()
    }
}

impl From<Leaf> for Interval {
    #[inline]
    fn from(leaf: Leaf) -> Self {
        leaf.interval
    }
}

/// Segments `root` by dyadic bisection.
///
/// The unit dyadic tree is mapped onto `root` and walked depth first. A node
/// at depth `d` becomes a leaf if `d > max_resolution`, or if
/// `d >= min_resolution` and `characteristic` holds on it. Otherwise it is
/// split into its two halves. The leaves are returned left to right; they do
/// not overlap and their union is `root`.
///
/// A negative `max_resolution` returns `root` unsplit without consulting
/// `characteristic`. A negative `min_resolution` lets `characteristic`
/// accept any node, the root included.
///
/// # Examples
///
/// ```
/// use dyadic_segments::{Interval, RealInterval, segment};
///
/// let pieces = segment(&Interval::UNIT, |i| i.width() <= 0.25, 3, -1).unwrap();
/// assert_eq!(
///     pieces,
///     [
///         Interval::new(0.0, 0.25),
///         Interval::new(0.25, 0.5),
///         Interval::new(0.5, 0.75),
///         Interval::new(0.75, 1.0),
///     ]
/// );
///
/// // a negative maximum resolution never splits
/// let pieces = segment(&Interval::UNIT, |_| unreachable!(), -1, -1).unwrap();
/// assert_eq!(pieces, [Interval::UNIT]);
/// ```
pub fn segment<R, F>(
    root: &R,
    mut characteristic: F,
    max_resolution: i32,
    min_resolution: i32,
) -> Result<Vec<Interval>, SegmentError>
where
    R: RealInterval + ?Sized,
    F: FnMut(&Interval) -> bool,
{
    let bounds = ResolutionBounds::new(max_resolution, min_resolution)?;
    try_segment(
        root,
        |interval: &Interval| Ok::<_, Infallible>(characteristic(interval)),
        bounds,
    )
}

/// Like [`segment`], with a fallible characteristic function. The first
/// failure aborts the traversal and is returned as
/// [`SegmentError::Characteristic`].
pub fn try_segment<R, F, E>(
    root: &R,
    characteristic: F,
    bounds: ResolutionBounds,
) -> Result<Vec<Interval>, SegmentError<E>>
where
    R: RealInterval + ?Sized,
    F: FnMut(&Interval) -> Result<bool, E>,
{
    let leaves = Segmenter::new(characteristic, bounds).leaves(root)?;
    Ok(leaves.into_iter().map(Interval::from).collect())
}

/// Walks the dyadic tree of a root interval under a characteristic function
/// and a set of [`ResolutionBounds`].
///
/// Unlike [`segment`], a `Segmenter` reports each leaf's dyadic node and the
/// reason it terminated, and may be reused across roots.
pub struct Segmenter<F> {
    characteristic: F,
    bounds: ResolutionBounds,
}

impl<F> Segmenter<F> {
    pub fn new(characteristic: F, bounds: ResolutionBounds) -> Self {
        Self { characteristic, bounds }
    }

    #[inline]
    pub fn bounds(&self) -> ResolutionBounds {
        self.bounds
    }

    /// Returns the leaves of `root`, left to right.
    pub fn leaves<R, E>(&mut self, root: &R) -> Result<Vec<Leaf>, SegmentError<E>>
    where
        R: RealInterval + ?Sized,
        F: FnMut(&Interval) -> Result<bool, E>,
    {
        let root = root.to_interval();
        // the width must be finite too, or every interior point maps to sup
        if !root.is_finite() || !root.width().is_finite() {
            return Err(SegmentError::NonFiniteRoot(root));
        }

        debug!(
            %root,
            max_resolution = self.bounds.max_resolution(),
            min_resolution = self.bounds.min_resolution(),
            "segmenting"
        );

        let scale = UnitScale::onto(&root);
        let mut leaves = vec![];
        self.descend(&scale, DyadicInterval::UNIT, &mut leaves)?;

        debug!(%root, leaves = leaves.len(), "segmented");
        Ok(leaves)
    }

    fn descend<E>(
        &mut self,
        scale: &UnitScale,
        node: DyadicInterval,
        out: &mut Vec<Leaf>,
    ) -> Result<(), SegmentError<E>>
    where
        F: FnMut(&Interval) -> Result<bool, E>,
    {
        let depth = node.n();
        debug_assert!(depth <= self.bounds.max_resolution().max(DISABLED) + 1);
        let interval = scale.unscale(&node);

        let termination = if self.bounds.caps(depth) {
            Some(Termination::ResolutionCap)
        } else if self.bounds.consults(depth)
            && (self.characteristic)(&interval).map_err(SegmentError::Characteristic)?
        {
            Some(Termination::Accepted)
        } else {
            None
        };

        match termination {
            Some(termination) => {
                trace!(?node, %interval, ?termination, "leaf");
                out.push(Leaf { node, interval, termination });
                Ok(())
            }
            None => {
                let (lower, upper) = node.children();
                self.descend(scale, lower, out)?;
                self.descend(scale, upper, out)
            }
        }
    }
}
