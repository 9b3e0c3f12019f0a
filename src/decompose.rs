use std::iter::FusedIterator;

use crate::{dyadic_interval::DyadicInterval, traits::RealInterval};

/// The widest block the decomposition emits is `2^MAX_LEVEL` grid cells.
const MAX_LEVEL: u32 = i64::BITS - 2;

/// Breaks `interval` into maximal dyadic intervals no finer than
/// `tolerance`.
///
/// The interval is first snapped to the grid of resolution `tolerance`: the
/// cells `floor(inf * 2^t)..floor(sup * 2^t)` are kept, so a cell belongs to
/// the decomposition exactly when its included end lies in the interval
/// snapped to the grid. The cells are then merged into the unique sequence of
/// adjacent aligned dyadic intervals in which no two neighbours could be
/// merged into a larger one. Items are yielded left to right.
///
/// Returns `None` if either bound is not finite or does not fit the grid.
///
/// # Examples
///
/// ```
/// use dyadic_segments::{Interval, to_dyadic_intervals};
///
/// let pieces: Vec<String> = to_dyadic_intervals(&Interval::new(0.0, 15.2), 0)
///     .unwrap()
///     .map(|d| d.to_string())
///     .collect();
/// assert_eq!(
///     pieces,
///     [
///         "[0.000000, 8.000000)",
///         "[8.000000, 12.000000)",
///         "[12.000000, 14.000000)",
///         "[14.000000, 15.000000)",
///     ]
/// );
/// ```
pub fn to_dyadic_intervals<R>(interval: &R, tolerance: i32) -> Option<DyadicIntervals>
where
    R: RealInterval + ?Sized,
{
    let begin = DyadicInterval::bracket(interval.inf(), tolerance)?;
    let end = DyadicInterval::bracket(interval.sup(), tolerance)?;
    Some(DyadicIntervals {
        next: begin.k(),
        end: end.k(),
        resolution: tolerance,
    })
}

/// Iterator returned by [`to_dyadic_intervals`].
#[must_use]
#[derive(Debug, Clone)]
pub struct DyadicIntervals {
    /// the first grid cell not yet emitted
    next: i64,
    /// one past the last grid cell
    end: i64,
    resolution: i32,
}

impl Iterator for DyadicIntervals {
    type Item = DyadicInterval;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }

        let remaining = self.end.abs_diff(self.next);
        let alignment = if self.next == 0 {
            MAX_LEVEL
        } else {
            self.next.trailing_zeros()
        };
        let fits = u64::BITS - 1 - remaining.leading_zeros();
        let level = alignment.min(fits).min(MAX_LEVEL);
        debug_assert_eq!(self.next & ((1i64 << level) - 1), 0, "unaligned block");

        let item = DyadicInterval::from_parts(self.next >> level, self.resolution - level as i32);
        self.next += 1 << level;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.next >= self.end {
            (0, Some(0))
        } else {
            // at most two blocks per level on either side of the widest one
            let remaining = self.end.abs_diff(self.next);
            let levels = (u64::BITS - remaining.leading_zeros()) as usize;
            (1, Some(2 * levels))
        }
    }
}

impl FusedIterator for DyadicIntervals {}
