use std::{cmp::Ordering, collections::BinaryHeap, convert::Infallible};

use tracing::{debug, trace};

use crate::{
    BoundsError, SegmentError,
    bounds::{MAX_RESOLUTION, SearchTolerance},
    decompose::to_dyadic_intervals,
    dyadic_interval::{DyadicInterval, End},
    interval::Interval,
    traits::RealInterval,
};

/// Finds the runs of `root` on which `characteristic` holds.
///
/// `root` is broken into maximal dyadic intervals at the signal resolution
/// and these are tested coarsest first, halving the ones that fail, until
/// one satisfies `characteristic` or the signal resolution is exhausted. A
/// hit is grown on both sides by the largest adjacent dyadic intervals, no
/// finer than the trim resolution, that keep `characteristic` true on the
/// union. The run is recorded and the parts of `root` on either side of it
/// are searched the same way.
///
/// Runs are returned left to right. They lie inside `root`, do not overlap,
/// and `characteristic` held on each of them when it was grown. An empty
/// result means no dyadic interval at the signal resolution satisfied
/// `characteristic`.
///
/// # Examples
///
/// ```
/// use dyadic_segments::{Interval, RealInterval, SearchTolerance, search};
///
/// let runs = search(
///     &Interval::UNIT,
///     |i| i.inf() >= 0.25 && i.sup() <= 0.75,
///     SearchTolerance::precision(3),
/// )
/// .unwrap();
/// assert_eq!(runs, [Interval::new(0.25, 0.75)]);
/// ```
pub fn search<R, F>(
    root: &R,
    mut characteristic: F,
    tolerance: SearchTolerance,
) -> Result<Vec<Interval>, SegmentError>
where
    R: RealInterval + ?Sized,
    F: FnMut(&Interval) -> bool,
{
    try_search(
        root,
        |interval: &Interval| Ok::<_, Infallible>(characteristic(interval)),
        tolerance,
    )
}

/// Like [`search`], with a fallible characteristic function. The first
/// failure aborts the search and is returned as
/// [`SegmentError::Characteristic`].
pub fn try_search<R, F, E>(
    root: &R,
    characteristic: F,
    tolerance: SearchTolerance,
) -> Result<Vec<Interval>, SegmentError<E>>
where
    R: RealInterval + ?Sized,
    F: FnMut(&Interval) -> Result<bool, E>,
{
    let root = root.to_interval();
    if !root.is_finite() {
        return Err(SegmentError::NonFiniteRoot(root));
    }
    let trim = tolerance.trim();
    if trim > MAX_RESOLUTION {
        return Err(BoundsError::ResolutionTooFine {
            requested: trim,
            limit: MAX_RESOLUTION,
        }
        .into());
    }
    // growing a run steps one level past the trim resolution
    if to_dyadic_intervals(&root, trim + 1).is_none() {
        return Err(BoundsError::GridOverflow { resolution: trim + 1 }.into());
    }

    debug!(%root, trim, signal = tolerance.signal(), "searching");

    let mut searcher = Searcher { characteristic, tolerance };
    let mut runs = vec![];
    let mut pending = vec![Pending::Search(root)];
    while let Some(task) = pending.pop() {
        match task {
            Pending::Emit(run) => runs.push(run),
            Pending::Search(component) => {
                let Some(run) = searcher.find(&component)? else {
                    continue;
                };
                trace!(%component, %run, "found run");
                // popped in reverse: left part, then the run, then right part
                if run.sup() < component.sup() {
                    pending.push(Pending::Search(Interval::new(run.sup(), component.sup())));
                }
                pending.push(Pending::Emit(run));
                if run.inf() > component.inf() {
                    pending.push(Pending::Search(Interval::new(component.inf(), run.inf())));
                }
            }
        }
    }

    debug!(%root, runs = runs.len(), "searched");
    Ok(runs)
}

enum Pending {
    Search(Interval),
    Emit(Interval),
}

/// A piece waiting to be tested.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Candidate {
    n: i32,
    seq: u64,
    piece: DyadicInterval,
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        // reversed so the max-heap pops the coarsest, then the oldest
        (other.n, other.seq).cmp(&(self.n, self.seq))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

struct Searcher<F> {
    characteristic: F,
    tolerance: SearchTolerance,
}

impl<F> Searcher<F> {
    fn holds<E>(&mut self, interval: &Interval) -> Result<bool, SegmentError<E>>
    where
        F: FnMut(&Interval) -> Result<bool, E>,
    {
        (self.characteristic)(interval).map_err(SegmentError::Characteristic)
    }

    /// Finds one run inside `component`, clamped to it.
    fn find<E>(&mut self, component: &Interval) -> Result<Option<Interval>, SegmentError<E>>
    where
        F: FnMut(&Interval) -> Result<bool, E>,
    {
        let signal = self.tolerance.signal();
        let Some(pieces) = to_dyadic_intervals(component, signal) else {
            return Ok(None);
        };

        // coarsest first, in insertion order within a resolution
        let mut queue = BinaryHeap::new();
        let mut seq = 0u64;
        let mut enqueue = |queue: &mut BinaryHeap<Candidate>, piece: DyadicInterval| {
            queue.push(Candidate { n: piece.n(), seq, piece });
            seq += 1;
        };
        for piece in pieces {
            enqueue(&mut queue, piece);
        }

        let hit = loop {
            let Some(Candidate { piece, .. }) = queue.pop() else {
                return Ok(None);
            };
            if piece.n() > signal {
                return Ok(None);
            }
            // pieces snapped outside the component can never join a run of it
            if piece.sup() <= component.inf() || piece.inf() >= component.sup() {
                continue;
            }
            if self.holds(&piece.to_interval())? {
                break piece;
            }
            let (lower, upper) = piece.children();
            enqueue(&mut queue, lower);
            enqueue(&mut queue, upper);
        };

        let (first, last) = self.grow(component, hit)?;
        let run = Interval::new(
            first.inf().max(component.inf()),
            last.sup().min(component.sup()),
        );
        Ok(Some(run))
    }

    /// Grows the run starting at `hit` to the left, then to the right, and
    /// returns its first and last pieces.
    fn grow<E>(
        &mut self,
        component: &Interval,
        hit: DyadicInterval,
    ) -> Result<(DyadicInterval, DyadicInterval), SegmentError<E>>
    where
        F: FnMut(&Interval) -> Result<bool, E>,
    {
        let trim = self.tolerance.trim();
        let mut first = hit;
        let last = hit;

        let mut front = first;
        while front.n() <= trim {
            // halve until the neighbour before the run can join it
            while front.n() <= trim && !self.joins(component, &front.shift_back(1), last.sup())? {
                front = front.shrink_to_contained_end(End::Lower);
            }
            front = front.shift_back(1);
            if front.n() > trim {
                break;
            }
            first = front;
        }

        let mut last = last;
        let mut back = last.shift_fwd(1);
        while back.n() <= trim {
            while back.n() <= trim && !self.joins(component, &back, first.inf())? {
                back = back.shrink_to_contained_end(End::Lower);
            }
            if back.n() > trim {
                break;
            }
            last = back;
            back = back.shift_fwd(1);
        }

        Ok((first, last))
    }

    /// Returns true if `candidate` lies in `component` and the characteristic
    /// holds on its union with the run reaching to `far_end`.
    fn joins<E>(
        &mut self,
        component: &Interval,
        candidate: &DyadicInterval,
        far_end: f64,
    ) -> Result<bool, SegmentError<E>>
    where
        F: FnMut(&Interval) -> Result<bool, E>,
    {
        if !component.contains(candidate) {
            return Ok(false);
        }
        self.holds(&Interval::new(candidate.inf(), far_end))
    }
}
