//! Dyadic segmentation of real intervals.
//!
//! A characteristic function is a predicate on intervals. This crate finds
//! where such a predicate holds by working on the dyadic grid: intervals of
//! the form `[k / 2^n, (k + 1) / 2^n)`.
//!
//! ## Key Features:
//!
//! - **Exact dyadic arithmetic**: [`Dyadic`] numbers and [`DyadicInterval`]s
//!   are integer pairs, so comparisons, shifts and refinements never round.
//!
//! - **Segmentation**: [`segment`] bisects a root interval until every piece
//!   is accepted by the characteristic function or reaches a resolution cap.
//!   The pieces always partition the root.
//!
//! - **Search**: [`search`] locates the maximal runs of a root interval on
//!   which the characteristic function holds, to a chosen resolution.

use std::convert::Infallible;

use thiserror::Error;

mod bounds;
mod decompose;
mod dyadic;
mod dyadic_interval;
mod interval;
mod scale;
mod search;
mod segment;
mod traits;

#[cfg(any(test, feature = "testutil"))]
pub mod testutil;

pub use bounds::{DISABLED, MAX_RESOLUTION, ResolutionBounds, SearchTolerance};
pub use decompose::{DyadicIntervals, to_dyadic_intervals};
pub use dyadic::Dyadic;
pub use dyadic_interval::{DyadicInterval, End};
pub use interval::Interval;
pub use scale::UnitScale;
pub use search::{search, try_search};
pub use segment::{Leaf, Segmenter, Termination, segment, try_segment};
pub use traits::RealInterval;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum IntervalError {
    #[error("invalid direction {0}, expected 0 or 1")]
    InvalidDirection(i64),

    #[error("dyadic intervals need a non-negative resolution, got {0}")]
    NegativeResolution(i32),

    #[error("dyadic interval index {0} is out of range")]
    IndexOutOfRange(i64),
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BoundsError {
    #[error("resolution {requested} is finer than the supported limit of {limit}")]
    ResolutionTooFine { requested: i32, limit: i32 },

    #[error("root does not fit the dyadic grid at resolution {resolution}")]
    GridOverflow { resolution: i32 },
}

/// Errors returned by [`segment`] and [`search`]. `E` is the error type of a
/// fallible characteristic function.
#[derive(Debug, Error)]
pub enum SegmentError<E = Infallible> {
    #[error(transparent)]
    Bounds(#[from] BoundsError),

    #[error("root {0} is not finite")]
    NonFiniteRoot(Interval),

    #[error("characteristic function failed")]
    Characteristic(#[source] E),
}
