use crate::BoundsError;

/// The deepest resolution [`crate::segment`] will bisect to. Node indices at
/// this depth still fit an `i64`.
pub const MAX_RESOLUTION: i32 = 62;

/// The sentinel that disables a resolution bound: as a maximum it stops all
/// bisection, as a minimum it lets the predicate accept any node.
pub const DISABLED: i32 = -1;

/// Resolution limits for [`crate::segment`].
///
/// A node at depth `d` is emitted unconditionally once `d > max_resolution`,
/// and the characteristic function is only consulted for nodes with
/// `d >= min_resolution`. Any negative value behaves like [`DISABLED`].
///
/// # Examples
///
/// ```
/// use dyadic_segments::ResolutionBounds;
///
/// let bounds = ResolutionBounds::up_to(5).unwrap();
/// assert_eq!(bounds.max_resolution(), 5);
/// assert_eq!(bounds.min_resolution(), -1);
///
/// assert!(ResolutionBounds::new(80, 0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResolutionBounds {
    max_resolution: i32,
    min_resolution: i32,
}

impl ResolutionBounds {
    /// Bounds under which the root is never split.
    pub const UNSPLIT: Self = Self {
        max_resolution: DISABLED,
        min_resolution: DISABLED,
    };

    pub fn new(max_resolution: i32, min_resolution: i32) -> Result<Self, BoundsError> {
        if max_resolution > MAX_RESOLUTION {
            return Err(BoundsError::ResolutionTooFine {
                requested: max_resolution,
                limit: MAX_RESOLUTION,
            });
        }
        Ok(Self { max_resolution, min_resolution })
    }

    /// Bounds with only a maximum resolution; the minimum is disabled.
    #[inline]
    pub fn up_to(max_resolution: i32) -> Result<Self, BoundsError> {
        Self::new(max_resolution, DISABLED)
    }

    #[inline]
    pub fn max_resolution(&self) -> i32 {
        self.max_resolution
    }

    #[inline]
    pub fn min_resolution(&self) -> i32 {
        self.min_resolution
    }

    /// Returns true if a node at `depth` is past the maximum resolution and
    /// must be emitted as it is.
    #[inline]
    pub fn caps(&self, depth: i32) -> bool {
        depth > self.max_resolution
    }

    /// Returns true if the characteristic function may accept a node at
    /// `depth`.
    #[inline]
    pub fn consults(&self, depth: i32) -> bool {
        depth >= self.min_resolution
    }
}

/// Tolerances for [`crate::search`].
///
/// `signal` is the finest resolution at which a run of the characteristic is
/// detected; `trim` is the finest resolution to which a detected run is
/// grown. A signal finer than the trim is clamped to the trim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SearchTolerance {
    trim: i32,
    signal: i32,
}

impl SearchTolerance {
    #[inline]
    pub fn new(trim: i32, signal: i32) -> Self {
        Self { trim, signal: signal.min(trim) }
    }

    /// Uses the same resolution for detection and growth.
    #[inline]
    pub fn precision(precision: i32) -> Self {
        Self::new(precision, precision)
    }

    #[inline]
    pub fn trim(&self) -> i32 {
        self.trim
    }

    #[inline]
    pub fn signal(&self) -> i32 {
        self.signal
    }
}
