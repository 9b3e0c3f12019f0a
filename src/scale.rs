use crate::{interval::Interval, traits::RealInterval};

/// The affine map from the unit interval onto a root interval,
/// `x -> inf + x * (sup - inf)`.
///
/// The map is exact at both ends: `0` maps to the root's `inf` and `1` to its
/// `sup`, bit for bit. Every other point is mapped by the same expression, so
/// two unit intervals that share an end point are mapped onto real intervals
/// that share an end point too.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitScale {
    inf: f64,
    sup: f64,
    width: f64,
}

impl UnitScale {
    pub fn onto<R: RealInterval + ?Sized>(root: &R) -> Self {
        Self {
            inf: root.inf(),
            sup: root.sup(),
            width: root.sup() - root.inf(),
        }
    }

    /// Maps a point of `[0, 1]` onto the root.
    #[inline]
    pub fn apply(&self, x: f64) -> f64 {
        if x <= 0.0 {
            self.inf
        } else if x >= 1.0 {
            self.sup
        } else {
            // stays below sup even when rounding pushes the product up
            (self.inf + x * self.width).min(self.sup)
        }
    }

    /// Maps a unit-relative interval onto the root.
    #[inline]
    pub fn unscale<R: RealInterval + ?Sized>(&self, unit: &R) -> Interval {
        Interval::new(self.apply(unit.inf()), self.apply(unit.sup()))
    }

    /// The root this scale maps onto.
    #[inline]
    pub fn root(&self) -> Interval {
        Interval::new(self.inf, self.sup)
    }
}
