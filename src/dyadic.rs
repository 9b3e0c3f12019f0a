use std::{
    cmp::Ordering,
    fmt::{self, Debug, Display},
};

/// An exact dyadic rational `k / 2^n`.
///
/// Equality (`==`) compares the representation: `1/2` and `2/4` are
/// different dyadics. Use [`Dyadic::rational_eq`] or [`Dyadic::cmp_value`]
/// to compare numerical values. `n` may be negative, in which case the value
/// is the integer `k * 2^-n`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Dyadic {
    k: i64,
    n: i32,
}

static_assertions::const_assert_eq!(std::mem::size_of::<Dyadic>(), 16);

/// Shifts `k` left by `shift` bits, saturating once the result no longer fits
/// an `i128`. Saturated values still compare correctly against any `i64`.
#[inline]
fn widen_shl(k: i64, shift: u32) -> i128 {
    if shift <= 64 {
        (k as i128) << shift
    } else {
        match k.cmp(&0) {
            Ordering::Less => i128::MIN,
            Ordering::Equal => 0,
            Ordering::Greater => i128::MAX,
        }
    }
}

/// Returns `2^exp` as an `f64`.
#[inline]
pub(crate) fn pow2(exp: i32) -> f64 {
    2f64.powi(exp)
}

impl Dyadic {
    pub const ZERO: Self = Self { k: 0, n: 0 };
    pub const ONE: Self = Self { k: 1, n: 0 };

    #[inline]
    pub const fn new(k: i64, n: i32) -> Self {
        Self { k, n }
    }

    /// the numerator
    #[inline]
    pub const fn k(&self) -> i64 {
        self.k
    }

    /// the base two logarithm of the denominator
    #[inline]
    pub const fn n(&self) -> i32 {
        self.n
    }

    /// Converts to the nearest `f64`. The conversion is exact whenever
    /// `|k| < 2^53` and the result neither overflows nor underflows.
    #[inline]
    pub fn to_f64(&self) -> f64 {
        self.k as f64 * pow2(-self.n)
    }

    /// Compares the numerical values of two dyadics.
    pub fn cmp_value(&self, other: &Self) -> Ordering {
        if self.n <= other.n {
            let shift = other.n.abs_diff(self.n);
            widen_shl(self.k, shift).cmp(&(other.k as i128))
        } else {
            let shift = self.n.abs_diff(other.n);
            (self.k as i128).cmp(&widen_shl(other.k, shift))
        }
    }

    /// Returns true if both dyadics represent the same rational number.
    #[inline]
    pub fn rational_eq(&self, other: &Self) -> bool {
        self.cmp_value(other) == Ordering::Equal
    }

    /// Moves from `k/2^n` to `(k + steps)/2^n`.
    #[inline]
    pub fn move_forward(&self, steps: i64) -> Self {
        Self { k: self.k + steps, n: self.n }
    }

    /// Rewrites this dyadic with the largest `N <= resolution` such that
    /// the value is unchanged and still has an integer numerator. Returns
    /// true if `N == resolution`. No rounding is ever performed: if the value
    /// cannot be expressed at `resolution` the representation is only
    /// reduced as far as possible, and if refining would overflow the
    /// numerator it is left untouched.
    pub fn rebase(&mut self, resolution: i32) -> bool {
        if self.k == 0 {
            self.n = resolution;
            return true;
        }

        if resolution >= self.n {
            let shift = resolution.abs_diff(self.n);
            let refined = 1i64
                .checked_shl(shift)
                .filter(|_| shift < i64::BITS - 1)
                .and_then(|scale| self.k.checked_mul(scale));
            return match refined {
                Some(k) => {
                    self.k = k;
                    self.n = resolution;
                    true
                }
                None => false,
            };
        }

        // cancel common powers of two, but never below `resolution`
        let offset = self.k.trailing_zeros().min(self.n.abs_diff(resolution));
        self.k >>= offset;
        self.n -= offset as i32;
        self.n == resolution
    }

    /// Cancels common factors of two, stopping at resolution 0 or at the
    /// current resolution if that is already negative.
    pub fn reduced(&self) -> Self {
        let mut out = *self;
        out.rebase(self.n.min(0));
        out
    }
}

impl From<Dyadic> for f64 {
    #[inline]
    fn from(value: Dyadic) -> Self {
        value.to_f64()
    }
}

impl Display for Dyadic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}", self.to_f64())
    }
}

impl Debug for Dyadic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dyadic({}, {})", self.k, self.n)
    }
}
