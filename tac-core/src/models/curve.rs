use super::market::{CURVE_POINTS, MAX_UNITS, SUP};

/// A cumulative price curve quoted by one auction.
///
/// Entry `n` is the total cost of holding `n` units of the good, for `n` in
/// `0..=8`. An entry equal to [`SUP`] means the quantity cannot be acquired at
/// any price. Units already owned usually show up as a zero or negative
/// prefix of the curve.
///
/// Curves are taken as quoted: monotonicity is expected but not enforced,
/// since the resolver has no authority over the auction data. A garbled curve
/// only produces a poorer allocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct PriceCurve(pub [i32; CURVE_POINTS]);

impl PriceCurve {
    /// A curve on which nothing can be bought
    pub const fn unavailable() -> Self {
        let mut points = [SUP; CURVE_POINTS];
        points[0] = 0;
        Self(points)
    }

    /// A curve where every unit costs `step`
    pub const fn linear(step: i32) -> Self {
        let mut points = [0; CURVE_POINTS];
        let mut n = 1;
        while n < CURVE_POINTS {
            points[n] = step * n as i32;
            n += 1;
        }
        Self(points)
    }

    /// A curve that costs nothing up to `free` units and `step` per unit after that
    pub const fn owned(free: usize, step: i32) -> Self {
        let mut points = [0; CURVE_POINTS];
        let mut n = free + 1;
        while n < CURVE_POINTS {
            points[n] = step * (n - free) as i32;
            n += 1;
        }
        Self(points)
    }

    /// A curve offering `units` units for free and nothing beyond them
    pub const fn held(units: usize) -> Self {
        let mut points = [SUP; CURVE_POINTS];
        let mut n = 0;
        while n <= units && n < CURVE_POINTS {
            points[n] = 0;
            n += 1;
        }
        Self(points)
    }

    /// The total cost of holding `units` units, or [`SUP`] beyond the quoted range
    pub fn cost(&self, units: usize) -> i32 {
        self.0.get(units).copied().unwrap_or(SUP)
    }

    /// The marginal cost of the unit after the first `units`.
    ///
    /// Returns [`SUP`] if either end of the step is [`SUP`], or if the step
    /// leaves the quoted range.
    pub fn delta(&self, units: usize) -> i32 {
        if units >= MAX_UNITS {
            return SUP;
        }
        let (lo, hi) = (self.0[units], self.0[units + 1]);
        if lo == SUP || hi == SUP {
            SUP
        } else {
            hi.saturating_sub(lo)
        }
    }

    /// All eight marginal costs of the curve
    pub fn deltas(&self) -> [i32; MAX_UNITS] {
        std::array::from_fn(|units| self.delta(units))
    }

    /// Whether the curve never decreases
    pub fn is_monotone(&self) -> bool {
        self.0.windows(2).all(|pair| pair[0] <= pair[1])
    }
}

impl Default for PriceCurve {
    fn default() -> Self {
        Self::unavailable()
    }
}

impl From<[i32; CURVE_POINTS]> for PriceCurve {
    fn from(value: [i32; CURVE_POINTS]) -> Self {
        Self(value)
    }
}
