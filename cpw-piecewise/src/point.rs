use cpw_algebra::Expr;
use rug::Rational;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A point on the graph of a function.
///
/// The x-coordinate is always an exact rational. The y-coordinate is an expression, since the
/// value of a function at a rational point (such as `sqrt(2)` at `x = 2`) need not be rational;
/// it never contains the free variable.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: Rational,
    pub y: Expr,
}

impl Point {
    /// Creates a new point.
    pub fn new(x: impl Into<Rational>, y: impl Into<Expr>) -> Self {
        Self { x: x.into(), y: y.into() }
    }

    /// Returns the point on the graph of `f` at `x`, computing the y-coordinate exactly.
    pub fn on(f: &Expr, x: &Rational) -> Self {
        Self { x: x.clone(), y: f.value_at(x) }
    }
}

/// The origin, `(0, 0)`.
impl Default for Point {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
