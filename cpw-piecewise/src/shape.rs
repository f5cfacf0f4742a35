//! Elementary continuous shapes, and the step and boxcar indicators.
//!
//! The continuous shapes are built from a single identity, `max(x, 0) = (|x| + x)/2`, so they are
//! plain closed-form expressions that any consumer of [`Expr`] can evaluate or differentiate
//! without knowing about piecewise definitions.

use crate::bound::{check_interval, Bound};
use crate::error::{Error, Result};
use crate::point::Point;
use cpw_algebra::Expr;
use rug::Rational;
use std::{fmt, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which side of an anchor point a shape is active on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Side {
    Left,
    Right,
}

impl FromStr for Side {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            _ => Err(Error::InvalidSide(s.to_owned())),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
        }
    }
}

fn x() -> Expr {
    Expr::var()
}

/// `(|x| + x)/2`, which is `max(x, 0)`.
fn positive_part() -> Expr {
    (x().abs() + x()) / Expr::num(2)
}

/// Generates a ramp anchored at `point`.
///
/// The right-sided ramp is constant at `point.y` for `x <= point.x`, and is the line through
/// `point` with the given slope for `x > point.x`. The left-sided ramp is its mirror image: the line
/// for `x < point.x`, and constant for `x >= point.x`.
pub fn ramp(point: &Point, slope: impl Into<Expr>, side: Side) -> Expr {
    let fundamental = positive_part() * slope.into();
    let fundamental = match side {
        Side::Left => -fundamental.substitute(&-x()),
        Side::Right => fundamental,
    };
    fundamental.substitute(&(x() - Expr::from(&point.x))) + point.y.clone()
}

/// Generates the incline between two points: constant `start.y` before `start.x`, the segment
/// between the two points, and constant `end.y` after `end.x`.
///
/// Fails with [`Error::ZeroSpan`] if both points have the same x-coordinate.
pub fn incline(start: &Point, end: &Point) -> Result<Expr> {
    let width = Rational::from(&end.x - &start.x);
    if width == 0 {
        return Err(Error::ZeroSpan { at: start.x.clone() });
    }

    // the incline from (0, 0) to (1, 1)
    let fundamental = positive_part() - positive_part().substitute(&(x() - Expr::num(1)));

    let height = end.y.clone() - start.y.clone();
    let scaled = (x() - Expr::from(&start.x)) * Expr::num(width.recip());
    Ok(fundamental.substitute(&scaled) * height + start.y.clone())
}

/// Generates the unit step at `at`: `0` for `x < at` and `1` for `x > at`.
///
/// At `x = at` itself, the right-sided step is `1` and the left-sided step is `0`.
pub fn unit_step(at: &Rational, side: Side) -> Expr {
    (x() - Expr::from(at)).step(side == Side::Right)
}

/// Generates the boxcar on `[left, right]`: `1` inside the interval and `0` outside. Each endpoint
/// is included only if its `*_closed` flag is set.
///
/// An infinite bound means there is no step on that side.
pub fn boxcar(left: &Bound, right: &Bound, left_closed: bool, right_closed: bool) -> Result<Expr> {
    check_interval(left, right)?;

    let rise = match left.finite() {
        Some(at) => unit_step(at, if left_closed { Side::Right } else { Side::Left }),
        None => Expr::num(1),
    };
    let fall = match right.finite() {
        Some(at) => unit_step(at, if right_closed { Side::Left } else { Side::Right }),
        None => Expr::num(0),
    };

    Ok(rise - fall)
}
