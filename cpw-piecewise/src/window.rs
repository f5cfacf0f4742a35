//! Restricting an expression to an interval.
//!
//! There are two ways to do it, which differ outside the interval:
//!
//! - [`clip`] holds the boundary values: left of the interval, the result is the value at the left
//! bound, and right of it, the value at the right bound. The result is continuous wherever the
//! original expression is.
//! - [`chop`] multiplies by a [`boxcar`], so the result is exactly `0` outside the interval.
//!
//! [`Strategy`] names the two behaviors, for the operations that can use either.

use crate::bound::{check_interval, Bound};
use crate::error::{Error, Result};
use crate::point::Point;
use crate::shape::{boxcar, incline, ramp, Side};
use cpw_algebra::Expr;
use std::{fmt, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What a windowed expression does outside its window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Strategy {
    /// Hold the boundary values, using [`clip`].
    #[default]
    Hold,

    /// Be zero, using [`chop`].
    Zero,
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "hold" | "clip" => Ok(Self::Hold),
            "zero" | "chop" => Ok(Self::Zero),
            _ => Err(Error::InvalidStrategy(s.to_owned())),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hold => write!(f, "hold"),
            Self::Zero => write!(f, "zero"),
        }
    }
}

/// Builds the expression that maps `x` into `[left, right]`: the identity inside the interval, and
/// the nearest bound outside of it.
fn clamp(left: &Bound, right: &Bound) -> Result<Expr> {
    match (left.finite(), right.finite()) {
        (None, None) => Ok(Expr::var()),
        (None, Some(right)) => Ok(ramp(&Point::new(right.clone(), right), 1, Side::Left)),
        (Some(left), None) => Ok(ramp(&Point::new(left.clone(), left), 1, Side::Right)),
        (Some(left), Some(right)) if left == right => Ok(Expr::from(left)),
        (Some(left), Some(right)) => incline(
            &Point::new(left.clone(), left),
            &Point::new(right.clone(), right),
        ),
    }
}

/// Clips the expression to the window `[left, right]`.
///
/// The result is `expr(x)` for `left <= x <= right`, `expr(left)` for `x < left`, and `expr(right)`
/// for `x > right`. Either bound may be infinite, in which case the expression is left alone on
/// that side.
pub fn clip(expr: &Expr, left: &Bound, right: &Bound) -> Result<Expr> {
    check_interval(left, right)?;
    Ok(expr.substitute(&clamp(left, right)?))
}

/// Chops the expression to the window `[left, right]`.
///
/// The result is `expr(x)` inside the window and `0` outside. Each endpoint belongs to the window
/// only if its `*_closed` flag is set.
pub fn chop(expr: &Expr, left: &Bound, right: &Bound, left_closed: bool, right_closed: bool) -> Result<Expr> {
    Ok(expr.clone() * boxcar(left, right, left_closed, right_closed)?)
}

#[cfg(test)]
mod tests {
    use cpw_algebra::primitive::rat;
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> Expr {
        Expr::var()
    }

    #[test]
    fn parse_strategy() {
        assert_eq!("clip".parse::<Strategy>(), Ok(Strategy::Hold));
        assert_eq!("zero".parse::<Strategy>(), Ok(Strategy::Zero));
        assert_eq!(
            "sideways".parse::<Strategy>(),
            Err(Error::InvalidStrategy("sideways".to_owned())),
        );
        assert_eq!(Strategy::default(), Strategy::Hold);
    }

    #[test]
    fn clip_holds_boundary_values() {
        let clipped = clip(&x().pow(2), &Bound::from(1), &Bound::from(3)).unwrap();
        assert_eq!(clipped.value_at(&rat(-5)), Expr::num(1));
        assert_eq!(clipped.value_at(&rat(2)), Expr::num(4));
        assert_eq!(clipped.value_at(&rat(10)), Expr::num(9));
    }

    #[test]
    fn clip_one_sided() {
        let clipped = clip(&x().pow(3), &Bound::NegInfinity, &Bound::from(-1)).unwrap();
        assert_eq!(clipped.value_at(&rat(-2)), Expr::num(-8));
        assert_eq!(clipped.value_at(&rat(5)), Expr::num(-1));

        let clipped = clip(&x().pow(3), &Bound::from(-1), &Bound::PosInfinity).unwrap();
        assert_eq!(clipped.value_at(&rat(-2)), Expr::num(-1));
        assert_eq!(clipped.value_at(&rat(2)), Expr::num(8));
    }

    #[test]
    fn clip_everywhere_is_identity() {
        let expr = x().abs() + Expr::num(1);
        assert_eq!(clip(&expr, &Bound::NegInfinity, &Bound::PosInfinity).unwrap(), expr);
    }

    #[test]
    fn clip_single_point() {
        let clipped = clip(&x().pow(2), &Bound::from(3), &Bound::from(3)).unwrap();
        assert_eq!(clipped.value_at(&rat(-7)), Expr::num(9));
        assert_eq!(clipped.value_at(&rat(3)), Expr::num(9));
    }

    #[test]
    fn chop_zeroes_outside() {
        let chopped = chop(&(x() + Expr::num(10)), &Bound::from(0), &Bound::from(1), true, false).unwrap();
        assert_eq!(chopped.value_at(&rat(-1)), Expr::num(0));
        assert_eq!(chopped.value_at(&rat(0)), Expr::num(10));
        assert_eq!(chopped.value_at(&rat(1)), Expr::num(0));
        assert_eq!(chopped.value_at(&rat(2)), Expr::num(0));
    }

    #[test]
    fn window_errors() {
        assert!(matches!(
            clip(&x(), &Bound::from(2), &Bound::from(1)),
            Err(Error::ReversedInterval { .. }),
        ));
        assert!(matches!(
            chop(&x(), &Bound::PosInfinity, &Bound::PosInfinity, true, true),
            Err(Error::MisplacedInfinity { .. }),
        ));
    }
}
