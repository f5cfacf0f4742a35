use crate::bound::{check_interval, Bound};
use crate::error::Result;
use crate::window::{chop, clip, Strategy};
use cpw_algebra::Expr;

/// Builds an expression that is not a real number strictly inside `(left, right)`: the square root
/// of a quantity that is negative exactly there.
fn negative_inside(left: &Bound, right: &Bound) -> Expr {
    let x = Expr::var;
    match (left.finite(), right.finite()) {
        (None, None) => Expr::num(-1).sqrt(),
        (None, Some(right)) => (x() - Expr::from(right)).sqrt(),
        (Some(left), None) => (Expr::from(left) - x()).sqrt(),
        (Some(left), Some(right)) => ((x() - Expr::from(left)) * (x() - Expr::from(right))).sqrt(),
    }
}

/// Returns an expression that is `c` outside of `(left, right)` and undefined (not a real number)
/// strictly inside it. Its value at the bounds themselves is not specified.
///
/// This is [`undefined_with`] using the [`Strategy::Hold`] strategy.
pub fn undefined(left: &Bound, right: &Bound, c: impl Into<Expr>) -> Result<Expr> {
    undefined_with(left, right, c, Strategy::Hold)
}

/// Returns an expression that is `c` outside of `(left, right)` and undefined strictly inside it,
/// windowing the undefined region with the given strategy.
///
/// With [`Strategy::Hold`], the result is `clip(sqrt(..) + c)`, where the square root is `0` at
/// both bounds. With [`Strategy::Zero`], it is `chop(sqrt(..)) + c`, which relies on a zero factor
/// switching the undefined region off.
pub fn undefined_with(left: &Bound, right: &Bound, c: impl Into<Expr>, strategy: Strategy) -> Result<Expr> {
    check_interval(left, right)?;

    let inner = negative_inside(left, right);
    let c = c.into();
    match strategy {
        Strategy::Hold => clip(&(inner + c), left, right),
        Strategy::Zero => Ok(chop(&inner, left, right, true, true)? + c),
    }
}

#[cfg(test)]
mod tests {
    use cpw_algebra::primitive::rat;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn everywhere() {
        for strategy in [Strategy::Hold, Strategy::Zero] {
            let expr = undefined_with(&Bound::NegInfinity, &Bound::PosInfinity, 5, strategy).unwrap();
            for x in [-100.0, 0.0, 0.5, 3.0] {
                assert!(expr.eval_f64(x).is_nan());
            }
        }
    }

    #[test]
    fn bounded() {
        for strategy in [Strategy::Hold, Strategy::Zero] {
            let expr = undefined_with(&Bound::from(0), &Bound::from(1), 5, strategy).unwrap();
            assert_eq!(expr.value_at(&rat(-1)), Expr::num(5));
            assert_eq!(expr.value_at(&rat(2)), Expr::num(5));
            assert_eq!(expr.eval_f64(-1.0), 5.0);
            assert_eq!(expr.eval_f64(2.0), 5.0);
            assert!(expr.eval_f64(0.25).is_nan());
            assert!(expr.eval_f64(0.75).is_nan());
        }
    }

    #[test]
    fn left_half() {
        for strategy in [Strategy::Hold, Strategy::Zero] {
            let expr = undefined_with(&Bound::NegInfinity, &Bound::from(2), 0, strategy).unwrap();
            assert!(expr.eval_f64(-1000.0).is_nan());
            assert!(expr.eval_f64(1.5).is_nan());
            assert_eq!(expr.eval_f64(3.0), 0.0);
            assert_eq!(expr.value_at(&rat(3)), Expr::num(0));
        }
    }

    #[test]
    fn right_half() {
        for strategy in [Strategy::Hold, Strategy::Zero] {
            let expr = undefined_with(&Bound::from(-2), &Bound::PosInfinity, Expr::num((1, 2)), strategy).unwrap();
            assert_eq!(expr.eval_f64(-3.0), 0.5);
            assert!(expr.eval_f64(-1.5).is_nan());
            assert!(expr.eval_f64(1000.0).is_nan());
        }
    }

    #[test]
    fn reversed() {
        assert!(undefined(&Bound::from(1), &Bound::from(0), 0).is_err());
    }
}
