//! Rewrites that collapse redundant absolute values.
//!
//! These only run through [`abssimp`](crate::simplify::abssimp). They must not be added to
//! [`rules::all`](super::all): merging `abs(a)*abs(b)` into `abs(a*b)` undoes the coefficient
//! extraction done by the function rules, and the two would rewrite each other forever.

use crate::expr::{Expr, Func};
use crate::simplify::{rules::{do_multiply, do_power}, step::Step};
use crate::step_collector::StepCollector;

/// `abs(a)^2 = a^2`, and likewise for any even integer exponent
pub fn abs_square(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_power(expr, |lhs, rhs| {
        let inner = lhs.as_call(Func::Abs)?;
        let exp = rhs.as_number()?;
        if *exp.denom() == 1 && exp.numer().is_even() {
            Some(inner.clone().pow(rhs.clone()))
        } else {
            None
        }
    })?;

    step_collector.push(Step::AbsSquare);
    Some(opt)
}

/// `c*abs(a)*abs(b) = c*abs(a*b)`
///
/// Only the first two absolute values are merged at a time.
pub fn abs_product(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_multiply(expr, |factors| {
        let mut abs_idxs = factors.iter()
            .enumerate()
            .filter(|(_, factor)| factor.as_call(Func::Abs).is_some())
            .map(|(idx, _)| idx);
        let first = abs_idxs.next()?;
        let second = abs_idxs.next()?;

        let lhs = factors[first].as_call(Func::Abs)?.clone();
        let rhs = factors[second].as_call(Func::Abs)?.clone();

        let mut new_factors = factors.to_vec();
        new_factors.remove(second);
        new_factors[first] = (lhs * rhs).abs();
        Some(Expr::Mul(new_factors).downgrade())
    })?;

    step_collector.push(Step::AbsProduct);
    Some(opt)
}

/// Applies both absolute value rewrites.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    abs_square(expr, step_collector)
        .or_else(|| abs_product(expr, step_collector))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> Expr {
        Expr::var()
    }

    #[test]
    fn even_powers_only() {
        assert_eq!(abs_square(&x().abs().pow(4), &mut ()), Some(x().pow(4)));
        assert_eq!(abs_square(&x().abs().pow(3), &mut ()), None);
        assert_eq!(abs_square(&x().abs().pow(Expr::num((1, 2))), &mut ()), None);
    }

    #[test]
    fn merge_keeps_coefficient() {
        let expr = Expr::Mul(vec![(x() - Expr::num(1)).abs(), Expr::num(-3), x().abs()]);
        assert_eq!(
            abs_product(&expr, &mut ()),
            Some(Expr::Mul(vec![
                Expr::Mul(vec![x() - Expr::num(1), x()]).abs(),
                Expr::num(-3),
            ])),
        );
    }

    #[test]
    fn single_abs_is_left_alone() {
        let expr = Expr::num(2) * x().abs();
        assert_eq!(abs_product(&expr, &mut ()), None);
    }
}
