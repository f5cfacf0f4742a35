//! Simplification rules for the built-in functions.
//!
//! Most of these only fire on exact arguments. `cos` and `acos` know the values at the multiples
//! of `pi/3` and `pi/2` that come up when a periodic waveform is evaluated at the ends of its
//! half-periods.

use crate::expr::{Expr, Func, Primary};
use crate::primitive::{exact_sqrt, rat};
use crate::simplify::{rules::do_call, step::Step};
use crate::step_collector::StepCollector;
use rug::Rational;

/// `cos(r*pi)` for `r` in `[0, 2)`, as `(r, value)` pairs.
const COS_TABLE: [((i32, i32), (i32, i32)); 8] = [
    ((0, 1), (1, 1)),
    ((1, 3), (1, 2)),
    ((1, 2), (0, 1)),
    ((2, 3), (-1, 2)),
    ((1, 1), (-1, 1)),
    ((4, 3), (-1, 2)),
    ((3, 2), (0, 1)),
    ((5, 3), (1, 2)),
];

/// `acos(v) = r*pi`, as `(v, r)` pairs.
const ACOS_TABLE: [((i32, i32), (i32, i32)); 5] = [
    ((1, 1), (0, 1)),
    ((1, 2), (1, 3)),
    ((0, 1), (1, 2)),
    ((-1, 2), (2, 3)),
    ((-1, 1), (1, 1)),
];

/// `abs(-3) = 3`
/// `abs(pi) = pi`
/// `abs(abs(a)) = abs(a)`
/// `abs(-2a) = 2abs(a)`
pub fn abs(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_call(expr, Func::Abs, |arg| {
        match arg {
            Expr::Primary(Primary::Number(num)) => Some(Expr::num(num.clone().abs())),
            Expr::Primary(Primary::Pi) => Some(Expr::pi()),
            Expr::Primary(Primary::Call(Func::Abs, _)) => Some(arg.clone()),
            Expr::Mul(factors) => {
                let coeff_idx = factors.iter().position(Expr::is_number)?;
                let coeff = factors[coeff_idx].as_number()?.clone().abs();
                let rest = factors.iter()
                    .enumerate()
                    .filter(|(idx, _)| *idx != coeff_idx)
                    .map(|(_, factor)| factor.clone())
                    .collect::<Vec<_>>();
                let inner = Expr::Mul(rest).downgrade().abs();

                if coeff == 1 {
                    Some(inner)
                } else {
                    Some(Expr::num(coeff) * inner)
                }
            },
            _ => None,
        }
    })?;

    step_collector.push(Step::Abs);
    Some(opt)
}

/// `sqrt(9/4) = 3/2`
/// `sqrt(a^2) = abs(a)`
pub fn sqrt(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_call(expr, Func::Sqrt, |arg| {
        match arg {
            Expr::Primary(Primary::Number(num)) => exact_sqrt(num).map(Expr::from),
            Expr::Exp(base, exp) if exp.as_number().is_some_and(|n| *n == 2) => {
                Some((**base).clone().abs())
            },
            _ => None,
        }
    })?;

    step_collector.push(Step::Sqrt);
    Some(opt)
}

/// If the expression is `r*pi` (or `pi` itself), returns `r`.
fn pi_multiple(expr: &Expr) -> Option<Rational> {
    match expr {
        Expr::Primary(Primary::Pi) => Some(rat(1)),
        Expr::Primary(Primary::Number(num)) if *num == 0 => Some(rat(0)),
        Expr::Mul(factors) if factors.len() == 2 => match (&factors[0], &factors[1]) {
            (Expr::Primary(Primary::Number(num)), Expr::Primary(Primary::Pi))
            | (Expr::Primary(Primary::Pi), Expr::Primary(Primary::Number(num))) => Some(num.clone()),
            _ => None,
        },
        _ => None,
    }
}

/// `cos(0) = 1`
/// `cos(pi/3) = 1/2`
/// `cos(-3pi) = -1`
pub fn cos(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_call(expr, Func::Cos, |arg| {
        let turns = pi_multiple(arg)?;

        // reduce into [0, 2)
        let periods = (turns.clone() / 2i32).floor();
        let reduced = turns - periods * 2;

        COS_TABLE.iter()
            .find(|(angle, _)| reduced == rat(*angle))
            .map(|(_, value)| Expr::num(*value))
    })?;

    step_collector.push(Step::Cos);
    Some(opt)
}

/// `acos(1) = 0`
/// `acos(0) = pi/2`
/// `acos(-1) = pi`
pub fn acos(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_call(expr, Func::Acos, |arg| {
        let value = arg.as_number()?;
        let (_, turns) = ACOS_TABLE.iter().find(|(v, _)| *value == rat(*v))?;
        let turns = rat(*turns);

        Some(if turns == 0 {
            Expr::num(0)
        } else if turns == 1 {
            Expr::pi()
        } else {
            Expr::num(turns) * Expr::pi()
        })
    })?;

    step_collector.push(Step::Acos);
    Some(opt)
}

/// Evaluates a step at a number.
///
/// `heaviside(2, 0) = 1`
/// `heaviside(0, 0) = 0`
/// `heaviside(0, 1) = 1`
pub fn heaviside(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_call(expr, Func::Step { closed: true }, |arg| {
        let num = arg.as_number()?;
        Some(Expr::num(i32::from(*num >= 0)))
    }).or_else(|| do_call(expr, Func::Step { closed: false }, |arg| {
        let num = arg.as_number()?;
        Some(Expr::num(i32::from(*num > 0)))
    }))?;

    step_collector.push(Step::Heaviside);
    Some(opt)
}

/// Applies all function rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    abs(expr, step_collector)
        .or_else(|| sqrt(expr, step_collector))
        .or_else(|| cos(expr, step_collector))
        .or_else(|| acos(expr, step_collector))
        .or_else(|| heaviside(expr, step_collector))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> Expr {
        Expr::var()
    }

    #[test]
    fn abs_coefficient() {
        let expr = (Expr::num(-2) * x()).abs();
        assert_eq!(abs(&expr, &mut ()), Some(Expr::Mul(vec![x().abs(), Expr::num(2)])));

        let expr = (Expr::num(-1) * x()).abs();
        assert_eq!(abs(&expr, &mut ()), Some(x().abs()));
    }

    #[test]
    fn abs_of_abs() {
        let expr = (x() - Expr::num(1)).abs().abs();
        assert_eq!(abs(&expr, &mut ()), Some((x() - Expr::num(1)).abs()));
        assert_eq!(abs(&(x() - Expr::num(1)).abs(), &mut ()), None);
    }

    #[test]
    fn sqrt_of_square() {
        assert_eq!(sqrt(&Expr::num((9, 4)).sqrt(), &mut ()), Some(Expr::num((3, 2))));
        assert_eq!(sqrt(&Expr::num(2).sqrt(), &mut ()), None);
        assert_eq!(sqrt(&Expr::num(-4).sqrt(), &mut ()), None);
        assert_eq!(sqrt(&(x() + Expr::num(1)).pow(2).sqrt(), &mut ()), Some((x() + Expr::num(1)).abs()));
    }

    #[test]
    fn cos_table() {
        let cos_at = |r: Expr| cos(&(r * Expr::pi()).cos(), &mut ());
        assert_eq!(cos_at(Expr::num((1, 3))), Some(Expr::num((1, 2))));
        assert_eq!(cos_at(Expr::num(-3)), Some(Expr::num(-1)));
        assert_eq!(cos_at(Expr::num((7, 2))), Some(Expr::num(0)));
        assert_eq!(cos_at(Expr::num((1, 5))), None);
        assert_eq!(cos(&Expr::pi().cos(), &mut ()), Some(Expr::num(-1)));
        assert_eq!(cos(&Expr::num(0).cos(), &mut ()), Some(Expr::num(1)));
    }

    #[test]
    fn acos_table() {
        assert_eq!(acos(&Expr::num(-1).acos(), &mut ()), Some(Expr::pi()));
        assert_eq!(
            acos(&Expr::num((1, 2)).acos(), &mut ()),
            Some(Expr::Mul(vec![Expr::num((1, 3)), Expr::pi()])),
        );
        assert_eq!(acos(&Expr::num(2).acos(), &mut ()), None);
    }

    #[test]
    fn step_at_zero() {
        assert_eq!(heaviside(&Expr::num(0).step(true), &mut ()), Some(Expr::num(1)));
        assert_eq!(heaviside(&Expr::num(0).step(false), &mut ()), Some(Expr::num(0)));
        assert_eq!(heaviside(&Expr::num(-1).step(true), &mut ()), Some(Expr::num(0)));
        assert_eq!(heaviside(&x().step(true), &mut ()), None);
    }
}
