//! Simplification rules for powers.

use crate::expr::Expr;
use crate::primitive::small_integer;
use crate::simplify::{rules::do_power, step::Step};
use crate::step_collector::StepCollector;
use rug::ops::Pow;

/// Integer exponents larger than this are left unevaluated, to keep exact numbers from blowing up.
const MAX_NUMERIC_EXPONENT: i32 = 64;

/// `a^0 = 1`
pub fn power_zero(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_power(expr, |_, rhs| {
        if rhs.is_zero() {
            Some(Expr::num(1))
        } else {
            None
        }
    })?;

    step_collector.push(Step::PowerZero);
    Some(opt)
}

/// `a^1 = a`
pub fn power_one(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_power(expr, |lhs, rhs| {
        if rhs.is_one() {
            Some(lhs.clone())
        } else {
            None
        }
    })?;

    step_collector.push(Step::PowerOne);
    Some(opt)
}

/// `1^a = 1`
pub fn power_one_left(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_power(expr, |lhs, _| {
        if lhs.is_one() {
            Some(Expr::num(1))
        } else {
            None
        }
    })?;

    step_collector.push(Step::PowerOneLeft);
    Some(opt)
}

/// Evaluates a number raised to a small integer power.
///
/// `2^3 = 8`
/// `(2/3)^-2 = 9/4`
pub fn numeric_power(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_power(expr, |lhs, rhs| {
        let base = lhs.as_number()?;
        let exp = small_integer(rhs.as_number()?)?;
        if exp.abs() > MAX_NUMERIC_EXPONENT || (*base == 0 && exp < 0) {
            return None;
        }

        Some(Expr::num(base.clone().pow(exp)))
    })?;

    step_collector.push(Step::NumericPower);
    Some(opt)
}

/// `(a^m)^n = a^(m*n)`, for integers `m` and `n`
pub fn power_power(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_power(expr, |lhs, rhs| {
        let Expr::Exp(base, inner_exp) = lhs else {
            return None;
        };
        let outer = small_integer(rhs.as_number()?)?;
        let inner = small_integer(inner_exp.as_number()?)?;

        Some((**base).clone().pow(i64::from(inner) * i64::from(outer)))
    })?;

    step_collector.push(Step::PowerPower);
    Some(opt)
}

/// `(a*b)^n = a^n*b^n`, for integer `n`
pub fn distribute_power(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_power(expr, |lhs, rhs| {
        let Expr::Mul(factors) = lhs else {
            return None;
        };
        let exp = small_integer(rhs.as_number()?)?;

        Some(Expr::Mul(factors.iter()
            .map(|factor| factor.clone().pow(exp))
            .collect()))
    })?;

    step_collector.push(Step::DistributePower);
    Some(opt)
}

/// Applies all power rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    power_zero(expr, step_collector)
        .or_else(|| power_one(expr, step_collector))
        .or_else(|| power_one_left(expr, step_collector))
        .or_else(|| numeric_power(expr, step_collector))
        .or_else(|| power_power(expr, step_collector))
        .or_else(|| distribute_power(expr, step_collector))
}
