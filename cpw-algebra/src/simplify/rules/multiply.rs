//! Simplification rules for expressions involving multiplication, including combining like
//! factors.

use crate::expr::Expr;
use crate::primitive::rat;
use crate::simplify::{rules::do_multiply, step::Step};
use crate::step_collector::StepCollector;

/// `a*(b*c) = a*b*c`
pub fn flatten_mul(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_multiply(expr, |factors| {
        if !factors.iter().any(|factor| matches!(factor, Expr::Mul(_))) {
            return None;
        }

        let mut new_factors = Vec::with_capacity(factors.len());
        for factor in factors {
            match factor {
                Expr::Mul(inner) => new_factors.extend(inner.iter().cloned()),
                factor => new_factors.push(factor.clone()),
            }
        }
        Some(Expr::Mul(new_factors))
    })?;

    step_collector.push(Step::Flatten);
    Some(opt)
}

/// `0*a = 0`
/// `a*0 = 0`
pub fn multiply_zero(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_multiply(expr, |factors| {
        if factors.iter().any(Expr::is_zero) {
            Some(Expr::num(0))
        } else {
            None
        }
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::MultiplyZero);
    Some(opt)
}

/// Folds every numeric factor into one coefficient, placed first, and drops it if it is `1`.
///
/// `2*a*3 = 6a`
/// `1*a = a`
pub fn multiply_numbers(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_multiply(expr, |factors| {
        let mut coeff = rat(1);
        let mut count = 0;
        let mut rest = Vec::with_capacity(factors.len());
        for factor in factors {
            match factor.as_number() {
                Some(num) => {
                    coeff *= num;
                    count += 1;
                },
                None => rest.push(factor.clone()),
            }
        }

        if count == 0 || (count == 1 && coeff != 1) {
            return None;
        }

        if coeff != 1 {
            rest.insert(0, Expr::num(coeff));
        }
        Some(Expr::Mul(rest).downgrade())
    })?;

    step_collector.push(Step::MultiplyNumbers);
    Some(opt)
}

/// Utility function to extract the base and exponent of an expression. If the expression is not
/// [`Expr::Exp`], the exponent is `1`.
///
/// - `a^b` -> `(a, b)`
/// - `a` -> `(a, 1)`
fn get_exp(expr: &Expr) -> (Expr, Expr) {
    match expr {
        Expr::Exp(lhs, rhs) => (*lhs.clone(), *rhs.clone()),
        expr => (expr.clone(), Expr::num(1)),
    }
}

/// Combines like factors.
///
/// `a*a = a^2`
/// `a^2*a^3 = a^5`
/// `a*a^-1 = 1`
/// etc.
pub fn combine_like_factors(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_multiply(expr, |factors| {
        let mut new_factors = factors.to_vec();
        let mut current_factor_idx = 0;
        let mut merged_any = false;

        // this is O(n^2) worst case, due to scanning the whole vec for each factor
        while current_factor_idx < new_factors.len() {
            // numbers are folded by `multiply_numbers` instead
            if new_factors[current_factor_idx].is_number() {
                current_factor_idx += 1;
                continue;
            }

            let (current_factor, mut current_factor_exp) = get_exp(&new_factors[current_factor_idx]);
            let mut merged = false;

            // look at every factor after `current_factor`
            let mut next_factor_idx = current_factor_idx + 1;
            while next_factor_idx < new_factors.len() {
                let (next_factor, next_factor_exp) = get_exp(&new_factors[next_factor_idx]);

                // bases must be strictly equal
                // if they are, apply a^b*a^c = a^(b+c)
                if current_factor == next_factor {
                    current_factor_exp += next_factor_exp;
                    new_factors.remove(next_factor_idx);
                    merged = true;
                } else {
                    next_factor_idx += 1;
                }
            }

            if !merged {
                current_factor_idx += 1;
                continue;
            }

            merged_any = true;
            if current_factor_exp.is_zero() {
                new_factors.remove(current_factor_idx);
            } else {
                new_factors[current_factor_idx] = if current_factor_exp.is_one() {
                    current_factor
                } else {
                    current_factor.pow(current_factor_exp)
                };
                current_factor_idx += 1;
            }
        }

        if merged_any {
            Some(Expr::Mul(new_factors).downgrade())
        } else {
            None
        }
    })?;

    step_collector.push(Step::CombineLikeFactors);
    Some(opt)
}

/// Distributes a numeric coefficient over the first sum it multiplies.
///
/// `2*(a+b) = 2a+2b`
/// `1/2*(a+b)*c = (1/2*a+1/2*b)*c`
pub fn distribute_number(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_multiply(expr, |factors| {
        let coeff_idx = factors.iter().position(Expr::is_number)?;
        let sum_idx = factors.iter().position(|factor| matches!(factor, Expr::Add(_)))?;
        let coeff = factors[coeff_idx].clone();

        let Expr::Add(terms) = &factors[sum_idx] else {
            return None;
        };
        let distributed = Expr::Add(terms.iter()
            .map(|term| coeff.clone() * term.clone())
            .collect());

        let mut new_factors = Vec::with_capacity(factors.len() - 1);
        for (idx, factor) in factors.iter().enumerate() {
            if idx == sum_idx {
                new_factors.push(distributed.clone());
            } else if idx != coeff_idx {
                new_factors.push(factor.clone());
            }
        }
        Some(Expr::Mul(new_factors).downgrade())
    })?;

    step_collector.push(Step::DistributeCoefficient);
    Some(opt)
}

/// Applies all multiplication rules.
///
/// The coefficient is only distributed once every other rule is exhausted, since distributing
/// grows the expression.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    flatten_mul(expr, step_collector)
        .or_else(|| multiply_zero(expr, step_collector))
        .or_else(|| multiply_numbers(expr, step_collector))
        .or_else(|| combine_like_factors(expr, step_collector))
        .or_else(|| distribute_number(expr, step_collector))
}
