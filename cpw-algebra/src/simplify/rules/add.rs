//! Simplification rules for expressions involving addition, including combining like terms.

use crate::expr::Expr;
use crate::primitive::rat;
use crate::simplify::{rules::do_add, step::Step};
use crate::step_collector::StepCollector;
use rug::Rational;

/// `a+(b+c) = a+b+c`
pub fn flatten_add(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_add(expr, |terms| {
        if !terms.iter().any(|term| matches!(term, Expr::Add(_))) {
            return None;
        }

        let mut new_terms = Vec::with_capacity(terms.len());
        for term in terms {
            match term {
                Expr::Add(inner) => new_terms.extend(inner.iter().cloned()),
                term => new_terms.push(term.clone()),
            }
        }
        Some(Expr::Add(new_terms))
    })?;

    step_collector.push(Step::Flatten);
    Some(opt)
}

/// `0+a = a`
/// `a+0 = a`
pub fn add_zero(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_add(expr, |terms| {
        let new_terms = terms.iter()
            .filter(|term| !term.is_zero())
            .cloned()
            .collect::<Vec<_>>();

        // a sum of one term is also rewritten, even if there was nothing to remove
        if new_terms.len() == terms.len() && terms.len() > 1 {
            None
        } else {
            Some(Expr::Add(new_terms).downgrade())
        }
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::AddZero);
    Some(opt)
}

/// Utility function to extract the rational coefficient and factors of an expression. If the
/// expression is not [`Expr::Mul`], the coefficient is 1.
///
/// - `5` -> `(5, 1)`
/// - `3*a` -> `(3, a)`
/// - `1/4*a*b` -> `(1/4, a*b)`
/// - `a` -> `(1, a)`
fn get_coeff(expr: &Expr) -> (Rational, Expr) {
    match expr {
        Expr::Mul(factors) => {
            let mut coeff = rat(1);
            let mut rest = Vec::with_capacity(factors.len());
            for factor in factors {
                match factor.as_number() {
                    Some(num) => coeff *= num,
                    None => rest.push(factor.clone()),
                }
            }
            (coeff, Expr::Mul(rest).downgrade())
        },
        expr => match expr.as_number() {
            Some(num) => (num.clone(), Expr::num(1)),
            None => (rat(1), expr.clone()),
        },
    }
}

/// Combines like terms.
///
/// `a+a = 2a`
/// `a+a+a = 3a`
/// `2a+3a = 5a`
/// `1+2 = 3`
/// etc.
pub fn combine_like_terms(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_add(expr, |terms| {
        let mut new_terms = terms.to_vec();
        let mut current_term_idx = 0;

        // this is O(n^2) worst case, due to scanning the whole vec for each term
        while current_term_idx < new_terms.len() {
            let (mut current_term_coeff, current_term_factors) = get_coeff(&new_terms[current_term_idx]);
            let mut merged = false;

            // look at every term after `current_term`
            let mut next_term_idx = current_term_idx + 1;
            while next_term_idx < new_terms.len() {
                let (next_term_coeff, next_term_factors) = get_coeff(&new_terms[next_term_idx]);

                // factors must be strictly equal
                if current_term_factors == next_term_factors {
                    // if so, apply a*n + a*m = (n+m)*a
                    current_term_coeff += next_term_coeff;
                    new_terms.remove(next_term_idx);
                    merged = true;
                } else {
                    next_term_idx += 1;
                }
            }

            if merged {
                new_terms[current_term_idx] = if current_term_coeff == 0 {
                    Expr::num(0)
                } else if current_term_factors.is_one() {
                    Expr::num(current_term_coeff)
                } else if current_term_coeff == 1 {
                    current_term_factors
                } else {
                    Expr::num(current_term_coeff) * current_term_factors
                };
            }

            current_term_idx += 1;
        }

        if new_terms.len() == terms.len() {
            None
        } else {
            Some(Expr::Add(new_terms).downgrade())
        }
    })?;

    step_collector.push(Step::CombineLikeTerms);
    Some(opt)
}

/// Applies all addition rules.
///
/// All addition rules will reduce the complexity of the expression.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    flatten_add(expr, step_collector)
        .or_else(|| add_zero(expr, step_collector))
        .or_else(|| combine_like_terms(expr, step_collector))
}
