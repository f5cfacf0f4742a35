//! Module to simplify expressions.
//!
//! This module provides the [`simplify`] function, which attempts to reduce the complexity of an
//! expression. It does this by repeatedly applying rewriting rules to the expression in multiple
//! passes, until no more rules apply. Because the algorithm only stops at a fixed point of its
//! rule set, simplifying an already simplified expression returns it unchanged.
//!
//! The same engine also drives [`abssimp`], which uses a much smaller rule set that only targets
//! redundant absolute values. Formulas built by substituting one windowed function into another
//! tend to accumulate many `abs` calls, and [`abssimp`] is what keeps them compact.
//!
//! Complexity is an informal metric that is used to judge the effect of a pass; see
//! [`complexity`].

pub mod rules;
pub mod step;

use crate::expr::{Expr, Primary};
use crate::step_collector::StepCollector;
use log::trace;
use rug::Rational;
use step::Step;

/// A set of rewriting rules, applied to a single node of an expression tree.
///
/// The function should return `Some(expr)` with the rewritten node if any rule applies, or `None`
/// if no rule applies. A rule set must never return `Some` with an expression that is strictly
/// equal to its input, otherwise simplification will not terminate.
pub type RuleSet = fn(&Expr, &mut dyn StepCollector<Step>) -> Option<Expr>;

/// Computes the complexity of an expression, using these simple rules:
///
/// - `complexity(number) = complexity(pi) = complexity(x) = 1`
/// - `complexity(call) = 1 + complexity(arg)`
/// - `complexity(add) = 3 + sum(complexity(terms))`
/// - `complexity(mul) = 2 + sum(complexity(factors))`
/// - `complexity(exp) = 1 + complexity(lhs) + complexity(rhs)`
pub fn complexity(expr: &Expr) -> usize {
    let mut complexity = 0;
    let mut stack = vec![expr];
    while let Some(expr) = stack.pop() {
        complexity += match expr {
            Expr::Primary(Primary::Call(_, arg)) => {
                stack.push(arg);
                1
            },
            Expr::Primary(_) => 1,
            Expr::Add(terms) => {
                stack.extend(terms.iter());
                3
            },
            Expr::Mul(factors) => {
                stack.extend(factors.iter());
                2
            },
            Expr::Exp(lhs, rhs) => {
                stack.push(lhs);
                stack.push(rhs);
                1
            },
        };
    }
    complexity
}

/// Base implementation of the simplification algorithm.
///
/// Applies the rule set to the node, then recurses into its children, and repeats until a pass
/// makes no change. Returns the rewritten expression and whether anything changed.
fn inner_simplify_with(
    expr: &Expr,
    rules: RuleSet,
    step_collector: &mut dyn StepCollector<Step>,
) -> (Expr, bool) {
    let mut expr = expr.clone();
    let mut changed_at_least_once = false;

    loop {
        let mut changed_in_this_pass = false;

        // try to simplify this expression using all rules
        if let Some(new_expr) = rules(&expr, step_collector) {
            expr = new_expr;
            changed_in_this_pass = true;
            changed_at_least_once = true;
        }

        // then begin recursing into the expression's children
        match expr {
            Expr::Primary(Primary::Call(_, ref mut arg)) => {
                let result = inner_simplify_with(&**arg, rules, step_collector);
                **arg = result.0;
                changed_in_this_pass |= result.1;
                changed_at_least_once |= result.1;
            },
            Expr::Primary(primary) => return (Expr::Primary(primary), changed_at_least_once),
            Expr::Add(ref mut terms) => {
                for term in terms.iter_mut() {
                    let result = inner_simplify_with(term, rules, step_collector);
                    *term = result.0;
                    // use |= instead of = to not reset these variables to false if already true
                    changed_in_this_pass |= result.1;
                    changed_at_least_once |= result.1;
                }
            },
            Expr::Mul(ref mut factors) => {
                for factor in factors.iter_mut() {
                    let result = inner_simplify_with(factor, rules, step_collector);
                    *factor = result.0;
                    changed_in_this_pass |= result.1;
                    changed_at_least_once |= result.1;
                }
            },
            Expr::Exp(ref mut lhs, ref mut rhs) => {
                let result_l = inner_simplify_with(&**lhs, rules, step_collector);
                let result_r = inner_simplify_with(&**rhs, rules, step_collector);

                **lhs = result_l.0;
                **rhs = result_r.0;
                changed_in_this_pass |= result_l.1 || result_r.1;
                changed_at_least_once |= result_l.1 || result_r.1;
            },
        }

        if !changed_in_this_pass {
            break;
        }
    }

    (expr, changed_at_least_once)
}

/// Runs the rule set on the expression and logs the change in complexity.
fn run(expr: &Expr, rules: RuleSet, step_collector: &mut dyn StepCollector<Step>, name: &str) -> Expr {
    let (result, changed) = inner_simplify_with(expr, rules, step_collector);
    if changed {
        trace!("{}: complexity {} -> {}", name, complexity(expr), complexity(&result));
    }
    result
}

/// Simplify the given expression with the default rule set, [`rules::all`].
pub fn simplify(expr: &Expr) -> Expr {
    run(expr, rules::all, &mut (), "simplify")
}

/// Simplify the given expression with a custom rule set.
///
/// See [`RuleSet`] for the requirements on the rules.
pub fn simplify_with(expr: &Expr, rules: RuleSet) -> Expr {
    run(expr, rules, &mut (), "simplify_with")
}

/// Simplify the given expression with the default rule set. The steps taken by the simplifier
/// will also be collected and returned. This is useful for debugging.
pub fn simplify_with_steps(expr: &Expr) -> (Expr, Vec<Step>) {
    let mut steps = Vec::new();
    let expr = run(expr, rules::all, &mut steps, "simplify");
    (expr, steps)
}

/// Collapses redundant absolute values, applying `abs(a)^2 = a^2` and
/// `c*abs(a)*abs(b) = c*abs(a*b)` until neither rule matches anywhere in the expression.
///
/// No other simplification is done.
pub fn abssimp(expr: &Expr) -> Expr {
    run(expr, rules::abs::all, &mut (), "abssimp")
}

/// Like [`abssimp`], but also returns the steps taken.
pub fn abssimp_with_steps(expr: &Expr) -> (Expr, Vec<Step>) {
    let mut steps = Vec::new();
    let expr = run(expr, rules::abs::all, &mut steps, "abssimp");
    (expr, steps)
}

/// Simplifies each top-level term of the expression on its own, then applies [`abssimp`] to the
/// sum.
///
/// Simplifying the terms separately keeps the work proportional to the size of each piece of a
/// large glued formula, which is where almost all of the reduction happens.
pub fn compact(expr: &Expr) -> Expr {
    let summed = match expr {
        Expr::Add(terms) => terms.iter().map(simplify).sum(),
        expr => simplify(expr),
    };
    abssimp(&summed)
}

impl Expr {
    /// Evaluates the expression exactly at the given point, by substituting the number for the
    /// free variable and simplifying.
    ///
    /// The result is a number whenever the simplifier can fold the expression completely, and an
    /// unevaluated expression (such as `sqrt(-1)`) otherwise.
    pub fn value_at(&self, x: &Rational) -> Expr {
        simplify(&self.substitute(&Expr::from(x)))
    }
}

#[cfg(test)]
mod tests {
    use crate::primitive::rat;
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> Expr {
        Expr::var()
    }

    #[test]
    fn add_rules() {
        // also tests multiply_zero
        let expr = Expr::num(0) + Expr::num(0) * (Expr::num(3) * x() + Expr::pi()) + Expr::num(3) * x();
        assert_eq!(simplify(&expr), Expr::Mul(vec![Expr::num(3), x()]));
    }

    #[test]
    fn multiply_rules() {
        let expr = Expr::Mul(vec![
            Expr::num(1),
            Expr::num(3),
            Expr::num(1),
            Expr::Add(vec![Expr::num(1), Expr::Mul(vec![x().pow(2), Expr::num(0)])]),
        ]);
        assert_eq!(simplify(&expr), Expr::num(3));
    }

    #[test]
    fn combine_like_terms() {
        let expr = x() + x() + Expr::num(2) * x() - x().abs() + Expr::num(3) * x().abs();
        assert_eq!(simplify(&expr), Expr::Add(vec![
            Expr::Mul(vec![Expr::num(4), x()]),
            Expr::Mul(vec![Expr::num(2), x().abs()]),
        ]));
    }

    #[test]
    fn combine_like_factors() {
        let expr = x() * x().abs() * x().pow(2) * x().abs();
        assert_eq!(simplify(&expr), Expr::Mul(vec![x().pow(3), x().abs().pow(2)]));
    }

    #[test]
    fn cancel_reciprocal() {
        let expr = Expr::num((1, 2)) * Expr::pi() / Expr::pi();
        assert_eq!(simplify(&expr), Expr::num((1, 2)));
    }

    #[test]
    fn nested_substitution() {
        // (abs(x) + x) / 2 evaluated at x = 3 - 5
        let ramp = (x().abs() + x()) / Expr::num(2);
        let expr = ramp.substitute(&(Expr::num(3) - Expr::num(5) * x())).substitute(&Expr::num(1));
        assert_eq!(simplify(&expr), Expr::num(0));

        let expr = ramp.substitute(&(Expr::num(7) - Expr::num(5) * x())).substitute(&Expr::num(1));
        assert_eq!(simplify(&expr), Expr::num(2));
    }

    #[test]
    fn distribute_and_cancel() {
        // 2 * ((x + 1) / 2) - x = 1
        let expr = Expr::num(2) * ((x() + Expr::num(1)) / Expr::num(2)) - x();
        assert_eq!(simplify(&expr), Expr::num(1));
    }

    #[test]
    fn idempotent() {
        let exprs = [
            (x() - Expr::num(1)).abs() * Expr::num((1, 2)) + x().pow(2) * Expr::num(3) - x(),
            (Expr::pi() * (x() - Expr::num(2)) / Expr::num(4)).cos().acos() / Expr::pi(),
            ((x() - Expr::num(1)) * (x() + Expr::num(2))).sqrt() + Expr::num(5),
            (x().abs() * Expr::num(2)).pow(2) + x().step(true) - x().step(false),
        ];

        for expr in exprs {
            let once = simplify(&expr);
            let twice = simplify(&once);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn steps() {
        let expr = x().pow(Expr::num(1)) * Expr::num(1);
        let (simplified, steps) = simplify_with_steps(&expr);
        assert_eq!(simplified, x());
        assert_eq!(steps, vec![Step::MultiplyNumbers, Step::PowerOne]);
    }

    #[test]
    fn abssimp_square() {
        let expr = x().abs().pow(2) + Expr::num(3);
        let simplified = abssimp(&expr);
        assert_eq!(simplified, x().pow(2) + Expr::num(3));
        assert_eq!(abssimp(&simplified), simplified);
    }

    #[test]
    fn abssimp_product() {
        let expr = Expr::num(2) * x().abs() * (x() + Expr::num(1)).abs();
        let simplified = abssimp(&expr);
        assert_eq!(simplified, Expr::Mul(vec![
            Expr::num(2),
            (x() * (x() + Expr::num(1))).abs(),
        ]));
        assert_eq!(abssimp(&simplified), simplified);
    }

    #[test]
    fn abssimp_many_factors() {
        let expr = x().abs() * (x() - Expr::num(1)).abs() * (x() - Expr::num(2)).abs();
        let (simplified, steps) = abssimp_with_steps(&expr);
        assert_eq!(steps, vec![Step::AbsProduct, Step::AbsProduct]);
        assert_eq!(simplified.as_call(crate::expr::Func::Abs).is_some(), true);
        assert_eq!(simplified.eval_f64(3.0), 6.0);
    }

    #[test]
    fn abssimp_leaves_other_rules_alone() {
        let expr = x() + x() + Expr::num(0);
        assert_eq!(abssimp(&expr), expr);
    }

    #[test]
    fn custom_rule_set() {
        let expr = Expr::Add(vec![x().abs().pow(2), x(), x()]);

        // only the absolute value rewrites fire; like terms are left alone
        assert_eq!(
            simplify_with(&expr, rules::abs::all),
            Expr::Add(vec![x().pow(2), x(), x()]),
        );
        assert_eq!(
            simplify_with(&expr, rules::all),
            Expr::Add(vec![x().abs().pow(2), Expr::Mul(vec![Expr::num(2), x()])]),
        );
    }

    #[test]
    fn compact_terms() {
        let expr = Expr::Add(vec![
            x().abs().pow(2) * Expr::num(1),
            Expr::num(2) * x().abs() * (x() - Expr::num(1)).abs(),
            Expr::num((1, 2)) + Expr::num((1, 2)),
        ]);
        let compacted = compact(&expr);
        assert_eq!(compacted.value_at(&rat(3)), Expr::num(22));
        assert!(compacted.node_count() < expr.node_count());
    }
}
