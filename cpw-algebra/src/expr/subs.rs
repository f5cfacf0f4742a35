use super::{Expr, Primary};

impl Expr {
    /// Returns a copy of this expression with every occurrence of the free variable replaced by
    /// `replacement`.
    ///
    /// The replacement is purely structural: nothing is evaluated or simplified, and no flattening
    /// is done, so substituting `x - 1` into `abs(x) + x` yields `abs(x - 1) + (x - 1)` with the
    /// inner sum kept as its own node. Use [`simplify`](crate::simplify()) afterwards to clean up
    /// the result.
    pub fn substitute(&self, replacement: &Expr) -> Expr {
        match self {
            Self::Primary(Primary::Var) => replacement.clone(),
            Self::Primary(Primary::Call(func, arg)) => {
                Self::Primary(Primary::Call(*func, Box::new(arg.substitute(replacement))))
            },
            Self::Primary(primary) => Self::Primary(primary.clone()),
            Self::Add(terms) => Self::Add(terms.iter().map(|term| term.substitute(replacement)).collect()),
            Self::Mul(factors) => Self::Mul(factors.iter().map(|factor| factor.substitute(replacement)).collect()),
            Self::Exp(base, exp) => Self::Exp(
                Box::new(base.substitute(replacement)),
                Box::new(exp.substitute(replacement)),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn structural_replacement() {
        let expr = Expr::var().abs() + Expr::var();
        let shifted = expr.substitute(&(Expr::var() - Expr::num(1)));
        assert_eq!(shifted, Expr::Add(vec![
            (Expr::var() - Expr::num(1)).abs(),
            Expr::Add(vec![Expr::var(), Expr::num(-1)]),
        ]));
    }

    #[test]
    fn constant_is_unchanged() {
        let expr = Expr::pi().cos() * Expr::num(3);
        assert_eq!(expr.substitute(&Expr::num(7)), expr);
    }

    #[test]
    fn composition() {
        // f(g(x)) with f = x^2, g = cos(x)
        let composed = Expr::var().pow(2).substitute(&Expr::var().cos());
        assert_eq!(composed, Expr::var().cos().pow(2));
    }
}
