//! A representation of single-variable mathematical expressions.
//!
//! Expressions are trees of [`Expr`] nodes over exact rational numbers, the constant `pi`, and
//! exactly one free variable, [`Primary::Var`] (rendered as `x`). There is no symbol table: every
//! expression in this crate is a function of the same anonymous variable, and composing two
//! functions is done with [`Expr::substitute`].
//!
//! Like most symbolic representations, sums and products are **flattened**. The expression
//! `x + (y + z)` is a single [`Expr::Add`] node with three children. The arithmetic operators
//! implemented on [`Expr`] perform this flattening, but do no other simplification, except for
//! folding two plain numbers into one.
//!
//! # Strict equality
//!
//! Determining if two expressions are semantically equal is extremely difficult: `x^2 + 2x + 1` and
//! `(x + 1)^2` are equal, but proving so requires expansion or factoring. Instead, the [`PartialEq`]
//! implementation for [`Expr`] implements **strict equality**. Two expressions are strictly equal
//! if:
//!
//! - They are the same type of expression (i.e. both [`Expr::Primary`], both [`Expr::Add`], etc.).
//! - If both are [`Expr::Primary`], both expressions must have strictly equal values.
//! - If both are [`Expr::Add`] or [`Expr::Mul`], both expressions must have strictly equal terms /
//! factors, in any order.
//! - If both are [`Expr::Exp`], both expressions must have strictly equal base and exponent.
//!
//! Strict equality can never report false positives, which is what makes it usable for deciding
//! whether terms / factors can be combined during simplification.

mod iter;
mod subs;

use crate::primitive::rat;
use iter::ExprIter;
use rug::Rational;
use std::{cmp::Ordering, iter::Sum, ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign}};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A built-in function of one argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Func {
    /// The absolute value, `abs(x)`.
    Abs,

    /// The principal square root, `sqrt(x)`. Not a real number for negative arguments.
    Sqrt,

    /// The cosine, `cos(x)`, with its argument in radians.
    Cos,

    /// The inverse cosine, `acos(x)`, with values in `[0, pi]`.
    Acos,

    /// The Heaviside step function. It is `0` for negative arguments and `1` for positive
    /// arguments; at zero, it is `1` if `closed` is true and `0` otherwise.
    Step {
        closed: bool,
    },
}

impl Func {
    /// Returns the name of the function, as it is displayed.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Abs => "abs",
            Self::Sqrt => "sqrt",
            Self::Cos => "cos",
            Self::Acos => "acos",
            Self::Step { .. } => "heaviside",
        }
    }
}

/// A single term / factor, such as a number, the variable, or a function call.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Primary {
    /// An exact rational number, such as `2` or `-3/4`.
    Number(Rational),

    /// The constant `pi`.
    Pi,

    /// The free variable.
    Var,

    /// A function call, such as `abs(x)` or `cos(pi * x)`.
    Call(Func, Box<Expr>),
}

impl std::fmt::Display for Primary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(num) => write!(f, "{}", num),
            Self::Pi => write!(f, "pi"),
            Self::Var => write!(f, "x"),
            Self::Call(Func::Step { closed }, arg) => {
                write!(f, "heaviside({}, {})", arg, if *closed { 1 } else { 0 })
            },
            Self::Call(func, arg) => write!(f, "{}({})", func.name(), arg),
        }
    }
}

/// A single-variable mathematical expression.
///
/// For more information about this type, see the [module-level documentation](self).
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    /// A single term or factor.
    Primary(Primary),

    /// Multiple terms added together.
    Add(Vec<Expr>),

    /// Multiple factors multiplied together.
    Mul(Vec<Expr>),

    /// An expression raised to a power.
    Exp(Box<Expr>, Box<Expr>),
}

/// Binding strength of each kind of node, used to decide where parentheses go when printing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Add,
    Mul,
    Exp,
    Primary,
}

impl Expr {
    /// Returns the precedence of the expression.
    ///
    /// Negative numbers and fractions bind like a product, so that they are parenthesized when
    /// used as a base or exponent.
    fn precedence(&self) -> Precedence {
        match self {
            Self::Primary(Primary::Number(num)) if *num < 0 || *num.denom() != 1 => Precedence::Mul,
            Self::Primary(_) => Precedence::Primary,
            Self::Add(_) => Precedence::Add,
            Self::Mul(_) => Precedence::Mul,
            Self::Exp(_, _) => Precedence::Exp,
        }
    }

    /// Compares the precedence of this expression with the given expression.
    ///
    /// This is used to determine if parentheses are needed around the given expression when
    /// printing.
    pub fn cmp_precedence(&self, other: &Self) -> Ordering {
        self.precedence().cmp(&other.precedence())
    }

    /// Writes `child` to the formatter, wrapping it in parentheses if it binds looser than
    /// `self`. If `inclusive` is true, children binding exactly as strongly are wrapped too.
    fn fmt_child(
        &self,
        f: &mut std::fmt::Formatter<'_>,
        child: &Self,
        inclusive: bool,
    ) -> std::fmt::Result {
        match child.cmp_precedence(self) {
            Ordering::Less => write!(f, "({})", child),
            Ordering::Equal if inclusive => write!(f, "({})", child),
            _ => write!(f, "{}", child),
        }
    }
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Primary(primary) => write!(f, "{}", primary),
            Self::Add(terms) => {
                let mut iter = terms.iter();
                if let Some(term) = iter.next() {
                    write!(f, "{}", term)?;
                    for term in iter {
                        match term.as_number() {
                            Some(num) if *num < 0 => write!(f, " - {}", Rational::from(-num))?,
                            _ => write!(f, " + {}", term)?,
                        }
                    }
                }
                Ok(())
            },
            Self::Mul(factors) => {
                for (idx, factor) in factors.iter().enumerate() {
                    if idx > 0 {
                        write!(f, " * ")?;
                    }

                    // numbers are always written bare, so `1/2 * x` reads as a coefficient
                    if factor.is_number() {
                        write!(f, "{}", factor)?;
                    } else {
                        self.fmt_child(f, factor, true)?;
                    }
                }
                Ok(())
            },
            Self::Exp(base, exp) => {
                self.fmt_child(f, base, true)?;
                write!(f, "^")?;
                self.fmt_child(f, exp, true)
            },
        }
    }
}

impl Expr {
    /// Returns the free variable.
    pub fn var() -> Self {
        Self::Primary(Primary::Var)
    }

    /// Returns the given number as an expression.
    pub fn num<T>(n: T) -> Self
    where
        Rational: From<T>,
    {
        Self::Primary(Primary::Number(Rational::from(n)))
    }

    /// Returns the constant `pi`.
    pub fn pi() -> Self {
        Self::Primary(Primary::Pi)
    }

    /// Applies the given function to this expression. No simplification is done.
    pub fn call(self, func: Func) -> Self {
        Self::Primary(Primary::Call(func, Box::new(self)))
    }

    /// Returns the absolute value of this expression. No simplification is done.
    pub fn abs(self) -> Self {
        self.call(Func::Abs)
    }

    /// Returns the square root of this expression. No simplification is done.
    pub fn sqrt(self) -> Self {
        self.call(Func::Sqrt)
    }

    /// Returns the cosine of this expression. No simplification is done.
    pub fn cos(self) -> Self {
        self.call(Func::Cos)
    }

    /// Returns the inverse cosine of this expression. No simplification is done.
    pub fn acos(self) -> Self {
        self.call(Func::Acos)
    }

    /// Returns the Heaviside step of this expression, which is `1` at zero if `closed` is true.
    /// No simplification is done.
    pub fn step(self, closed: bool) -> Self {
        self.call(Func::Step { closed })
    }

    /// Raises this expression to the given power. No simplification is done.
    pub fn pow(self, exp: impl Into<Expr>) -> Self {
        Self::Exp(Box::new(self), Box::new(exp.into()))
    }

    /// Returns the reciprocal of this expression. Nonzero numbers are inverted directly; anything
    /// else is raised to the power of -1.
    pub fn recip(self) -> Self {
        match self {
            Self::Primary(Primary::Number(num)) if num.cmp0() != Ordering::Equal => {
                Self::Primary(Primary::Number(num.recip()))
            },
            expr => expr.pow(-1),
        }
    }

    /// If the expression is a [`Primary::Number`], returns a reference to the contained number.
    pub fn as_number(&self) -> Option<&Rational> {
        match self {
            Self::Primary(Primary::Number(num)) => Some(num),
            _ => None,
        }
    }

    /// Returns true if the expression is a [`Primary::Number`].
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Primary(Primary::Number(_)))
    }

    /// Returns true if the expression is the number zero.
    pub fn is_zero(&self) -> bool {
        self.as_number().is_some_and(|num| num.cmp0() == Ordering::Equal)
    }

    /// Returns true if the expression is the number one.
    pub fn is_one(&self) -> bool {
        self.as_number().is_some_and(|num| *num == 1)
    }

    /// If the expression is a call to the given function, returns a reference to its argument.
    pub fn as_call(&self, func: Func) -> Option<&Expr> {
        match self {
            Self::Primary(Primary::Call(target, arg)) if *target == func => Some(arg),
            _ => None,
        }
    }

    /// Returns true if the free variable appears anywhere in the expression.
    pub fn contains_var(&self) -> bool {
        self.post_order_iter()
            .any(|expr| matches!(expr, Self::Primary(Primary::Var)))
    }

    /// Trivially downgrades the expression into a simpler form.
    ///
    /// Some operations may result in an [`Expr::Add`] with zero / one term, or an [`Expr::Mul`]
    /// with zero / one factor. This function checks for these cases and simplifies the expression
    /// into the single term / factor, or an [`Expr::Primary`] containing the number 0 or 1.
    pub(crate) fn downgrade(self) -> Self {
        match self {
            Self::Add(mut terms) => {
                if terms.is_empty() {
                    Self::num(0)
                } else if terms.len() == 1 {
                    terms.remove(0)
                } else {
                    Self::Add(terms)
                }
            },
            Self::Mul(mut factors) => {
                if factors.is_empty() {
                    Self::num(1)
                } else if factors.len() == 1 {
                    factors.remove(0)
                } else {
                    Self::Mul(factors)
                }
            },
            _ => self,
        }
    }

    /// Returns an iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn post_order_iter(&self) -> ExprIter {
        ExprIter::new(self)
    }

    /// Returns the number of nodes in the expression tree.
    pub fn node_count(&self) -> usize {
        self.post_order_iter().count()
    }
}

/// Returns true if every element of `lhs` can be paired with a distinct, strictly equal element of
/// `rhs`.
fn same_multiset(lhs: &[Expr], rhs: &[Expr]) -> bool {
    if lhs.len() != rhs.len() {
        return false;
    }

    let mut used = vec![false; rhs.len()];
    lhs.iter().all(|lhs| {
        let found = rhs.iter()
            .enumerate()
            .position(|(idx, rhs)| !used[idx] && lhs == rhs);
        match found {
            Some(idx) => {
                used[idx] = true;
                true
            },
            None => false,
        }
    })
}

/// Checks if two expressions are **strictly** equal.
///
/// For more information about strict equality, see the [module-level documentation](self).
impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs == rhs,
            (Self::Add(lhs), Self::Add(rhs)) | (Self::Mul(lhs), Self::Mul(rhs)) => {
                same_multiset(lhs, rhs)
            },
            (Self::Exp(lhs_base, lhs_exp), Self::Exp(rhs_base, rhs_exp)) => {
                lhs_base == rhs_base && lhs_exp == rhs_exp
            },
            _ => false,
        }
    }
}

impl Eq for Expr {}

/// The number zero.
impl Default for Expr {
    fn default() -> Self {
        Self::num(0)
    }
}

impl From<Primary> for Expr {
    fn from(primary: Primary) -> Self {
        Self::Primary(primary)
    }
}

impl From<Rational> for Expr {
    fn from(num: Rational) -> Self {
        Self::Primary(Primary::Number(num))
    }
}

impl From<&Rational> for Expr {
    fn from(num: &Rational) -> Self {
        Self::Primary(Primary::Number(num.clone()))
    }
}

impl From<i32> for Expr {
    fn from(num: i32) -> Self {
        Self::Primary(Primary::Number(rat(num)))
    }
}

impl From<i64> for Expr {
    fn from(num: i64) -> Self {
        Self::Primary(Primary::Number(rat(num)))
    }
}

/// Adds two [`Expr`]s together. No simplification is done, except for the case where both
/// operands are numbers (which are added), or where either operand is an [`Expr::Add`], in which
/// case both are combined in one list of terms (flattening).
impl Add for Expr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Self::Primary(Primary::Number(lhs)), Self::Primary(Primary::Number(rhs))) => {
                Self::Primary(Primary::Number(lhs + rhs))
            },
            (Self::Add(mut terms), Self::Add(rhs_terms)) => {
                terms.extend(rhs_terms);
                Self::Add(terms)
            },
            (Self::Add(mut terms), other) | (other, Self::Add(mut terms)) => {
                terms.push(other);
                Self::Add(terms)
            },
            (lhs, rhs) => Self::Add(vec![lhs, rhs]),
        }
    }
}

impl AddAssign for Expr {
    fn add_assign(&mut self, rhs: Self) {
        match (self, rhs) {
            (Self::Primary(Primary::Number(lhs)), Self::Primary(Primary::Number(rhs))) => {
                *lhs += rhs;
            },
            (Self::Add(terms), Self::Add(rhs_terms)) => {
                terms.extend(rhs_terms);
            },
            (Self::Add(terms), other) => {
                terms.push(other);
            },
            (lhs, rhs) => {
                let owned = std::mem::take(lhs);
                *lhs = owned + rhs;
            },
        }
    }
}

impl Sub for Expr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self + rhs.neg()
    }
}

impl SubAssign for Expr {
    fn sub_assign(&mut self, rhs: Self) {
        *self += rhs.neg();
    }
}

/// Multiplies two [`Expr`]s together. No simplification is done, except for the case where both
/// operands are numbers (which are multiplied), or where either operand is an [`Expr::Mul`], in
/// which case both are combined in one list of factors (flattening).
impl Mul for Expr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Primary(Primary::Number(lhs)), Self::Primary(Primary::Number(rhs))) => {
                Self::Primary(Primary::Number(lhs * rhs))
            },
            (Self::Mul(mut factors), Self::Mul(other)) => {
                factors.extend(other);
                Self::Mul(factors)
            },
            (Self::Mul(mut factors), other) | (other, Self::Mul(mut factors)) => {
                factors.push(other);
                Self::Mul(factors)
            },
            (lhs, rhs) => Self::Mul(vec![lhs, rhs]),
        }
    }
}

impl MulAssign for Expr {
    fn mul_assign(&mut self, rhs: Self) {
        match (self, rhs) {
            (Self::Primary(Primary::Number(lhs)), Self::Primary(Primary::Number(rhs))) => {
                *lhs *= rhs;
            },
            (Self::Mul(factors), Self::Mul(rhs_factors)) => {
                factors.extend(rhs_factors);
            },
            (Self::Mul(factors), other) => {
                factors.push(other);
            },
            (lhs, rhs) => {
                let owned = std::mem::take(lhs);
                *lhs = owned * rhs;
            },
        }
    }
}

/// Divides two [`Expr`]s, representing `a / b` as `a * b^-1`. Division by a nonzero number
/// multiplies by its reciprocal instead.
impl Div for Expr {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        self * rhs.recip()
    }
}

/// Multiplies this expression by -1. No simplification is done, except for the case where the
/// expression is a number, in which case the number is negated.
impl Neg for Expr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            Self::Primary(Primary::Number(num)) => Self::Primary(Primary::Number(-num)),
            expr => Self::num(-1) * expr,
        }
    }
}

/// Adds up the expressions into one flattened sum. The sum of no expressions is `0`, and the sum of
/// one expression is that expression.
impl Sum for Expr {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::Add(Vec::new()), |sum, term| sum + term).downgrade()
    }
}

/// NOTE: strict equality allows different orderings of terms and factors, but `pretty_assertions`
/// diffs do not. When a test fails, the diff may show differences in ordering that are not the
/// cause of the failure.
#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> Expr {
        Expr::var()
    }

    #[test]
    fn strict_equality() {
        let a = Expr::num(2) * (x() + (Expr::pi() - Expr::num(5)));
        let b = (Expr::pi() - Expr::num(5) + x()) * Expr::num(2);
        assert_eq!(a, b);
    }

    #[test]
    fn strict_equality_2() {
        // these are NOT strictly equal (but are semantically equal)
        let a = Expr::num(2) * (x() + Expr::num(1));
        let b = Expr::num(2) * x() + Expr::num(2);
        assert_ne!(a, b);
    }

    #[test]
    fn strict_equality_counts_duplicates() {
        let a = Expr::Add(vec![x(), x(), Expr::pi()]);
        let b = Expr::Add(vec![x(), Expr::pi(), Expr::pi()]);
        assert_ne!(a, b);
    }

    #[test]
    fn flattening() {
        let expr = x() + (Expr::pi() + x().abs());
        assert_eq!(expr, Expr::Add(vec![
            Expr::Primary(Primary::Var),
            Expr::Primary(Primary::Pi),
            Expr::Primary(Primary::Call(Func::Abs, Box::new(Expr::Primary(Primary::Var)))),
        ]));
    }

    #[test]
    fn number_folding() {
        assert_eq!(Expr::num(1) + Expr::num((1, 2)), Expr::num((3, 2)));
        assert_eq!(Expr::num(3) * Expr::num((1, 6)), Expr::num((1, 2)));
        assert_eq!(x() / Expr::num(4), Expr::Mul(vec![x(), Expr::num((1, 4))]));
        assert_eq!(x() / Expr::num(0), x() * Expr::num(0).pow(-1));
    }

    #[test]
    fn subtraction() {
        let expr = x() - Expr::num(3);
        assert_eq!(expr, Expr::Add(vec![x(), Expr::num(-3)]));

        let expr = Expr::num(3) - x();
        assert_eq!(expr, Expr::Add(vec![Expr::num(3), Expr::Mul(vec![Expr::num(-1), x()])]));
    }

    #[test]
    fn assign_ops() {
        let mut expr = Expr::num(2);
        expr += x();
        expr *= Expr::pi();
        expr -= Expr::num(1);
        assert_eq!(expr, Expr::Add(vec![
            Expr::Mul(vec![Expr::Add(vec![Expr::num(2), x()]), Expr::pi()]),
            Expr::num(-1),
        ]));
    }

    #[test]
    fn sum() {
        assert_eq!(std::iter::empty::<Expr>().sum::<Expr>(), Expr::num(0));
        assert_eq!([x().abs()].into_iter().sum::<Expr>(), x().abs());
        assert_eq!(
            [x(), x() + Expr::pi(), Expr::num(2)].into_iter().sum::<Expr>(),
            Expr::Add(vec![x(), x(), Expr::pi(), Expr::num(2)]),
        );
    }

    #[test]
    fn fmt_expr() {
        let expr = (x() - Expr::num(1)).abs() * Expr::num((1, 2)) + x().pow(2);
        assert_eq!(expr.to_string(), "abs(x - 1) * 1/2 + x^2");
    }

    #[test]
    fn fmt_expr_2() {
        let expr = (Expr::num(-1) * x()).acos() / Expr::pi() + (x() + Expr::num(1)).pow(Expr::num((1, 2)));
        assert_eq!(expr.to_string(), "acos(-1 * x) * pi^(-1) + (x + 1)^(1/2)");
    }

    #[test]
    fn fmt_step() {
        assert_eq!(x().step(true).to_string(), "heaviside(x, 1)");
        assert_eq!((x() - Expr::num(2)).step(false).to_string(), "heaviside(x - 2, 0)");
    }

    #[test]
    fn contains_var() {
        assert!((Expr::num(2) * x().cos()).contains_var());
        assert!(!(Expr::num(2) * Expr::pi().cos()).contains_var());
    }
}
