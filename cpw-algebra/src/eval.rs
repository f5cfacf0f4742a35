//! Numeric evaluation of expressions.
//!
//! Evaluation is done with [`Float`]s at [`PRECISION`] bits. Values that are not real numbers,
//! such as `sqrt(-1)`, evaluate to NaN; NaN then propagates through every operation, with one
//! exception: a factor that evaluates to exactly zero makes the whole product zero, as in exact
//! arithmetic, where `0 * sqrt(-1) = 0`. A window switched off by a step of `0` therefore stays
//! `0` even where its contents are undefined.

use crate::consts::{NAN, ONE, PI, ZERO};
use crate::expr::{Expr, Func, Primary};
use crate::primitive::{float, PRECISION};
use rug::{ops::Pow, Float};

/// Evaluates a function call on an already evaluated argument.
fn eval_call(func: Func, arg: Float) -> Float {
    if arg.is_nan() {
        return arg;
    }

    match func {
        Func::Abs => arg.abs(),
        Func::Sqrt => arg.sqrt(),
        Func::Cos => arg.cos(),
        Func::Acos => arg.acos(),
        Func::Step { closed } => {
            let on = if closed { arg >= 0 } else { arg > 0 };
            if on {
                ONE.clone()
            } else {
                ZERO.clone()
            }
        },
    }
}

impl Expr {
    /// Evaluates the expression with the free variable set to `x`.
    ///
    /// Returns NaN if the expression is not a real number at `x`.
    pub fn eval(&self, x: &Float) -> Float {
        match self {
            Self::Primary(Primary::Number(num)) => float(num),
            Self::Primary(Primary::Pi) => PI.clone(),
            Self::Primary(Primary::Var) => Float::with_val(PRECISION, x),
            Self::Primary(Primary::Call(func, arg)) => eval_call(*func, arg.eval(x)),
            Self::Add(terms) => terms.iter()
                .fold(ZERO.clone(), |sum, term| sum + term.eval(x)),
            Self::Mul(factors) => {
                let mut product = ONE.clone();
                let mut undefined = false;
                for factor in factors {
                    let value = factor.eval(x);
                    if value.is_zero() {
                        return ZERO.clone();
                    }
                    if value.is_nan() {
                        undefined = true;
                    } else {
                        product *= value;
                    }
                }

                if undefined {
                    NAN.clone()
                } else {
                    product
                }
            },
            Self::Exp(base, exp) => base.eval(x).pow(&exp.eval(x)),
        }
    }

    /// Evaluates the expression with the free variable set to `x`, rounding the result to an
    /// [`f64`].
    pub fn eval_f64(&self, x: f64) -> f64 {
        self.eval(&float(x)).to_f64()
    }
}
