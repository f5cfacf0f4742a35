use crate::error::{Error, Result};
use cpw_algebra::Expr;
use rug::Rational;

/// Repeats a slice of `f` periodically.
///
/// The result sweeps `f` from `f(src.0)` to `f(src.1)` as `x` goes from `dest.0` to `dest.1`, then
/// back again as `x` goes to `dest.1 + (dest.1 - dest.0)`, and so on in both directions. The
/// period is `2 * (dest.1 - dest.0)`.
///
/// The folding uses `acos(cos(pi * t)) / pi`, a triangle wave that is `0` at even `t` and `1` at
/// odd `t`.
///
/// Fails with [`Error::ZeroSpan`] if `dest` has zero width.
pub fn oscillate(f: &Expr, src: (&Rational, &Rational), dest: (&Rational, &Rational)) -> Result<Expr> {
    let (x0, x1) = src;
    let (x2, x3) = dest;

    let width = Rational::from(x3 - x2);
    if width == 0 {
        return Err(Error::ZeroSpan { at: x2.clone() });
    }

    // [x2, x3] -> [0, 1]
    let t = (Expr::var() - Expr::from(x2)) * Expr::num(width.recip());
    let triangle = (Expr::pi() * t).cos().acos() / Expr::pi();

    // [0, 1] -> [x0, x1]
    let remap = triangle * Expr::num(Rational::from(x1 - x0)) + Expr::from(x0);
    Ok(f.substitute(&remap))
}
