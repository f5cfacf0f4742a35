//! Functions to construct [`Integer`]s, [`Rational`]s, and [`Float`]s from various types.

use rug::{Assign, Float, Integer, Rational};

/// The number of bits of precision to use when evaluating expressions numerically.
pub const PRECISION: u32 = 1 << 9;

/// Creates an [`Integer`] with the given value.
pub fn int<T>(n: T) -> Integer
where
    Integer: From<T>,
{
    Integer::from(n)
}

/// Creates a [`Rational`] with the given value.
///
/// Fractions can be created from a `(numerator, denominator)` tuple, e.g. `rat((3, 4))`.
pub fn rat<T>(n: T) -> Rational
where
    Rational: From<T>,
{
    Rational::from(n)
}

/// Creates a [`Float`] with the given value.
pub fn float<T>(n: T) -> Float
where
    Float: Assign<T>,
{
    Float::with_val(PRECISION, n)
}

/// Returns true if the given rational is an integer whose magnitude fits in an `i32`, and returns
/// it.
pub(crate) fn small_integer(n: &Rational) -> Option<i32> {
    if *n.denom() == 1 {
        n.numer().to_i32()
    } else {
        None
    }
}

/// Returns the exact square root of the given rational, if it has one.
pub(crate) fn exact_sqrt(n: &Rational) -> Option<Rational> {
    if *n < 0 || !n.numer().is_perfect_square() || !n.denom().is_perfect_square() {
        return None;
    }

    let numer = Integer::from(n.numer().sqrt_ref());
    let denom = Integer::from(n.denom().sqrt_ref());
    Some(Rational::from((numer, denom)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_square_fraction() {
        assert_eq!(exact_sqrt(&rat((9, 16))), Some(rat((3, 4))));
        assert_eq!(exact_sqrt(&rat(0)), Some(rat(0)));
    }

    #[test]
    fn imperfect_square() {
        assert_eq!(exact_sqrt(&rat(2)), None);
        assert_eq!(exact_sqrt(&rat(-4)), None);
    }

    #[test]
    fn small_integers() {
        assert_eq!(small_integer(&rat(-7)), Some(-7));
        assert_eq!(small_integer(&rat((1, 2))), None);
    }
}
