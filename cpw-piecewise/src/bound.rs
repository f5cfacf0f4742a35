use crate::error::{Error, Result};
use rug::Rational;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An endpoint of an interval on the extended real line.
///
/// Bounds are totally ordered, with `-oo` below every finite value and `oo` above. Finite bounds
/// are exact rationals, so comparing two of them never depends on rounding.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Bound {
    /// Negative infinity, `-oo`. Only valid as a left bound.
    NegInfinity,

    /// A finite value.
    Finite(Rational),

    /// Positive infinity, `oo`. Only valid as a right bound.
    PosInfinity,
}

impl Bound {
    /// Returns the value of the bound if it is finite.
    pub fn finite(&self) -> Option<&Rational> {
        match self {
            Self::Finite(value) => Some(value),
            _ => None,
        }
    }

    /// Returns true if the bound is finite.
    pub fn is_finite(&self) -> bool {
        matches!(self, Self::Finite(_))
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegInfinity => write!(f, "-oo"),
            Self::Finite(value) => write!(f, "{}", value),
            Self::PosInfinity => write!(f, "oo"),
        }
    }
}

impl From<Rational> for Bound {
    fn from(value: Rational) -> Self {
        Self::Finite(value)
    }
}

impl From<&Rational> for Bound {
    fn from(value: &Rational) -> Self {
        Self::Finite(value.clone())
    }
}

impl From<i32> for Bound {
    fn from(value: i32) -> Self {
        Self::Finite(Rational::from(value))
    }
}

impl From<(i32, i32)> for Bound {
    fn from(value: (i32, i32)) -> Self {
        Self::Finite(Rational::from(value))
    }
}

/// Checks that `left` and `right` describe an interval: infinities on their own side, and
/// `left <= right`.
pub fn check_interval(left: &Bound, right: &Bound) -> Result<()> {
    if *left == Bound::PosInfinity || *right == Bound::NegInfinity {
        return Err(Error::MisplacedInfinity { left: left.clone(), right: right.clone() });
    }

    if left > right {
        return Err(Error::ReversedInterval { left: left.clone(), right: right.clone() });
    }

    Ok(())
}
