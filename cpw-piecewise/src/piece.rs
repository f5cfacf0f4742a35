use crate::bound::{check_interval, Bound};
use crate::error::Result;
use cpw_algebra::Expr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A function fragment, together with the interval where it is the active definition.
///
/// Pieces are plain values: the assembler consumes a slice of them, and the glue planner produces
/// a new list.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Piece {
    /// The formula of the fragment.
    pub expr: Expr,

    /// The left end of the active interval.
    pub left: Bound,

    /// The right end of the active interval.
    pub right: Bound,
}

impl Piece {
    /// Creates a piece, checking that the bounds describe an interval.
    pub fn new(expr: impl Into<Expr>, left: impl Into<Bound>, right: impl Into<Bound>) -> Result<Self> {
        let (left, right) = (left.into(), right.into());
        check_interval(&left, &right)?;
        Ok(Self { expr: expr.into(), left, right })
    }
}
