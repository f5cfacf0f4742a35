use crate::bound::Bound;
use cpw_algebra::Expr;
use rug::Rational;
use thiserror::Error;

/// Everything that can go wrong while constructing a piecewise function.
///
/// Every variant is raised by the call that receives the bad argument. A region where the result
/// is not a real number is not an error; see [`undefined`](crate::undefined).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A side tag was neither `left` nor `right`.
    #[error("invalid side `{0}`: expected `left` or `right`")]
    InvalidSide(String),

    /// A strategy tag was not one of the known names.
    #[error("invalid strategy `{0}`: expected `hold` (or `clip`) or `zero` (or `chop`)")]
    InvalidStrategy(String),

    /// The left bound of an interval is greater than its right bound.
    #[error("the interval [{left}, {right}] is reversed: its left bound is greater than its right bound")]
    ReversedInterval { left: Bound, right: Bound },

    /// `oo` was used as a left bound, or `-oo` as a right bound.
    #[error("the interval [{left}, {right}] has an infinite bound on the wrong side")]
    MisplacedInfinity { left: Bound, right: Bound },

    /// An interval whose width is used as a divisor has zero width.
    #[error("the interval starting and ending at {at} has zero width")]
    ZeroSpan { at: Rational },

    /// The left tail given to the glue planner does not span `(-oo, a]` for a finite `a`.
    #[error("the left tail must span (-oo, a] for a finite a, but spans [{left}, {right}]")]
    LeftTail { left: Bound, right: Bound },

    /// The right tail given to the glue planner does not span `[a, oo)` for a finite `a`.
    #[error("the right tail must span [a, oo) for a finite a, but spans [{left}, {right}]")]
    RightTail { left: Bound, right: Bound },

    /// A part given to the glue planner has an infinite bound. Only the tails may be unbounded.
    #[error("part {index} spans [{left}, {right}], but only the tails may be unbounded")]
    UnboundedPart { index: usize, left: Bound, right: Bound },

    /// A piece other than the first one starts at `-oo` while holding values, so its left boundary
    /// value cannot be subtracted.
    #[error("piece {index} starts at -oo, but only the first piece may when holding boundary values")]
    UnboundedCorrection { index: usize },

    /// Two consecutive pieces do not share a boundary.
    #[error("piece {index} ends at {right}, but the next piece starts at {left}")]
    NotAdjacent { index: usize, right: Bound, left: Bound },

    /// Two consecutive pieces have different values at their shared boundary.
    #[error("pieces {index} and {} disagree at x = {at}: {left} on the left, {right} on the right", .index + 1)]
    Discontinuity { index: usize, at: Rational, left: Expr, right: Expr },
}

pub type Result<T> = std::result::Result<T, Error>;
