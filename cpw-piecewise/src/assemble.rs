//! Assembling a list of pieces into one expression.
//!
//! Each piece is windowed to its interval, and the windowed pieces are summed. How the sum stays
//! equal to the right piece everywhere depends on the [`Strategy`]:
//!
//! - With [`Strategy::Hold`], every windowed piece holds its boundary values outside its interval.
//! Left of its interval, piece `i > 0` contributes the constant `f_i(x1_i)`, so that constant is
//! subtracted once for every piece after the first. Right of its interval, it contributes
//! `f_i(x2_i)`, which the next piece's correction cancels as long as the pieces are continuous.
//! - With [`Strategy::Zero`], every windowed piece is zero outside its interval, so no correction
//! is needed. A boundary shared by two consecutive pieces is only included in the right one, so
//! it is not counted twice.
//!
//! Neither strategy checks that the pieces are actually continuous. Use
//! [`check_continuity`](crate::check_continuity) for that.

use crate::error::{Error, Result};
use crate::piece::Piece;
use crate::window::{chop, clip, Strategy};
use cpw_algebra::Expr;
use log::debug;

/// Windows the piece at `index` according to the strategy, including its correction term.
fn window_piece(parts: &[Piece], index: usize, strategy: Strategy) -> Result<Expr> {
    let piece = &parts[index];
    match strategy {
        Strategy::Hold => {
            let clipped = clip(&piece.expr, &piece.left, &piece.right)?;
            if index == 0 {
                return Ok(clipped);
            }

            let left = piece.left.finite()
                .ok_or(Error::UnboundedCorrection { index })?;
            Ok(clipped - piece.expr.value_at(left))
        },
        Strategy::Zero => {
            let shares_left = index > 0 && parts[index - 1].right == piece.left;
            chop(&piece.expr, &piece.left, &piece.right, !shares_left, true)
        },
    }
}

#[cfg(feature = "parallel")]
fn window_all(parts: &[Piece], strategy: Strategy) -> Result<Vec<Expr>> {
    use rayon::prelude::*;

    (0..parts.len())
        .into_par_iter()
        .map(|index| window_piece(parts, index, strategy))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn window_all(parts: &[Piece], strategy: Strategy) -> Result<Vec<Expr>> {
    (0..parts.len())
        .map(|index| window_piece(parts, index, strategy))
        .collect()
}

/// Assembles the pieces into one expression, which is equal to each piece on its interval.
///
/// The pieces must be continuous: each piece must have the same value at its right bound as the
/// next piece has at its left bound. Otherwise, the result is not specified. An empty list
/// assembles to `0`.
///
/// With [`Strategy::Hold`], only the first piece may start at `-oo`; see
/// [`Error::UnboundedCorrection`].
pub fn piecewise(parts: &[Piece], strategy: Strategy) -> Result<Expr> {
    debug!("assembling {} pieces, strategy: {}", parts.len(), strategy);

    Ok(window_all(parts, strategy)?.into_iter().sum())
}
