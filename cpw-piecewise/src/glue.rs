//! Gluing function fragments end to end.
//!
//! The glue planner takes fragments defined on their own local intervals, at their own heights,
//! and slides each one (without stretching it) so it starts where the previous one ended. The
//! resulting pieces are continuous by construction, so they can be fed to
//! [`piecewise`](crate::piecewise) directly.

use crate::assemble::piecewise;
use crate::bound::{check_interval, Bound};
use crate::error::{Error, Result};
use crate::piece::Piece;
use crate::point::Point;
use crate::window::Strategy;
use cpw_algebra::{simplify, Expr};
use log::debug;
use rug::Rational;

/// Translates `f` rigidly, so that the point `src` on its graph moves to `dest`.
pub fn translate(f: &Expr, src: &Point, dest: &Point) -> Expr {
    let dx = Rational::from(&dest.x - &src.x);
    let dy = simplify(&(dest.y.clone() - src.y.clone()));
    f.substitute(&(Expr::var() - Expr::from(dx))) + dy
}

/// Returns the finite bounds of a part, or the given error if either bound is infinite.
fn finite_bounds(piece: &Piece, err: impl FnOnce() -> Error) -> Result<(&Rational, &Rational)> {
    match (piece.left.finite(), piece.right.finite()) {
        (Some(left), Some(right)) => Ok((left, right)),
        _ => Err(err()),
    }
}

/// Plans how to glue the parts together, starting at `start`.
///
/// Each part is translated so that its left end lands where the previous part's right end
/// landed, with the first part's left end landing on `start`. A part spanning `[x1, x2]` occupies
/// `[cx, cx + x2 - x1]` in the result, where `cx` is where it landed.
///
/// The optional `left` tail must span `(-oo, a]`. It is translated so its right end lands on
/// `start`, and is placed before every part. Likewise, the optional `right` tail must span
/// `[a, oo)`, and is translated so its left end lands on the right end of the last part.
pub fn glued(parts: &[Piece], start: &Point, left: Option<&Piece>, right: Option<&Piece>) -> Result<Vec<Piece>> {
    let mut pieces = Vec::with_capacity(parts.len() + 2);

    if let Some(tail) = left {
        let end = match (&tail.left, tail.right.finite()) {
            (Bound::NegInfinity, Some(end)) => end,
            _ => return Err(Error::LeftTail { left: tail.left.clone(), right: tail.right.clone() }),
        };

        let moved = translate(&tail.expr, &Point::on(&tail.expr, end), start);
        debug!("placed left tail on (-oo, {}]", start.x);
        pieces.push(Piece {
            expr: moved,
            left: Bound::NegInfinity,
            right: Bound::from(&start.x),
        });
    }

    let mut cursor = start.clone();
    for (index, part) in parts.iter().enumerate() {
        let (x1, x2) = finite_bounds(part, || Error::UnboundedPart {
            index,
            left: part.left.clone(),
            right: part.right.clone(),
        })?;
        check_interval(&part.left, &part.right)?;

        let width = Rational::from(x2 - x1);
        let origin = Point::on(&part.expr, x1);
        let rise = simplify(&(part.expr.value_at(x2) - origin.y.clone()));

        let moved = translate(&part.expr, &origin, &cursor);
        let end = Rational::from(&cursor.x + &width);
        debug!("placed part {} on [{}, {}], starting at y = {}", index, cursor.x, end, cursor.y);
        pieces.push(Piece {
            expr: moved,
            left: Bound::from(&cursor.x),
            right: Bound::from(&end),
        });

        cursor = Point {
            x: end,
            y: simplify(&(cursor.y + rise)),
        };
    }

    if let Some(tail) = right {
        let begin = match (tail.left.finite(), &tail.right) {
            (Some(begin), Bound::PosInfinity) => begin,
            _ => return Err(Error::RightTail { left: tail.left.clone(), right: tail.right.clone() }),
        };

        let moved = translate(&tail.expr, &Point::on(&tail.expr, begin), &cursor);
        debug!("placed right tail on [{}, oo)", cursor.x);
        pieces.push(Piece {
            expr: moved,
            left: Bound::from(&cursor.x),
            right: Bound::PosInfinity,
        });
    }

    Ok(pieces)
}

/// Glues the parts together and assembles them into one expression.
///
/// This is [`piecewise`] applied to the result of [`glued`]. For a version with defaults for the
/// optional arguments, see [`Glue`].
pub fn glue(
    parts: &[Piece],
    start: &Point,
    left: Option<&Piece>,
    right: Option<&Piece>,
    strategy: Strategy,
) -> Result<Expr> {
    piecewise(&glued(parts, start, left, right)?, strategy)
}

/// Options for gluing parts together.
///
/// Returned by [`Glue::new`], with these defaults:
///
/// - [`start`](Glue::start): `(0, 0)`
/// - [`left`](Glue::left): no left tail
/// - [`right`](Glue::right): no right tail
/// - [`strategy`](Glue::strategy): [`Strategy::Hold`]
#[derive(Debug, Clone)]
pub struct Glue {
    parts: Vec<Piece>,
    start: Point,
    left: Option<Piece>,
    right: Option<Piece>,
    strategy: Strategy,
}

impl Glue {
    /// Creates the options for gluing the given parts, in order.
    pub fn new(parts: impl IntoIterator<Item = Piece>) -> Self {
        Self {
            parts: parts.into_iter().collect(),
            start: Point::default(),
            left: None,
            right: None,
            strategy: Strategy::default(),
        }
    }

    /// Set the point where the first part starts. Returns an updated [`Glue`] for chaining.
    pub fn start(mut self, start: Point) -> Self {
        self.start = start;
        self
    }

    /// Set the tail to place before the first part. Returns an updated [`Glue`] for chaining.
    pub fn left(mut self, tail: Piece) -> Self {
        self.left = Some(tail);
        self
    }

    /// Set the tail to place after the last part. Returns an updated [`Glue`] for chaining.
    pub fn right(mut self, tail: Piece) -> Self {
        self.right = Some(tail);
        self
    }

    /// Set the strategy used to assemble the pieces. Returns an updated [`Glue`] for chaining.
    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Returns the translated pieces, without assembling them.
    pub fn pieces(&self) -> Result<Vec<Piece>> {
        glued(&self.parts, &self.start, self.left.as_ref(), self.right.as_ref())
    }

    /// Glues the parts and assembles them into one expression.
    pub fn build(&self) -> Result<Expr> {
        piecewise(&self.pieces()?, self.strategy)
    }
}

#[cfg(test)]
mod tests {
    use cpw_algebra::primitive::rat;
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> Expr {
        Expr::var()
    }

    fn square_then_line() -> Vec<Piece> {
        vec![
            Piece::new(x().pow(2), 0, 1).unwrap(),
            Piece::new(x(), 0, 1).unwrap(),
        ]
    }

    #[test]
    fn translate_point() {
        let moved = translate(&x().pow(2), &Point::new(1, 1), &Point::new(3, -2));
        assert_eq!(moved.value_at(&rat(3)), Expr::num(-2));
        assert_eq!(moved.value_at(&rat(4)), Expr::num(1));
    }

    #[test]
    fn spans_and_cursor() {
        let pieces = glued(&square_then_line(), &Point::default(), None, None).unwrap();
        assert_eq!(pieces.len(), 2);

        assert_eq!((&pieces[0].left, &pieces[0].right), (&Bound::from(0), &Bound::from(1)));
        assert_eq!(pieces[0].expr.value_at(&rat(0)), Expr::num(0));
        assert_eq!(pieces[0].expr.value_at(&rat(1)), Expr::num(1));

        assert_eq!((&pieces[1].left, &pieces[1].right), (&Bound::from(1), &Bound::from(2)));
        assert_eq!(pieces[1].expr.value_at(&rat(1)), Expr::num(1));
        assert_eq!(pieces[1].expr.value_at(&rat(2)), Expr::num(2));
    }

    #[test]
    fn continuous_at_the_seam() {
        for strategy in [Strategy::Hold, Strategy::Zero] {
            let expr = Glue::new(square_then_line()).strategy(strategy).build().unwrap();
            assert_eq!(expr.value_at(&rat(1)), Expr::num(1));
            assert_eq!(expr.value_at(&rat((1, 2))), Expr::num((1, 4)));
            assert_eq!(expr.value_at(&rat((3, 2))), Expr::num((3, 2)));
        }
    }

    #[test]
    fn offset_start() {
        let parts = vec![Piece::new(x().pow(2) + Expr::num(7), -1, 1).unwrap()];
        let expr = Glue::new(parts).start(Point::new(10, 2)).build().unwrap();

        // the part starts at (-1, 8), which moves to (10, 2)
        assert_eq!(expr.value_at(&rat(10)), Expr::num(2));
        assert_eq!(expr.value_at(&rat(11)), Expr::num(1));
        assert_eq!(expr.value_at(&rat(12)), Expr::num(2));
    }

    #[test]
    fn tails() {
        let pieces = Glue::new(square_then_line())
            .left(Piece::new(-x(), Bound::NegInfinity, 5).unwrap())
            .right(Piece::new(x().pow(2), 0, Bound::PosInfinity).unwrap())
            .pieces()
            .unwrap();
        assert_eq!(pieces.len(), 4);

        let left = &pieces[0];
        assert_eq!((&left.left, &left.right), (&Bound::NegInfinity, &Bound::from(0)));
        assert_eq!(left.expr.value_at(&rat(0)), Expr::num(0));
        assert_eq!(left.expr.value_at(&rat(-1)), Expr::num(1));

        let right = &pieces[3];
        assert_eq!((&right.left, &right.right), (&Bound::from(2), &Bound::PosInfinity));
        assert_eq!(right.expr.value_at(&rat(2)), Expr::num(2));
        assert_eq!(right.expr.value_at(&rat(4)), Expr::num(6));
    }

    #[test]
    fn glue_with_tails() {
        let left = Piece::new(-x(), Bound::NegInfinity, 5).unwrap();
        let right = Piece::new(x().pow(2), 0, Bound::PosInfinity).unwrap();
        let expr = glue(&square_then_line(), &Point::default(), Some(&left), Some(&right), Strategy::Zero).unwrap();

        for (x, y) in [(-4, 4), (-1, 1), (0, 0), (1, 1), (2, 2), (3, 3), (4, 6)] {
            assert_eq!(expr.value_at(&rat(x)), Expr::num(y));
        }
        assert_eq!(expr.value_at(&rat((1, 2))), Expr::num((1, 4)));
    }

    #[test]
    fn bad_tails() {
        let parts = square_then_line();
        let not_left = Piece::new(x(), 0, 1).unwrap();
        assert!(matches!(
            glued(&parts, &Point::default(), Some(&not_left), None),
            Err(Error::LeftTail { .. }),
        ));
        assert!(matches!(
            glued(&parts, &Point::default(), None, Some(&not_left)),
            Err(Error::RightTail { .. }),
        ));
    }

    #[test]
    fn unbounded_part() {
        let parts = vec![Piece::new(x(), 0, Bound::PosInfinity).unwrap()];
        assert_eq!(
            glued(&parts, &Point::default(), None, None),
            Err(Error::UnboundedPart { index: 0, left: Bound::from(0), right: Bound::PosInfinity }),
        );
    }
}
