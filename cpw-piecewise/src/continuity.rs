use crate::error::{Error, Result};
use crate::piece::Piece;
use cpw_algebra::primitive::float;

/// Checks that consecutive pieces meet: each piece must end where the next one starts, and both
/// must have the same value there.
///
/// A boundary value that is not a real number never matches, even itself. Otherwise, boundary
/// values are first compared exactly. If they are not strictly equal (for example `sqrt(2)`
/// against a rational approximation of it), their numeric values must differ by at most
/// `tolerance`.
///
/// [`piecewise`](crate::piecewise) does not call this; it is meant for tests and debugging.
pub fn check_continuity(pieces: &[Piece], tolerance: f64) -> Result<()> {
    for (index, pair) in pieces.windows(2).enumerate() {
        let (left, right) = (&pair[0], &pair[1]);
        if left.right != right.left {
            return Err(Error::NotAdjacent {
                index,
                right: left.right.clone(),
                left: right.left.clone(),
            });
        }

        // adjacent pieces can only share a finite bound
        let Some(at) = left.right.finite() else {
            continue;
        };

        let left_value = left.expr.value_at(at);
        let right_value = right.expr.value_at(at);

        let x = float(at);
        let (left_float, right_float) = (left.expr.eval(&x), right.expr.eval(&x));
        let undefined = left_float.is_nan() || right_float.is_nan();
        if undefined || (left_value != right_value && (left_float - right_float).abs() > tolerance) {
            return Err(Error::Discontinuity {
                index,
                at: at.clone(),
                left: left_value,
                right: right_value,
            });
        }
    }

    Ok(())
}
