//! Constants used when evaluating expressions numerically. This module consists of static
//! constants that return [`Float`]s with the given value.

use once_cell::sync::Lazy;
use rug::Float;
use super::primitive::float;

pub static ZERO: Lazy<Float> = Lazy::new(|| float(0));

pub static ONE: Lazy<Float> = Lazy::new(|| float(1));

pub static PI: Lazy<Float> = Lazy::new(|| float(-1).acos());

/// A quiet NaN, the numeric value of an expression that is not a real number.
pub static NAN: Lazy<Float> = Lazy::new(|| float(rug::float::Special::Nan));
