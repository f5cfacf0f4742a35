#![doc = include_str!("../README.md")]

pub mod assemble;
pub mod bound;
pub mod continuity;
pub mod error;
pub mod glue;
pub mod oscillate;
pub mod piece;
pub mod point;
pub mod shape;
pub mod undefined;
pub mod window;

pub use assemble::piecewise;
pub use bound::Bound;
pub use continuity::check_continuity;
pub use error::{Error, Result};
pub use glue::{glue, glued, translate, Glue};
pub use oscillate::oscillate;
pub use piece::Piece;
pub use point::Point;
pub use shape::{boxcar, incline, ramp, unit_step, Side};
pub use undefined::{undefined, undefined_with};
pub use window::{chop, clip, Strategy};

pub use cpw_algebra::{abssimp, compact, primitive, simplify, Expr};
