#![doc = include_str!("../README.md")]

pub mod consts;
pub mod eval;
pub mod expr;
pub mod primitive;
pub mod simplify;
pub mod step_collector;

pub use expr::{Expr, Func, Primary};
pub use simplify::{abssimp, abssimp_with_steps, compact, simplify, simplify_with, simplify_with_steps};
pub use step_collector::StepCollector;
