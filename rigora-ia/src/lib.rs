//! Rigora IA - Verified Interval Arithmetic for IEEE-754 Doubles
//!
//! This crate provides the numeric kernel of the Rigora prover:
//! - [`Interval`]: a closed double-precision interval whose operations
//!   rigorously enclose the pointwise image of the real operation
//! - [`IBool`]: the three-valued boolean produced by interval comparisons
//! - Directed-rounding primitives that are opaque to the optimizer
//! - Interval `sin`/`cos`/`tan` backed by an arbitrary-precision
//!   correctly-rounded evaluator
//! - Tightest bracketing constants for π, π/2 and 1/(2π)
//!
//! # Rounding environment
//!
//! The kernel computes every lower bound with rounding-toward-negative and
//! synthesizes upper bounds by sign negation. [`fpenv::install`] must run on
//! every thread before any interval operation; it switches the SSE control
//! register to round-down, masks exceptions, and disables flush-to-zero and
//! denormals-are-zero. The environment is never changed afterwards, except
//! for the inlined toggle around the two directed square roots, which
//! restores it before returning.
//!
//! # Examples
//!
//! ```
//! use rigora_ia::{fpenv, Interval};
//!
//! fpenv::install();
//!
//! let a = Interval::new(5.0, 5.0) + Interval::new(3.0, 3.0);
//! assert_eq!(a.lb(), 8.0);
//! assert_eq!(a.ub(), 8.0);
//!
//! // Rounding error widens intervals instead of being lost.
//! let x = Interval::from(1.1);
//! let sum = x + x + x + x + x;
//! assert!(sum.lb() <= 5.5 && 5.5 <= sum.ub());
//! assert!(!sum.is_singleton());
//! ```
//!
//! ## Three-valued comparisons
//!
//! ```
//! use rigora_ia::{fpenv, Interval};
//!
//! fpenv::install();
//!
//! let x = Interval::new(-1.0, 1.0);
//! let c = x.gt(0.0);
//! assert!(c.possibly() && !c.definitely());
//! ```

#![warn(missing_docs)]

pub mod consts;
pub mod fpenv;
mod hiprec;
mod ibool;
mod interval;
mod round;
mod trig;

pub use ibool::IBool;
pub use interval::{split_half, Interval};
pub use round::{add_rd, add_ru};
