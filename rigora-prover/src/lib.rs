//! Rigora Prover - Branch-and-Bound Refutation over Interval Boxes
//!
//! This crate drives the search side of Rigora: clients describe a
//! parameter box as a [`VariableSet`] (interval variables, cached derived
//! quantities, per-variable change handlers) and a conjunction of
//! [`Constraint`]s, and the [`Prover`] exhaustively narrows, checks and
//! splits boxes until every box is refuted or a satisfiable residual is
//! reported.
//!
//! - Constraints act as *checkers* (three-valued satisfaction tests) or
//!   *propagators* (domain-narrowing reductions signalling
//!   [`PropagateResult`])
//! - Propagators run to a fixed point before each satisfaction check
//! - The search is a deterministic LIFO traversal; splitting defaults to
//!   halving variable `height mod N`
//!
//! # Example
//!
//! A one-variable refutation: `x > 2` has no solution in `[-1, 1]`.
//!
//! ```
//! use rigora_ia::{fpenv, IBool, Interval};
//! use rigora_prover::{Change, Constraint, Prover, VarArray, VariableSet};
//!
//! #[derive(Clone)]
//! struct X {
//!     vars: VarArray<1>,
//! }
//!
//! impl VariableSet for X {
//!     fn num_vars(&self) -> usize {
//!         1
//!     }
//!     fn value(&self, index: usize) -> Interval {
//!         self.vars.value(index)
//!     }
//!     fn store(&mut self, index: usize, value: Interval) {
//!         self.vars.store(index, value);
//!     }
//!     fn on_change(&mut self, _index: usize, _change: Change) {}
//! }
//!
//! struct Exceeds(f64);
//!
//! impl Constraint<X> for Exceeds {
//!     fn satisfied(&mut self, vars: &X) -> IBool {
//!         vars.value(0).gt(self.0)
//!     }
//! }
//!
//! fpenv::install();
//! let mut prover = Prover::new();
//! prover.add_variable_set(X { vars: VarArray::new([Interval::new(-1.0, 1.0)]) });
//! prover.add_constraint(Exceeds(2.0));
//! prover.abort_at_height(30);
//! assert!(prover.prove());
//! ```

#![warn(missing_docs)]

mod constraint;
mod prover;
mod vars;

pub use constraint::{Constraint, PropagateResult};
pub use prover::{Frame, Prover};
pub use vars::{Change, VarArray, VariableSet};
