//! End-to-end search behavior: propagation to a fixed point, checker
//! short-circuiting, reporting, cutoff handling and coverage of the root
//! box by the surviving leaves.

use proptest::prelude::*;
use rigora_ia::{fpenv, IBool, Interval};
use rigora_prover::{Change, Constraint, PropagateResult, Prover, VarArray, VariableSet};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone)]
struct Pair {
    vars: VarArray<2>,
}

impl Pair {
    fn new(x: Interval, y: Interval) -> Self {
        Pair { vars: VarArray::new([x, y]) }
    }
}

impl VariableSet for Pair {
    fn num_vars(&self) -> usize {
        2
    }

    fn value(&self, index: usize) -> Interval {
        self.vars.value(index)
    }

    fn store(&mut self, index: usize, value: Interval) {
        self.vars.store(index, value);
    }

    fn on_change(&mut self, _index: usize, _change: Change) {}

    fn trace_string(&self, id: u64, parent_id: u64) -> Option<String> {
        Some(format!("#{id}<-{parent_id}: x={}, y={}", self.value(0), self.value(1)))
    }
}

/// Propagator maintaining `x <= y / 2`; its own satisfaction mirrors that.
struct HalfOf;

impl Constraint<Pair> for HalfOf {
    fn name(&self) -> String {
        "x <= y/2".into()
    }

    fn can_propagate(&self) -> bool {
        true
    }

    fn satisfied(&mut self, vars: &Pair) -> IBool {
        vars.value(0).le(vars.value(1) * 0.5)
    }

    fn propagate(&mut self, vars: &mut Pair) -> PropagateResult {
        let bound = vars.value(1) * 0.5;
        if vars.restrict_ub(0, bound.ub()) {
            PropagateResult::CHANGED
        } else {
            PropagateResult::UNCHANGED
        }
    }
}

/// Propagator maintaining `y <= x`.
struct NoLarger;

impl Constraint<Pair> for NoLarger {
    fn can_propagate(&self) -> bool {
        true
    }

    fn satisfied(&mut self, vars: &Pair) -> IBool {
        vars.value(1).le(vars.value(0))
    }

    fn propagate(&mut self, vars: &mut Pair) -> PropagateResult {
        if vars.restrict_ub(1, vars.value(0).ub()) {
            PropagateResult::CHANGED
        } else {
            PropagateResult::UNCHANGED
        }
    }
}

struct AtLeast {
    index: usize,
    bound: f64,
}

impl Constraint<Pair> for AtLeast {
    fn satisfied(&mut self, vars: &Pair) -> IBool {
        vars.value(self.index).ge(self.bound)
    }
}

#[test]
fn propagation_runs_to_fixed_point_and_refutes() {
    fpenv::install();
    // x <= y/2 and y <= x collapse both variables toward zero, so x >= 0.1
    // is refuted without a single split.
    let mut prover = Prover::new();
    prover.add_variable_set(Pair::new(Interval::new(0.0, 1.0), Interval::new(0.0, 1.0)));
    prover.add_constraint(HalfOf);
    prover.add_constraint(NoLarger);
    prover.add_constraint(AtLeast { index: 0, bound: 0.1 });
    prover.abort_at_height(4);
    assert!(prover.prove());
}

/// A propagator that proves emptiness once the box is narrow.
struct EmptyBelow(f64);

impl Constraint<Pair> for EmptyBelow {
    fn can_propagate(&self) -> bool {
        true
    }

    fn satisfied(&mut self, vars: &Pair) -> IBool {
        if vars.value(0).ub() < self.0 {
            IBool::FALSE
        } else {
            IBool::INDETERMINATE
        }
    }

    fn propagate(&mut self, vars: &mut Pair) -> PropagateResult {
        if vars.value(0).ub() < self.0 {
            PropagateResult::EMPTY
        } else if vars.restrict_ub(0, self.0 * 0.5) {
            PropagateResult::CHANGED
        } else {
            PropagateResult::UNCHANGED
        }
    }
}

#[test]
fn empty_propagation_discards_frames() {
    fpenv::install();
    let mut prover = Prover::new();
    prover.add_variable_set(Pair::new(Interval::new(0.0, 1.0), Interval::new(0.0, 1.0)));
    prover.add_constraint(EmptyBelow(0.5));
    prover.abort_at_height(2);
    assert!(prover.prove());
}

/// A propagator whose satisfaction test vetoes the checkers' verdict.
struct NeverSatisfied;

impl Constraint<Pair> for NeverSatisfied {
    fn can_propagate(&self) -> bool {
        true
    }

    fn satisfied(&mut self, _vars: &Pair) -> IBool {
        IBool::FALSE
    }
}

#[test]
fn propagators_are_consulted_as_checkers_before_reporting() {
    fpenv::install();
    // With no checkers the conjunction starts out definitely true; the
    // propagator's own satisfaction test must still veto the report.
    let mut prover = Prover::new();
    prover.add_variable_set(Pair::new(Interval::new(0.0, 1.0), Interval::new(0.0, 1.0)));
    prover.add_constraint(NeverSatisfied);
    prover.abort_at_height(2);
    assert!(prover.prove());
}

struct AlwaysIndeterminate;

impl Constraint<Pair> for AlwaysIndeterminate {
    fn satisfied(&mut self, _vars: &Pair) -> IBool {
        IBool::INDETERMINATE
    }
}

#[test]
fn leaves_cover_the_root_box() {
    fpenv::install();
    let leaves: Rc<RefCell<Vec<(Interval, Interval)>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = leaves.clone();
    let mut prover = Prover::new();
    prover.add_variable_set(Pair::new(Interval::new(0.0, 1.0), Interval::new(2.0, 6.0)));
    prover.add_constraint(AlwaysIndeterminate);
    prover.abort_at_height(4);
    prover.set_reporter(move |vars: &Pair, _| {
        sink.borrow_mut().push((vars.value(0), vars.value(1)));
    });
    assert!(!prover.prove());
    let leaves = leaves.borrow();
    assert_eq!(leaves.len(), 16);
    // Every leaf sits inside the root, and a probe grid of points is
    // covered by some leaf.
    for (x, y) in leaves.iter() {
        assert!(x.lb() >= 0.0 && x.ub() <= 1.0);
        assert!(y.lb() >= 2.0 && y.ub() <= 6.0);
    }
    for i in 0..=10 {
        for j in 0..=10 {
            let px = i as f64 / 10.0;
            let py = 2.0 + 4.0 * (j as f64) / 10.0;
            assert!(
                leaves.iter().any(|(x, y)| {
                    x.lb() <= px && px <= x.ub() && y.lb() <= py && py <= y.ub()
                }),
                "point ({px}, {py}) not covered"
            );
        }
    }
}

#[test]
fn tracing_does_not_disturb_the_search() {
    fpenv::install();
    let mut prover = Prover::new();
    prover.add_variable_set(Pair::new(Interval::new(-1.0, 1.0), Interval::new(-1.0, 1.0)));
    prover.add_constraint(AtLeast { index: 0, bound: 2.0 });
    prover.abort_at_height(6);
    prover.trace(true);
    assert!(prover.prove());
}

proptest! {
    /// `x > t` over the root `x in [-1, 1]`: satisfiable exactly when
    /// `t < 1`, and the prover finds it within a modest depth.
    #[test]
    fn threshold_search_matches_reality(t in -0.99..0.99f64) {
        fpenv::install();
        struct Exceeds(f64);
        impl Constraint<Pair> for Exceeds {
            fn satisfied(&mut self, vars: &Pair) -> IBool {
                vars.value(0).gt(self.0)
            }
        }
        let mut prover = Prover::new();
        prover.add_variable_set(Pair::new(Interval::new(-1.0, 1.0), Interval::new(0.0, 1.0)));
        prover.add_constraint(Exceeds(t));
        prover.abort_on_satisfiable(true);
        prover.abort_at_height(80);
        prop_assert!(!prover.prove());

        let mut impossible = Prover::new();
        impossible.add_variable_set(Pair::new(Interval::new(-1.0, 1.0), Interval::new(0.0, 1.0)));
        impossible.add_constraint(Exceeds(1.0));
        impossible.abort_at_height(80);
        prop_assert!(impossible.prove());
    }
}
