//! The branch-and-bound driver.

use smallvec::SmallVec;

use rigora_ia::IBool;

use crate::constraint::{Constraint, PropagateResult};
use crate::vars::VariableSet;

/// A node of the branch-and-bound tree: a box plus bookkeeping.
#[derive(Clone, Debug)]
pub struct Frame<V> {
    /// The variable assignment of this node.
    pub domain: V,
    /// Number of splits between the root and this node.
    pub height: u64,
    /// Monotonically increasing id, for tracing.
    pub id: u64,
    /// Id of the parent frame (0 for roots).
    pub parent_id: u64,
}

type Reporter<V> = Box<dyn FnMut(&V, bool)>;

/// The refutation engine.
///
/// Owns root boxes, the constraint conjunction, a LIFO work stack and the
/// search policy. [`Prover::prove`] returns `true` when the conjunction is
/// refuted on every root; any surviving box is handed to the reporter with
/// a flag distinguishing "definitely satisfiable" from "height cutoff
/// reached".
pub struct Prover<V: VariableSet> {
    roots: Vec<V>,
    constraints: Vec<Box<dyn Constraint<V>>>,
    propagators: SmallVec<[usize; 8]>,
    checkers: SmallVec<[usize; 8]>,
    stack: Vec<Frame<V>>,
    reporter: Option<Reporter<V>>,
    abort_satisfiable: bool,
    tracing: bool,
    abort_height: u64,
    id_counter: u64,
}

impl<V: VariableSet> Default for Prover<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: VariableSet> Prover<V> {
    /// Creates an empty prover.
    #[must_use]
    pub fn new() -> Self {
        Prover {
            roots: Vec::new(),
            constraints: Vec::new(),
            propagators: SmallVec::new(),
            checkers: SmallVec::new(),
            stack: Vec::new(),
            reporter: None,
            abort_satisfiable: false,
            tracing: false,
            abort_height: u64::MAX,
            id_counter: 0,
        }
    }

    /// Adds a root box to search.
    pub fn add_variable_set(&mut self, vars: V) {
        self.roots.push(vars);
    }

    /// Adds a constraint by value.
    pub fn add_constraint(&mut self, constraint: impl Constraint<V> + 'static) {
        self.constraints.push(Box::new(constraint));
    }

    /// Adds an already boxed constraint.
    pub fn add_boxed_constraint(&mut self, constraint: Box<dyn Constraint<V>>) {
        self.constraints.push(constraint);
    }

    /// Stop the search as soon as one satisfiable (or cutoff) box is found.
    pub fn abort_on_satisfiable(&mut self, value: bool) {
        self.abort_satisfiable = value;
    }

    /// Frames at this height are reported instead of split, bounding the
    /// search depth.
    pub fn abort_at_height(&mut self, height: u64) {
        self.abort_height = height;
    }

    /// Enables per-frame diagnostics through `tracing` (effective for boxes
    /// whose [`VariableSet::trace_string`] returns `Some`).
    pub fn trace(&mut self, active: bool) {
        self.tracing = active;
    }

    /// Installs the callback invoked for every satisfiable or cutoff box.
    /// The flag is `true` for definitely satisfiable boxes and `false` for
    /// boxes that merely survived to the height cutoff.
    pub fn set_reporter(&mut self, reporter: impl FnMut(&V, bool) + 'static) {
        self.reporter = Some(Box::new(reporter));
    }

    /// Runs the search. Returns `true` iff the constraint conjunction was
    /// refuted for every root box, i.e. nothing was reported.
    pub fn prove(&mut self) -> bool {
        self.setup_proof();
        let mut refuted = true;
        while let Some(mut frame) = self.stack.pop() {
            self.trace_frame(&frame);
            if self.run_propagators(&mut frame) {
                if self.tracing {
                    tracing::debug!(id = frame.id, "empty after propagation");
                }
                continue;
            }
            let mut verdict = self.run_checkers(&frame);
            if !verdict.possibly() {
                if self.tracing {
                    tracing::debug!(id = frame.id, "constraints violated");
                }
                continue;
            }
            if verdict.definitely() {
                // confirm against the propagators' own satisfaction tests
                verdict &= self.run_propagators_as_checkers(&frame);
                if !verdict.possibly() {
                    if self.tracing {
                        tracing::debug!(id = frame.id, "constraints violated");
                    }
                    continue;
                }
            }
            if verdict.definitely() {
                refuted = false;
                self.debug_check_possible(&frame);
                self.report_satisfiable(&frame.domain, true);
                if self.abort_satisfiable {
                    self.stack.clear();
                }
            } else if frame.height == self.abort_height {
                refuted = false;
                self.debug_check_possible(&frame);
                self.report_satisfiable(&frame.domain, false);
                if self.abort_satisfiable {
                    self.stack.clear();
                }
            } else {
                let height = frame.height;
                let parent_id = frame.id;
                let stack = &mut self.stack;
                let id_counter = &mut self.id_counter;
                frame.domain.split(height, &mut |child| {
                    *id_counter += 1;
                    stack.push(Frame {
                        domain: child,
                        height: height + 1,
                        id: *id_counter,
                        parent_id,
                    });
                });
            }
        }
        refuted
    }

    /// Classifies constraints and seeds the stack with the roots.
    fn setup_proof(&mut self) {
        self.propagators.clear();
        self.checkers.clear();
        for (index, constraint) in self.constraints.iter().enumerate() {
            if constraint.can_propagate() {
                self.propagators.push(index);
            } else {
                self.checkers.push(index);
            }
        }
        self.stack.clear();
        let id_counter = &mut self.id_counter;
        let stack = &mut self.stack;
        for root in &self.roots {
            *id_counter += 1;
            stack.push(Frame { domain: root.clone(), height: 0, id: *id_counter, parent_id: 0 });
        }
    }

    fn trace_frame(&self, frame: &Frame<V>) {
        if self.tracing {
            if let Some(rendered) = frame.domain.trace_string(frame.id, frame.parent_id) {
                tracing::debug!(
                    id = frame.id,
                    parent = frame.parent_id,
                    height = frame.height,
                    "{rendered}"
                );
            }
        }
    }

    /// Runs the propagator list to a fixed point. Returns `true` when the
    /// frame was proven empty and must be discarded.
    fn run_propagators(&mut self, frame: &mut Frame<V>) -> bool {
        let mut pass;
        loop {
            pass = PropagateResult::UNCHANGED;
            for slot in 0..self.propagators.len() {
                let index = self.propagators[slot];
                let result = self.constraints[index].propagate(&mut frame.domain);
                pass |= result;
                if result == PropagateResult::EMPTY {
                    break;
                }
            }
            if pass != PropagateResult::CHANGED {
                break;
            }
        }
        pass.empty()
    }

    fn run_collection(&mut self, collection: &[usize], domain: &V) -> IBool {
        let mut verdict = IBool::TRUE;
        for &index in collection {
            let result = self.constraints[index].satisfied(domain);
            verdict &= result;
            if !result.possibly() {
                break;
            }
        }
        verdict
    }

    fn run_checkers(&mut self, frame: &Frame<V>) -> IBool {
        let checkers = std::mem::take(&mut self.checkers);
        let verdict = self.run_collection(&checkers, &frame.domain);
        self.checkers = checkers;
        verdict
    }

    fn run_propagators_as_checkers(&mut self, frame: &Frame<V>) -> IBool {
        let propagators = std::mem::take(&mut self.propagators);
        let verdict = self.run_collection(&propagators, &frame.domain);
        self.propagators = propagators;
        verdict
    }

    /// A reported box must still be possible under every constraint.
    fn debug_check_possible(&mut self, frame: &Frame<V>) {
        if cfg!(debug_assertions) {
            let checkers = self.run_checkers(frame);
            let propagators = self.run_propagators_as_checkers(frame);
            debug_assert!((checkers & propagators).possibly());
        }
    }

    fn report_satisfiable(&mut self, domain: &V, definitely: bool) {
        match &mut self.reporter {
            Some(reporter) => reporter(domain, definitely),
            None => {
                if let Some(rendered) = domain.trace_string(0, 0) {
                    tracing::warn!(definitely, "satisfiable box: {rendered}");
                } else {
                    tracing::warn!(definitely, "satisfiable box found");
                }
            }
        }
    }
}
