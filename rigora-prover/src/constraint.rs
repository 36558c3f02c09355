//! The constraint protocol: three-valued checking and domain narrowing.

use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign};

use rigora_ia::IBool;

/// Outcome flags of a propagation step.
///
/// A two-bit flag set: [`PropagateResult::CHANGED`] records that at least
/// one bound was tightened, [`PropagateResult::EMPTY`] that the narrowing
/// proved the box infeasible. Flags combine with `|`. A single `propagate`
/// call returns either flag alone; the union `CHANGED | EMPTY` only arises
/// when accumulating over a pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PropagateResult(u8);

impl PropagateResult {
    /// Nothing was narrowed.
    pub const UNCHANGED: PropagateResult = PropagateResult(0);
    /// At least one bound was tightened.
    pub const CHANGED: PropagateResult = PropagateResult(1);
    /// The box was proven to contain no feasible point.
    pub const EMPTY: PropagateResult = PropagateResult(2);

    /// Whether the `CHANGED` flag is set.
    #[must_use]
    pub const fn changed(self) -> bool {
        self.0 & 1 != 0
    }

    /// Whether the `EMPTY` flag is set.
    #[must_use]
    pub const fn empty(self) -> bool {
        self.0 & 2 != 0
    }
}

impl BitOr for PropagateResult {
    type Output = PropagateResult;

    fn bitor(self, rhs: PropagateResult) -> PropagateResult {
        PropagateResult(self.0 | rhs.0)
    }
}

impl BitOrAssign for PropagateResult {
    fn bitor_assign(&mut self, rhs: PropagateResult) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for PropagateResult {
    type Output = PropagateResult;

    fn bitand(self, rhs: PropagateResult) -> PropagateResult {
        PropagateResult(self.0 & rhs.0)
    }
}

impl BitAndAssign for PropagateResult {
    fn bitand_assign(&mut self, rhs: PropagateResult) {
        self.0 &= rhs.0;
    }
}

/// A constraint over a variable set.
///
/// Every constraint can evaluate its own satisfaction three-valuedly:
/// `possibly() == false` rules the box out, `definitely() == true` proves
/// it in. Constraints that additionally narrow boxes override
/// [`Constraint::can_propagate`] and [`Constraint::propagate`]; a
/// propagator must be *sound*, never removing a point that satisfies the
/// constraint.
pub trait Constraint<V> {
    /// A display name for diagnostics.
    fn name(&self) -> String {
        String::new()
    }

    /// Static hint: does this constraint implement [`Constraint::propagate`]?
    /// The prover classifies each constraint once, at the start of a proof.
    fn can_propagate(&self) -> bool {
        false
    }

    /// Box-aware variant of [`Constraint::can_propagate`] for clients whose
    /// propagation ability depends on the current bounds.
    fn can_propagate_on(&self, vars: &V) -> bool {
        let _ = vars;
        self.can_propagate()
    }

    /// Three-valued satisfaction test.
    fn satisfied(&mut self, vars: &V) -> IBool;

    /// Narrows `vars`, returning what happened. The default does nothing.
    fn propagate(&mut self, vars: &mut V) -> PropagateResult {
        let _ = vars;
        PropagateResult::UNCHANGED
    }
}
