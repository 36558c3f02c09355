//! The variable-set framework: interval variables with change handlers.
//!
//! A client box type embeds a [`VarArray`] for storage, implements the
//! three raw accessors of [`VariableSet`], and dispatches `on_change` to a
//! per-variable handler (typically a `fn(&mut Self, Change)` table keyed by
//! variable index). The provided write operations call the handler exactly
//! when a bound actually tightens, which is what keeps cached derived
//! quantities consistent with the variables at all times.

use rigora_ia::{split_half, Interval};

/// Which bounds of a variable changed in a write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Change {
    /// The lower bound was raised.
    pub lb: bool,
    /// The upper bound was lowered.
    pub ub: bool,
}

impl Change {
    /// Both bounds changed (or may have changed).
    pub const BOTH: Change = Change { lb: true, ub: true };
    /// Only the lower bound changed.
    pub const LB: Change = Change { lb: true, ub: false };
    /// Only the upper bound changed.
    pub const UB: Change = Change { lb: false, ub: true };
}

/// Plain interval storage for `N` variables.
#[derive(Clone, Copy, Debug)]
pub struct VarArray<const N: usize> {
    values: [Interval; N],
}

impl<const N: usize> VarArray<N> {
    /// Creates storage holding the given initial intervals.
    #[must_use]
    pub fn new(values: [Interval; N]) -> Self {
        VarArray { values }
    }

    /// Reads variable `index`.
    #[must_use]
    pub fn value(&self, index: usize) -> Interval {
        self.values[index]
    }

    /// Writes variable `index` without any notification.
    pub fn store(&mut self, index: usize, value: Interval) {
        self.values[index] = value;
    }
}

/// A box of interval variables plus whatever derived state the client
/// caches alongside them.
///
/// Implementors provide raw storage access (`value`/`store`) and the
/// change-notification sink (`on_change`); the provided methods implement
/// the write-then-notify discipline, the default round-robin midpoint
/// split, and initialization. After construction, call
/// [`VariableSet::initialize`] once so every handler sees its variable;
/// from then on the framework maintains the invariant that caches are
/// consistent with the variables.
pub trait VariableSet: Clone {
    /// The number of variables.
    fn num_vars(&self) -> usize;

    /// Reads variable `index`.
    fn value(&self, index: usize) -> Interval;

    /// Writes variable `index` without firing its handler. Client code
    /// should normally use [`VariableSet::set`] or the restrict operations
    /// instead.
    fn store(&mut self, index: usize, value: Interval);

    /// Notification that variable `index` changed. Implementations
    /// re-derive cached quantities and may restrict other variables, which
    /// recursively fires their handlers; termination is guaranteed because
    /// restricts only ever tighten bounds.
    fn on_change(&mut self, index: usize, change: Change);

    /// Fires every handler once. Call after construction.
    fn initialize(&mut self) {
        for index in 0..self.num_vars() {
            self.on_change(index, Change::BOTH);
        }
    }

    /// Overwrites variable `index` and fires its handler.
    fn set(&mut self, index: usize, value: Interval) {
        self.store(index, value);
        self.on_change(index, Change::BOTH);
    }

    /// Raises the lower bound of variable `index` if `lower` tightens it,
    /// firing the handler on change. Returns whether anything changed.
    fn restrict_lb(&mut self, index: usize, lower: f64) -> bool {
        let mut value = self.value(index);
        if value.restrict_lb(lower) {
            self.store(index, value);
            self.on_change(index, Change::LB);
            true
        } else {
            false
        }
    }

    /// Lowers the upper bound of variable `index` if `upper` tightens it,
    /// firing the handler on change. Returns whether anything changed.
    fn restrict_ub(&mut self, index: usize, upper: f64) -> bool {
        let mut value = self.value(index);
        if value.restrict_ub(upper) {
            self.store(index, value);
            self.on_change(index, Change::UB);
            true
        } else {
            false
        }
    }

    /// Intersects variable `index` with `bounds`, firing the handler once
    /// with the combined change flags. Returns whether anything changed.
    fn restrict(&mut self, index: usize, bounds: Interval) -> bool {
        let mut value = self.value(index);
        let lb_changed = value.restrict_lb(bounds.lb());
        let ub_changed = value.restrict_ub(bounds.ub());
        if lb_changed || ub_changed {
            self.store(index, value);
            self.on_change(index, Change { lb: lb_changed, ub: ub_changed });
        }
        lb_changed || ub_changed
    }

    /// Splits the box into children covering it, handing each to `emit`.
    ///
    /// The default halves variable `height mod N` at its midpoint; the
    /// split point belongs to both children, which is fine for search
    /// correctness (coverage matters, disjointness does not). Each child's
    /// handler is fired for the bound that moved.
    fn split(&self, height: u64, emit: &mut dyn FnMut(Self))
    where
        Self: Sized,
    {
        let index = (height % self.num_vars() as u64) as usize;
        let (low_half, high_half) = split_half(self.value(index));
        let mut first = self.clone();
        first.store(index, low_half);
        first.on_change(index, Change::UB);
        let mut second = self.clone();
        second.store(index, high_half);
        second.on_change(index, Change::LB);
        emit(first);
        emit(second);
    }

    /// Optional per-frame diagnostics; boxes that support tracing return a
    /// rendering of themselves.
    fn trace_string(&self, id: u64, parent_id: u64) -> Option<String> {
        let _ = (id, parent_id);
        None
    }
}
