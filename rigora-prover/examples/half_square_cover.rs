//! Refutes the "two disks cannot cover the half square" configuration
//! space: over every admissible pair of disk radii (r1, r2), the weight
//! left after placing the two largest disks is insufficient for the
//! remaining rectangular region, so no counterexample configuration
//! exists.
//!
//! Run with `cargo run --release --example half_square_cover`.

use rigora_ia::{fpenv, IBool, Interval};
use rigora_prover::{Change, Constraint, Prover, VarArray, VariableSet};

const RSQRT2: Interval = Interval::new(
    0.707106781186547461715008466853760182857513427734375,
    0.70710678118654757273731092936941422522068023681640625,
);

/// Weight an axis-aligned rectangle needs before the split threshold of the
/// aspect ratio.
const ASPECT_SWITCH: Interval = Interval::new(
    1.035797111181671059654263444826938211917877197265625,
    1.0357971111816712816988683698582462966442108154296875,
);

/// Smallest useful normalized disk size in the strip bound.
const SIGMA_HAT: Interval = Interval::new(
    0.862946080609917398618335937499068677425384521484375,
    0.86294608060991750964063840001472271978855133056640625,
);

/// Guaranteed covering efficiency of small disks in a long strip.
const STRIP_EFFICIENCY: Interval = Interval::new(
    0.60999999999999998667732370449812151491641998291015625,
    0.6100000000000000976996261670137755572795867919921875,
);

/// Can disks of total squared radius `weight`, none larger than `r1`,
/// cover a `width` by `height` rectangle? Three-valued: `{true, true}`
/// when the rectangle is degenerate, a rigorous bound otherwise.
fn rectangle_cover_works(
    mut width: Interval,
    mut height: Interval,
    weight: Interval,
    r1: Interval,
) -> IBool {
    if width.ub() <= 0.0 || height.ub() <= 0.0 {
        return IBool::TRUE;
    }
    width.restrict_lb(0.0);
    height.restrict_lb(0.0);
    let possibly_degenerate = width.lb() <= 0.0 || height.lb() <= 0.0;

    // normalize so the short side has length one
    let short = width.min(height);
    let long = width.max(height);
    let scale = 1.0 / short;
    let lambda = scale * long;
    let weight = scale.square() * weight;
    let r1 = scale * r1;

    let lambda_sq = lambda.square();
    let below_switch =
        (3.0 / 16.0) * lambda_sq + (15.0 / 32.0) + (27.0 / 256.0) / lambda_sq;
    let above_switch = 0.25 * (lambda_sq + 2.0);
    let switch = lambda.gt(ASPECT_SWITCH);
    let base_weight_needed = if switch.definitely() {
        above_switch
    } else if !switch.possibly() {
        below_switch
    } else {
        below_switch.join(above_switch)
    };
    let base = weight.ge(base_weight_needed);
    if base.definitely() {
        return combine(base, possibly_degenerate);
    }

    let sigma = r1.square().max(SIGMA_HAT);
    let strip_eff = 0.5 * ((sigma.square() + 1.0).sqrt() + 1.0).sqrt();
    let strip = weight.ge(lambda * strip_eff);
    if strip.definitely() {
        return combine(strip, possibly_degenerate);
    }

    let greedy = if r1.ub() <= 0.375 {
        weight.ge(STRIP_EFFICIENCY * lambda)
    } else {
        let needed_side = r1 / 0.375;
        let long_side = needed_side.max(lambda);
        weight.ge(STRIP_EFFICIENCY * long_side * needed_side)
    };
    combine(greedy | base | strip, possibly_degenerate)
}

fn combine(result: IBool, possibly_degenerate: bool) -> IBool {
    IBool::new(result.definitely(), result.possibly() || possibly_degenerate)
}

const R1: usize = 0;
const R2: usize = 1;

/// Radii of the two largest disks, ordered `r2 <= r1`, with the coupling
/// `r1 + r2 >= 1/sqrt(2)` maintained by the change handlers.
#[derive(Clone)]
struct TwoDiskVars {
    vars: VarArray<2>,
}

impl TwoDiskVars {
    fn new() -> Self {
        let mut set = TwoDiskVars {
            vars: VarArray::new([
                Interval::new(
                    0.3535533905932737308575042334268800914287567138671875,
                    0.5,
                ),
                Interval::new(
                    0.207106781186547517226159698111587204039096832275390625,
                    0.47413793103448276244904491250053979456424713134765625,
                ),
            ]),
        };
        set.initialize();
        set
    }

    fn on_r1_changed(&mut self, change: Change) {
        if change.ub {
            self.restrict_ub(R2, self.value(R1).ub());
            let r2_min = RSQRT2 - self.value(R1);
            self.restrict_lb(R2, r2_min.lb());
        }
    }

    fn on_r2_changed(&mut self, change: Change) {
        if change.lb {
            self.restrict_lb(R1, self.value(R2).lb());
        }
    }
}

const HANDLERS: [fn(&mut TwoDiskVars, Change); 2] =
    [TwoDiskVars::on_r1_changed, TwoDiskVars::on_r2_changed];

impl VariableSet for TwoDiskVars {
    fn num_vars(&self) -> usize {
        2
    }

    fn value(&self, index: usize) -> Interval {
        self.vars.value(index)
    }

    fn store(&mut self, index: usize, value: Interval) {
        self.vars.store(index, value);
    }

    fn on_change(&mut self, index: usize, change: Change) {
        HANDLERS[index](self, change);
    }

    fn trace_string(&self, id: u64, parent_id: u64) -> Option<String> {
        Some(format!(
            "#{id}<-{parent_id}: r1={}, r2={}",
            self.value(R1),
            self.value(R2)
        ))
    }
}

/// After placing the two disks against the diagonal, the remaining weight
/// cannot cover the leftover rectangle.
struct WeightInsufficient;

impl Constraint<TwoDiskVars> for WeightInsufficient {
    fn name(&self) -> String {
        "remaining weight is insufficient".into()
    }

    fn satisfied(&mut self, vars: &TwoDiskVars) -> IBool {
        let r1 = vars.value(R1);
        let r2 = vars.value(R2);
        let r1_sq = r1.square();
        let r2_sq = r2.square();
        let first = (r1_sq - r2_sq + 0.5) * RSQRT2;
        let second = (r2_sq - r1_sq + 0.5) * RSQRT2;
        let mut chord_sq = r1_sq - first.square();
        chord_sq.restrict_lb(0.0);
        let chord = chord_sq.sqrt();
        let m1x = (first + chord) * RSQRT2;
        let m2dy = (second + chord) * RSQRT2;
        let height_rem = 1.0 - 2.0 * m2dy;
        let width_rem = 1.0 - 2.0 * m1x;
        let weight_rem = 0.5 - r1_sq - r2_sq;
        !rectangle_cover_works(
            height_rem,
            width_rem,
            weight_rem,
            Interval::new(0.0, r2.ub()),
        )
    }
}

fn main() {
    tracing_subscriber::fmt().init();
    fpenv::install();
    assert!(fpenv::rounds_down());

    let mut prover = Prover::new();
    prover.add_variable_set(TwoDiskVars::new());
    prover.add_constraint(WeightInsufficient);
    prover.abort_on_satisfiable(true);
    prover.abort_at_height(100);
    prover.set_reporter(|vars: &TwoDiskVars, definitely| {
        tracing::warn!(
            definitely,
            "possible covering configuration: r1={}, r2={}",
            vars.value(R1),
            vars.value(R2),
        );
    });

    if prover.prove() {
        tracing::info!("refuted: two disks never cover the half square with weight 1/2");
    } else {
        tracing::error!("refutation failed; a residual configuration survived");
        std::process::exit(1);
    }
}
