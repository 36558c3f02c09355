//! Interval sine, cosine and tangent.
//!
//! The single-point evaluations are delegated to the high-precision backend
//! (`hiprec`); this module contributes symmetry reduction, period reduction
//! through the rigorous `1/(2π)` bracket, and the monotone-arc case
//! analysis that decides which endpoint evaluations bound the image.

use crate::consts;
use crate::hiprec;
use crate::interval::Interval;
use crate::round;

/// Position of a non-negative interval in the 2π period lattice. The
/// fractional parts locate each endpoint within its period, quarters
/// `{0, 0.25, 0.5, 0.75}` separating the monotone arcs of sine and cosine.
struct PeriodReduction {
    lb_integral: f64,
    lb_fractional: f64,
    ub_integral: f64,
    ub_fractional: f64,
}

fn period_reduction(x: Interval) -> PeriodReduction {
    let periods = x * consts::REC_2PI;
    PeriodReduction {
        lb_integral: periods.lb().trunc(),
        lb_fractional: periods.lb().fract(),
        ub_integral: periods.ub().trunc(),
        ub_fractional: periods.ub().fract(),
    }
}

/// Whether the endpoints land in periods that are not adjacent, in which
/// case the image is the full `[-1, 1]`.
fn spans_full_period(period: &PeriodReduction) -> bool {
    round::add_rd(period.lb_integral, 1.0) < period.ub_integral
}

pub(crate) fn sin(x: Interval) -> Interval {
    if !x.is_finite() || x.possibly_undefined() {
        return Interval::tagged(-1.0, 1.0, x.possibly_undefined());
    }
    if x.ub() <= 0.0 {
        -sin_nonnegative(-x)
    } else if x.lb() < 0.0 {
        // split a mixed-sign interval at zero and recombine by oddness
        let negative_part = -sin_nonnegative(Interval::new(0.0, -x.lb()));
        let positive_part = sin_nonnegative(Interval::new(0.0, x.ub()));
        positive_part.join(negative_part)
    } else {
        sin_nonnegative(x)
    }
}

fn sin_nonnegative(x: Interval) -> Interval {
    let period = period_reduction(x);
    if spans_full_period(&period) {
        return Interval::new(-1.0, 1.0);
    }
    if period.lb_integral == period.ub_integral {
        sin_nowrap(&period, x)
    } else {
        sin_wrap(&period, x)
    }
}

/// Both endpoints lie in the same period.
fn sin_nowrap(period: &PeriodReduction, x: Interval) -> Interval {
    if period.lb_fractional <= 0.25 {
        if period.ub_fractional < 0.25 {
            Interval::new(hiprec::sin_rd(x.lb()), hiprec::sin_ru(x.ub()))
        } else if period.ub_fractional < 0.75 {
            Interval::new(hiprec::sin_rd(x.lb()).min(hiprec::sin_rd(x.ub())), 1.0)
        } else {
            Interval::new(-1.0, 1.0)
        }
    } else if period.ub_fractional < 0.75 {
        Interval::new(hiprec::sin_rd(x.ub()), hiprec::sin_ru(x.lb()))
    } else if period.lb_fractional <= 0.75 {
        Interval::new(-1.0, hiprec::sin_ru(x.lb()).max(hiprec::sin_ru(x.ub())))
    } else {
        Interval::new(hiprec::sin_rd(x.lb()), hiprec::sin_ru(x.ub()))
    }
}

/// The upper endpoint lies one period past the lower endpoint.
fn sin_wrap(period: &PeriodReduction, x: Interval) -> Interval {
    if period.lb_fractional <= 0.25 {
        Interval::new(-1.0, 1.0)
    } else if period.lb_fractional <= 0.75 {
        if period.ub_fractional < 0.25 {
            Interval::new(-1.0, hiprec::sin_ru(x.lb()).max(hiprec::sin_ru(x.ub())))
        } else {
            Interval::new(-1.0, 1.0)
        }
    } else if period.ub_fractional < 0.25 {
        Interval::new(hiprec::sin_rd(x.lb()), hiprec::sin_ru(x.ub()))
    } else if period.ub_fractional < 0.75 {
        Interval::new(hiprec::sin_rd(x.lb()).min(hiprec::sin_rd(x.ub())), 1.0)
    } else {
        Interval::new(-1.0, 1.0)
    }
}

pub(crate) fn cos(x: Interval) -> Interval {
    if !x.is_finite() || x.possibly_undefined() {
        return Interval::tagged(-1.0, 1.0, x.possibly_undefined());
    }
    if x.ub() <= 0.0 {
        cos_nonnegative(-x)
    } else if x.lb() < 0.0 {
        // evenness folds a mixed-sign interval onto [0, max(|lb|, ub)]
        cos_nonnegative(Interval::new(0.0, (-x.lb()).max(x.ub())))
    } else {
        cos_nonnegative(x)
    }
}

fn cos_nonnegative(x: Interval) -> Interval {
    let period = period_reduction(x);
    if spans_full_period(&period) {
        return Interval::new(-1.0, 1.0);
    }
    if period.lb_integral == period.ub_integral {
        cos_nowrap(&period, x)
    } else {
        cos_wrap(&period, x)
    }
}

fn cos_nowrap(period: &PeriodReduction, x: Interval) -> Interval {
    if period.lb_fractional <= 0.5 {
        if period.ub_fractional <= 0.5 {
            Interval::new(hiprec::cos_rd(x.ub()), hiprec::cos_ru(x.lb()))
        } else {
            Interval::new(-1.0, hiprec::cos_ru(x.ub()).max(hiprec::cos_ru(x.lb())))
        }
    } else {
        Interval::new(hiprec::cos_rd(x.lb()), hiprec::cos_ru(x.ub()))
    }
}

fn cos_wrap(period: &PeriodReduction, x: Interval) -> Interval {
    if period.lb_fractional <= 0.5 || period.ub_fractional >= 0.5 {
        Interval::new(-1.0, 1.0)
    } else {
        Interval::new(hiprec::cos_rd(x.lb()).min(hiprec::cos_rd(x.ub())), 1.0)
    }
}

pub(crate) fn tan(x: Interval) -> Interval {
    // Defined only strictly inside (-π/2, π/2); comparing against the lower
    // bracket endpoint of π/2 keeps the admitted range strictly inside the
    // real half-period. NaN endpoints fail the range test.
    let bound = consts::PI_HALF.lb();
    if !(x.lb() >= -bound && x.ub() <= bound) {
        return Interval::UNDEFINED;
    }
    Interval::new(hiprec::tan_rd(x.lb()), hiprec::tan_ru(x.ub()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fpenv;

    #[test]
    fn test_sin_at_zero_and_wide() {
        fpenv::install();
        assert!(sin(Interval::new(0.0, 0.0)).same(Interval::new(0.0, 0.0)));
        assert!(sin(Interval::new(0.0, 8.0)).same(Interval::new(-1.0, 1.0)));
    }

    #[test]
    fn test_cos_at_zero() {
        fpenv::install();
        assert!(cos(Interval::new(0.0, 0.0)).same(Interval::new(1.0, 1.0)));
    }

    #[test]
    fn test_nonfinite_inputs() {
        fpenv::install();
        let wide = sin(Interval::new(0.0, f64::INFINITY));
        assert!(wide.same(Interval::new(-1.0, 1.0)));
        assert!(!wide.possibly_undefined());
        let undef = sin(Interval::UNDEFINED);
        assert!(undef.possibly_undefined());
        assert_eq!(undef.lb(), -1.0);
    }

    #[test]
    fn test_tan_domain() {
        fpenv::install();
        assert!(tan(Interval::new(0.0, 0.0)).same(Interval::new(0.0, 0.0)));
        assert!(tan(Interval::new(1.0, 2.0)).possibly_undefined());
        assert!(tan(Interval::UNDEFINED).possibly_undefined());
        let t = tan(Interval::new(-1.0, 1.0));
        assert!(t.lb() < -1.55 && t.ub() > 1.55);
        assert!(t.definitely_defined());
    }
}
