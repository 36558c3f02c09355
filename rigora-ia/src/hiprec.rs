//! Arbitrary-precision backend for directed-rounded sine, cosine and
//! tangent of a single double.
//!
//! The contract: given a finite double `x` and a direction, return a double
//! that bounds `sin(x)` (resp. `cos`, `tan`) from below or above, at most
//! one ulp away from the correctly rounded value. The evaluation runs in
//! dyadic fixed point on `BigInt` mantissas, so it is pure integer
//! arithmetic and completely independent of the thread's floating-point
//! environment.
//!
//! Argument reduction subtracts the nearest integer multiple of π/2, with
//! π/2 cached to [`PI_BITS`] fraction bits (enough to absorb the full
//! double exponent range). The reduced argument is fed to a Taylor series
//! at [`SCALE`] fraction bits, and the final enclosure widens the computed
//! value by a slack of `2^(ERR_SHIFT - SCALE)` that dominates every
//! truncation made along the way, before rounding outward into doubles.

use std::sync::OnceLock;

use num_bigint::BigInt;
use num_traits::{One, Signed, ToPrimitive, Zero};

/// Fraction bits of the fixed-point working values.
const SCALE: usize = 320;
/// The enclosure slack is `2^(ERR_SHIFT - SCALE)`; the accumulated
/// reduction, truncation and series-tail errors stay far below it.
const ERR_SHIFT: usize = 30;
/// Fraction bits of the cached π/2. Must exceed the maximum double exponent
/// (1024) plus [`SCALE`] with a healthy guard so that `k * π/2` is accurate
/// to well below the slack even for the largest finite arguments.
const PI_BITS: usize = 1472;
/// 2^-27. Below this magnitude the series is bypassed: the function value
/// is within half an ulp of a trivial bound.
const SMALL: f64 = 7.450580596923828125e-9;

/// Rounding direction for the dyadic-to-double conversion.
#[derive(Clone, Copy)]
enum Dir {
    Down,
    Up,
}

/// `sin(x)` rounded toward negative infinity.
pub(crate) fn sin_rd(x: f64) -> f64 {
    sin_bounds(x).0
}

/// `sin(x)` rounded toward positive infinity.
pub(crate) fn sin_ru(x: f64) -> f64 {
    sin_bounds(x).1
}

/// `cos(x)` rounded toward negative infinity.
pub(crate) fn cos_rd(x: f64) -> f64 {
    cos_bounds(x).0
}

/// `cos(x)` rounded toward positive infinity.
pub(crate) fn cos_ru(x: f64) -> f64 {
    cos_bounds(x).1
}

/// `tan(x)` rounded toward negative infinity. `x` must lie strictly inside
/// `(-π/2, π/2)`.
pub(crate) fn tan_rd(x: f64) -> f64 {
    tan_bounds(x).0
}

/// `tan(x)` rounded toward positive infinity. `x` must lie strictly inside
/// `(-π/2, π/2)`.
pub(crate) fn tan_ru(x: f64) -> f64 {
    tan_bounds(x).1
}

fn sin_bounds(x: f64) -> (f64, f64) {
    debug_assert!(x.is_finite());
    if x == 0.0 {
        return (0.0, 0.0);
    }
    if x.abs() <= SMALL {
        // x - x^3/6 < sin x < x for positive x, and x^3/6 < ulp(x)/2 here,
        // so sin x lies strictly between x and its predecessor toward zero.
        return if x > 0.0 { (x.next_down(), x) } else { (x, x.next_up()) };
    }
    sincos_enclosure(x, 0)
}

fn cos_bounds(x: f64) -> (f64, f64) {
    debug_assert!(x.is_finite());
    if x == 0.0 {
        return (1.0, 1.0);
    }
    if x.abs() <= SMALL {
        // 1 - x^2/2 < cos x < 1, and x^2/2 < 2^-53
        return (1.0f64.next_down(), 1.0);
    }
    sincos_enclosure(x, 1)
}

fn tan_bounds(x: f64) -> (f64, f64) {
    debug_assert!(x.is_finite() && x.abs() <= std::f64::consts::FRAC_PI_2);
    if x == 0.0 {
        return (0.0, 0.0);
    }
    if x.abs() <= SMALL {
        // x < tan x < x + x^3, and x^3 < ulp(x)/2 here
        return if x > 0.0 { (x, x.next_up()) } else { (x.next_down(), x) };
    }
    if x < 0.0 {
        let (lo, hi) = tan_enclosure(-x);
        return (-hi, -lo);
    }
    tan_enclosure(x)
}

/// Shared sine/cosine core. `quadrant_offset` is 0 for sine and 1 for
/// cosine (`cos x = sin(x + π/2)` shifts the quadrant index by one).
fn sincos_enclosure(x: f64, quadrant_offset: u8) -> (f64, f64) {
    let mx = f64_to_fixed(x);
    let k = nearest_quadrant(&mx);
    // r = x - k*(π/2), truncated to SCALE fraction bits
    let r = &mx - ((&k * pi_half_fixed()) >> (PI_BITS - SCALE));
    let q = quadrant_index(&k, quadrant_offset);
    let a = r.abs();
    let value = match q {
        0 => taylor_sin(&a) * r.signum(),
        1 => taylor_cos(&a),
        2 => -(taylor_sin(&a) * r.signum()),
        _ => -taylor_cos(&a),
    };
    let err = BigInt::one() << ERR_SHIFT;
    let lo = fixed_to_f64(&(&value - &err), Dir::Down).max(-1.0);
    let hi = fixed_to_f64(&(value + err), Dir::Up).min(1.0);
    (lo, hi)
}

/// Tangent of `x` with `2^-27 < x < π/2`, as `sin/cos` of rigorous
/// fixed-point enclosures. The cosine stays far enough above zero
/// (`cos x > 6e-17`) that the slack cannot cross it.
fn tan_enclosure(x: f64) -> (f64, f64) {
    let a = f64_to_fixed(x);
    let s = taylor_sin(&a);
    let c = taylor_cos(&a);
    let err = BigInt::one() << ERR_SHIFT;
    let s_lo = &s - &err;
    let s_hi = &s + &err;
    let c_lo = &c - &err;
    let c_hi = &c + &err;
    debug_assert!(s_lo.is_positive() && c_lo.is_positive());
    let lo = (s_lo << SCALE) / c_hi;
    let hi = ((s_hi << SCALE) + (&c_lo - BigInt::one())) / c_lo;
    (fixed_to_f64(&lo, Dir::Down), fixed_to_f64(&hi, Dir::Up))
}

/// The exact dyadic mantissa of `x` at [`SCALE`] fraction bits. Only called
/// for `|x| > 2^-27`, where the conversion is lossless.
fn f64_to_fixed(x: f64) -> BigInt {
    let bits = x.to_bits();
    let negative = bits >> 63 == 1;
    let biased = ((bits >> 52) & 0x7ff) as i64;
    let fraction = bits & ((1u64 << 52) - 1);
    let (mantissa, exponent) = if biased == 0 {
        (fraction, -1074i64)
    } else {
        (fraction | (1 << 52), biased - 1075)
    };
    let mut value = BigInt::from(mantissa);
    let shift = exponent + SCALE as i64;
    if shift >= 0 {
        value <<= shift as usize;
    } else {
        debug_assert!(mantissa.trailing_zeros() as i64 >= -shift);
        value >>= (-shift) as usize;
    }
    if negative {
        -value
    } else {
        value
    }
}

/// `round(x / (π/2))`. The precision only decides which quadrant the series
/// runs in; a boundary-adjacent argument may land either way, both of which
/// keep the reduced argument small enough.
fn nearest_quadrant(mx: &BigInt) -> BigInt {
    let product = mx * inv_pi_half_fixed();
    let half = BigInt::one() << (SCALE + PI_BITS - 1);
    (product + half) >> (SCALE + PI_BITS)
}

/// `(k + offset) mod 4` as an index into the quadrant table.
fn quadrant_index(k: &BigInt, offset: u8) -> u8 {
    let rem = (k % BigInt::from(4)).to_i8().expect("remainder in -3..=3");
    (((rem + 4) % 4) as u8 + offset) % 4
}

/// `sin(a)` for a non-negative fixed-point `a` of magnitude below ~1.6.
fn taylor_sin(a: &BigInt) -> BigInt {
    let a2 = (a * a) >> SCALE;
    let mut term = a.clone();
    let mut sum = a.clone();
    let mut n = 1u64;
    loop {
        term = (&term * &a2) >> SCALE;
        term = term / BigInt::from((2 * n) * (2 * n + 1));
        if n % 2 == 1 {
            sum -= &term;
        } else {
            sum += &term;
        }
        if term.bits() <= 8 {
            break;
        }
        n += 1;
    }
    sum
}

/// `cos(a)` for a non-negative fixed-point `a` of magnitude below ~1.6.
fn taylor_cos(a: &BigInt) -> BigInt {
    let a2 = (a * a) >> SCALE;
    let mut term = BigInt::one() << SCALE;
    let mut sum = term.clone();
    let mut n = 1u64;
    loop {
        term = (&term * &a2) >> SCALE;
        term = term / BigInt::from((2 * n - 1) * (2 * n));
        if n % 2 == 1 {
            sum -= &term;
        } else {
            sum += &term;
        }
        if term.bits() <= 8 {
            break;
        }
        n += 1;
    }
    sum
}

/// Converts a fixed-point value at [`SCALE`] fraction bits into a double,
/// rounding in the requested direction.
fn fixed_to_f64(value: &BigInt, dir: Dir) -> f64 {
    if value.is_zero() {
        return 0.0;
    }
    let negative = value.is_negative();
    let magnitude = value.magnitude();
    let round_away = matches!((negative, dir), (false, Dir::Up) | (true, Dir::Down));
    let bits = magnitude.bits();
    let (top, exponent) = if bits <= 53 {
        (magnitude.to_u64().expect("fits in 53 bits"), -(SCALE as i64))
    } else {
        let shift = bits - 53;
        let mut top = (magnitude >> shift).to_u64().expect("exactly 53 bits");
        let dropped_nonzero = magnitude
            .trailing_zeros()
            .map_or(false, |tz| tz < shift);
        if round_away && dropped_nonzero {
            top += 1;
        }
        (top, shift as i64 - SCALE as i64)
    };
    let result = (top as f64) * pow2(exponent);
    if negative {
        -result
    } else {
        result
    }
}

/// 2^e as a double, for exponents in the normal range.
fn pow2(e: i64) -> f64 {
    debug_assert!((-1022..=1023).contains(&e));
    f64::from_bits(((e + 1023) as u64) << 52)
}

/// `(π/2) * 2^PI_BITS`, truncated. The Machin formula
/// `π = 16 atan(1/5) - 4 atan(1/239)` is evaluated with 64 guard bits, so
/// the cached value is accurate to well below `2^-(PI_BITS - 8)`.
fn pi_half_fixed() -> &'static BigInt {
    static PI_HALF: OnceLock<BigInt> = OnceLock::new();
    PI_HALF.get_or_init(|| {
        let guard = PI_BITS + 64;
        let pi = (atan_inv(5, guard) << 4) - (atan_inv(239, guard) << 2);
        pi >> (guard - PI_BITS + 1)
    })
}

/// `(2/π) * 2^PI_BITS`, used only to pick the reduction quadrant.
fn inv_pi_half_fixed() -> &'static BigInt {
    static INV: OnceLock<BigInt> = OnceLock::new();
    INV.get_or_init(|| (BigInt::one() << (2 * PI_BITS)) / pi_half_fixed())
}

/// `atan(1/x) * 2^bits` by the alternating power series.
fn atan_inv(x: u64, bits: usize) -> BigInt {
    let x_squared = BigInt::from(x * x);
    let mut term = (BigInt::one() << bits) / BigInt::from(x);
    let mut sum = term.clone();
    let mut k = 1u64;
    loop {
        term = term / &x_squared;
        if term.is_zero() {
            break;
        }
        let contribution = &term / BigInt::from(2 * k + 1);
        if k % 2 == 1 {
            sum -= contribution;
        } else {
            sum += contribution;
        }
        k += 1;
    }
    sum
}
