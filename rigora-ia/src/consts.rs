//! Tightest double-precision brackets of the irrational constants the
//! kernel needs. Each pair is the pair of adjacent doubles surrounding the
//! exact value; the decimal literals are the exact decimal expansions of
//! those doubles.

use crate::interval::Interval;

/// π, bracketed to one ulp.
pub const PI: Interval = Interval::new(
    3.1415926535897931159979634685441851615905761718750,
    // 3.141592653589793238...
    3.1415926535897935600871733186068013310432434082031250,
);

/// π/2, bracketed to one ulp.
pub const PI_HALF: Interval = Interval::new(
    1.57079632679489655799898173427209258079528808593750,
    // 1.570796326794896619...
    1.57079632679489678004358665930340066552162170410156250,
);

/// 1/(2π), bracketed to one ulp.
pub const REC_2PI: Interval = Interval::new(
    0.1591549430918953178526464853348443284630775451660156250,
    // 0.159154943091895335...
    0.15915494309189534560822210096375783905386924743652343750,
);
