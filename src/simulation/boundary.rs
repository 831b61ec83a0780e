//! Periodic wrapping of positions onto `[0, l)`.
//!
//! Only positions are touched. Velocities keep their values across a wrap.

use super::states::NVec;

/// Map one coordinate into `[0, l)`
pub fn wrap1(x: f64, l: f64) -> f64 {
    let w = x.rem_euclid(l);
    // rem_euclid can round a tiny negative x up to exactly l
    if w >= l {
        0.0
    } else {
        w
    }
}

pub fn wrap<const D: usize>(r: &mut NVec<D>, l: f64) {
    for c in r.iter_mut() {
        *c = wrap1(*c, l);
    }
}

pub fn wrap_all<const D: usize>(positions: &mut [NVec<D>], l: f64) {
    for r in positions.iter_mut() {
        wrap(r, l);
    }
}
