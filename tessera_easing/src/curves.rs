// One-argument easing curves over [0, 1].
//
// These are the curves the deformation factory hands to `peakify` or applies
// directly. They match the formulations of the common JS easing tables, so
// `quadratic` here is the polynomial those tables call "quadratic", which is
// actually an out-quart, `1 − (1 − t)⁴`.

pub fn linear(t: f64) -> f64 {
    t
}

/// `t⁴`.
pub fn in_quart(t: f64) -> f64 {
    t * t * t * t
}

/// `t·(−t³ + 4t² − 6t + 4)`, i.e. `1 − (1 − t)⁴`.
pub fn quadratic(t: f64) -> f64 {
    t * (-(t * t) * t + 4.0 * t * t - 6.0 * t + 4.0)
}
