// Shaping functions: the numeric building blocks of tile deformation.
//
// Most of these come from the shader-toy tradition (Inigo Quilez's "useful
// little functions" and The Book of Shaders): cheap closed-form curves that
// turn a position in [0, 1] into a weight. `peakify` is the odd one out: it
// takes another easing curve and folds it into a symmetric hump, which is how
// monotonic 0→1 curves become "big in the middle, small at the edges" tile
// layouts.

use std::f64::consts::PI;

/// `(4·x·(1−x))^k`. Zero at both ends, exactly 1 at `x = 0.5`; larger `k`
/// narrows the peak.
pub fn parabola(x: f64, k: f64) -> f64 {
    (4.0 * x * (1.0 - x)).powf(k)
}

/// Normalized sinc, `sin(π·(k·x−1)) / (π·(k·x−1))`.
///
/// Returns NaN at the singular point `k·x == 1`; callers that need a finite
/// value there must substitute the limit (1.0) themselves.
pub fn sinc(x: f64, k: f64) -> f64 {
    let a = PI * (k * x - 1.0);
    a.sin() / a
}

/// Triangular tent: `2t` up to 0.5, then `2 − 2t`.
pub fn linear_peak(t: f64) -> f64 {
    if t <= 0.5 { 2.0 * t } else { 2.0 - 2.0 * t }
}

/// Fold `t` around 0.5 into [0, 1] (0 → 0, 0.5 → 1, 1 → 0) and apply `ease`.
pub fn peakify<F: Fn(f64) -> f64>(t: f64, ease: F) -> f64 {
    ease(linear_peak(t))
}

/// Same fold as `peakify`, but evaluates `ease(1 − folded)`, producing a
/// valley instead of a hump for increasing curves.
pub fn peakify_inverted<F: Fn(f64) -> f64>(t: f64, ease: F) -> f64 {
    ease(1.0 - linear_peak(t))
}

/// GLSL-style step: 0 below `edge`, 1 at or above it.
pub fn step(edge: f64, x: f64) -> f64 {
    if x < edge { 0.0 } else { 1.0 }
}

/// Clamp `x` into `[lo, hi]`. If the bounds are given in the wrong order they
/// are swapped first. NaN passes through unchanged.
pub fn clamp(x: f64, lo: f64, hi: f64) -> f64 {
    let (lo, hi) = if hi < lo { (hi, lo) } else { (lo, hi) };
    if x < lo {
        lo
    } else if x > hi {
        hi
    } else {
        x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn parabola_vanishes_at_edges_and_peaks_at_half() {
        for k in [0.1, 0.5, 1.0, 2.0, 7.5] {
            assert_eq!(parabola(0.0, k), 0.0);
            assert_eq!(parabola(1.0, k), 0.0);
            assert!((parabola(0.5, k) - 1.0).abs() < EPS);
        }
        // x^0 is 1 even at the edges, but the peak is still 1.
        assert_eq!(parabola(0.5, 0.0), 1.0);
    }

    #[test]
    fn sinc_is_one_near_the_singularity_and_nan_on_it() {
        assert!(sinc(0.5, 2.0).is_nan());
        assert!((sinc(0.5 + 1e-9, 2.0) - 1.0).abs() < 1e-6);
        // sin(-π) / -π is zero up to rounding.
        assert!(sinc(0.0, 1.0).abs() < 1e-15);
    }

    #[test]
    fn linear_peak_is_a_tent() {
        assert_eq!(linear_peak(0.0), 0.0);
        assert_eq!(linear_peak(0.25), 0.5);
        assert_eq!(linear_peak(0.5), 1.0);
        assert_eq!(linear_peak(0.75), 0.5);
        assert_eq!(linear_peak(1.0), 0.0);
    }

    #[test]
    fn peakify_identity_is_symmetric() {
        for i in 0..=100 {
            let t = i as f64 / 100.0;
            let a = peakify(t, |x| x);
            let b = peakify(1.0 - t, |x| x);
            assert!((a - b).abs() < EPS, "asymmetric at t={t}: {a} vs {b}");
        }
    }

    #[test]
    fn peakify_inverted_flips_the_fold() {
        assert_eq!(peakify_inverted(0.5, |x| x), 0.0);
        assert_eq!(peakify_inverted(0.0, |x| x), 1.0);
        assert_eq!(peakify_inverted(1.0, |x| x * x), 1.0);
    }

    #[test]
    fn step_switches_at_edge() {
        assert_eq!(step(0.5, 0.49), 0.0);
        assert_eq!(step(0.5, 0.5), 1.0);
        assert_eq!(step(0.5, 0.9), 1.0);
    }

    #[test]
    fn clamp_swaps_inverted_bounds() {
        assert_eq!(clamp(5.0, 1.0, 0.0), 1.0);
        assert_eq!(clamp(-5.0, 1.0, 0.0), 0.0);
        assert_eq!(clamp(0.3, 1.0, 0.0), 0.3);
    }

    #[test]
    fn clamp_is_idempotent() {
        let bounds = [(0.0, 1.0), (1.0, 0.0), (-3.0, 2.5), (4.0, 4.0)];
        for (lo, hi) in bounds {
            for i in -50..=50 {
                let x = i as f64 * 0.173;
                let once = clamp(x, lo, hi);
                assert_eq!(clamp(once, lo, hi), once);
            }
        }
    }
}
