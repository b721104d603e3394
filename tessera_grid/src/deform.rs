// Deformation factory: normalized tile position + time → size factors.
//
// The Shaping method hands each tile's normalized `(x, y)` and the frame's
// animation parameter `t` to `deform()`, which mirrors the inputs, picks the
// easing family, and returns a `(w, h)` pair clamped to [0, 1]. Keeping the
// mirror and ease dispatch here lets the calculator stay a plain loop over
// tiles.
//
// `MirrorMode::Both` is special: it never touches the inputs. Only the
// Parabola family honours it, by inverting the result on both axes.

use crate::params::{EaseType, MirrorMode};
use tessera_easing::{
    in_quart, linear, linear_peak, parabola, peakify, peakify_inverted, quadratic, sinc, step,
};

/// Width and height factors for one tile, each nominally in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Deformation {
    pub w: f64,
    pub h: f64,
}

impl Deformation {
    /// No deformation: the tile keeps its nominal size.
    pub const IDENTITY: Deformation = Deformation { w: 1.0, h: 1.0 };

    pub const fn new(w: f64, h: f64) -> Self {
        Self { w, h }
    }

    /// Clamp both factors to [0, 1]. NaN becomes 0.
    pub fn clamped(self) -> Self {
        Self {
            w: clamp_unit(self.w),
            h: clamp_unit(self.h),
        }
    }
}

fn clamp_unit(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

/// Apply the mirror mode to a normalized position.
pub fn mirror_input(x: f64, y: f64, mirror: MirrorMode) -> (f64, f64) {
    match mirror {
        MirrorMode::None | MirrorMode::Both => (x, y),
        MirrorMode::Horizontal => (1.0 - x, y),
        MirrorMode::Vertical => (x, 1.0 - y),
    }
}

/// `|sinc(v, k)|`, with the removable singularity at `k·v == 1` filled in by
/// its limit.
fn sinc_magnitude(v: f64, k: f64) -> f64 {
    let s = sinc(v, k).abs();
    if s.is_finite() { s } else { 1.0 }
}

/// Compute the clamped deformation for one tile.
///
/// `x` and `y` are the tile's position normalized by the grid span, `t` is
/// the frame's animation parameter (see `clock.rs`).
pub fn deform(x: f64, y: f64, t: f64, ease: EaseType, mirror: MirrorMode) -> Deformation {
    let (x, y) = mirror_input(x, y, mirror);

    let raw = match ease {
        EaseType::None => Deformation::IDENTITY,
        EaseType::Linear => Deformation::new(x, y),
        EaseType::LinearPeak => Deformation::new(linear_peak(x), linear_peak(y)),
        EaseType::Step => Deformation::new(step(t, x), 1.0),
        EaseType::Parabola => {
            let px = parabola(x, 2.0 * t);
            let py = parabola(y, 2.0 * t);
            match mirror {
                MirrorMode::None => Deformation::new(px, py),
                MirrorMode::Horizontal => Deformation::new(1.0 - px, py),
                MirrorMode::Vertical => Deformation::new(px, 1.0 - py),
                MirrorMode::Both => Deformation::new(1.0 - px, 1.0 - py),
            }
        }
        EaseType::Sinc => {
            let k = 0.01 + t * 2.0;
            Deformation::new(sinc_magnitude(x, k), sinc_magnitude(y, k))
        }
        EaseType::ParabolaFixed => {
            Deformation::new(parabola(x, 2.0).abs(), parabola(y, 5.0).abs())
        }
        EaseType::Quadratic => Deformation::new(quadratic(x * t), quadratic(y * t)),
        EaseType::InQuart => Deformation::new(in_quart(x), in_quart(y)),
        EaseType::Peak => Deformation::new(
            0.5 + t - peakify(x, linear),
            0.5 + t - peakify(y, linear),
        ),
        EaseType::PeakInvert => {
            Deformation::new(peakify_inverted(x, linear), peakify_inverted(y, linear))
        }
        EaseType::PeakQuart => Deformation::new(peakify(x, in_quart), peakify(y, in_quart)),
        EaseType::Sin => Deformation::new((x + t).sin().abs(), (y + t).sin() * 0.5 + 0.5),
    };

    raw.clamped()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    fn approx(a: Deformation, w: f64, h: f64) -> bool {
        (a.w - w).abs() < EPS && (a.h - h).abs() < EPS
    }

    #[test]
    fn every_ease_stays_in_unit_square() {
        for &ease in EaseType::ALL {
            for &mirror in MirrorMode::ALL {
                for i in 0..=12 {
                    for j in 0..=12 {
                        let x = i as f64 / 12.0;
                        let y = j as f64 / 12.0;
                        for t in [0.0, 0.25, 0.5, 1.0] {
                            let d = deform(x, y, t, ease, mirror);
                            assert!(
                                (0.0..=1.0).contains(&d.w) && (0.0..=1.0).contains(&d.h),
                                "{ease} {mirror} x={x} y={y} t={t}: {d:?}"
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn none_is_identity() {
        assert_eq!(
            deform(0.3, 0.7, 0.5, EaseType::None, MirrorMode::Vertical),
            Deformation::IDENTITY
        );
    }

    #[test]
    fn mirror_flips_linear_inputs() {
        assert!(approx(deform(0.2, 0.6, 0.0, EaseType::Linear, MirrorMode::None), 0.2, 0.6));
        assert!(approx(
            deform(0.2, 0.6, 0.0, EaseType::Linear, MirrorMode::Horizontal),
            0.8,
            0.6
        ));
        assert!(approx(
            deform(0.2, 0.6, 0.0, EaseType::Linear, MirrorMode::Vertical),
            0.2,
            0.4
        ));
        // Both does not touch inputs for non-parabola curves.
        assert!(approx(deform(0.2, 0.6, 0.0, EaseType::Linear, MirrorMode::Both), 0.2, 0.6));
    }

    #[test]
    fn parabola_mirror_inverts_results() {
        // At x = y = 0.5, parabola is exactly 1 for any exponent.
        let none = deform(0.5, 0.5, 0.5, EaseType::Parabola, MirrorMode::None);
        let both = deform(0.5, 0.5, 0.5, EaseType::Parabola, MirrorMode::Both);
        assert!(approx(none, 1.0, 1.0));
        assert!(approx(both, 0.0, 0.0));

        let x = 0.25;
        let p = parabola(x, 1.0);
        let h = deform(x, x, 0.5, EaseType::Parabola, MirrorMode::Horizontal);
        // Horizontal mirrors x first (0.25 → 0.75, same parabola value), then
        // inverts the width.
        assert!(approx(h, 1.0 - p, p));
        let v = deform(x, x, 0.5, EaseType::Parabola, MirrorMode::Vertical);
        assert!(approx(v, p, 1.0 - p));
    }

    #[test]
    fn step_uses_time_as_edge_and_fixes_height() {
        let below = deform(0.3, 0.9, 0.5, EaseType::Step, MirrorMode::None);
        let above = deform(0.7, 0.1, 0.5, EaseType::Step, MirrorMode::None);
        assert_eq!(below, Deformation::new(0.0, 1.0));
        assert_eq!(above, Deformation::new(1.0, 1.0));
    }

    #[test]
    fn sinc_singularity_is_filled() {
        // k = 0.01 + 2t; with t = 0.495, k = 1.0 and x = 1.0 hits k·x == 1.
        let d = deform(1.0, 0.5, 0.495, EaseType::Sinc, MirrorMode::None);
        assert!(d.w.is_finite());
        assert!((d.w - 1.0).abs() < 1e-6);
    }

    #[test]
    fn peak_is_offset_by_time() {
        // peakify(0.25, linear) = 0.5 → 0.5 + 0.25 − 0.5 = 0.25.
        let d = deform(0.25, 0.25, 0.25, EaseType::Peak, MirrorMode::None);
        assert!(approx(d, 0.25, 0.25));
        // Large t saturates at 1.
        let d = deform(0.25, 0.25, 2.0, EaseType::Peak, MirrorMode::None);
        assert!(approx(d, 1.0, 1.0));
    }

    #[test]
    fn sin_uses_abs_for_width_and_offset_for_height() {
        let d = deform(0.0, 0.0, 0.0, EaseType::Sin, MirrorMode::None);
        assert!(approx(d, 0.0, 0.5));
    }

    #[test]
    fn clamped_maps_nan_to_zero() {
        let d = Deformation::new(f64::NAN, 3.0).clamped();
        assert_eq!(d, Deformation::new(0.0, 1.0));
    }
}
