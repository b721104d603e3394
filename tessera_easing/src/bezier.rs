// Unit cubic bezier easing (CSS `cubic-bezier(x1, y1, x2, y2)`).
//
// The curve runs from (0, 0) to (1, 1) with two free control points. Easing
// means: given an x, find the curve parameter `t` with `bx(t) == x`, then
// return `by(t)`. `bx` is monotonic for control x-coordinates in [0, 1], so a
// few Newton steps converge quickly; when the derivative is too flat for
// Newton we fall back to bisection, which always converges.

use serde::{Deserialize, Serialize};

const NEWTON_ITERATIONS: usize = 8;
const NEWTON_MIN_SLOPE: f64 = 1e-6;
const SOLVE_EPSILON: f64 = 1e-7;
const BISECTION_ITERATIONS: usize = 64;

/// A unit cubic bezier easing curve.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CubicBezier {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Default for CubicBezier {
    /// The symmetric ease-in-out `(0.5, 0, 0.5, 1)`.
    fn default() -> Self {
        Self::new(0.5, 0.0, 0.5, 1.0)
    }
}

impl CubicBezier {
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Evaluate the easing at `x`. Inputs outside [0, 1] are clamped.
    pub fn ease(&self, x: f64) -> f64 {
        if self.x1 == self.y1 && self.x2 == self.y2 {
            return x;
        }
        if x <= 0.0 {
            return 0.0;
        }
        if x >= 1.0 {
            return 1.0;
        }
        let t = self.solve_t_for_x(x);
        sample(self.y1, self.y2, t)
    }

    fn solve_t_for_x(&self, x: f64) -> f64 {
        // Newton–Raphson from t = x.
        let mut t = x;
        for _ in 0..NEWTON_ITERATIONS {
            let error = sample(self.x1, self.x2, t) - x;
            if error.abs() < SOLVE_EPSILON {
                return t;
            }
            let slope = slope(self.x1, self.x2, t);
            if slope.abs() < NEWTON_MIN_SLOPE {
                break;
            }
            t -= error / slope;
        }

        let (mut lo, mut hi) = (0.0, 1.0);
        t = x;
        for _ in 0..BISECTION_ITERATIONS {
            let value = sample(self.x1, self.x2, t);
            if (value - x).abs() < SOLVE_EPSILON {
                break;
            }
            if value < x {
                lo = t;
            } else {
                hi = t;
            }
            t = (lo + hi) * 0.5;
        }
        t
    }
}

/// One coordinate of the curve at parameter `t`, for control values `p1`/`p2`
/// (the endpoints are fixed at 0 and 1).
fn sample(p1: f64, p2: f64, t: f64) -> f64 {
    let c = 3.0 * p1;
    let b = 3.0 * (p2 - p1) - c;
    let a = 1.0 - c - b;
    ((a * t + b) * t + c) * t
}

fn slope(p1: f64, p2: f64, t: f64) -> f64 {
    let c = 3.0 * p1;
    let b = 3.0 * (p2 - p1) - c;
    let a = 1.0 - c - b;
    (3.0 * a * t + 2.0 * b) * t + c
}
