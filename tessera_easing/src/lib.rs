// tessera_easing: shaping and easing curves for the Tessera grid engine.
//
// Every function in this crate is pure: a normalized input (nominally in
// [0, 1], though several are deliberately evaluated outside it) maps to a
// deformation factor. Nothing here knows about grids, tiles, or time; the
// deformation factory in `tessera_grid::deform` decides which curve to apply
// to which axis.
//
// Module overview:
// - `shaping.rs`: parabola, sinc, tent/peak folding, step, clamp.
// - `curves.rs`:  one-argument easing curves (linear, in-quart, quadratic)
//                 that can be handed to `peakify`.
// - `bezier.rs`:  CSS-style unit cubic bezier easing, used by the Bezier
//                 deformation method.

pub mod bezier;
pub mod curves;
pub mod shaping;

pub use bezier::CubicBezier;
pub use curves::{in_quart, linear, quadratic};
pub use shaping::{clamp, linear_peak, parabola, peakify, peakify_inverted, sinc, step};
