// Per-frame tile sizing and fill scaling.
//
// `GridCalculator::calculate()` walks every interior tile, asks the active
// `GridMethod` for a raw (w, h) factor, multiplies it by the nominal tile
// size, and stores the unscaled result on the tile. Alongside, it sums
// each row's widths and the first column's heights, and turns those sums
// into scale factors:
//
//   row_scale[iy] = canvas_width  / Σ widths of row iy
//   scale.y       = canvas_height / Σ first-column heights
//
// Applying `row_scale[iy]` to every width in row `iy` (and `scale.y` to
// every height) makes the deformed layout exactly fill the canvas. Scaling
// is a presentation transform applied by the renderer; stored sizes stay
// unscaled. Heights are row-uniform for every method, so summing the first
// column is enough to normalize every column.
//
// Nominal tile size divides the canvas by the *span* (tile count + 1), and
// normalized positions use the same span. Iteration starts at index 1; the
// border row/column 0 is never written.
//
// A zero or non-finite sum (every column an alley at alley width 0, say)
// would yield an infinite scale. Such scales are replaced by 1.0 and a
// warning is logged, once per degenerate stretch rather than every frame.

use tessera_easing::{clamp, peakify};

use crate::clock::FrameTime;
use crate::deform::{Deformation, deform};
use crate::params::{GridMethod, GridParams};
use crate::random::RandomDimensions;
use crate::tiles::{TileCoord, TileStore};

/// Alley rows/columns: every even index from 2 up.
pub fn is_alley(index: usize) -> bool {
    index >= 2 && index % 2 == 0
}

/// Multipliers that stretch unscaled tile sizes to fill the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleFactor {
    pub x: f64,
    pub y: f64,
}

impl Default for ScaleFactor {
    fn default() -> Self {
        Self { x: 1.0, y: 1.0 }
    }
}

/// The travelling wave used by `GridMethod::Wave` for row `iy`.
pub fn wave_row_height(iy: usize, elapsed_seconds: f64) -> f64 {
    const FREQ_Y: f64 = 0.3;
    const AMP_Y: f64 = 0.7;
    AMP_Y * (iy as f64 * FREQ_Y - elapsed_seconds).sin() * 0.5 + 0.5
}

/// Computes tile sizes each frame and holds the resulting scale factors.
#[derive(Clone, Debug, Default)]
pub struct GridCalculator {
    /// Global scale: `x` from the first row, `y` from the first column.
    scale_factor: ScaleFactor,
    /// Horizontal scale per row, indexed by grid row (slot 0 unused).
    row_scales: Vec<f64>,
    /// Set while the last frame hit a degenerate sum, to avoid repeating
    /// the warning every frame.
    degenerate: bool,
}

impl GridCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute all tile sizes and scale factors for one frame.
    pub fn calculate(
        &mut self,
        canvas_width: f64,
        canvas_height: f64,
        frame: FrameTime,
        tiles: &mut TileStore,
        params: &GridParams,
        random: &RandomDimensions,
    ) {
        let span_x = tiles.tiles_x() + 1;
        let span_y = tiles.tiles_y() + 1;
        let tile_w0 = canvas_width / span_x as f64;
        let tile_h0 = canvas_height / span_y as f64;
        let aspect = tile_w0 / tile_h0;

        self.row_scales.clear();
        self.row_scales.resize(span_y, 1.0);

        let mut degenerate = false;
        let mut height_sum = 0.0;

        for iy in 1..span_y {
            let wave_y = wave_row_height(iy, frame.elapsed_seconds);
            let mut row_width_sum = 0.0;

            for ix in 1..span_x {
                let x = ix as f64 / span_x as f64;
                let y = iy as f64 / span_y as f64;

                let factor = match params.method {
                    GridMethod::Uniform => Deformation::IDENTITY,
                    GridMethod::StaticAlley => Deformation::new(
                        if is_alley(ix) { params.alley_x } else { 1.0 },
                        if is_alley(iy) { params.alley_x * aspect } else { 1.0 },
                    ),
                    GridMethod::Shaping => {
                        let eased = deform(x, y, frame.t, params.ease_type, params.mirror);
                        Deformation::new(
                            if is_alley(ix) { params.alley_x } else { eased.w },
                            if is_alley(iy) { params.alley_y } else { eased.h },
                        )
                    }
                    GridMethod::Bezier => Deformation::new(
                        clamp(peakify(x, |v| params.bezier_x.ease(v)), 0.0, 1.0),
                        clamp(peakify(y, |v| params.bezier_y.ease(v)), 0.0, 1.0),
                    ),
                    GridMethod::Wave => Deformation::new(1.0, wave_y),
                    GridMethod::Random => Deformation::new(
                        if is_alley(ix) { params.alley_x } else { random.column(ix) },
                        if is_alley(iy) { params.alley_x * aspect } else { random.row(iy) },
                    ),
                };

                let width = tile_w0 * factor.w;
                let height = tile_h0 * factor.h;

                if let Some(tile) = tiles.get_mut(TileCoord::new(iy, ix)) {
                    tile.width = width;
                    tile.height = height;
                }

                row_width_sum += width;
                if ix == 1 {
                    height_sum += height;
                }
            }

            let row_scale = fill_scale(canvas_width, row_width_sum, &mut degenerate);
            if iy == 1 {
                self.scale_factor.x = row_scale;
            }
            self.row_scales[iy] = row_scale;
        }

        self.scale_factor.y = fill_scale(canvas_height, height_sum, &mut degenerate);

        if degenerate && !self.degenerate {
            tracing::warn!(
                method = %params.method,
                alley_x = params.alley_x,
                alley_y = params.alley_y,
                "degenerate grid: a row or column sums to zero, using scale 1.0"
            );
        }
        self.degenerate = degenerate;
    }

    /// Global scale factor (`x` from the first row).
    pub fn scale_factor(&self) -> ScaleFactor {
        self.scale_factor
    }

    /// Horizontal scale for grid row `iy`. Rows never calculated scale by 1.
    pub fn row_scale(&self, iy: usize) -> f64 {
        self.row_scales.get(iy).copied().unwrap_or(1.0)
    }

    /// All row scales, indexed by grid row (slot 0 unused).
    pub fn row_scales(&self) -> &[f64] {
        &self.row_scales
    }
}

/// `canvas / sum`, or 1.0 if the sum cannot produce a finite positive scale.
fn fill_scale(canvas: f64, sum: f64, degenerate: &mut bool) -> f64 {
    let scale = canvas / sum;
    if sum > 0.0 && scale.is_finite() {
        scale
    } else {
        *degenerate = true;
        1.0
    }
}
