// Seeded size factors for the Random grid method.
//
// One factor per column and one per row, drawn once and held until the grid
// is reseeded, so the layout stays still between frames. Alley slots (even
// indices) get a fixed thin factor; everything else is a uniform draw
// clamped into [0.25, 1] so no tile collapses entirely.
//
// Vectors are indexed by grid index (the border slot 0 is present but never
// read), matching how the calculator iterates.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::calculator::is_alley;

/// Factor given to alley columns/rows.
pub const RANDOM_ALLEY_FACTOR: f64 = 0.1;
/// Smallest non-alley factor.
pub const RANDOM_MIN_FACTOR: f64 = 0.25;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RandomDimensions {
    pub column_widths: Vec<f64>,
    pub row_heights: Vec<f64>,
}

impl RandomDimensions {
    /// Draw factors for a grid with `tiles_x × tiles_y` interior tiles.
    pub fn generate<R: Rng>(tiles_x: usize, tiles_y: usize, rng: &mut R) -> Self {
        Self {
            column_widths: draw_factors(tiles_x, rng),
            row_heights: draw_factors(tiles_y, rng),
        }
    }

    pub fn from_seed(tiles_x: usize, tiles_y: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::generate(tiles_x, tiles_y, &mut rng)
    }

    /// Factor for column `ix`; missing entries count as full width.
    pub fn column(&self, ix: usize) -> f64 {
        self.column_widths.get(ix).copied().unwrap_or(1.0)
    }

    /// Factor for row `iy`; missing entries count as full height.
    pub fn row(&self, iy: usize) -> f64 {
        self.row_heights.get(iy).copied().unwrap_or(1.0)
    }
}

fn draw_factors<R: Rng>(count: usize, rng: &mut R) -> Vec<f64> {
    let mut factors = vec![0.0; count + 1];
    for (i, factor) in factors.iter_mut().enumerate().skip(1) {
        *factor = if is_alley(i) {
            RANDOM_ALLEY_FACTOR
        } else {
            rng.random::<f64>().clamp(RANDOM_MIN_FACTOR, 1.0)
        };
    }
    factors
}
