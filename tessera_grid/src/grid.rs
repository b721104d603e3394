// Grid state: the single owner of tiles, parameters, and derived geometry.
//
// `Grid` bundles the `TileStore`, the live `GridParams`, the
// `GridCalculator` (with last frame's scale factors), and the seeded
// `RandomDimensions`. Every change the controller makes goes through a
// `Grid` method, and takes effect on the next `calculate()`/`draw()`.
//
// Coordinate-addressed operations take a `TileCoord` with 1-based interior
// indices. Out-of-range coordinates are rejected quietly (`false`/`None`);
// the controller decides whether that is worth logging.
//
// Frame protocol, driven by the caller:
//
//   grid.calculate(canvas_w, canvas_h, clock.tick());
//   grid.draw(&mut canvas);

use tessera_easing::clamp;

use crate::calculator::GridCalculator;
use crate::clock::FrameTime;
use crate::palette::{COLOR_PAIRS, Color, ColorPair, color_pair};
use crate::params::{EaseType, GridMethod, GridParams, MirrorMode};
use crate::random::RandomDimensions;
use crate::renderer::{self, Canvas};
use crate::tiles::{INITIAL_SHAPE_INDEX, MAX_TILES, SHAPE_COUNT, Tile, TileCoord, TileStore};

#[derive(Clone, Debug)]
pub struct Grid {
    tiles: TileStore,
    params: GridParams,
    calculator: GridCalculator,
    random: RandomDimensions,
}

impl Grid {
    /// Build a grid from `params`; `seed` drives the Random method's layout.
    pub fn new(params: GridParams, seed: u64) -> Self {
        let mut params = params;
        params.alley_x = clamp_alley(params.alley_x, 0.0);
        params.alley_y = clamp_alley(params.alley_y, 0.0);
        params.color_pair = params.color_pair.min(COLOR_PAIRS.len() - 1);
        if params.tiles_x > MAX_TILES || params.tiles_y > MAX_TILES {
            tracing::warn!(
                tiles_x = params.tiles_x,
                tiles_y = params.tiles_y,
                max = MAX_TILES,
                "tile counts clamped"
            );
            params.tiles_x = params.tiles_x.min(MAX_TILES);
            params.tiles_y = params.tiles_y.min(MAX_TILES);
        }

        let tiles = TileStore::new(params.tiles_x, params.tiles_y);
        let random = RandomDimensions::from_seed(params.tiles_x, params.tiles_y, seed);
        tracing::debug!(
            tiles_x = params.tiles_x,
            tiles_y = params.tiles_y,
            method = %params.method,
            ease = %params.ease_type,
            "grid created"
        );
        Self {
            tiles,
            params,
            calculator: GridCalculator::new(),
            random,
        }
    }

    pub fn params(&self) -> &GridParams {
        &self.params
    }

    pub fn tiles(&self) -> &TileStore {
        &self.tiles
    }

    pub fn calculator(&self) -> &GridCalculator {
        &self.calculator
    }

    pub fn random_dimensions(&self) -> &RandomDimensions {
        &self.random
    }

    pub fn tiles_x(&self) -> usize {
        self.tiles.tiles_x()
    }

    pub fn tiles_y(&self) -> usize {
        self.tiles.tiles_y()
    }

    // -- Tiles --

    pub fn tile(&self, coord: TileCoord) -> Option<&Tile> {
        self.tiles.get(coord)
    }

    /// Set a tile's shape. The index is stored modulo `SHAPE_COUNT`.
    /// Returns false (and changes nothing) if `coord` is out of range.
    pub fn set_shape_index(&mut self, coord: TileCoord, index: usize) -> bool {
        match self.tiles.get_mut(coord) {
            Some(tile) => {
                tile.shape_index = index % SHAPE_COUNT;
                true
            }
            None => false,
        }
    }

    /// Advance a tile to the next shape, wrapping. Returns the new index.
    pub fn cycle_shape_index(&mut self, coord: TileCoord) -> Option<usize> {
        let tile = self.tiles.get_mut(coord)?;
        tile.shape_index = (tile.shape_index + 1) % SHAPE_COUNT;
        Some(tile.shape_index)
    }

    pub fn reset_all_shapes(&mut self) {
        self.tiles
            .for_each_mut(|tile| tile.shape_index = INITIAL_SHAPE_INDEX);
    }

    /// Interior tiles whose shape is `index`, row-major.
    pub fn coords_matching_shape(&self, index: usize) -> Vec<TileCoord> {
        self.tiles
            .iter()
            .filter(|(_, t)| t.shape_index == index)
            .map(|(c, _)| c)
            .collect()
    }

    /// Interior tiles whose shape is not `index`, row-major.
    pub fn coords_excluding_shape(&self, index: usize) -> Vec<TileCoord> {
        self.tiles
            .iter()
            .filter(|(_, t)| t.shape_index != index)
            .map(|(c, _)| c)
            .collect()
    }

    // -- Geometry parameters --

    /// Clamp into [0, 1]; a non-finite value leaves the alley unchanged.
    pub fn set_alley_x(&mut self, value: f64) {
        self.params.alley_x = clamp_alley(value, self.params.alley_x);
    }

    /// Clamp into [0, 1]; a non-finite value leaves the alley unchanged.
    pub fn set_alley_y(&mut self, value: f64) {
        self.params.alley_y = clamp_alley(value, self.params.alley_y);
    }

    pub fn set_method(&mut self, method: GridMethod) {
        self.params.method = method;
    }

    pub fn cycle_method(&mut self) -> GridMethod {
        self.params.method = self.params.method.next();
        self.params.method
    }

    pub fn set_ease_type(&mut self, ease: EaseType) {
        self.params.ease_type = ease;
    }

    pub fn cycle_ease_type(&mut self) -> EaseType {
        self.params.ease_type = self.params.ease_type.next();
        self.params.ease_type
    }

    pub fn set_mirror(&mut self, mirror: MirrorMode) {
        self.params.mirror = mirror;
    }

    pub fn cycle_mirror(&mut self) -> MirrorMode {
        self.params.mirror = self.params.mirror.next();
        self.params.mirror
    }

    /// Regenerate the Random method's column/row factors.
    pub fn reseed_random_dimensions(&mut self, seed: u64) {
        self.random = RandomDimensions::from_seed(self.tiles_x(), self.tiles_y(), seed);
        tracing::debug!(seed, "random dimensions reseeded");
    }

    // -- Colors --

    /// Select a palette pair by index, clamped to the table. Returns the
    /// index actually stored.
    pub fn set_color_pair(&mut self, index: usize) -> usize {
        let clamped = index.min(COLOR_PAIRS.len() - 1);
        if clamped != index {
            tracing::debug!(index, clamped, "color pair index clamped");
        }
        self.params.color_pair = clamped;
        clamped
    }

    pub fn cycle_color_pair(&mut self) -> usize {
        self.params.color_pair = (self.params.color_pair + 1) % COLOR_PAIRS.len();
        self.params.color_pair
    }

    pub fn color_pair_index(&self) -> usize {
        self.params.color_pair
    }

    pub fn color_pair(&self) -> &'static ColorPair {
        color_pair(self.params.color_pair)
    }

    pub fn set_swap_colors(&mut self, swap: bool) {
        self.params.swap_colors = swap;
    }

    pub fn toggle_swap_colors(&mut self) -> bool {
        self.params.swap_colors = !self.params.swap_colors;
        self.params.swap_colors
    }

    /// `(primary, secondary)`: background and fill.
    pub fn colors(&self) -> (Color, Color) {
        self.color_pair().resolve(self.params.swap_colors)
    }

    // -- Debug --

    pub fn set_debug(&mut self, debug: bool) {
        self.params.debug = debug;
    }

    pub fn toggle_debug(&mut self) -> bool {
        self.params.debug = !self.params.debug;
        self.params.debug
    }

    // -- Frame --

    pub fn calculate(&mut self, canvas_width: f64, canvas_height: f64, frame: FrameTime) {
        self.calculator.calculate(
            canvas_width,
            canvas_height,
            frame,
            &mut self.tiles,
            &self.params,
            &self.random,
        );
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        renderer::draw(canvas, &self.tiles, &self.calculator, &self.params, self.colors());
    }

    /// `calculate` sized to the canvas, then `draw`.
    pub fn render(&mut self, canvas: &mut dyn Canvas, frame: FrameTime) {
        self.calculate(canvas.width(), canvas.height(), frame);
        self.draw(canvas);
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(GridParams::default(), 0)
    }
}

fn clamp_alley(value: f64, previous: f64) -> f64 {
    if value.is_finite() {
        clamp(value, 0.0, 1.0)
    } else {
        tracing::warn!(value, "ignoring non-finite alley value");
        previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::RecordingCanvas;

    #[test]
    fn shapes_start_empty() {
        let grid = Grid::default();
        assert_eq!(grid.coords_matching_shape(INITIAL_SHAPE_INDEX).len(), 64);
        assert!(grid.coords_excluding_shape(INITIAL_SHAPE_INDEX).is_empty());
    }

    #[test]
    fn set_shape_index_wraps_and_rejects_out_of_range() {
        let mut grid = Grid::default();
        assert!(grid.set_shape_index(TileCoord::new(3, 4), SHAPE_COUNT + 2));
        assert_eq!(grid.tile(TileCoord::new(3, 4)).map(|t| t.shape_index), Some(2));
        assert!(!grid.set_shape_index(TileCoord::new(0, 4), 1));
        assert!(!grid.set_shape_index(TileCoord::new(9, 1), 1));
        assert_eq!(grid.coords_excluding_shape(0), vec![TileCoord::new(3, 4)]);
    }

    #[test]
    fn cycle_shape_index_full_turn_is_identity() {
        let mut grid = Grid::default();
        let c = TileCoord::new(2, 2);
        grid.set_shape_index(c, 5);
        for _ in 0..SHAPE_COUNT {
            grid.cycle_shape_index(c);
        }
        assert_eq!(grid.tile(c).map(|t| t.shape_index), Some(5));
        assert_eq!(grid.cycle_shape_index(TileCoord::new(0, 0)), None);
    }

    #[test]
    fn reset_clears_every_tile() {
        let mut grid = Grid::default();
        for c in grid.tiles().coords().collect::<Vec<_>>() {
            grid.set_shape_index(c, 3);
        }
        assert_eq!(grid.coords_matching_shape(3).len(), 64);
        grid.reset_all_shapes();
        assert_eq!(grid.coords_matching_shape(0).len(), 64);
    }

    #[test]
    fn huge_tile_counts_are_clamped() {
        let grid = Grid::new(
            GridParams {
                tiles_x: usize::MAX,
                tiles_y: 1,
                ..GridParams::default()
            },
            0,
        );
        assert_eq!(grid.params().tiles_x, MAX_TILES);
        assert_eq!(grid.tiles().tiles_x(), MAX_TILES);
        assert!(grid.tile(TileCoord::new(1, MAX_TILES)).is_some());
        assert!(grid.tile(TileCoord::new(1, MAX_TILES + 1)).is_none());
    }

    #[test]
    fn alleys_clamp() {
        let mut grid = Grid::default();
        grid.set_alley_x(1.5);
        grid.set_alley_y(-0.2);
        assert_eq!(grid.params().alley_x, 1.0);
        assert_eq!(grid.params().alley_y, 0.0);
        grid.set_alley_x(f64::NAN);
        assert_eq!(grid.params().alley_x, 1.0);
    }

    #[test]
    fn cycling_methods_visits_every_variant() {
        let mut grid = Grid::default();
        let start = grid.params().method;
        let mut seen = vec![start];
        loop {
            let m = grid.cycle_method();
            if m == start {
                break;
            }
            seen.push(m);
        }
        assert_eq!(seen.len(), GridMethod::ALL.len());
    }

    #[test]
    fn colors_follow_pair_and_swap() {
        let mut grid = Grid::default();
        assert_eq!(grid.set_color_pair(100), COLOR_PAIRS.len() - 1);
        let pair = grid.color_pair();
        assert_eq!(grid.colors(), (pair.second, pair.first));
        assert!(grid.toggle_swap_colors());
        assert_eq!(grid.colors(), (pair.first, pair.second));
        assert_eq!(grid.cycle_color_pair(), 0);
    }

    #[test]
    fn mutations_show_on_next_frame() {
        let mut grid = Grid::default();
        grid.set_method(GridMethod::Uniform);
        grid.calculate(900.0, 900.0, FrameTime::default());
        assert!((grid.tile(TileCoord::new(1, 2)).map_or(0.0, |t| t.width) - 100.0).abs() < 1e-9);

        grid.set_method(GridMethod::StaticAlley);
        grid.set_alley_x(0.5);
        grid.calculate(900.0, 900.0, FrameTime::default());
        assert!((grid.tile(TileCoord::new(1, 2)).map_or(0.0, |t| t.width) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn reseed_changes_random_layout() {
        let mut grid = Grid::default();
        let before = grid.random_dimensions().clone();
        grid.reseed_random_dimensions(99);
        assert_ne!(&before, grid.random_dimensions());
    }

    #[test]
    fn render_uses_canvas_size() {
        let mut grid = Grid::default();
        grid.set_method(GridMethod::Uniform);
        let mut canvas = RecordingCanvas::new(450.0, 900.0);
        grid.render(&mut canvas, FrameTime::default());
        let t = grid.tile(TileCoord::new(1, 1)).copied().unwrap_or_default();
        assert!((t.width - 50.0).abs() < 1e-9);
        assert!((t.height - 100.0).abs() < 1e-9);
        assert!(!canvas.commands.is_empty());
    }
}
