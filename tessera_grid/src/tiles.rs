// Dense tile storage.
//
// Tiles are stored in a flat `Vec<Tile>` of `(tiles_y + 1) × (tiles_x + 1)`
// entries, indexed `col + row * (tiles_x + 1)`. Row 0 and column 0 are an
// unused border: the calculator iterates from index 1, so only
// `1..=tiles_x` × `1..=tiles_y` ever hold geometry, and the border stays at
// its zero-initialized value.
//
// Public accessors address interior tiles only. A coordinate on the border
// or past the edge reads as `None` and writes as a no-op. Callers (the
// controller, mostly) are expected to check, never to panic.

use std::fmt;

/// Number of shapes in the catalog (see `shapes.rs`), including the empty
/// shape at index 0.
pub const SHAPE_COUNT: usize = 15;

/// Shape index every tile starts with and returns to on reset.
pub const INITIAL_SHAPE_INDEX: usize = 0;

/// Largest tile count accepted along either axis.
pub const MAX_TILES: usize = 256;

/// One grid cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tile {
    /// Unscaled width from the last `calculate`.
    pub width: f64,
    /// Unscaled height from the last `calculate`.
    pub height: f64,
    /// Which catalog shape to draw; 0 draws nothing.
    pub shape_index: usize,
}

impl Default for Tile {
    fn default() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            shape_index: INITIAL_SHAPE_INDEX,
        }
    }
}

/// Interior tile address. `row` runs `1..=tiles_y`, `col` runs `1..=tiles_x`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileCoord {
    pub row: usize,
    pub col: usize,
}

impl TileCoord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(r{}, c{})", self.row, self.col)
    }
}

/// The 2D tile array with its border row and column.
#[derive(Clone, Debug, Default)]
pub struct TileStore {
    tiles: Vec<Tile>,
    tiles_x: usize,
    tiles_y: usize,
}

impl TileStore {
    /// Create a store for `tiles_x × tiles_y` interior tiles, all empty.
    /// Counts above `MAX_TILES` are clamped.
    pub fn new(tiles_x: usize, tiles_y: usize) -> Self {
        let tiles_x = tiles_x.min(MAX_TILES);
        let tiles_y = tiles_y.min(MAX_TILES);
        Self {
            tiles: vec![Tile::default(); (tiles_x + 1) * (tiles_y + 1)],
            tiles_x,
            tiles_y,
        }
    }

    pub fn tiles_x(&self) -> usize {
        self.tiles_x
    }

    pub fn tiles_y(&self) -> usize {
        self.tiles_y
    }

    pub fn in_bounds(&self, coord: TileCoord) -> bool {
        (1..=self.tiles_y).contains(&coord.row) && (1..=self.tiles_x).contains(&coord.col)
    }

    fn index(&self, coord: TileCoord) -> Option<usize> {
        if self.in_bounds(coord) {
            Some(coord.col + coord.row * (self.tiles_x + 1))
        } else {
            None
        }
    }

    pub fn get(&self, coord: TileCoord) -> Option<&Tile> {
        self.index(coord).map(|i| &self.tiles[i])
    }

    pub fn get_mut(&mut self, coord: TileCoord) -> Option<&mut Tile> {
        self.index(coord).map(|i| &mut self.tiles[i])
    }

    /// Raw access including the border. Used by tests that check the border
    /// stays untouched.
    pub fn get_raw(&self, row: usize, col: usize) -> Option<&Tile> {
        if row <= self.tiles_y && col <= self.tiles_x {
            self.tiles.get(col + row * (self.tiles_x + 1))
        } else {
            None
        }
    }

    /// Interior coordinates in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = TileCoord> + '_ {
        (1..=self.tiles_y)
            .flat_map(move |row| (1..=self.tiles_x).map(move |col| TileCoord::new(row, col)))
    }

    /// Interior tiles with their coordinates, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (TileCoord, &Tile)> + '_ {
        self.coords().filter_map(move |c| self.get(c).map(|t| (c, t)))
    }

    /// Apply `f` to every interior tile.
    pub fn for_each_mut<F: FnMut(&mut Tile)>(&mut self, mut f: F) {
        for row in 1..=self.tiles_y {
            let start = row * (self.tiles_x + 1);
            for tile in &mut self.tiles[start + 1..start + 1 + self.tiles_x] {
                f(tile);
            }
        }
    }
}
