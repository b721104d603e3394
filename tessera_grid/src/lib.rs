// tessera_grid: the grid computation engine.
//
// Each animation frame, the engine derives a raw width/height for every tile
// from the active deformation method, then computes scale factors that
// stretch the deformed rows and columns back out to fill the canvas edge to
// edge. Tiles also carry a shape index that survives across frames and is
// driven by controller input.
//
// Module overview:
// - `params.rs`:     GridParams plus the cyclic enums GridMethod, EaseType,
//                    MirrorMode (explicit ordered variant lists + `next()`).
// - `deform.rs`:     Deformation factory: mirror + easing dispatch for the
//                    Shaping method.
// - `tiles.rs`:      Tile, TileCoord, and the dense TileStore with its
//                    unused row-0/column-0 border.
// - `random.rs`:     Seeded per-column/per-row size factors for the Random
//                    method.
// - `calculator.rs`: GridCalculator: per-frame tile sizes and fill scales.
// - `grid.rs`:       Grid: owns tiles, params, and calculator; every
//                    mutation the controller makes goes through here.
// - `renderer.rs`:   Canvas trait, RecordingCanvas, and the tile walker.
// - `shapes.rs`:     The fixed shape catalog drawn into each tile.
// - `palette.rs`:    Color and the named color-pair table.
// - `clock.rs`:      FrameClock: the animation parameter per frame.
// - `config.rs`:     GridConfig: JSON-loadable startup defaults.
//
// The engine never talks to hardware. Controller input lives in
// `tessera_push`, which calls `Grid` mutators between frames; the frame loop
// lives in `tessera_cli`.

pub mod calculator;
pub mod clock;
pub mod config;
pub mod deform;
pub mod grid;
pub mod palette;
pub mod params;
pub mod random;
pub mod renderer;
pub mod shapes;
pub mod tiles;

pub use calculator::{GridCalculator, ScaleFactor};
pub use clock::{FrameClock, FrameTime};
pub use config::{ConfigError, GridConfig};
pub use grid::Grid;
pub use palette::{Color, ColorPair};
pub use params::{EaseType, GridMethod, GridParams, MirrorMode};
pub use renderer::{Canvas, RecordingCanvas};
pub use tiles::{Tile, TileCoord, TileStore};
