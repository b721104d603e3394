// Grid renderer: walks the tiles and hands each one to the shape catalog.
//
// The drawing surface is the `Canvas` trait, an immediate-mode API
// (push/translate/pop plus a handful of filled primitives). The engine ships
// `RecordingCanvas`, which just records calls, for tests and for anything
// that wants to inspect a frame; `tessera_cli` implements an SVG canvas.
//
// Layout: rows stack from the top. Within a row, tile x positions are a
// running sum of scaled widths (`width · row_scale[row]`); after each row,
// `pos_y` advances by the scaled height of the row's last tile (heights are
// row-uniform, so any tile would do). All heights scale by the global
// `scale.y`.
//
// See also: `shapes.rs` for what each shape index draws, `calculator.rs` for
// where the scale factors come from.

use crate::calculator::GridCalculator;
use crate::palette::Color;
use crate::params::GridParams;
use crate::shapes;
use crate::tiles::{TileCoord, TileStore};

/// Immediate-mode drawing surface.
///
/// Angles are radians, measured clockwise from the positive x axis (screen
/// coordinates, y down). Fill state applies to every primitive except
/// `outline_rect` and `label`, which carry their own styling.
pub trait Canvas {
    fn width(&self) -> f64;
    fn height(&self) -> f64;

    /// Clear to `color`.
    fn background(&mut self, color: Color);
    /// Set the fill for following primitives.
    fn fill(&mut self, color: Color);

    /// Save the current transform.
    fn push(&mut self);
    fn translate(&mut self, x: f64, y: f64);
    /// Restore the transform saved by the matching `push`.
    fn pop(&mut self);

    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    /// Filled pie slice of the ellipse centered at `(cx, cy)` with diameters
    /// `w × h`, from angle `start` to `stop`.
    fn arc(&mut self, cx: f64, cy: f64, w: f64, h: f64, start: f64, stop: f64);
    /// Filled closed polygon.
    fn polygon(&mut self, points: &[(f64, f64)]);
    /// Filled ellipse centered at `(cx, cy)` with diameters `w × h`.
    fn ellipse(&mut self, cx: f64, cy: f64, w: f64, h: f64);

    /// Unfilled 1px white outline, for debug overlays.
    fn outline_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    /// Centered red text at `(x, y)`, for debug overlays.
    fn label(&mut self, x: f64, y: f64, text: &str);
}

/// One recorded `Canvas` call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Background(Color),
    Fill(Color),
    Push,
    Translate { x: f64, y: f64 },
    Pop,
    Rect { x: f64, y: f64, w: f64, h: f64 },
    Arc { cx: f64, cy: f64, w: f64, h: f64, start: f64, stop: f64 },
    Polygon(Vec<(f64, f64)>),
    Ellipse { cx: f64, cy: f64, w: f64, h: f64 },
    OutlineRect { x: f64, y: f64, w: f64, h: f64 },
    Label { x: f64, y: f64, text: String },
}

/// A `Canvas` that records every call in order.
#[derive(Clone, Debug, Default)]
pub struct RecordingCanvas {
    width: f64,
    height: f64,
    pub commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Canvas for RecordingCanvas {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn background(&mut self, color: Color) {
        self.commands.push(DrawCommand::Background(color));
    }

    fn fill(&mut self, color: Color) {
        self.commands.push(DrawCommand::Fill(color));
    }

    fn push(&mut self) {
        self.commands.push(DrawCommand::Push);
    }

    fn translate(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::Translate { x, y });
    }

    fn pop(&mut self) {
        self.commands.push(DrawCommand::Pop);
    }

    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.commands.push(DrawCommand::Rect { x, y, w, h });
    }

    fn arc(&mut self, cx: f64, cy: f64, w: f64, h: f64, start: f64, stop: f64) {
        self.commands.push(DrawCommand::Arc {
            cx,
            cy,
            w,
            h,
            start,
            stop,
        });
    }

    fn polygon(&mut self, points: &[(f64, f64)]) {
        self.commands.push(DrawCommand::Polygon(points.to_vec()));
    }

    fn ellipse(&mut self, cx: f64, cy: f64, w: f64, h: f64) {
        self.commands.push(DrawCommand::Ellipse { cx, cy, w, h });
    }

    fn outline_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.commands.push(DrawCommand::OutlineRect { x, y, w, h });
    }

    fn label(&mut self, x: f64, y: f64, text: &str) {
        self.commands.push(DrawCommand::Label {
            x,
            y,
            text: text.to_string(),
        });
    }
}

/// Draw one frame: background, then every interior tile's shape.
pub fn draw(
    canvas: &mut dyn Canvas,
    tiles: &TileStore,
    calculator: &GridCalculator,
    params: &GridParams,
    colors: (Color, Color),
) {
    let (primary, secondary) = colors;
    canvas.background(primary);
    canvas.fill(secondary);

    let scale_y = calculator.scale_factor().y;
    let mut pos_y = 0.0;

    for row in 1..=tiles.tiles_y() {
        let row_scale = calculator.row_scale(row);
        let mut pos_x = 0.0;
        let mut row_height = 0.0;

        for col in 1..=tiles.tiles_x() {
            let Some(tile) = tiles.get(TileCoord::new(row, col)) else {
                continue;
            };
            let tile_w = tile.width * row_scale;
            let tile_h = tile.height * scale_y;

            canvas.push();
            canvas.translate(pos_x, pos_y);
            shapes::draw_shape(canvas, tile.shape_index, tile_w, tile_h);
            canvas.pop();

            if params.debug {
                draw_debug(canvas, pos_x, pos_y, tile_w, tile_h, col, row);
            }

            pos_x += tile_w;
            row_height = tile_h;
        }
        pos_y += row_height;
    }
}

fn draw_debug(canvas: &mut dyn Canvas, x: f64, y: f64, w: f64, h: f64, col: usize, row: usize) {
    canvas.push();
    canvas.translate(x, y);
    canvas.outline_rect(0.0, 0.0, w, h);
    canvas.label(w * 0.5, h * 0.5, &format!("{col} {row}"));
    canvas.pop();
}
