// The shape catalog. Every shape is drawn in tile-local space with the tile
// at `(0, 0)`–`(w, h)`; the renderer has already translated to the tile.
//
//   0        nothing
//   1        full rect
//   2..=5    quarter disc anchored at a corner (TL, TR, BR, BL), radius = tile
//   6..=9    right triangle, four orientations
//   10..=13  half rect + half ellipse (flat edge left, right, top, bottom)
//   14       ellipse inscribed in the tile
//
// Unknown indices draw nothing.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::renderer::Canvas;

pub fn draw_shape(canvas: &mut dyn Canvas, index: usize, w: f64, h: f64) {
    match index {
        1 => canvas.rect(0.0, 0.0, w, h),

        2 => canvas.arc(0.0, 0.0, w * 2.0, h * 2.0, 0.0, FRAC_PI_2),
        3 => canvas.arc(w, 0.0, w * 2.0, h * 2.0, FRAC_PI_2, PI),
        4 => canvas.arc(w, h, w * 2.0, h * 2.0, PI, PI + FRAC_PI_2),
        5 => canvas.arc(0.0, h, w * 2.0, h * 2.0, PI + FRAC_PI_2, TAU),

        6 => canvas.polygon(&[(0.0, 0.0), (w, 0.0), (w, h)]),
        7 => canvas.polygon(&[(0.0, 0.0), (w, 0.0), (0.0, h)]),
        8 => canvas.polygon(&[(w, 0.0), (w, h), (0.0, h)]),
        9 => canvas.polygon(&[(0.0, 0.0), (w, h), (0.0, h)]),

        10 => {
            canvas.rect(0.0, 0.0, w / 2.0, h);
            canvas.arc(w / 2.0, h / 2.0, w, h, PI + FRAC_PI_2, FRAC_PI_2);
        }
        11 => {
            canvas.rect(w / 2.0, 0.0, w / 2.0, h);
            canvas.arc(w / 2.0, h / 2.0, w, h, FRAC_PI_2, PI + FRAC_PI_2);
        }
        12 => {
            canvas.rect(0.0, 0.0, w, h / 2.0);
            canvas.arc(w / 2.0, h / 2.0, w, h, 0.0, PI);
        }
        13 => {
            canvas.rect(0.0, h / 2.0, w, h / 2.0);
            canvas.arc(w / 2.0, h / 2.0, w, h, PI, TAU);
        }

        14 => canvas.ellipse(w / 2.0, h / 2.0, w, h),

        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DrawCommand, RecordingCanvas};
    use crate::tiles::SHAPE_COUNT;

    fn record(index: usize) -> Vec<DrawCommand> {
        let mut canvas = RecordingCanvas::new(100.0, 100.0);
        draw_shape(&mut canvas, index, 40.0, 20.0);
        canvas.commands
    }

    #[test]
    fn empty_and_unknown_draw_nothing() {
        assert!(record(0).is_empty());
        assert!(record(SHAPE_COUNT).is_empty());
    }

    #[test]
    fn every_catalog_shape_draws() {
        for index in 1..SHAPE_COUNT {
            assert!(!record(index).is_empty(), "shape {index}");
        }
    }

    #[test]
    fn quarter_discs_cover_their_corner() {
        assert_eq!(
            record(4),
            vec![DrawCommand::Arc {
                cx: 40.0,
                cy: 20.0,
                w: 80.0,
                h: 40.0,
                start: PI,
                stop: PI + FRAC_PI_2,
            }]
        );
    }

    #[test]
    fn half_shapes_pair_rect_and_arc() {
        let cmds = record(12);
        assert_eq!(cmds.len(), 2);
        assert_eq!(
            cmds[0],
            DrawCommand::Rect {
                x: 0.0,
                y: 0.0,
                w: 40.0,
                h: 10.0
            }
        );
        assert!(matches!(cmds[1], DrawCommand::Arc { start, stop, .. } if start == 0.0 && stop == PI));
    }

    #[test]
    fn ellipse_is_inscribed() {
        assert_eq!(
            record(14),
            vec![DrawCommand::Ellipse {
                cx: 20.0,
                cy: 10.0,
                w: 40.0,
                h: 20.0
            }]
        );
    }
}
