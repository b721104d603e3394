// SVG canvas: renders one frame of the grid into a standalone SVG document.
//
// The `Canvas` transform model is translation only, so the canvas tracks
// the current offset itself and writes absolute coordinates rather than
// nesting `<g transform>` groups. Arcs become pie-slice paths; an arc whose
// sweep covers the full turn is written as an ellipse.

use std::f64::consts::TAU;
use std::path::Path;

use tessera_grid::{Canvas, Color};

use crate::error::CliError;

const LABEL_FONT_SIZE: f64 = 12.0;

#[derive(Clone, Debug)]
pub struct SvgCanvas {
    width: f64,
    height: f64,
    fill: Color,
    offset: (f64, f64),
    saved: Vec<(f64, f64)>,
    body: String,
}

impl SvgCanvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            fill: Color::WHITE,
            offset: (0.0, 0.0),
            saved: Vec::new(),
            body: String::new(),
        }
    }

    /// The complete document.
    pub fn to_svg_string(&self) -> String {
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n{body}</svg>\n",
            w = num(self.width),
            h = num(self.height),
            body = self.body,
        )
    }

    pub fn save(&self, path: &Path) -> Result<(), CliError> {
        std::fs::write(path, self.to_svg_string()).map_err(|source| CliError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), "wrote SVG frame");
        Ok(())
    }

    fn x(&self, x: f64) -> String {
        num(x + self.offset.0)
    }

    fn y(&self, y: f64) -> String {
        num(y + self.offset.1)
    }

    fn fill_attr(&self) -> String {
        paint("fill", self.fill)
    }

    fn element(&mut self, element: String) {
        self.body.push_str("  ");
        self.body.push_str(&element);
        self.body.push('\n');
    }
}

impl Canvas for SvgCanvas {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn background(&mut self, color: Color) {
        // A background wipes whatever was drawn before it.
        self.body.clear();
        let el = format!(
            "<rect x=\"0\" y=\"0\" width=\"{}\" height=\"{}\" {}/>",
            num(self.width),
            num(self.height),
            paint("fill", color)
        );
        self.element(el);
    }

    fn fill(&mut self, color: Color) {
        self.fill = color;
    }

    fn push(&mut self) {
        self.saved.push(self.offset);
    }

    fn translate(&mut self, x: f64, y: f64) {
        self.offset.0 += x;
        self.offset.1 += y;
    }

    fn pop(&mut self) {
        match self.saved.pop() {
            Some(offset) => self.offset = offset,
            None => tracing::warn!("pop without matching push"),
        }
    }

    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        let el = format!(
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" {}/>",
            self.x(x),
            self.y(y),
            num(w),
            num(h),
            self.fill_attr()
        );
        self.element(el);
    }

    fn arc(&mut self, cx: f64, cy: f64, w: f64, h: f64, start: f64, stop: f64) {
        if stop - start >= TAU {
            self.ellipse(cx, cy, w, h);
            return;
        }
        let sweep = (stop - start).rem_euclid(TAU);
        if sweep == 0.0 {
            return;
        }
        let (rx, ry) = (w / 2.0, h / 2.0);
        let point = |a: f64| (cx + rx * a.cos(), cy + ry * a.sin());
        let (x0, y0) = point(start);
        let (x1, y1) = point(start + sweep);
        let large = u8::from(sweep > std::f64::consts::PI);
        let el = format!(
            "<path d=\"M {} {} L {} {} A {} {} 0 {large} 1 {} {} Z\" {}/>",
            self.x(cx),
            self.y(cy),
            self.x(x0),
            self.y(y0),
            num(rx),
            num(ry),
            self.x(x1),
            self.y(y1),
            self.fill_attr()
        );
        self.element(el);
    }

    fn polygon(&mut self, points: &[(f64, f64)]) {
        if points.len() < 3 {
            return;
        }
        let pts: Vec<String> = points
            .iter()
            .map(|&(x, y)| format!("{},{}", self.x(x), self.y(y)))
            .collect();
        let el = format!("<polygon points=\"{}\" {}/>", pts.join(" "), self.fill_attr());
        self.element(el);
    }

    fn ellipse(&mut self, cx: f64, cy: f64, w: f64, h: f64) {
        let el = format!(
            "<ellipse cx=\"{}\" cy=\"{}\" rx=\"{}\" ry=\"{}\" {}/>",
            self.x(cx),
            self.y(cy),
            num(w / 2.0),
            num(h / 2.0),
            self.fill_attr()
        );
        self.element(el);
    }

    fn outline_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        let el = format!(
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"1\"/>",
            self.x(x),
            self.y(y),
            num(w),
            num(h),
            Color::WHITE.to_hex()
        );
        self.element(el);
    }

    fn label(&mut self, x: f64, y: f64, text: &str) {
        let el = format!(
            "<text x=\"{}\" y=\"{}\" fill=\"{}\" font-family=\"monospace\" font-size=\"{}\" text-anchor=\"middle\" dominant-baseline=\"middle\">{}</text>",
            self.x(x),
            self.y(y),
            Color::RED.to_hex(),
            num(LABEL_FONT_SIZE),
            escape(text)
        );
        self.element(el);
    }
}

/// `fill="#rrggbb"`, plus an opacity attribute for translucent colors.
fn paint(attr: &str, color: Color) -> String {
    let rgb = Color { a: 255, ..color }.to_hex();
    if color.a == 255 {
        format!("{attr}=\"{rgb}\"")
    } else {
        format!("{attr}=\"{rgb}\" {attr}-opacity=\"{}\"", num(color.opacity()))
    }
}

/// At most three decimals, trailing zeros dropped.
fn num(v: f64) -> String {
    let s = format!("{v:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
