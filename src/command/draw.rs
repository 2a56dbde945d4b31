// quickmagick/src/command/draw.rs
//! Primitives for the `-draw` operator.
//!
//! Shapes are drawn with the preceding `fill`, `stroke` and `strokewidth`
//! settings; use `fill none` for unfilled shapes. [`DrawOptions`] are emitted
//! in front of the primitive keyword and affect that primitive and the ones
//! after it inside the same `-draw` argument.

use crate::core::{MagickError, Result};
use std::fmt::Display;

/// Ordered `keyword value` pairs placed before a primitive, e.g.
/// `rotate 30` or `fill red`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawOptions {
    entries: Vec<(String, String)>,
}

impl DrawOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, key: impl Into<String>, value: impl Display) -> Self {
        self.entries.push((key.into(), value.to_string()));
        self
    }

    pub fn rotate(self, degrees: f64) -> Self {
        self.set("rotate", degrees)
    }

    pub fn translate(self, dx: f64, dy: f64) -> Self {
        self.set("translate", format!("{},{}", dx, dy))
    }

    pub fn scale(self, sx: f64, sy: f64) -> Self {
        self.set("scale", format!("{},{}", sx, sy))
    }

    pub fn skew_x(self, degrees: f64) -> Self {
        self.set("skewX", degrees)
    }

    pub fn skew_y(self, degrees: f64) -> Self {
        self.set("skewY", degrees)
    }

    /// Text placement only; one of NorthWest, North, NorthEast, West, Center,
    /// East, SouthWest, South or SouthEast.
    pub fn gravity(self, gravity: &str) -> Self {
        self.set("gravity", gravity)
    }

    pub fn stroke(self, color: &str) -> Self {
        self.set("stroke", color)
    }

    pub fn fill(self, color: &str) -> Self {
        self.set("fill", color)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(|(key, value)| format!("{} {}", key, value))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Point {
        x: f64,
        y: f64,
    },
    Line {
        x0: f64,
        y0: f64,
        x1: f64,
        y1: f64,
    },
    Rectangle {
        x0: f64,
        y0: f64,
        x1: f64,
        y1: f64,
    },
    /// Rectangle with corners rounded by a `wc` x `hc` arc.
    RoundRectangle {
        x0: f64,
        y0: f64,
        x1: f64,
        y1: f64,
        wc: f64,
        hc: f64,
    },
    /// Elliptical segment inscribed in the rectangle, from angle `a0` to `a1`.
    Arc {
        x0: f64,
        y0: f64,
        x1: f64,
        y1: f64,
        a0: f64,
        a1: f64,
    },
    Ellipse {
        cx: f64,
        cy: f64,
        rx: f64,
        ry: f64,
        a0: f64,
        a1: f64,
    },
    /// Center and any point on the perimeter.
    Circle {
        x0: f64,
        y0: f64,
        x1: f64,
        y1: f64,
    },
    /// Flat `[x0, y0, x1, y1, ...]` coordinate lists.
    Polyline(Vec<f64>),
    Polygon(Vec<f64>),
    Bezier(Vec<f64>),
    /// SVG path data.
    Path(String),
    /// Composites another file; a `0,0` size keeps its own dimensions.
    Image {
        compose: String,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        filename: String,
    },
    Text {
        x: f64,
        y: f64,
        text: String,
    },
}

fn points(coordinates: &[f64]) -> Result<String> {
    if coordinates.len() % 2 != 0 {
        return Err(MagickError::InvalidPointList(coordinates.len()));
    }

    Ok(coordinates
        .chunks(2)
        .map(|pair| format!("{},{}", pair[0], pair[1]))
        .collect::<Vec<_>>()
        .join(" "))
}

impl Primitive {
    /// Token sequence for this primitive, without options.
    pub fn render(&self) -> Result<String> {
        let tokens = match self {
            Primitive::Point { x, y } => format!("point {},{}", x, y),
            Primitive::Line { x0, y0, x1, y1 } => {
                format!("line {},{} {},{}", x0, y0, x1, y1)
            }
            Primitive::Rectangle { x0, y0, x1, y1 } => {
                format!("rectangle {},{} {},{}", x0, y0, x1, y1)
            }
            Primitive::RoundRectangle {
                x0,
                y0,
                x1,
                y1,
                wc,
                hc,
            } => format!("roundRectangle {},{} {},{} {},{}", x0, y0, x1, y1, wc, hc),
            Primitive::Arc {
                x0,
                y0,
                x1,
                y1,
                a0,
                a1,
            } => format!("arc {},{} {},{} {},{}", x0, y0, x1, y1, a0, a1),
            Primitive::Ellipse {
                cx,
                cy,
                rx,
                ry,
                a0,
                a1,
            } => format!("ellipse {},{} {},{} {},{}", cx, cy, rx, ry, a0, a1),
            Primitive::Circle { x0, y0, x1, y1 } => {
                format!("circle {},{} {},{}", x0, y0, x1, y1)
            }
            Primitive::Polyline(coordinates) => format!("polyline {}", points(coordinates)?),
            Primitive::Polygon(coordinates) => format!("polygon {}", points(coordinates)?),
            Primitive::Bezier(coordinates) => format!("bezier {}", points(coordinates)?),
            Primitive::Path(spec) => format!("path '{}'", spec),
            Primitive::Image {
                compose,
                x,
                y,
                width,
                height,
                filename,
            } => format!(
                "image {} {},{} {},{} '{}'",
                compose, x, y, width, height, filename
            ),
            Primitive::Text { x, y, text } => format!("text {},{} '{}'", x, y, text),
        };

        Ok(tokens)
    }

    /// Options followed by the primitive tokens.
    pub fn render_with(&self, options: &DrawOptions) -> Result<String> {
        let tokens = self.render()?;
        if options.is_empty() {
            Ok(tokens)
        } else {
            Ok(format!("{} {}", options.render(), tokens))
        }
    }
}
