// quickmagick/src/image/ops.rs
//! Edits shared by [`Image`](super::Image) and
//! [`ImageList`](super::list::ImageList).
//!
//! Every edit is an [`Operation`]. The [`Transform`] trait has one required
//! method, [`Transform::apply`]; all the named edits (`resize`, `draw_line`,
//! `revert`, ...) are provided on top of it, so an image list broadcasts
//! exactly the same set of edits a single image accepts.

use crate::command::draw::{DrawOptions, Primitive};
use crate::command::geometry::Geometry;
use crate::command::options::{self, OptionKind, OptionValue};
use crate::command::escape;
use crate::core::Result;

/// One flag on the command line, `-name value...` or `+name`.
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    plus: bool,
    name: String,
    values: Vec<String>,
}

impl Argument {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::with_values(name, vec![value.into()])
    }

    pub fn with_values(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            plus: false,
            name: name.into(),
            values,
        }
    }

    /// `-name` when enabled, `+name` otherwise.
    pub fn toggle(name: impl Into<String>, enabled: bool) -> Self {
        Self {
            plus: !enabled,
            name: name.into(),
            values: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub(crate) fn is_draw(&self) -> bool {
        !self.plus && self.name == "draw"
    }

    /// Appends more primitives to the first value of a `-draw` argument.
    pub(crate) fn extend_value(&mut self, more: &str) {
        match self.values.first_mut() {
            Some(first) if !first.is_empty() => {
                first.push(' ');
                first.push_str(more);
            }
            Some(first) => first.push_str(more),
            None => self.values.push(more.to_string()),
        }
    }

    pub fn render(&self) -> String {
        let mut out = format!("{}{}", if self.plus { '+' } else { '-' }, self.name);
        for value in self.values.iter().filter(|v| !v.is_empty()) {
            out.push(' ');
            out.push_str(&escape(value));
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Registry-checked setting.
    Setting { name: String, value: OptionValue },
    /// Registry-checked operator.
    Operator { name: String, value: OptionValue },
    /// Setting appended as is, for options missing from the registry.
    RawSetting { name: String, value: String },
    RawOperator { name: String, value: String },
    Antialias(bool),
    Floodfill { geometry: Geometry, color: String },
    Draw {
        primitive: Primitive,
        options: DrawOptions,
    },
    Revert,
}

/// An operation after validation and encoding, ready to be pushed onto any
/// number of images.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Step {
    Setting(Argument),
    Operator(Argument),
    Revert,
}

impl Operation {
    pub(crate) fn resolve(&self) -> Result<Step> {
        let step = match self {
            Operation::Setting { name, value } => Step::Setting(Argument::new(
                name.as_str(),
                options::encode(OptionKind::Setting, name, value)?,
            )),
            Operation::Operator { name, value } => Step::Operator(Argument::new(
                name.as_str(),
                options::encode(OptionKind::Operator, name, value)?,
            )),
            Operation::RawSetting { name, value } => {
                Step::Setting(Argument::new(name.as_str(), value.as_str()))
            }
            Operation::RawOperator { name, value } => {
                Step::Operator(Argument::new(name.as_str(), value.as_str()))
            }
            Operation::Antialias(enabled) => Step::Setting(Argument::toggle("antialias", *enabled)),
            Operation::Floodfill { geometry, color } => Step::Operator(Argument::with_values(
                "floodfill",
                vec![geometry.encode(), color.clone()],
            )),
            Operation::Draw { primitive, options } => {
                Step::Operator(Argument::new("draw", primitive.render_with(options)?))
            }
            Operation::Revert => Step::Revert,
        };

        Ok(step)
    }
}

/// Edits accepted by both a single image and a list of images.
pub trait Transform: Sized {
    fn apply(&mut self, operation: Operation) -> Result<&mut Self>;

    fn setting(&mut self, name: &str, value: impl Into<OptionValue>) -> Result<&mut Self> {
        self.apply(Operation::Setting {
            name: name.to_string(),
            value: value.into(),
        })
    }

    fn operator(&mut self, name: &str, value: impl Into<OptionValue>) -> Result<&mut Self> {
        self.apply(Operation::Operator {
            name: name.to_string(),
            value: value.into(),
        })
    }

    fn append_to_settings(&mut self, name: &str, value: &str) -> Result<&mut Self> {
        self.apply(Operation::RawSetting {
            name: name.to_string(),
            value: value.to_string(),
        })
    }

    fn append_to_operators(&mut self, name: &str, value: &str) -> Result<&mut Self> {
        self.apply(Operation::RawOperator {
            name: name.to_string(),
            value: value.to_string(),
        })
    }

    /// Clears every pending setting and operator.
    fn revert(&mut self) -> Result<&mut Self> {
        self.apply(Operation::Revert)
    }

    fn antialias(&mut self, enabled: bool) -> Result<&mut Self> {
        self.apply(Operation::Antialias(enabled))
    }

    /// Flood-fills the region touching the pixel at the geometry offset.
    fn floodfill(&mut self, geometry: Geometry, color: &str) -> Result<&mut Self> {
        self.apply(Operation::Floodfill {
            geometry,
            color: color.to_string(),
        })
    }

    fn resize(&mut self, geometry: impl Into<OptionValue>) -> Result<&mut Self> {
        self.operator("resize", geometry)
    }

    fn crop(&mut self, geometry: impl Into<OptionValue>) -> Result<&mut Self> {
        self.operator("crop", geometry)
    }

    fn thumbnail(&mut self, geometry: impl Into<OptionValue>) -> Result<&mut Self> {
        self.operator("thumbnail", geometry)
    }

    fn extent(&mut self, geometry: impl Into<OptionValue>) -> Result<&mut Self> {
        self.operator("extent", geometry)
    }

    fn rotate(&mut self, degrees: f64) -> Result<&mut Self> {
        self.operator("rotate", degrees)
    }

    fn strip(&mut self) -> Result<&mut Self> {
        self.operator("strip", ())
    }

    fn size(&mut self, geometry: impl Into<OptionValue>) -> Result<&mut Self> {
        self.setting("size", geometry)
    }

    /// The `-format` setting; also picks the encoding of `to_blob`.
    fn set_format(&mut self, format: &str) -> Result<&mut Self> {
        self.setting("format", format)
    }

    fn quality(&mut self, quality: u32) -> Result<&mut Self> {
        self.setting("quality", quality)
    }

    fn background(&mut self, color: &str) -> Result<&mut Self> {
        self.setting("background", color)
    }

    fn fill(&mut self, color: &str) -> Result<&mut Self> {
        self.setting("fill", color)
    }

    fn stroke(&mut self, color: &str) -> Result<&mut Self> {
        self.setting("stroke", color)
    }

    fn strokewidth(&mut self, width: f64) -> Result<&mut Self> {
        self.setting("strokewidth", width)
    }

    fn pointsize(&mut self, size: f64) -> Result<&mut Self> {
        self.setting("pointsize", size)
    }

    fn gravity(&mut self, gravity: &str) -> Result<&mut Self> {
        self.setting("gravity", gravity)
    }

    fn draw(&mut self, primitive: Primitive) -> Result<&mut Self> {
        self.draw_with(primitive, DrawOptions::default())
    }

    fn draw_with(&mut self, primitive: Primitive, options: DrawOptions) -> Result<&mut Self> {
        self.apply(Operation::Draw { primitive, options })
    }

    fn draw_point(&mut self, x: impl Into<f64>, y: impl Into<f64>) -> Result<&mut Self> {
        self.draw(Primitive::Point {
            x: x.into(),
            y: y.into(),
        })
    }

    fn draw_line(
        &mut self,
        x0: impl Into<f64>,
        y0: impl Into<f64>,
        x1: impl Into<f64>,
        y1: impl Into<f64>,
    ) -> Result<&mut Self> {
        self.draw(Primitive::Line {
            x0: x0.into(),
            y0: y0.into(),
            x1: x1.into(),
            y1: y1.into(),
        })
    }

    fn draw_rectangle(
        &mut self,
        x0: impl Into<f64>,
        y0: impl Into<f64>,
        x1: impl Into<f64>,
        y1: impl Into<f64>,
    ) -> Result<&mut Self> {
        self.draw(Primitive::Rectangle {
            x0: x0.into(),
            y0: y0.into(),
            x1: x1.into(),
            y1: y1.into(),
        })
    }

    fn draw_round_rectangle(
        &mut self,
        x0: impl Into<f64>,
        y0: impl Into<f64>,
        x1: impl Into<f64>,
        y1: impl Into<f64>,
        wc: impl Into<f64>,
        hc: impl Into<f64>,
    ) -> Result<&mut Self> {
        self.draw(Primitive::RoundRectangle {
            x0: x0.into(),
            y0: y0.into(),
            x1: x1.into(),
            y1: y1.into(),
            wc: wc.into(),
            hc: hc.into(),
        })
    }

    fn draw_arc(
        &mut self,
        x0: impl Into<f64>,
        y0: impl Into<f64>,
        x1: impl Into<f64>,
        y1: impl Into<f64>,
        a0: impl Into<f64>,
        a1: impl Into<f64>,
    ) -> Result<&mut Self> {
        self.draw(Primitive::Arc {
            x0: x0.into(),
            y0: y0.into(),
            x1: x1.into(),
            y1: y1.into(),
            a0: a0.into(),
            a1: a1.into(),
        })
    }

    fn draw_ellipse(
        &mut self,
        cx: impl Into<f64>,
        cy: impl Into<f64>,
        rx: impl Into<f64>,
        ry: impl Into<f64>,
        a0: impl Into<f64>,
        a1: impl Into<f64>,
    ) -> Result<&mut Self> {
        self.draw(Primitive::Ellipse {
            cx: cx.into(),
            cy: cy.into(),
            rx: rx.into(),
            ry: ry.into(),
            a0: a0.into(),
            a1: a1.into(),
        })
    }

    fn draw_circle(
        &mut self,
        x0: impl Into<f64>,
        y0: impl Into<f64>,
        x1: impl Into<f64>,
        y1: impl Into<f64>,
    ) -> Result<&mut Self> {
        self.draw(Primitive::Circle {
            x0: x0.into(),
            y0: y0.into(),
            x1: x1.into(),
            y1: y1.into(),
        })
    }

    fn draw_polyline(&mut self, points: &[f64]) -> Result<&mut Self> {
        self.draw(Primitive::Polyline(points.to_vec()))
    }

    fn draw_polygon(&mut self, points: &[f64]) -> Result<&mut Self> {
        self.draw(Primitive::Polygon(points.to_vec()))
    }

    fn draw_bezier(&mut self, points: &[f64]) -> Result<&mut Self> {
        self.draw(Primitive::Bezier(points.to_vec()))
    }

    fn draw_path(&mut self, path: &str) -> Result<&mut Self> {
        self.draw(Primitive::Path(path.to_string()))
    }

    fn draw_image(
        &mut self,
        compose: &str,
        x: impl Into<f64>,
        y: impl Into<f64>,
        width: impl Into<f64>,
        height: impl Into<f64>,
        filename: &str,
    ) -> Result<&mut Self> {
        self.draw(Primitive::Image {
            compose: compose.to_string(),
            x: x.into(),
            y: y.into(),
            width: width.into(),
            height: height.into(),
            filename: filename.to_string(),
        })
    }

    fn draw_text(&mut self, x: impl Into<f64>, y: impl Into<f64>, text: &str) -> Result<&mut Self> {
        self.draw(Primitive::Text {
            x: x.into(),
            y: y.into(),
            text: text.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::geometry::GeometryFlag;

    #[test]
    fn argument_rendering() {
        assert_eq!(Argument::new("resize", "300x300").render(), "-resize 300x300");
        assert_eq!(Argument::new("resize", "300x300!").render(), "-resize \"300x300!\"");
        assert_eq!(Argument::new("flip", "").render(), "-flip");
        assert_eq!(Argument::toggle("antialias", false).render(), "+antialias");
        assert_eq!(Argument::toggle("antialias", true).render(), "-antialias");
        assert_eq!(
            Argument::with_values("floodfill", vec!["+10+10".into(), "red".into()]).render(),
            "-floodfill \"+10+10\" red"
        );
    }

    #[test]
    fn extend_value_joins_with_single_space() {
        let mut arg = Argument::new("draw", "line 0,0 1,1");
        arg.extend_value("point 2,2");
        assert_eq!(arg.values(), ["line 0,0 1,1 point 2,2"]);
        assert!(arg.is_draw());
        assert!(!Argument::toggle("draw", false).is_draw());
    }

    #[test]
    fn resolve_checks_the_registry() {
        let step = Operation::Operator {
            name: "resize".into(),
            value: Geometry::size(10, 10).flag(GeometryFlag::Aspect).into(),
        }
        .resolve()
        .unwrap();
        assert_eq!(step, Step::Operator(Argument::new("resize", "10x10!")));

        assert!(Operation::Setting {
            name: "resize".into(),
            value: "10x10".into(),
        }
        .resolve()
        .is_err());
    }

    #[test]
    fn raw_operations_bypass_the_registry() {
        let step = Operation::RawOperator {
            name: "teleport".into(),
            value: "now".into(),
        }
        .resolve()
        .unwrap();
        assert_eq!(step, Step::Operator(Argument::new("teleport", "now")));
    }

    #[test]
    fn draw_resolves_to_draw_operator() {
        let step = Operation::Draw {
            primitive: Primitive::Point { x: 1.0, y: 2.0 },
            options: DrawOptions::new().fill("red"),
        }
        .resolve()
        .unwrap();
        assert_eq!(step, Step::Operator(Argument::new("draw", "fill red point 1,2")));
    }
}
