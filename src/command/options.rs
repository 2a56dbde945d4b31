// quickmagick/src/command/options.rs
//! Static registry of the ImageMagick options an [`Image`](crate::Image)
//! understands.
//!
//! Options are split in two tables. *Settings* are global and go in front of
//! the source image on the command line; *operators* are applied, in order,
//! after the image is loaded. A few names (`alpha`, `bordercolor`) appear in
//! both. Each entry also carries an [`OptionStyle`] describing the shape of
//! its value.

use super::geometry::Geometry;
use crate::core::{MagickError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    Setting,
    Operator,
}

impl OptionKind {
    pub fn label(self) -> &'static str {
        match self {
            OptionKind::Setting => "setting",
            OptionKind::Operator => "operator",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionStyle {
    /// Exactly one value, e.g. `-fill red`.
    Equality,
    /// A geometry string, e.g. `-resize 300x300!`.
    Geometry,
    /// Any number of words joined by spaces, possibly none, e.g. `-flip`.
    FreeForm,
}

/// Value handed to [`Transform::setting`](crate::Transform::setting) and
/// [`Transform::operator`](crate::Transform::operator).
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Empty,
    Value(String),
    Geometry(Geometry),
    Args(Vec<String>),
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Value(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::Value(value)
    }
}

impl From<Geometry> for OptionValue {
    fn from(value: Geometry) -> Self {
        OptionValue::Geometry(value)
    }
}

impl From<Vec<String>> for OptionValue {
    fn from(value: Vec<String>) -> Self {
        OptionValue::Args(value)
    }
}

impl From<&[&str]> for OptionValue {
    fn from(value: &[&str]) -> Self {
        OptionValue::Args(value.iter().map(|s| s.to_string()).collect())
    }
}

impl From<i32> for OptionValue {
    fn from(value: i32) -> Self {
        OptionValue::Value(value.to_string())
    }
}

impl From<u32> for OptionValue {
    fn from(value: u32) -> Self {
        OptionValue::Value(value.to_string())
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        OptionValue::Value(value.to_string())
    }
}

impl From<()> for OptionValue {
    fn from(_: ()) -> Self {
        OptionValue::Empty
    }
}

// Both tables are sorted by name for binary search.
const SETTINGS: &[(&str, OptionStyle)] = &[
    ("adjoin", OptionStyle::FreeForm),
    ("affine", OptionStyle::FreeForm),
    ("alpha", OptionStyle::Equality),
    ("attenuate", OptionStyle::FreeForm),
    ("authenticate", OptionStyle::FreeForm),
    ("background", OptionStyle::Equality),
    ("bias", OptionStyle::Equality),
    ("black-point-compensation", OptionStyle::Equality),
    ("blue-primary", OptionStyle::Equality),
    ("bordercolor", OptionStyle::Equality),
    ("caption", OptionStyle::Equality),
    ("channel", OptionStyle::Equality),
    ("colors", OptionStyle::Equality),
    ("colorspace", OptionStyle::Equality),
    ("comment", OptionStyle::Equality),
    ("compose", OptionStyle::Equality),
    ("compress", OptionStyle::Equality),
    ("define", OptionStyle::FreeForm),
    ("delay", OptionStyle::FreeForm),
    ("density", OptionStyle::Equality),
    ("depth", OptionStyle::Equality),
    ("display", OptionStyle::FreeForm),
    ("dispose", OptionStyle::FreeForm),
    ("dither", OptionStyle::FreeForm),
    ("encoding", OptionStyle::Equality),
    ("endian", OptionStyle::Equality),
    ("family", OptionStyle::Equality),
    ("fill", OptionStyle::Equality),
    ("filter", OptionStyle::Equality),
    ("font", OptionStyle::Equality),
    ("format", OptionStyle::Equality),
    ("fuzz", OptionStyle::Equality),
    ("gravity", OptionStyle::Equality),
    ("green-primary", OptionStyle::FreeForm),
    ("intent", OptionStyle::FreeForm),
    ("interlace", OptionStyle::FreeForm),
    ("interpolate", OptionStyle::FreeForm),
    ("interword-spacing", OptionStyle::FreeForm),
    ("kerning", OptionStyle::FreeForm),
    ("label", OptionStyle::Equality),
    ("limit", OptionStyle::FreeForm),
    ("loop", OptionStyle::FreeForm),
    ("mask", OptionStyle::FreeForm),
    ("mattecolor", OptionStyle::Equality),
    ("monitor", OptionStyle::FreeForm),
    ("orient", OptionStyle::FreeForm),
    ("page", OptionStyle::Equality),
    ("ping", OptionStyle::FreeForm),
    ("pointsize", OptionStyle::Equality),
    ("preview", OptionStyle::FreeForm),
    ("quality", OptionStyle::Equality),
    ("quiet", OptionStyle::FreeForm),
    ("red-primary", OptionStyle::FreeForm),
    ("regard-warnings", OptionStyle::FreeForm),
    ("remap", OptionStyle::FreeForm),
    ("respect-parentheses", OptionStyle::FreeForm),
    ("sampling-factor", OptionStyle::Geometry),
    ("scene", OptionStyle::FreeForm),
    ("seed", OptionStyle::FreeForm),
    ("size", OptionStyle::Equality),
    ("stretch", OptionStyle::FreeForm),
    ("stroke", OptionStyle::Equality),
    ("strokewidth", OptionStyle::Equality),
    ("style", OptionStyle::FreeForm),
    ("taint", OptionStyle::FreeForm),
    ("texture", OptionStyle::FreeForm),
    ("tile-offset", OptionStyle::Geometry),
    ("transparent-color", OptionStyle::FreeForm),
    ("treedepth", OptionStyle::FreeForm),
    ("undercolor", OptionStyle::Equality),
    ("units", OptionStyle::Equality),
    ("verbose", OptionStyle::FreeForm),
    ("view", OptionStyle::FreeForm),
    ("virtual-pixel", OptionStyle::FreeForm),
    ("weight", OptionStyle::Equality),
    ("white-point", OptionStyle::FreeForm),
];

const OPERATORS: &[(&str, OptionStyle)] = &[
    ("adaptive-blur", OptionStyle::Geometry),
    ("adaptive-resize", OptionStyle::Geometry),
    ("adaptive-sharpen", OptionStyle::Geometry),
    ("alpha", OptionStyle::Equality),
    ("annotate", OptionStyle::Geometry),
    ("append", OptionStyle::FreeForm),
    ("auto-orient", OptionStyle::FreeForm),
    ("average", OptionStyle::FreeForm),
    ("bench", OptionStyle::FreeForm),
    ("black-threshold", OptionStyle::FreeForm),
    ("blur", OptionStyle::Geometry),
    ("border", OptionStyle::Equality),
    ("bordercolor", OptionStyle::Equality),
    ("charcoal", OptionStyle::FreeForm),
    ("chop", OptionStyle::Geometry),
    ("clip", OptionStyle::FreeForm),
    ("clip-mask", OptionStyle::FreeForm),
    ("clip-path", OptionStyle::FreeForm),
    ("clut", OptionStyle::FreeForm),
    ("coalesce", OptionStyle::FreeForm),
    ("colorize", OptionStyle::FreeForm),
    ("combine", OptionStyle::FreeForm),
    ("composite", OptionStyle::FreeForm),
    ("contrast", OptionStyle::FreeForm),
    ("contrast-stretch", OptionStyle::Geometry),
    ("convolve", OptionStyle::FreeForm),
    ("crop", OptionStyle::Geometry),
    ("cycle", OptionStyle::FreeForm),
    ("decipher", OptionStyle::FreeForm),
    ("deconstruct", OptionStyle::FreeForm),
    ("deskew", OptionStyle::FreeForm),
    ("despeckle", OptionStyle::FreeForm),
    ("distort", OptionStyle::FreeForm),
    ("draw", OptionStyle::FreeForm),
    ("edge", OptionStyle::FreeForm),
    ("emboss", OptionStyle::FreeForm),
    ("encipher", OptionStyle::FreeForm),
    ("enhance", OptionStyle::FreeForm),
    ("equalize", OptionStyle::FreeForm),
    ("evaluate", OptionStyle::FreeForm),
    ("extent", OptionStyle::Geometry),
    ("extract", OptionStyle::Geometry),
    ("flatten", OptionStyle::FreeForm),
    ("flip", OptionStyle::FreeForm),
    ("flop", OptionStyle::FreeForm),
    ("frame", OptionStyle::Equality),
    ("function", OptionStyle::FreeForm),
    ("fx", OptionStyle::FreeForm),
    ("gamma", OptionStyle::FreeForm),
    ("gaussian-blur", OptionStyle::Geometry),
    ("geometry", OptionStyle::Equality),
    ("hald-clut", OptionStyle::FreeForm),
    ("identify", OptionStyle::FreeForm),
    ("implode", OptionStyle::FreeForm),
    ("lat", OptionStyle::Geometry),
    ("layers", OptionStyle::FreeForm),
    ("level", OptionStyle::FreeForm),
    ("level-colors", OptionStyle::FreeForm),
    ("linear-stretch", OptionStyle::Geometry),
    ("liquid-rescale", OptionStyle::Geometry),
    ("median", OptionStyle::FreeForm),
    ("modulate", OptionStyle::FreeForm),
    ("monochrome", OptionStyle::FreeForm),
    ("morph", OptionStyle::FreeForm),
    ("mosaic", OptionStyle::FreeForm),
    ("motion-blur", OptionStyle::Geometry),
    ("negate", OptionStyle::FreeForm),
    ("noise", OptionStyle::FreeForm),
    ("normalize", OptionStyle::FreeForm),
    ("opaque", OptionStyle::FreeForm),
    ("ordered-dither", OptionStyle::FreeForm),
    ("paint", OptionStyle::FreeForm),
    ("polaroid", OptionStyle::FreeForm),
    ("posterize", OptionStyle::FreeForm),
    ("print", OptionStyle::FreeForm),
    ("process", OptionStyle::FreeForm),
    ("profile", OptionStyle::FreeForm),
    ("quantize", OptionStyle::FreeForm),
    ("radial-blur", OptionStyle::FreeForm),
    ("raise", OptionStyle::FreeForm),
    ("random-threshold", OptionStyle::FreeForm),
    ("recolor", OptionStyle::FreeForm),
    ("region", OptionStyle::Geometry),
    ("render", OptionStyle::FreeForm),
    ("repage", OptionStyle::Geometry),
    ("resample", OptionStyle::Geometry),
    ("resize", OptionStyle::Geometry),
    ("reverse", OptionStyle::FreeForm),
    ("roll", OptionStyle::Geometry),
    ("rotate", OptionStyle::FreeForm),
    ("sample", OptionStyle::Geometry),
    ("scale", OptionStyle::Geometry),
    ("segment", OptionStyle::FreeForm),
    ("selective-blur", OptionStyle::Geometry),
    ("separate", OptionStyle::FreeForm),
    ("sepia-tone", OptionStyle::FreeForm),
    ("set", OptionStyle::FreeForm),
    ("shade", OptionStyle::FreeForm),
    ("shadow", OptionStyle::Geometry),
    ("sharpen", OptionStyle::Geometry),
    ("shave", OptionStyle::Geometry),
    ("shear", OptionStyle::Geometry),
    ("sigmoidal-contrast", OptionStyle::Geometry),
    ("sketch", OptionStyle::Geometry),
    ("solarize", OptionStyle::FreeForm),
    ("sparse-color", OptionStyle::FreeForm),
    ("splice", OptionStyle::Geometry),
    ("spread", OptionStyle::FreeForm),
    ("strip", OptionStyle::FreeForm),
    ("swirl", OptionStyle::FreeForm),
    ("threshold", OptionStyle::FreeForm),
    ("thumbnail", OptionStyle::Geometry),
    ("tile", OptionStyle::FreeForm),
    ("tint", OptionStyle::FreeForm),
    ("transform", OptionStyle::FreeForm),
    ("transparent", OptionStyle::Equality),
    ("transpose", OptionStyle::FreeForm),
    ("transverse", OptionStyle::FreeForm),
    ("trim", OptionStyle::FreeForm),
    ("type", OptionStyle::Equality),
    ("unique-colors", OptionStyle::FreeForm),
    ("unsharp", OptionStyle::Geometry),
    ("vignette", OptionStyle::Geometry),
    ("wave", OptionStyle::Geometry),
    ("white-threshold", OptionStyle::FreeForm),
    ("write", OptionStyle::FreeForm),
];

fn table(kind: OptionKind) -> &'static [(&'static str, OptionStyle)] {
    match kind {
        OptionKind::Setting => SETTINGS,
        OptionKind::Operator => OPERATORS,
    }
}

pub fn lookup(kind: OptionKind, name: &str) -> Option<OptionStyle> {
    let entries = table(kind);
    entries
        .binary_search_by(|(candidate, _)| (*candidate).cmp(name))
        .ok()
        .map(|index| entries[index].1)
}

pub fn names(kind: OptionKind) -> impl Iterator<Item = &'static str> {
    table(kind).iter().map(|(name, _)| *name)
}

/// Turns `value` into the single raw argument for option `name`, checking it
/// against the option's style.
pub fn encode(kind: OptionKind, name: &str, value: &OptionValue) -> Result<String> {
    let style = lookup(kind, name).ok_or_else(|| MagickError::UnknownOption {
        name: name.to_string(),
        kind: kind.label(),
    })?;

    let mismatch = |expected| MagickError::InvalidOptionValue {
        option: name.to_string(),
        expected,
    };

    match (style, value) {
        (OptionStyle::Equality, OptionValue::Value(v)) => Ok(v.clone()),
        (OptionStyle::Equality, OptionValue::Geometry(g)) => Ok(g.encode()),
        (OptionStyle::Equality, OptionValue::Args(args)) if args.len() == 1 => {
            Ok(args[0].clone())
        }
        (OptionStyle::Equality, _) => Err(mismatch("exactly one value")),

        (OptionStyle::Geometry, OptionValue::Geometry(g)) => Ok(g.encode()),
        (OptionStyle::Geometry, OptionValue::Value(v)) => Ok(v.clone()),
        (OptionStyle::Geometry, OptionValue::Empty) => Ok(String::new()),
        (OptionStyle::Geometry, OptionValue::Args(_)) => Err(mismatch("a geometry")),

        (OptionStyle::FreeForm, OptionValue::Empty) => Ok(String::new()),
        (OptionStyle::FreeForm, OptionValue::Value(v)) => Ok(v.clone()),
        (OptionStyle::FreeForm, OptionValue::Geometry(g)) => Ok(g.encode()),
        (OptionStyle::FreeForm, OptionValue::Args(args)) => Ok(args.join(" ")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::geometry::GeometryFlag;

    #[test]
    fn tables_are_sorted_and_unique() {
        for kind in [OptionKind::Setting, OptionKind::Operator] {
            let all: Vec<&str> = names(kind).collect();
            let mut sorted = all.clone();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(all, sorted, "{} table out of order", kind.label());
        }
    }

    #[test]
    fn lookup_respects_kind() {
        assert_eq!(lookup(OptionKind::Setting, "size"), Some(OptionStyle::Equality));
        assert_eq!(lookup(OptionKind::Operator, "size"), None);
        assert_eq!(lookup(OptionKind::Operator, "resize"), Some(OptionStyle::Geometry));
        assert_eq!(lookup(OptionKind::Setting, "resize"), None);
        assert_eq!(lookup(OptionKind::Operator, "flip"), Some(OptionStyle::FreeForm));
        assert!(lookup(OptionKind::Setting, "alpha").is_some());
        assert!(lookup(OptionKind::Operator, "alpha").is_some());
    }

    #[test]
    fn unknown_option_is_an_error() {
        let err = encode(OptionKind::Operator, "teleport", &"now".into()).unwrap_err();
        assert!(matches!(
            err,
            MagickError::UnknownOption { kind: "operator", .. }
        ));
    }

    #[test]
    fn geometry_style_encodes_geometry_and_raw_strings() {
        let g = Geometry::size(300, 300).flag(GeometryFlag::Aspect);
        assert_eq!(
            encode(OptionKind::Operator, "resize", &g.into()).unwrap(),
            "300x300!"
        );
        assert_eq!(
            encode(OptionKind::Operator, "crop", &"300x200+0+0".into()).unwrap(),
            "300x200+0+0"
        );
        assert!(encode(
            OptionKind::Operator,
            "resize",
            &OptionValue::Args(vec!["1".into(), "2".into()])
        )
        .is_err());
    }

    #[test]
    fn equality_style_needs_one_value() {
        assert_eq!(encode(OptionKind::Setting, "fill", &"red".into()).unwrap(), "red");
        assert_eq!(
            encode(OptionKind::Setting, "size", &Geometry::size(100, 100).into()).unwrap(),
            "100x100"
        );
        assert!(matches!(
            encode(OptionKind::Setting, "fill", &OptionValue::Empty),
            Err(MagickError::InvalidOptionValue { .. })
        ));
    }

    #[test]
    fn free_form_joins_words() {
        let args: &[&str] = &["10%", "90%"];
        assert_eq!(
            encode(OptionKind::Operator, "level", &args.into()).unwrap(),
            "10% 90%"
        );
        assert_eq!(encode(OptionKind::Operator, "flip", &().into()).unwrap(), "");
        assert_eq!(encode(OptionKind::Operator, "rotate", &90i32.into()).unwrap(), "90");
    }
}
