// quickmagick/src/image/generator.rs
use crate::core::{MagickError, Result};

/// Built-in patterns accepted by the `pattern:` generator.
pub const PATTERNS: &[&str] = &[
    "bricks", "checkerboard", "circles", "crosshatch", "crosshatch30", "crosshatch45",
    "fishscales", "gray0", "gray1", "gray2", "gray3", "gray4", "gray5", "gray6", "gray7",
    "gray8", "gray9", "gray10", "gray11", "gray12", "gray13", "gray14", "gray15",
    "gray16", "gray17", "gray18", "gray19", "gray20", "hexagons", "horizontal",
    "horizontalsaw", "hs_bdiagonal", "hs_cross", "hs_diagcross", "hs_fdiagonal",
    "hs_horizontal", "hs_vertical", "left30", "left45", "leftshingle", "octagons",
    "right30", "right45", "rightshingle", "smallfishscales", "vertical",
    "verticalbricks", "verticalleftshingle", "verticalrightshingle", "verticalsaw",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GradientKind {
    #[default]
    Linear,
    Radial,
}

impl GradientKind {
    pub fn prefix(self) -> &'static str {
        match self {
            GradientKind::Linear => "gradient",
            GradientKind::Radial => "radial-gradient",
        }
    }
}

/// Synthetic image sources built by ImageMagick itself instead of read from
/// a file.
#[derive(Debug, Clone, PartialEq)]
pub enum Generator {
    /// `xc:<color>`; no color means the tool's default (white).
    Solid(Option<String>),
    /// `gradient:<from>-<to>`; defaults to black to white.
    Gradient {
        kind: GradientKind,
        from: Option<String>,
        to: Option<String>,
    },
    /// `pattern:<name>`, one of [`PATTERNS`].
    Pattern(String),
}

impl Generator {
    pub fn spec(&self) -> Result<String> {
        match self {
            Generator::Solid(color) => Ok(format!("xc:{}", color.as_deref().unwrap_or(""))),
            Generator::Gradient { kind, from, to } => {
                let mut spec = format!("{}:", kind.prefix());
                if let Some(from) = from {
                    spec.push_str(from);
                }
                if let Some(to) = to {
                    spec.push('-');
                    spec.push_str(to);
                }
                Ok(spec)
            }
            Generator::Pattern(name) => {
                if PATTERNS.contains(&name.as_str()) {
                    Ok(format!("pattern:{}", name))
                } else {
                    Err(MagickError::InvalidPattern(name.clone()))
                }
            }
        }
    }
}
