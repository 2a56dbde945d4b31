// quickmagick/src/core/mod.rs
pub mod executor;
pub mod magick;

use crate::image::Transform;
use thiserror::Error;

/// Names of the external tools and a few defaults used when driving them.
#[derive(Debug, Clone, PartialEq)]
pub struct MagickConfig {
    pub identify: String,
    pub convert: String,
    pub mogrify: String,
    pub animate: String,
    pub display: String,
    /// Output format used by `to_blob` when nothing better is known.
    pub blob_format: String,
    pub temp_prefix: String,
}

impl Default for MagickConfig {
    fn default() -> Self {
        Self {
            identify: "identify".to_string(),
            convert: "convert".to_string(),
            mogrify: "mogrify".to_string(),
            animate: "animate".to_string(),
            display: "display".to_string(),
            blob_format: "jpg".to_string(),
            temp_prefix: "quickmagick".to_string(),
        }
    }
}

impl MagickConfig {
    /// ImageMagick 7 ships a single `magick` binary with the classic tools
    /// as subcommands.
    pub fn imagemagick7() -> Self {
        let base = Self::default();
        Self {
            identify: format!("magick {}", base.identify),
            convert: format!("magick {}", base.convert),
            mogrify: format!("magick {}", base.mogrify),
            animate: format!("magick {}", base.animate),
            display: format!("magick {}", base.display),
            ..base
        }
    }

    pub fn validate(&self) -> Result<()> {
        let tools = [
            ("identify", &self.identify),
            ("convert", &self.convert),
            ("mogrify", &self.mogrify),
            ("animate", &self.animate),
            ("display", &self.display),
        ];

        for (name, command) in tools {
            if command.trim().is_empty() {
                return Err(MagickError::InvalidParameter(format!(
                    "Command for '{}' cannot be empty",
                    name
                )));
            }
        }

        if self.blob_format.trim().is_empty() {
            return Err(MagickError::InvalidParameter(
                "Blob format cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Edits applied to every frame by the `convert` and `batch` commands.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditPlan {
    pub resize: Option<String>,
    pub crop: Option<String>,
    pub rotate: Option<f64>,
    pub format: Option<String>,
    pub quality: Option<u32>,
    pub strip: bool,
}

impl EditPlan {
    pub fn validate(&self) -> Result<()> {
        if let Some(quality) = self.quality {
            if !(1..=100).contains(&quality) {
                return Err(MagickError::InvalidParameter(
                    "Quality must be between 1 and 100".to_string(),
                ));
            }
        }

        for (name, geometry) in [("resize", &self.resize), ("crop", &self.crop)] {
            if matches!(geometry, Some(g) if g.trim().is_empty()) {
                return Err(MagickError::InvalidParameter(format!(
                    "Geometry for '{}' cannot be empty",
                    name
                )));
            }
        }

        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Records the edits on `target`. Settings go first so they reach the
    /// reader and writer, then operators in a fixed order.
    pub fn apply_to<T: Transform>(&self, target: &mut T) -> Result<()> {
        if let Some(quality) = self.quality {
            target.quality(quality)?;
        }
        if let Some(geometry) = &self.crop {
            target.crop(geometry.as_str())?;
        }
        if let Some(geometry) = &self.resize {
            target.resize(geometry.as_str())?;
        }
        if let Some(degrees) = self.rotate {
            target.rotate(degrees)?;
        }
        if self.strip {
            target.strip()?;
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct ProcessingStats {
    pub processed_count: usize,
    pub total_size_before: u64,
    pub total_size_after: u64,
    pub errors: Vec<(String, String)>,
}

impl ProcessingStats {
    /// Percentage saved across the batch, clamped to 0..=100.
    pub fn savings(&self) -> f64 {
        if self.total_size_before == 0 {
            return 0.0;
        }

        let savings = (self.total_size_before as f64 - self.total_size_after as f64)
            / self.total_size_before as f64
            * 100.0;
        savings.clamp(0.0, 100.0)
    }
}

#[derive(Error, Debug)]
pub enum MagickError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Error executing command: {command}\nResult is: {stdout}\nError is: {stderr}")]
    ExternalTool {
        command: String,
        stdout: String,
        stderr: String,
    },

    #[error("Invalid color component: {0}")]
    InvalidColorComponent(String),

    #[error("Points must be an even number of coordinates, got {0}")]
    InvalidPointList(usize),

    #[error("Invalid pattern '{0}'")]
    InvalidPattern(String),

    #[error("Cannot revert a pseudo image")]
    CannotRevertSynthetic,

    #[error("Cannot mogrify a pseudo image")]
    CannotMogrifySynthetic,

    #[error("Invalid argument type: {0}")]
    InvalidAppendArgument(String),

    #[error("Illegal source file: {0}")]
    IllegalSourceFile(String),

    #[error("Unknown {kind} option: {name}")]
    UnknownOption { name: String, kind: &'static str },

    #[error("Option '{option}' expects {expected}")]
    InvalidOptionValue {
        option: String,
        expected: &'static str,
    },

    #[error("Malformed identify line: {0}")]
    MalformedInfoLine(String),

    #[error("ImageMagick not installed: {0}")]
    ToolNotInstalled(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, MagickError>;
