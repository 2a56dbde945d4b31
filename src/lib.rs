// quickmagick/src/lib.rs
//! Builds ImageMagick command lines in memory and runs them through the
//! `identify`, `convert` and `mogrify` tools.
//!
//! ```no_run
//! use quickmagick::prelude::*;
//!
//! # fn main() -> quickmagick::Result<()> {
//! let magick = Magick::new();
//! let mut image = magick.solid(200, 100, Some("white"))?;
//! image.fill("red")?.draw_circle(100, 50, 120, 50)?;
//! image.save("circle.png")?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod command;
pub mod core;
pub mod image;
pub mod processors;
pub mod utils;

pub use crate::core::executor::{
    ProcessExecutor, ProcessOutput, SystemExecutor, SystemTempFiles, TempFileProvider,
};
pub use crate::core::magick::{Magick, Tool};
pub use crate::core::{EditPlan, MagickConfig, MagickError, ProcessingStats, Result};
pub use crate::command::{
    escape, gray, graya, hsl, hsla, rgb, rgba, ColorComponent, DrawOptions, Geometry,
    GeometryFlag, OptionValue, Primitive,
};
pub use crate::image::{
    Argument, Generator, GradientKind, Image, ImageInfo, ImageList, Members, Operation,
    Transform, PATTERNS,
};
pub use crate::processors::BatchProcessor;

pub mod prelude {
    pub use crate::{
        DrawOptions, Geometry, GeometryFlag, Image, ImageList, Magick, MagickConfig,
        MagickError, Primitive, Transform,
    };
}
