// quickmagick/src/command/mod.rs
//! Building blocks for ImageMagick command lines: geometry strings, color
//! literals, argument quoting, the option registry and draw primitives.

pub mod color;
pub mod draw;
pub mod escape;
pub mod geometry;
pub mod options;

pub use color::{gray, graya, hsl, hsla, rgb, rgba, ColorComponent};
pub use draw::{DrawOptions, Primitive};
pub use escape::escape;
pub use geometry::{Geometry, GeometryFlag};
pub use options::{OptionKind, OptionStyle, OptionValue};
