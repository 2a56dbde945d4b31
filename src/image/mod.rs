// quickmagick/src/image/mod.rs
//! A single logical image and the command line it accumulates.
//!
//! An [`Image`] never touches pixels. Settings and operators are recorded in
//! memory and only turned into a process when the image is saved, inspected
//! or converted to a blob.

mod generator;
pub mod info;
pub mod list;
pub mod ops;

pub use generator::{Generator, GradientKind, PATTERNS};
pub use info::ImageInfo;
pub use list::{ImageList, Members};
pub use ops::{Argument, Operation, Transform};

use crate::command::escape;
use crate::command::geometry::Geometry;
use crate::core::magick::{Magick, Tool};
use crate::core::{MagickError, Result};
use ops::Step;
use std::cell::OnceCell;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempPath;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LastOperator {
    None,
    Draw,
    Other,
}

#[derive(Clone)]
pub struct Image {
    magick: Magick,
    source: String,
    frame: usize,
    // frames in the source file, when known from `read`
    frame_count: Option<usize>,
    synthetic: bool,
    settings: Vec<Argument>,
    operators: Vec<Argument>,
    last: LastOperator,
    info_line: Option<String>,
    info: OnceCell<ImageInfo>,
    // keeps the temp file of `from_blob` alive
    backing: Option<Arc<TempPath>>,
}

impl std::fmt::Debug for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("source", &self.source)
            .field("frame", &self.frame)
            .field("synthetic", &self.synthetic)
            .field("command_line", &self.command_line())
            .finish()
    }
}

impl Image {
    /// `info_line` is a line of `identify` output already describing this
    /// frame; without it the first metadata access runs `identify`.
    pub fn new(
        magick: &Magick,
        source: impl Into<String>,
        frame: usize,
        info_line: Option<&str>,
        synthetic: bool,
    ) -> Self {
        Self {
            magick: magick.clone(),
            source: source.into(),
            frame,
            frame_count: None,
            synthetic,
            settings: Vec::new(),
            operators: Vec::new(),
            last: LastOperator::None,
            info_line: info_line.map(str::to_string),
            info: OnceCell::new(),
            backing: None,
        }
    }

    pub(crate) fn generated(
        magick: &Magick,
        width: u32,
        height: u32,
        generator: &Generator,
    ) -> Result<Self> {
        let mut image = Self::new(magick, generator.spec()?, 0, None, true);
        image.size(Geometry::size(width, height))?;
        Ok(image)
    }

    pub(crate) fn with_frame_count(mut self, frame_count: usize) -> Self {
        self.frame_count = Some(frame_count);
        self
    }

    pub(crate) fn with_backing(mut self, backing: Arc<TempPath>) -> Self {
        self.backing = Some(backing);
        self
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    /// True for generator-backed images that have not been saved yet.
    pub fn is_synthetic(&self) -> bool {
        self.synthetic
    }

    pub fn settings(&self) -> &[Argument] {
        &self.settings
    }

    pub fn operators(&self) -> &[Argument] {
        &self.operators
    }

    fn source_reference(&self) -> String {
        if self.synthetic {
            self.source.clone()
        } else {
            format!("{}[{}]", self.source, self.frame)
        }
    }

    /// Parenthesised fragment: settings, the source, then operators.
    pub fn command_line(&self) -> String {
        let mut parts = Vec::with_capacity(self.settings.len() + self.operators.len() + 3);
        parts.push("\"(\"".to_string());
        parts.extend(self.settings.iter().map(Argument::render));
        parts.push(escape(&self.source_reference()));
        parts.extend(self.operators.iter().map(Argument::render));
        parts.push("\")\"".to_string());
        parts.join(" ")
    }

    /// mogrify wants every option before the file it rewrites.
    fn mogrify_command_line(&self) -> String {
        let mut parts: Vec<String> = self
            .settings
            .iter()
            .chain(self.operators.iter())
            .map(Argument::render)
            .collect();
        parts.push(escape(&self.source));
        parts.join(" ")
    }

    /// True when the source holds this frame only, so mogrify can rewrite
    /// the whole file.
    fn is_whole_file(&self) -> bool {
        self.frame == 0 && self.frame_count.map_or(true, |count| count == 1)
    }

    pub(crate) fn push(&mut self, step: &Step) -> Result<()> {
        match step {
            Step::Setting(argument) => {
                self.settings.push(argument.clone());
                self.last = LastOperator::Other;
            }
            Step::Operator(argument) if argument.is_draw() => {
                match (self.last, self.operators.last_mut()) {
                    (LastOperator::Draw, Some(previous)) => {
                        let more = argument.values().join(" ");
                        previous.extend_value(&more);
                    }
                    _ => self.operators.push(argument.clone()),
                }
                self.last = LastOperator::Draw;
            }
            Step::Operator(argument) => {
                self.operators.push(argument.clone());
                self.last = LastOperator::Other;
            }
            Step::Revert => {
                if self.synthetic {
                    return Err(MagickError::CannotRevertSynthetic);
                }
                self.clear();
            }
        }
        Ok(())
    }

    fn clear(&mut self) {
        self.settings.clear();
        self.operators.clear();
        self.last = LastOperator::None;
    }

    fn convert_to(&self, output: &str) -> Result<String> {
        let args = format!("{} {}", self.command_line(), escape(output));
        self.magick.run(Tool::Convert, &args)
    }

    /// Renders to `output`. A synthetic image becomes a plain image backed by
    /// the written file.
    pub fn save(&mut self, output: impl AsRef<Path>) -> Result<String> {
        let output = output.as_ref().to_string_lossy().into_owned();
        let stdout = self.convert_to(&output)?;
        log::info!("Saved image: {}", output);

        if self.synthetic {
            *self = Image::new(&self.magick, output, 0, None, false);
        }

        Ok(stdout)
    }

    pub fn write(&mut self, output: impl AsRef<Path>) -> Result<String> {
        self.save(output)
    }

    pub fn convert(&mut self, output: impl AsRef<Path>) -> Result<String> {
        self.save(output)
    }

    /// Applies the pending edits to the source file itself, then forgets them
    /// so they are not applied twice. Other frames of the file are kept as
    /// they are.
    pub fn save_in_place(&mut self) -> Result<String> {
        if self.synthetic {
            return Err(MagickError::CannotMogrifySynthetic);
        }

        let (tool, args) = in_place_arguments(&[&*self]);
        let stdout = self.magick.run(tool, &args)?;
        log::info!("Rewrote image in place: {}", self.source);

        self.forget_edits();
        Ok(stdout)
    }

    /// Drops pending edits and cached metadata once they are on disk.
    pub(crate) fn forget_edits(&mut self) {
        self.clear();
        self.info = OnceCell::new();
        self.info_line = None;
    }

    pub fn mogrify(&mut self) -> Result<String> {
        self.save_in_place()
    }

    fn explicit_format(&self) -> Option<&str> {
        self.settings
            .iter()
            .rev()
            .find(|argument| argument.name() == "format")
            .and_then(|argument| argument.values().first())
            .map(String::as_str)
    }

    /// Encoded bytes of the rendered image. The format comes from an explicit
    /// `format` setting, then the source format, then the configured default.
    pub fn to_blob(&self) -> Result<Vec<u8>> {
        let format = match self.explicit_format() {
            Some(format) => format.to_string(),
            None => match self.format()? {
                Some(format) => format,
                None => self.magick.config().blob_format.clone(),
            },
        };

        let temp = self.magick.temp_file()?;
        self.convert_to(&format!("{}:{}", format, temp.display()))?;
        Ok(std::fs::read(&temp)?)
    }

    /// Parsed `identify` data, `None` for synthetic images. Fetched at most
    /// once per image.
    pub fn info(&self) -> Result<Option<&ImageInfo>> {
        if self.synthetic {
            return Ok(None);
        }
        if let Some(info) = self.info.get() {
            return Ok(Some(info));
        }

        let info = match &self.info_line {
            Some(line) => ImageInfo::parse(line, &self.source)?,
            None => {
                log::debug!("Fetching image info for {}", self.source);
                let output = self.magick.run(Tool::Identify, &self.command_line())?;
                let line = output
                    .lines()
                    .find(|line| !line.trim().is_empty())
                    .ok_or_else(|| MagickError::IllegalSourceFile(self.source.clone()))?;
                ImageInfo::parse(line, &self.source)?
            }
        };

        Ok(Some(self.info.get_or_init(|| info)))
    }

    pub fn format(&self) -> Result<Option<String>> {
        Ok(self.info()?.map(|info| info.format.clone()))
    }

    pub fn width(&self) -> Result<Option<u32>> {
        Ok(self.info()?.map(|info| info.width))
    }

    pub fn height(&self) -> Result<Option<u32>> {
        Ok(self.info()?.map(|info| info.height))
    }

    pub fn bit_depth(&self) -> Result<Option<u32>> {
        Ok(self.info()?.map(|info| info.bit_depth))
    }

    pub fn color_count(&self) -> Result<Option<u64>> {
        Ok(self.info()?.map(|info| info.color_count))
    }

    /// Size of the source file in bytes; `None` if it is missing or empty.
    pub fn file_size(&self) -> Option<u64> {
        if self.synthetic {
            return None;
        }
        std::fs::metadata(&self.source)
            .ok()
            .map(|metadata| metadata.len())
            .filter(|len| *len > 0)
    }

    /// Reads one pixel of the source through `identify -verbose`. Slow; meant
    /// for spot checks only.
    pub fn pixel(&self, x: u32, y: u32) -> Result<(u32, u32, u32)> {
        let args = format!(
            "-verbose -crop {} {}",
            escape(&Geometry::size(1, 1).offset(x, y).encode()),
            escape(&self.source_reference())
        );
        let output = self.magick.run(Tool::Identify, &args)?;
        parse_histogram_pixel(&output).ok_or(MagickError::MalformedInfoLine(output))
    }

    pub fn animate(&self) -> Result<String> {
        self.magick.run(Tool::Animate, &self.command_line())
    }

    pub fn display(&self) -> Result<String> {
        self.magick.run(Tool::Display, &self.command_line())
    }
}

impl Transform for Image {
    fn apply(&mut self, operation: Operation) -> Result<&mut Self> {
        let step = operation.resolve()?;
        self.push(&step)?;
        Ok(self)
    }
}

/// Tool and arguments rewriting one source file with the pending edits of
/// `members`, all of which are frames of that file.
///
/// A lone whole-file image goes through `mogrify`. When the members are
/// exactly the frames of the file, their fragments are merged back into it.
/// Otherwise the file is loaded as is and each edited frame replaces its
/// original with `-swap <frame>,-1 +delete`.
pub(crate) fn in_place_arguments(members: &[&Image]) -> (Tool, String) {
    if let [single] = members {
        if single.is_whole_file() {
            return (Tool::Mogrify, single.mogrify_command_line());
        }
    }

    let source = escape(&members[0].source);
    let mut frames: Vec<usize> = members.iter().map(|image| image.frame).collect();
    frames.sort_unstable();
    let covers_every_frame = members[0].frame_count == Some(members.len())
        && frames.iter().enumerate().all(|(index, frame)| index == *frame);

    let mut parts = Vec::with_capacity(members.len() * 3 + 2);
    if covers_every_frame {
        let mut ordered = members.to_vec();
        ordered.sort_by_key(|image| image.frame);
        parts.extend(ordered.iter().map(|image| image.command_line()));
    } else {
        parts.push(source.clone());
        for image in members {
            parts.push(image.command_line());
            parts.push(format!("-swap {},-1 +delete", image.frame));
        }
    }
    parts.push(source);

    (Tool::Convert, parts.join(" "))
}

/// First `(r,g,b` triple after the `Histogram:` header.
fn parse_histogram_pixel(output: &str) -> Option<(u32, u32, u32)> {
    let histogram = &output[output.find("Histogram:")?..];
    let open = histogram.find('(')?;
    let close = open + histogram[open..].find(')')?;
    let mut channels = histogram[open + 1..close]
        .split(',')
        .map(|value| value.trim().parse::<f64>().ok().map(|v| v as u32));

    Some((channels.next()??, channels.next()??, channels.next()??))
}
