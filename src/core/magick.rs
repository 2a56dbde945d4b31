// quickmagick/src/core/magick.rs
use super::executor::{ProcessExecutor, SystemExecutor, SystemTempFiles, TempFileProvider};
use super::{MagickConfig, MagickError, Result};
use crate::command::escape;
use crate::image::{Generator, GradientKind, Image, ImageList};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempPath;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Identify,
    Convert,
    Mogrify,
    Animate,
    Display,
}

/// Entry point: knows how to reach the ImageMagick tools and creates
/// [`Image`]s bound to them. Cheap to clone.
#[derive(Clone)]
pub struct Magick {
    config: Arc<MagickConfig>,
    executor: Arc<dyn ProcessExecutor>,
    temp_files: Arc<dyn TempFileProvider>,
}

impl Magick {
    pub fn new() -> Self {
        Self {
            config: Arc::new(MagickConfig::default()),
            executor: Arc::new(SystemExecutor::new()),
            temp_files: Arc::new(SystemTempFiles),
        }
    }

    pub fn with_config(config: MagickConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config: Arc::new(config),
            ..Self::new()
        })
    }

    pub fn with_executor(mut self, executor: Arc<dyn ProcessExecutor>) -> Self {
        self.executor = executor;
        self
    }

    pub fn with_temp_files(mut self, temp_files: Arc<dyn TempFileProvider>) -> Self {
        self.temp_files = temp_files;
        self
    }

    pub fn config(&self) -> &MagickConfig {
        &self.config
    }

    fn program(&self, tool: Tool) -> &str {
        match tool {
            Tool::Identify => &self.config.identify,
            Tool::Convert => &self.config.convert,
            Tool::Mogrify => &self.config.mogrify,
            Tool::Animate => &self.config.animate,
            Tool::Display => &self.config.display,
        }
    }

    /// Runs `tool` with a pre-quoted argument string and returns its stdout.
    /// A non-zero exit becomes [`MagickError::ExternalTool`].
    pub fn run(&self, tool: Tool, args: &str) -> Result<String> {
        let program = self.program(tool);
        log::debug!("Running: {} {}", program, args);

        let output = self.executor.run(program, args)?;
        if !output.success() {
            return Err(MagickError::ExternalTool {
                command: format!("{} {}", program, args),
                stdout: output.stdout,
                stderr: output.stderr,
            });
        }

        Ok(output.stdout)
    }

    pub(crate) fn temp_file(&self) -> Result<TempPath> {
        self.temp_files.create(&self.config.temp_prefix)
    }

    /// Returns the first line of `identify --version`, failing when it does
    /// not come from ImageMagick.
    pub fn check_installed(&self) -> Result<String> {
        let version = self
            .run(Tool::Identify, "--version")
            .map_err(|e| MagickError::ToolNotInstalled(e.to_string()))?;

        if !version.contains("ImageMagick") {
            return Err(MagickError::ToolNotInstalled(version));
        }

        Ok(version.lines().next().unwrap_or_default().to_string())
    }

    /// One image per frame reported by `identify`.
    pub fn read(&self, path: impl AsRef<Path>) -> Result<Vec<Image>> {
        let path = path.as_ref().to_string_lossy().into_owned();
        let output = self.run(Tool::Identify, &escape(&path))?;

        let images: Vec<Image> = output
            .lines()
            .filter(|line| !line.trim().is_empty())
            .enumerate()
            .map(|(frame, line)| Image::new(self, path.as_str(), frame, Some(line), false))
            .collect();

        if images.is_empty() {
            return Err(MagickError::IllegalSourceFile(path));
        }

        let count = images.len();
        log::debug!("Read {} frame(s) from {}", count, path);
        Ok(images
            .into_iter()
            .map(|image| image.with_frame_count(count))
            .collect())
    }

    pub fn open(&self, path: impl AsRef<Path>) -> Result<Vec<Image>> {
        self.read(path)
    }

    /// Reads encoded image bytes. The data lives in a temp file that stays
    /// on disk while any of the returned images does.
    pub fn from_blob(&self, blob: &[u8]) -> Result<Vec<Image>> {
        let temp = self.temp_file()?;
        std::fs::write(&temp, blob)?;

        let images = self.read(&temp)?;
        let backing = Arc::new(temp);
        Ok(images
            .into_iter()
            .map(|image| image.with_backing(Arc::clone(&backing)))
            .collect())
    }

    pub fn image_list<P: AsRef<Path>>(&self, sources: &[P]) -> Result<ImageList> {
        ImageList::open(self, sources)
    }

    pub fn generate(&self, width: u32, height: u32, generator: &Generator) -> Result<Image> {
        Image::generated(self, width, height, generator)
    }

    pub fn solid(&self, width: u32, height: u32, color: Option<&str>) -> Result<Image> {
        self.generate(width, height, &Generator::Solid(color.map(str::to_string)))
    }

    pub fn gradient(
        &self,
        width: u32,
        height: u32,
        kind: GradientKind,
        from: Option<&str>,
        to: Option<&str>,
    ) -> Result<Image> {
        let generator = Generator::Gradient {
            kind,
            from: from.map(str::to_string),
            to: to.map(str::to_string),
        };
        self.generate(width, height, &generator)
    }

    pub fn pattern(&self, width: u32, height: u32, name: &str) -> Result<Image> {
        self.generate(width, height, &Generator::Pattern(name.to_string()))
    }
}

impl Default for Magick {
    fn default() -> Self {
        Self::new()
    }
}
