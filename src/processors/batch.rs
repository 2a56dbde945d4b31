// quickmagick/src/processors/batch.rs
use crate::core::magick::Magick;
use crate::core::{EditPlan, MagickError, ProcessingStats, Result};
use crate::image::ImageList;
use crate::utils::{is_supported_format, output_in_dir};
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Converts every supported file of a directory with the same edits. Each
/// file is read, edited and saved by its own `convert` call.
pub struct BatchProcessor {
    magick: Magick,
    plan: EditPlan,
    thread_pool: Option<rayon::ThreadPool>,
}

struct FileStats {
    size_before: u64,
    size_after: u64,
}

impl BatchProcessor {
    pub fn new(magick: Magick, plan: EditPlan, max_threads: usize) -> Result<Self> {
        plan.validate()?;

        let thread_pool = if max_threads > 0 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(max_threads)
                .build()
                .map_err(|e| {
                    MagickError::InvalidParameter(format!("Failed to create thread pool: {}", e))
                })?;
            Some(pool)
        } else {
            None
        };

        Ok(Self {
            magick,
            plan,
            thread_pool,
        })
    }

    pub fn process_directory(
        &self,
        input_dir: &Path,
        output_dir: &Path,
        recursive: bool,
    ) -> Result<ProcessingStats> {
        self.validate_paths(input_dir, output_dir)?;

        // Collect image files
        let image_paths = self.collect_image_paths(input_dir, recursive);
        if image_paths.is_empty() {
            log::warn!("No image files found in {}", input_dir.display());
            return Ok(ProcessingStats::default());
        }

        log::info!(
            "Processing {} images from {}",
            image_paths.len(),
            input_dir.display()
        );

        // Create output directory
        std::fs::create_dir_all(output_dir)?;

        // Create progress bar
        let pb = self.create_progress_bar(image_paths.len());

        // Process images in parallel
        let run = || -> Vec<(PathBuf, Result<FileStats>)> {
            image_paths
                .par_iter()
                .progress_with(pb.clone())
                .map(|input_path| {
                    let result = self.process_file(input_path, output_dir);
                    (input_path.clone(), result)
                })
                .collect()
        };

        let results = match &self.thread_pool {
            Some(pool) => pool.install(run),
            None => run(),
        };

        // Aggregate results
        let mut stats = ProcessingStats::default();
        for (path, result) in results {
            match result {
                Ok(file_stats) => {
                    stats.processed_count += 1;
                    stats.total_size_before += file_stats.size_before;
                    stats.total_size_after += file_stats.size_after;
                }
                Err(e) => {
                    log::warn!("Skipping {}: {}", path.display(), e);
                    stats.errors.push((path.display().to_string(), e.to_string()));
                }
            }
        }

        pb.finish_with_message(format!(
            "Processed {} images ({:.1}% size reduction)",
            stats.processed_count,
            stats.savings()
        ));

        Ok(stats)
    }

    fn process_file(&self, input_path: &Path, output_dir: &Path) -> Result<FileStats> {
        let output_path = output_in_dir(input_path, output_dir, self.plan.format.as_deref())
            .ok_or_else(|| {
                MagickError::InvalidParameter(format!(
                    "Invalid file name: {}",
                    input_path.display()
                ))
            })?;

        let mut list = ImageList::open(&self.magick, &[input_path])?;
        self.plan.apply_to(&mut list)?;
        list.save(&output_path)?;

        Ok(FileStats {
            size_before: std::fs::metadata(input_path)?.len(),
            size_after: std::fs::metadata(&output_path).map(|m| m.len()).unwrap_or(0),
        })
    }

    fn collect_image_paths(&self, input_dir: &Path, recursive: bool) -> Vec<PathBuf> {
        let walker = if recursive {
            WalkDir::new(input_dir)
        } else {
            WalkDir::new(input_dir).max_depth(1)
        };

        let mut paths: Vec<PathBuf> = walker
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| is_supported_format(entry.path()))
            .map(|entry| entry.into_path())
            .collect();
        paths.sort();
        paths
    }

    fn create_progress_bar(&self, total: usize) -> ProgressBar {
        let pb = ProgressBar::new(total as u64);
        if let Ok(style) = ProgressStyle::default_bar().template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}",
        ) {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb
    }

    pub fn validate_paths(&self, input_dir: &Path, output_dir: &Path) -> Result<()> {
        if !input_dir.exists() {
            return Err(MagickError::InvalidParameter(format!(
                "Input directory does not exist: {}",
                input_dir.display()
            )));
        }

        if !input_dir.is_dir() {
            return Err(MagickError::InvalidParameter(format!(
                "Input path is not a directory: {}",
                input_dir.display()
            )));
        }

        if output_dir.exists() && !output_dir.is_dir() {
            return Err(MagickError::InvalidParameter(format!(
                "Output path exists but is not a directory: {}",
                output_dir.display()
            )));
        }

        if input_dir == output_dir {
            return Err(MagickError::InvalidParameter(
                "Input and output directories cannot be the same".to_string(),
            ));
        }

        Ok(())
    }
}
