// quickmagick/src/main.rs
use anyhow::{bail, Context, Result};
use clap::Parser;
use log::LevelFilter;
use quickmagick::cli::{Cli, Commands, EditArgs};
use quickmagick::utils::{format_file_size, generate_output_path};
use quickmagick::{BatchProcessor, EditPlan, ImageList, Magick, MagickConfig};
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .init();

    let config = if cli.magick7 {
        MagickConfig::imagemagick7()
    } else {
        MagickConfig::default()
    };
    let magick = Magick::with_config(config)?;
    magick
        .check_installed()
        .context("ImageMagick is required but was not found")?;

    match cli.command {
        Commands::Info { inputs } => process_info(&magick, &inputs)?,
        Commands::Convert {
            inputs,
            output,
            edits,
        } => process_convert(&magick, &inputs, output.as_deref(), edits)?,
        Commands::Batch {
            input,
            output,
            threads,
            recursive,
            edits,
        } => process_batch(magick, &input, &output, threads, recursive, edits)?,
    }

    Ok(())
}

fn process_info(magick: &Magick, inputs: &[PathBuf]) -> Result<()> {
    for input in inputs {
        if !input.exists() {
            bail!("File does not exist: {}", input.display());
        }

        let images = magick
            .read(input)
            .with_context(|| format!("Failed to read {}", input.display()))?;

        println!("=== {} ===", input.display());
        if let Some(size) = images.first().and_then(|image| image.file_size()) {
            println!("Size: {}", format_file_size(size));
        }
        for image in &images {
            if let Some(info) = image.info()? {
                println!(
                    "[{}] {} {}x{} {}-bit {} colors",
                    image.frame(),
                    info.format,
                    info.width,
                    info.height,
                    info.bit_depth,
                    info.color_count
                );
            }
        }
    }

    Ok(())
}

fn process_convert(
    magick: &Magick,
    inputs: &[PathBuf],
    output: Option<&Path>,
    edits: EditArgs,
) -> Result<()> {
    let plan = EditPlan::from(edits);
    plan.validate()?;

    let output_path = match (output, &plan.format) {
        (Some(path), _) => path.to_path_buf(),
        (None, format) => {
            let generated = generate_output_path(&inputs[0], None, "converted");
            match format {
                Some(format) => generated.with_extension(format.to_lowercase()),
                None => generated,
            }
        }
    };

    let mut list = ImageList::open(magick, inputs).context("Failed to read inputs")?;
    plan.apply_to(&mut list)?;
    list.save(&output_path)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    println!(
        "Converted {} frame(s) into: {}",
        list.len(),
        output_path.display()
    );

    Ok(())
}

fn process_batch(
    magick: Magick,
    input: &Path,
    output: &Path,
    threads: usize,
    recursive: bool,
    edits: EditArgs,
) -> Result<()> {
    let processor = BatchProcessor::new(magick, EditPlan::from(edits), threads)?;
    let stats = processor.process_directory(input, output, recursive)?;

    println!(
        "Batch processing complete. Processed {} images to: {}",
        stats.processed_count,
        output.display()
    );
    println!(
        "Total size: {} -> {} ({:.1}% saved)",
        format_file_size(stats.total_size_before),
        format_file_size(stats.total_size_after),
        stats.savings()
    );
    for (file, error) in &stats.errors {
        eprintln!("Failed: {}: {}", file, error);
    }

    Ok(())
}
