// quickmagick/src/cli.rs
use crate::core::EditPlan;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "quickmagick", version, about = "Drive the ImageMagick command-line tools")]
pub struct Cli {
    /// Enable debug logging (prints every ImageMagick command line)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Use the single `magick` binary of ImageMagick 7
    #[arg(long, global = true)]
    pub magick7: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show format, geometry, depth and colors of every frame
    Info {
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },

    /// Merge all frames of the inputs into one output
    Convert {
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output file; generated next to the first input when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        edits: EditArgs,
    },

    /// Convert every supported image in a directory
    Batch {
        input: PathBuf,

        output: PathBuf,

        /// Worker threads (0 = one per core)
        #[arg(short, long, default_value_t = 0)]
        threads: usize,

        #[arg(short, long)]
        recursive: bool,

        #[command(flatten)]
        edits: EditArgs,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct EditArgs {
    /// Resize geometry, e.g. 800x600, 50%, 300x300!
    #[arg(long)]
    pub resize: Option<String>,

    /// Crop geometry, e.g. 100x100+10+10
    #[arg(long)]
    pub crop: Option<String>,

    /// Rotation in degrees
    #[arg(long, allow_hyphen_values = true)]
    pub rotate: Option<f64>,

    /// Output format (batch only changes the extension)
    #[arg(short, long)]
    pub format: Option<String>,

    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=100))]
    pub quality: Option<u32>,

    /// Remove profiles and comments
    #[arg(long)]
    pub strip: bool,
}

impl From<EditArgs> for EditPlan {
    fn from(args: EditArgs) -> Self {
        EditPlan {
            resize: args.resize,
            crop: args.crop,
            rotate: args.rotate,
            format: args.format,
            quality: args.quality,
            strip: args.strip,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_convert_with_edits() {
        let cli = Cli::try_parse_from([
            "quickmagick", "convert", "a.png", "b.tif", "-o", "out.pdf", "--resize", "50%",
            "--rotate", "-90", "--strip",
        ])
        .unwrap();

        match cli.command {
            Commands::Convert {
                inputs,
                output,
                edits,
            } => {
                assert_eq!(inputs.len(), 2);
                assert_eq!(output, Some(PathBuf::from("out.pdf")));
                let plan = EditPlan::from(edits);
                assert_eq!(plan.resize.as_deref(), Some("50%"));
                assert_eq!(plan.rotate, Some(-90.0));
                assert!(plan.strip);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn quality_is_range_checked() {
        assert!(Cli::try_parse_from(["quickmagick", "batch", "in", "out", "-q", "0"]).is_err());
        assert!(Cli::try_parse_from(["quickmagick", "batch", "in", "out", "-q", "90"]).is_ok());
    }

    #[test]
    fn global_flags() {
        let cli = Cli::try_parse_from(["quickmagick", "info", "a.png", "--magick7", "-v"]).unwrap();
        assert!(cli.magick7);
        assert!(cli.verbose);
    }
}
