// quickmagick/src/utils/mod.rs
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Extensions the batch command picks up.
pub const SUPPORTED_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "bmp", "tiff", "tif", "webp", "ico", "ppm", "pgm",
];

pub fn generate_output_path(input_path: &Path, output: Option<&Path>, suffix: &str) -> PathBuf {
    match output {
        Some(path) => path.to_path_buf(),
        None => {
            let stem = input_path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("image");
            let extension = input_path
                .extension()
                .and_then(|ext| ext.to_str())
                .unwrap_or("jpg");

            let timestamp = SystemTime::now()
                .duration_since(SystemTime::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0);

            let mut candidate =
                input_path.with_file_name(format!("{}_{}_{}.{}", stem, suffix, timestamp, extension));
            let mut counter = 1;

            // never overwrite an existing file
            while candidate.exists() {
                candidate = input_path.with_file_name(format!(
                    "{}_{}_{}_{}.{}",
                    stem, suffix, timestamp, counter, extension
                ));
                counter += 1;
            }

            candidate
        }
    }
}

/// `dir/<stem>.<ext>`, keeping the input extension when `format` is absent.
pub fn output_in_dir(input_path: &Path, output_dir: &Path, format: Option<&str>) -> Option<PathBuf> {
    let file_name = input_path.file_name()?;
    let target = output_dir.join(file_name);
    Some(match format {
        Some(format) => target.with_extension(format.to_lowercase()),
        None => target,
    })
}

pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let base = 1024_f64;
    let bytes_f64 = bytes as f64;
    let exponent = ((bytes_f64.log10() / base.log10()).floor() as usize).min(UNITS.len() - 1);
    let size = bytes_f64 / base.powi(exponent as i32);

    format!("{:.2} {}", size, UNITS[exponent])
}

pub fn is_supported_format(path: &Path) -> bool {
    get_file_extension(path)
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

pub fn get_file_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|s| s.to_lowercase())
}
