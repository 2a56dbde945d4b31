// quickmagick/src/image/info.rs
//! Parser for the one-line-per-frame output of `identify`, e.g.
//!
//! ```text
//! logo.png PNG 640x480 640x480+0+0 8-bit sRGB 256c 28.7KB 0.000u 0:00.000
//! ```
//!
//! Fields are positional: `[0]` filename, `[1]` format, `[2]` geometry,
//! `[4]` bit depth and `[6]` color count. Filenames containing spaces are
//! printed unquoted, so the leading tokens are glued back together until the
//! first field starts with the known source name.

use crate::core::{MagickError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInfo {
    pub filename: String,
    pub format: String,
    pub width: u32,
    pub height: u32,
    pub bit_depth: u32,
    pub color_count: u64,
}

impl ImageInfo {
    pub fn parse(line: &str, source: &str) -> Result<Self> {
        let fields = split_fields(line, source);
        if fields.len() < 3 {
            return Err(MagickError::MalformedInfoLine(line.to_string()));
        }

        let mut geometry = fields[2].splitn(2, 'x');
        let width = geometry.next().map(leading_number).unwrap_or(0);
        let height = geometry.next().map(leading_number).unwrap_or(0);

        Ok(Self {
            filename: fields[0].clone(),
            format: fields[1].clone(),
            width: clamp_u32(width),
            height: clamp_u32(height),
            bit_depth: clamp_u32(fields.get(4).map(|f| leading_number(f)).unwrap_or(0)),
            color_count: fields.get(6).map(|f| leading_number(f)).unwrap_or(0),
        })
    }
}

/// Splits on whitespace and re-joins the first tokens while they do not yet
/// start with `source`.
pub(crate) fn split_fields(line: &str, source: &str) -> Vec<String> {
    let mut fields: Vec<String> = line.split_whitespace().map(str::to_string).collect();
    while fields.len() > 1 && !fields[0].starts_with(source) {
        let second = fields.remove(1);
        fields[0] = format!("{} {}", fields[0], second);
    }
    fields
}

/// Value of the leading decimal digits, `0` when there are none
/// (`"8-bit"` is 8, `"256c"` is 256).
fn leading_number(field: &str) -> u64 {
    field
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .fold(0u64, |acc, c| {
            acc.saturating_mul(10)
                .saturating_add(u64::from(c.to_digit(10).unwrap_or(0)))
        })
}

fn clamp_u32(value: u64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_typical_line() {
        let info = ImageInfo::parse(
            "logo.png PNG 640x480 640x480+0+0 8-bit sRGB 256c 28.7KB 0.000u 0:00.000",
            "logo.png",
        )
        .unwrap();

        assert_eq!(info.filename, "logo.png");
        assert_eq!(info.format, "PNG");
        assert_eq!(info.width, 640);
        assert_eq!(info.height, 480);
        assert_eq!(info.bit_depth, 8);
        assert_eq!(info.color_count, 256);
    }

    #[test]
    fn repairs_filenames_with_spaces() {
        let line = "my holiday photo.jpg[0] JPEG 100x50 100x50+0+0 8-bit sRGB 4012c 5KB";
        let info = ImageInfo::parse(line, "my holiday photo.jpg").unwrap();
        assert_eq!(info.filename, "my holiday photo.jpg[0]");
        assert_eq!(info.format, "JPEG");
        assert_eq!(info.width, 100);
        assert_eq!(info.color_count, 4012);
    }

    #[test]
    fn second_frame_of_a_container() {
        let line = "multipage.tif[1] TIFF 464x300 464x300+0+0 16-bit sRGB 1.2MB";
        let info = ImageInfo::parse(line, "multipage.tif").unwrap();
        assert_eq!(info.width, 464);
        assert_eq!(info.bit_depth, 16);
        // field 6 is the file size here, leading digits only
        assert_eq!(info.color_count, 1);
    }

    #[test]
    fn missing_trailing_fields_default_to_zero() {
        let info = ImageInfo::parse("a.gif GIF 10x20", "a.gif").unwrap();
        assert_eq!(info.bit_depth, 0);
        assert_eq!(info.color_count, 0);
    }

    #[test]
    fn too_short_line_is_malformed() {
        assert!(matches!(
            ImageInfo::parse("a.gif GIF", "a.gif"),
            Err(MagickError::MalformedInfoLine(_))
        ));
        // source never matched: everything collapses into one field
        assert!(ImageInfo::parse("x.png PNG 1x1", "other.png").is_err());
    }

    #[test]
    fn leading_number_semantics() {
        assert_eq!(leading_number("8-bit"), 8);
        assert_eq!(leading_number("256c"), 256);
        assert_eq!(leading_number("sRGB"), 0);
        assert_eq!(leading_number(""), 0);
    }

    #[test]
    fn oversized_numbers_saturate() {
        let info = ImageInfo::parse(
            "huge.png PNG 4294967296x99999999999 4294967296x1+0+0 4294967297-bit sRGB 99999999999c 1KB",
            "huge.png",
        )
        .unwrap();
        assert_eq!(info.width, u32::MAX);
        assert_eq!(info.height, u32::MAX);
        assert_eq!(info.bit_depth, u32::MAX);
        assert_eq!(info.color_count, 99_999_999_999);
    }
}
